//! [CSSOM § 6.1 CSS Style Sheets](https://drafts.csswg.org/cssom/#css-style-sheets)
//!
//! A [`StyleSheet`] owns every rule in one arena. Rules refer to each other
//! by [`RuleId`]: a grouping rule lists the ids of its children and every
//! rule stores the id of its parent. A style rule owns its
//! [`DeclarationBlock`], and the block records the id of the rule that owns
//! it.

use petrel_common::warning::warn_once;

use crate::declaration::DeclarationBlock;
use crate::error::{CssError, Result};
use crate::parser::{AtRule, AtRuleBlock, ComponentValue, Declaration, Rule, StyleRule, parse_stylesheet};
use crate::serialize::{CssWriter, Mode, SerializeOptions, render_declarations};
use crate::values::normalize;

/// Index of a rule in its style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl RuleId {
    /// Position of the rule in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// At-rules whose block holds nested rules.
const GROUPING_RULES: &[&str] = &["media", "supports", "layer", "container", "document", "scope", "starting-style"];

/// At-rules without a block, kept as written.
const STATEMENT_RULES: &[&str] = &["import", "charset", "namespace", "layer"];

/// At-rules whose block holds descriptors, kept as written.
const DESCRIPTOR_RULES: &[&str] = &["font-face", "page", "counter-style", "font-palette-values"];

/// [CSS Properties and Values API § 3](https://www.w3.org/TR/css-properties-values-api-1/#at-property-rule)
///
/// "The @property rule represents a custom property registration directly
/// in a stylesheet ... The syntax and inherits descriptors are required
/// for the @property rule to be valid."
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDescriptors {
    /// `syntax`
    pub syntax: Option<Vec<ComponentValue>>,
    /// `inherits`
    pub inherits: Option<Vec<ComponentValue>>,
    /// `initial-value`
    pub initial_value: Option<Vec<ComponentValue>>,
}

impl PropertyDescriptors {
    const NAMES: [&'static str; 3] = ["syntax", "inherits", "initial-value"];

    fn slot(&mut self, name: &str) -> Option<&mut Option<Vec<ComponentValue>>> {
        match name {
            "syntax" => Some(&mut self.syntax),
            "inherits" => Some(&mut self.inherits),
            "initial-value" => Some(&mut self.initial_value),
            _ => None,
        }
    }

    fn get(&self, name: &str) -> Option<&[ComponentValue]> {
        match name {
            "syntax" => self.syntax.as_deref(),
            "inherits" => self.inherits.as_deref(),
            "initial-value" => self.initial_value.as_deref(),
            _ => None,
        }
    }

    fn is_valid(&self) -> bool {
        self.syntax.is_some() && self.inherits.is_some()
    }
}

/// What a rule is.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// `selector { declarations }`
    Style {
        /// The selector list as written.
        selector: Vec<ComponentValue>,
        /// The rule's declarations.
        declarations: DeclarationBlock,
    },
    /// `@media`, `@supports`, ... containing other rules.
    Grouping {
        /// At-keyword name without the `@`.
        name: String,
        /// Condition as written.
        prelude: Vec<ComponentValue>,
        /// Child rules in order.
        children: Vec<RuleId>,
    },
    /// `@property --name { ... }`
    Property {
        /// The registered custom property name.
        name: String,
        /// The three descriptors.
        descriptors: PropertyDescriptors,
    },
    /// `@font-face`, `@page`, ... kept as written.
    Descriptors {
        /// At-keyword name without the `@`.
        name: String,
        /// Prelude as written.
        prelude: Vec<ComponentValue>,
        /// Descriptors in order.
        declarations: Vec<Declaration>,
    },
    /// `@import`, `@charset`, `@namespace`, `@layer a, b;`
    Statement {
        /// At-keyword name without the `@`.
        name: String,
        /// Prelude as written.
        prelude: Vec<ComponentValue>,
    },
}

/// One rule in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    /// The grouping rule containing this one, if any.
    pub parent: Option<RuleId>,
    /// The rule itself.
    pub kind: RuleKind,
}

/// A parsed style sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<CssRule>,
    top_level: Vec<RuleId>,
    options: SerializeOptions,
}

impl StyleSheet {
    /// Parse a style sheet with default serialization options.
    ///
    /// Never fails; rules and declarations that cannot be kept are dropped
    /// with a warning.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        Self::parse_with(css, SerializeOptions::default())
    }

    /// Parse a style sheet that serializes with `options`.
    #[must_use]
    pub fn parse_with(css: &str, options: SerializeOptions) -> Self {
        let mut sheet = Self {
            options,
            ..Self::default()
        };
        let parsed = parse_stylesheet(css);
        for rule in &parsed.rules {
            if let Some(id) = sheet.add_rule(rule, None) {
                sheet.top_level.push(id);
            }
        }
        sheet
    }

    fn push(&mut self, parent: Option<RuleId>, kind: RuleKind) -> RuleId {
        let id = RuleId(self.rules.len());
        self.rules.push(CssRule { parent, kind });
        id
    }

    fn add_rule(&mut self, rule: &Rule, parent: Option<RuleId>) -> Option<RuleId> {
        match rule {
            Rule::Style(style) => Some(self.add_style_rule(style, parent)),
            Rule::At(at) => self.add_at_rule(at, parent),
        }
    }

    fn add_style_rule(&mut self, style: &StyleRule, parent: Option<RuleId>) -> RuleId {
        let id = RuleId(self.rules.len());
        let mut declarations = DeclarationBlock::with_owner(id);
        declarations.append_declarations(&style.declarations);
        self.push(
            parent,
            RuleKind::Style {
                selector: normalize(&style.prelude),
                declarations,
            },
        )
    }

    fn add_at_rule(&mut self, at: &AtRule, parent: Option<RuleId>) -> Option<RuleId> {
        let name = at.name.to_ascii_lowercase();
        let key = name.clone();
        let prelude = normalize(&at.prelude);

        match (&at.block, key.as_str()) {
            (Some(AtRuleBlock::Rules(children)), n) if GROUPING_RULES.contains(&n) => {
                let id = self.push(
                    parent,
                    RuleKind::Grouping {
                        name,
                        prelude,
                        children: Vec::new(),
                    },
                );
                let child_ids: Vec<RuleId> = children
                    .iter()
                    .filter_map(|child| self.add_rule(child, Some(id)))
                    .collect();
                if let RuleKind::Grouping { children, .. } = &mut self.rules[id.0].kind {
                    *children = child_ids;
                }
                Some(id)
            }
            (Some(AtRuleBlock::Declarations(declarations)), "property") => {
                self.add_property_rule(&prelude, declarations, parent)
            }
            (Some(AtRuleBlock::Declarations(declarations)), n) if DESCRIPTOR_RULES.contains(&n) => Some(self.push(
                parent,
                RuleKind::Descriptors {
                    name,
                    prelude,
                    declarations: declarations.clone(),
                },
            )),
            (None, n) if STATEMENT_RULES.contains(&n) => Some(self.push(parent, RuleKind::Statement { name, prelude })),
            _ => {
                warn_once("CSS", &format!("unsupported at-rule @{name}"));
                None
            }
        }
    }

    fn add_property_rule(
        &mut self,
        prelude: &[ComponentValue],
        declarations: &[Declaration],
        parent: Option<RuleId>,
    ) -> Option<RuleId> {
        let Some(name) = (match prelude {
            [single] => single.as_ident().filter(|name| name.starts_with("--")),
            _ => None,
        }) else {
            warn_once("CSS", "@property needs a single custom property name");
            return None;
        };

        let mut descriptors = PropertyDescriptors::default();
        for declaration in declarations {
            let descriptor = declaration.name.to_ascii_lowercase();
            match descriptors.slot(&descriptor) {
                Some(slot) => *slot = Some(normalize(&declaration.value)),
                None => warn_once("CSS", &format!("unknown @property descriptor '{}'", declaration.name)),
            }
        }
        if !descriptors.is_valid() {
            warn_once("CSS", &format!("@property {name} is missing syntax or inherits"));
            return None;
        }
        Some(self.push(
            parent,
            RuleKind::Property {
                name: name.to_string(),
                descriptors,
            },
        ))
    }

    /// Ids of the top-level rules, in order.
    #[must_use]
    pub fn top_level(&self) -> &[RuleId] {
        &self.top_level
    }

    /// Every rule in the arena, in creation order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &CssRule)> {
        self.rules.iter().enumerate().map(|(index, rule)| (RuleId(index), rule))
    }

    /// The rule with id `id`.
    ///
    /// # Errors
    ///
    /// [`CssError::UnknownRule`] if there is no such rule.
    pub fn rule(&self, id: RuleId) -> Result<&CssRule> {
        self.rules.get(id.0).ok_or(CssError::UnknownRule(id.0))
    }

    /// The declarations of a style rule.
    ///
    /// # Errors
    ///
    /// [`CssError::UnknownRule`] if there is no such rule, and
    /// [`CssError::InvalidModification`] if it is not a style rule.
    pub fn style(&self, id: RuleId) -> Result<&DeclarationBlock> {
        match &self.rule(id)?.kind {
            RuleKind::Style { declarations, .. } => Ok(declarations),
            _ => Err(not_a_style_rule(id)),
        }
    }

    /// Mutable access to the declarations of a style rule.
    ///
    /// # Errors
    ///
    /// As [`StyleSheet::style`].
    pub fn style_mut(&mut self, id: RuleId) -> Result<&mut DeclarationBlock> {
        let rule = self.rules.get_mut(id.0).ok_or(CssError::UnknownRule(id.0))?;
        match &mut rule.kind {
            RuleKind::Style { declarations, .. } => Ok(declarations),
            _ => Err(not_a_style_rule(id)),
        }
    }

    fn descriptors_mut(&mut self, id: RuleId) -> Result<&mut PropertyDescriptors> {
        let rule = self.rules.get_mut(id.0).ok_or(CssError::UnknownRule(id.0))?;
        match &mut rule.kind {
            RuleKind::Property { descriptors, .. } => Ok(descriptors),
            _ => Err(CssError::InvalidModification(format!("rule {} is not an @property rule", id.0))),
        }
    }

    /// The text of an `@property` descriptor, or `None` when unset.
    ///
    /// # Errors
    ///
    /// [`CssError::UnknownRule`] for a missing rule and
    /// [`CssError::InvalidModification`] for a rule that is not `@property`
    /// or an unknown descriptor name.
    pub fn descriptor(&self, id: RuleId, name: &str) -> Result<Option<String>> {
        let RuleKind::Property { descriptors, .. } = &self.rule(id)?.kind else {
            return Err(CssError::InvalidModification(format!("rule {} is not an @property rule", id.0)));
        };
        let name = name.to_ascii_lowercase();
        if !PropertyDescriptors::NAMES.contains(&name.as_str()) {
            return Err(unknown_descriptor(&name));
        }
        Ok(descriptors.get(&name).map(crate::serialize::value_to_string))
    }

    /// Set a descriptor of an `@property` rule.
    ///
    /// # Errors
    ///
    /// [`CssError::InvalidModification`] for an unknown descriptor or a rule
    /// that is not `@property`, [`CssError::EmptyValue`] for an empty value.
    pub fn set_descriptor(&mut self, id: RuleId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let descriptors = self.descriptors_mut(id)?;
        let slot = descriptors.slot(&name).ok_or_else(|| unknown_descriptor(&name))?;
        let value = normalize(&crate::parser::parse_value(value).0);
        if value.is_empty() {
            return Err(CssError::EmptyValue(name));
        }
        *slot = Some(value);
        Ok(())
    }

    /// Remove a descriptor of an `@property` rule.
    ///
    /// # Errors
    ///
    /// [`CssError::InvalidModification`] when removing `syntax` or
    /// `inherits`, which the rule cannot do without, or for an unknown
    /// descriptor.
    pub fn remove_descriptor(&mut self, id: RuleId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let descriptors = self.descriptors_mut(id)?;
        match name.as_str() {
            "syntax" | "inherits" => Err(CssError::InvalidModification(format!(
                "the {name} descriptor of @property cannot be removed"
            ))),
            _ => {
                let slot = descriptors.slot(&name).ok_or_else(|| unknown_descriptor(&name))?;
                *slot = None;
                Ok(())
            }
        }
    }

    /// Serialization options of this sheet.
    #[must_use]
    pub const fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Formatted text: one declaration per line, nested rules indented,
    /// each rule followed by a newline.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for &id in &self.top_level {
            self.write_rule(&mut out, id, Mode::Formatted, 0);
        }
        out
    }

    /// Minified text.
    #[must_use]
    pub fn minified_css_text(&self) -> String {
        let mut out = String::new();
        for &id in &self.top_level {
            self.write_rule(&mut out, id, Mode::Minified, 0);
        }
        out
    }

    fn prelude_text(&self, prelude: &[ComponentValue], mode: Mode) -> String {
        let mut writer = CssWriter::new(mode, &self.options);
        writer.write_values(prelude);
        writer.finish()
    }

    fn write_rule(&self, out: &mut String, id: RuleId, mode: Mode, depth: usize) {
        let Some(rule) = self.rules.get(id.0) else {
            return;
        };
        let indent = self.options.indent.repeat(depth);
        match &rule.kind {
            RuleKind::Style { selector, declarations } => {
                let lines: Vec<(String, bool)> = render_declarations(declarations.entries(), mode, &self.options)
                    .into_iter()
                .map(|declaration| (declaration.text, declaration.ends_with_escape))
                .collect();
                let head = self.prelude_text(selector, mode);
                self.write_block(out, &head, &lines, mode, depth);
            }
            RuleKind::Grouping { name, prelude, children } => {
                let head = at_head(name, &self.prelude_text(prelude, mode));
                match mode {
                    Mode::Formatted => {
                        out.push_str(&format!("{indent}{head} {{\n"));
                        for &child in children {
                            self.write_rule(out, child, mode, depth + 1);
                        }
                        out.push_str(&format!("{indent}}}\n"));
                    }
                    Mode::Minified => {
                        out.push_str(&format!("{head}{{"));
                        for &child in children {
                            self.write_rule(out, child, mode, depth + 1);
                        }
                        out.push('}');
                    }
                }
            }
            RuleKind::Property { name, descriptors } => {
                let lines: Vec<(String, bool)> = PropertyDescriptors::NAMES
                    .iter()
                    .filter_map(|descriptor| Some((*descriptor, descriptors.get(descriptor)?)))
                    .map(|(descriptor, value)| self.descriptor_line(descriptor, value, mode))
                    .collect();
                self.write_block(out, &format!("@property {name}"), &lines, mode, depth);
            }
            RuleKind::Descriptors {
                name,
                prelude,
                declarations,
            } => {
                let lines: Vec<(String, bool)> = declarations
                    .iter()
                    .map(|declaration| {
                        let (text, escape) =
                            self.descriptor_line(&declaration.name, &normalize(&declaration.value), mode);
                        if declaration.important {
                            (format!("{text} !important"), false)
                        } else {
                            (text, escape)
                        }
                    })
                    .collect();
                let head = at_head(name, &self.prelude_text(prelude, mode));
                self.write_block(out, &head, &lines, mode, depth);
            }
            RuleKind::Statement { name, prelude } => {
                let head = at_head(name, &self.prelude_text(prelude, mode));
                match mode {
                    Mode::Formatted => out.push_str(&format!("{indent}{head};\n")),
                    Mode::Minified => out.push_str(&format!("{head};")),
                }
            }
        }
    }

    fn descriptor_line(&self, name: &str, value: &[ComponentValue], mode: Mode) -> (String, bool) {
        let mut writer = CssWriter::new(mode, &self.options);
        writer.write_ident(name);
        writer.push_str(match mode {
            Mode::Formatted => ": ",
            Mode::Minified => ":",
        });
        writer.write_values(value);
        let escape = writer.ends_with_escape();
        (writer.finish(), escape)
    }

    /// `head { line; line; }` with the final `;` dropped when minified,
    /// unless the last line ends in an escape.
    fn write_block(&self, out: &mut String, head: &str, lines: &[(String, bool)], mode: Mode, depth: usize) {
        let indent = self.options.indent.repeat(depth);
        match mode {
            Mode::Formatted => {
                if lines.is_empty() {
                    out.push_str(&format!("{indent}{head} {{}}\n"));
                    return;
                }
                out.push_str(&format!("{indent}{head} {{\n"));
                let inner = self.options.indent.repeat(depth + 1);
                for (text, _) in lines {
                    out.push_str(&format!("{inner}{text};\n"));
                }
                out.push_str(&format!("{indent}}}\n"));
            }
            Mode::Minified => {
                out.push_str(head);
                out.push('{');
                for (position, (text, ends_with_escape)) in lines.iter().enumerate() {
                    out.push_str(text);
                    if position + 1 < lines.len() || *ends_with_escape {
                        out.push(';');
                    }
                }
                out.push('}');
            }
        }
    }
}

fn at_head(name: &str, prelude: &str) -> String {
    if prelude.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name} {prelude}")
    }
}

fn not_a_style_rule(id: RuleId) -> CssError {
    CssError::InvalidModification(format!("rule {} is not a style rule", id.0))
}

fn unknown_descriptor(name: &str) -> CssError {
    CssError::InvalidModification(format!("@property has no '{name}' descriptor"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_parse(css: &str) -> StyleSheet {
        petrel_common::warning::set_quiet(true);
        StyleSheet::parse(css)
    }

    #[test]
    fn test_arena_parent_links() {
        let sheet = quiet_parse("@media screen { a { color: red } b { color: blue } } p { margin: 0 }");
        let top = sheet.top_level();
        assert_eq!(top.len(), 2);
        let RuleKind::Grouping { children, .. } = &sheet.rule(top[0]).unwrap().kind else {
            panic!("expected a grouping rule");
        };
        assert_eq!(children.len(), 2);
        for &child in children {
            assert_eq!(sheet.rule(child).unwrap().parent, Some(top[0]));
            assert_eq!(sheet.style(child).unwrap().owner(), Some(child));
        }
        assert_eq!(sheet.rule(top[1]).unwrap().parent, None);
    }

    #[test]
    fn test_formatted_text() {
        let sheet = quiet_parse("a{margin-top:1px;margin-right:1px;margin-bottom:1px;margin-left:1px;color:red}");
        assert_eq!(sheet.css_text(), "a {\n    margin: 1px;\n    color: red;\n}\n");
    }

    #[test]
    fn test_minified_drops_last_semicolon() {
        let sheet = quiet_parse("a { color: red; width: 1px } @media print { b { color: blue } }");
        assert_eq!(sheet.minified_css_text(), "a{color:red;width:1px}@media print{b{color:blue}}");
    }

    #[test]
    fn test_minified_keeps_semicolon_after_escape() {
        let sheet = quiet_parse(r"a { color: red\9 }");
        assert_eq!(sheet.minified_css_text(), r"a{color:red\9;}");
    }

    #[test]
    fn test_property_rule_descriptors() {
        let mut sheet = quiet_parse("@property --x { syntax: '<length>'; inherits: false; initial-value: 0px }");
        let id = sheet.top_level()[0];
        assert_eq!(sheet.descriptor(id, "syntax").unwrap().as_deref(), Some("'<length>'"));

        sheet.set_descriptor(id, "initial-value", "4px").unwrap();
        assert_eq!(sheet.descriptor(id, "initial-value").unwrap().as_deref(), Some("4px"));
        sheet.remove_descriptor(id, "initial-value").unwrap();
        assert_eq!(sheet.descriptor(id, "initial-value").unwrap(), None);

        assert!(matches!(
            sheet.set_descriptor(id, "color", "red"),
            Err(CssError::InvalidModification(_))
        ));
        assert!(matches!(
            sheet.remove_descriptor(id, "syntax"),
            Err(CssError::InvalidModification(_))
        ));
        assert!(matches!(
            sheet.remove_descriptor(id, "inherits"),
            Err(CssError::InvalidModification(_))
        ));
        assert_eq!(
            sheet.css_text(),
            "@property --x {\n    syntax: '<length>';\n    inherits: false;\n}\n"
        );
    }

    #[test]
    fn test_invalid_property_rule_dropped() {
        let sheet = quiet_parse("@property --x { syntax: '*' }");
        assert!(sheet.top_level().is_empty());
    }

    #[test]
    fn test_unknown_rule_id() {
        let sheet = quiet_parse("a { color: red }");
        assert_eq!(sheet.rule(RuleId(7)).unwrap_err(), CssError::UnknownRule(7));
    }

    #[test]
    fn test_statement_rules_kept() {
        let sheet = quiet_parse("@import url(a.css) screen; a { color: red }");
        assert_eq!(sheet.minified_css_text(), "@import url(a.css) screen;a{color:red}");
    }
}
