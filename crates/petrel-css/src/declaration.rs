//! [CSSOM § 6.6 CSS Declaration Blocks](https://drafts.csswg.org/cssom/#css-declaration-blocks)
//!
//! "A CSS declaration block is an ordered collection of CSS properties
//! with their associated values, also named CSS declarations."
//!
//! A [`DeclarationBlock`] stores longhands only. Setting a shorthand stores
//! the longhands it expands to; reading or serializing the block rebuilds
//! shorthands through [`crate::builder`] every time, so the entries are the
//! only state.

use core::fmt;

use petrel_common::warning::warn_once;

use crate::builder::{BlockView, ShorthandOutcome, build};
use crate::error::{CssError, Result};
use crate::parser::{ComponentValue, Declaration, parse_declaration_list, parse_value};
use crate::properties::PropertyId;
use crate::serialize::{Mode, SerializeOptions, block_text, property_value_to_string};
use crate::shorthands::expand;
use crate::stylesheet::RuleId;
use crate::values::{PropertyValue, normalize};

/// One stored longhand.
#[derive(Debug, Clone, PartialEq)]
pub struct LonghandEntry {
    /// Canonical property name (lowercase, except custom properties).
    pub name: String,
    /// The stored value.
    pub value: PropertyValue,
    /// Whether the declaration is `!important`.
    pub important: bool,
    /// When the entry was first added to its block.
    pub source_order: usize,
}

/// An ordered set of longhand declarations with unique names.
///
/// [CSSOM § 6.6](https://drafts.csswg.org/cssom/#css-declaration-blocks)
///
/// "The CSS declaration block has the following associated properties:
/// ... owner node ... parent CSS rule ... declarations."
///
/// A later write to an existing name replaces its value and priority in
/// place; a new name is appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBlock {
    entries: Vec<LonghandEntry>,
    next_order: usize,
    owner: Option<RuleId>,
}

impl DeclarationBlock {
    /// An empty block with no owning rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty block owned by `owner`.
    #[must_use]
    pub fn with_owner(owner: RuleId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// [CSSOM § 6.6 parse a CSS declaration block](https://drafts.csswg.org/cssom/#parse-a-css-declaration-block)
    ///
    /// Parse the contents of a `style` attribute or rule body. Declarations
    /// that cannot be stored are dropped with a warning.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        let mut block = Self::new();
        block.append_declarations(&parse_declaration_list(css));
        block
    }

    /// Store parsed declarations in order, dropping invalid ones.
    pub fn append_declarations(&mut self, declarations: &[Declaration]) {
        for declaration in declarations {
            if let Err(err) = self.set_components(&declaration.name, &declaration.value, declaration.important) {
                warn_once("CSS", &format!("dropped declaration: {err}"));
            }
        }
    }

    /// [CSSOM § 6.6.1 setProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// "If value is the empty string, invoke removeProperty() with property
    /// as argument and return."
    ///
    /// # Errors
    ///
    /// [`CssError::UnknownProperty`] for a name that is not a known, custom
    /// or vendor-prefixed property, and [`CssError::InvalidValue`] when the
    /// value does not parse for the property. The block is unchanged on
    /// error.
    pub fn set_property(&mut self, name: &str, value: &str, important: bool) -> Result<()> {
        let (values, flagged) = parse_value(value);
        if flagged {
            return Err(CssError::InvalidValue {
                property: name.to_string(),
                value: value.to_string(),
            });
        }
        if normalize(&values).is_empty() {
            let _removed = self.remove_property(name);
            return Ok(());
        }
        self.set_components(name, &values, important)
    }

    /// Set a property from parsed component values.
    ///
    /// # Errors
    ///
    /// As [`DeclarationBlock::set_property`], plus [`CssError::EmptyValue`]
    /// for an empty value.
    pub fn set_components(&mut self, name: &str, values: &[ComponentValue], important: bool) -> Result<()> {
        let id = PropertyId::parse(name).ok_or_else(|| CssError::UnknownProperty(name.to_string()))?;
        match id {
            PropertyId::Shorthand(spec) => {
                for (longhand, value) in expand(spec, values)? {
                    self.set_entry(longhand.to_string(), value, important);
                }
            }
            PropertyId::Longhand(_) | PropertyId::Custom(_) | PropertyId::Vendor(_) => {
                let value =
                    PropertyValue::from_components(values).ok_or_else(|| CssError::EmptyValue(id.canonical_name()))?;
                self.set_entry(id.canonical_name(), value, important);
            }
        }
        Ok(())
    }

    /// Store an already-classified value for a longhand.
    ///
    /// # Errors
    ///
    /// [`CssError::UnknownProperty`] for an unknown name and
    /// [`CssError::InvalidModification`] for a shorthand name.
    pub fn set_longhand(&mut self, name: &str, value: PropertyValue, important: bool) -> Result<()> {
        match PropertyId::parse(name) {
            None => Err(CssError::UnknownProperty(name.to_string())),
            Some(PropertyId::Shorthand(spec)) => Err(CssError::InvalidModification(format!(
                "{} is a shorthand and has no value of its own",
                spec.name
            ))),
            Some(id) => {
                self.set_entry(id.canonical_name(), value, important);
                Ok(())
            }
        }
    }

    fn set_entry(&mut self, name: String, value: PropertyValue, important: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            entry.value = value;
            entry.important = important;
            return;
        }
        self.entries.push(LonghandEntry {
            name,
            value,
            important,
            source_order: self.next_order,
        });
        self.next_order += 1;
    }

    /// [CSSOM § 6.6.1 removeProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-removeproperty)
    ///
    /// "Let value be the return value of invoking getPropertyValue() with
    /// property as argument. ... If property is a shorthand property, for
    /// each longhand property longhand that property maps to ... remove"
    ///
    /// Returns the value the property had, or the empty string.
    pub fn remove_property(&mut self, name: &str) -> String {
        let Some(id) = PropertyId::parse(name) else {
            return String::new();
        };
        let value = self.get_property_value(name);
        match id {
            PropertyId::Shorthand(spec) => self.entries.retain(|entry| !spec.contains(&entry.name)),
            _ => {
                let name = id.canonical_name();
                self.entries.retain(|entry| entry.name != name);
            }
        }
        value
    }

    /// [CSSOM § 6.6.1 getPropertyValue()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// "If property is a shorthand property, then follow these substeps: ...
    /// If important flags of all declarations in list are same, then return
    /// the serialization of list. Return the empty string."
    ///
    /// A shorthand only has a value when it can stand for its longhands
    /// without any override.
    #[must_use]
    pub fn get_property_value(&self, name: &str) -> String {
        match PropertyId::parse(name) {
            Some(PropertyId::Shorthand(spec)) => match build(spec, &BlockView::new(&self.entries)) {
                ShorthandOutcome::Collapsed { value, overrides, .. } if overrides.is_empty() => {
                    property_value_to_string(&value)
                }
                _ => String::new(),
            },
            Some(id) => self
                .get(&id.canonical_name())
                .map(|entry| property_value_to_string(&entry.value))
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    /// [CSSOM § 6.6.1 getPropertyPriority()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertypriority)
    ///
    /// "If property is a shorthand property ... If all longhand properties
    /// ... are important, return the string "important"."
    #[must_use]
    pub fn get_property_priority(&self, name: &str) -> &'static str {
        let important = match PropertyId::parse(name) {
            Some(PropertyId::Shorthand(spec)) => spec
                .longhands
                .iter()
                .all(|longhand| self.get(longhand).is_some_and(|entry| entry.important)),
            Some(id) => self.get(&id.canonical_name()).is_some_and(|entry| entry.important),
            None => false,
        };
        if important { "important" } else { "" }
    }

    /// The entry stored under a canonical longhand name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LonghandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in block order, as a slice.
    #[must_use]
    pub fn entries(&self) -> &[LonghandEntry] {
        &self.entries
    }

    /// Entries in block order.
    pub fn iter(&self) -> impl Iterator<Item = &LonghandEntry> {
        self.entries.iter()
    }

    /// Number of stored longhands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no longhand is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The rule that owns this block, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<RuleId> {
        self.owner
    }

    /// [CSSOM § 6.6.1 cssText](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    ///
    /// "Setting the cssText attribute must run these steps: ... Empty the
    /// declarations. Parse the given value and, if the return value is not
    /// the empty list, insert the items in the list into the declarations,
    /// in specified order."
    pub fn set_css_text(&mut self, css: &str) {
        self.entries.clear();
        self.append_declarations(&parse_declaration_list(css));
    }

    /// Formatted text with default options.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.css_text_with(&SerializeOptions::default())
    }

    /// Formatted text.
    #[must_use]
    pub fn css_text_with(&self, options: &SerializeOptions) -> String {
        block_text(&self.entries, Mode::Formatted, options)
    }

    /// Minified text with default options.
    #[must_use]
    pub fn minified_css_text(&self) -> String {
        self.minified_css_text_with(&SerializeOptions::default())
    }

    /// Minified text.
    #[must_use]
    pub fn minified_css_text_with(&self, options: &SerializeOptions) -> String {
        block_text(&self.entries, Mode::Minified, options)
    }

    /// True if both blocks hold the same longhands with equivalent values
    /// and priorities, in any order.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.entries.iter().all(|entry| {
                other.get(&entry.name).is_some_and(|theirs| {
                    theirs.important == entry.important && theirs.value.equivalent(&entry.value)
                })
            })
    }
}

impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::GlobalKeyword;

    #[test]
    fn test_later_write_replaces_in_place() {
        let block = DeclarationBlock::parse("color: red; width: 1px; color: blue !important");
        let names: Vec<_> = block.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["color", "width"]);
        assert_eq!(block.get_property_value("color"), "blue");
        assert_eq!(block.get_property_priority("color"), "important");
    }

    #[test]
    fn test_set_shorthand_stores_longhands() {
        let mut block = DeclarationBlock::new();
        block.set_property("margin", "1px 2px", false).unwrap();
        assert_eq!(block.len(), 4);
        assert_eq!(block.get_property_value("margin-left"), "2px");
        assert_eq!(block.get_property_value("margin"), "1px 2px");
    }

    #[test]
    fn test_invalid_value_leaves_block_unchanged() {
        let mut block = DeclarationBlock::parse("margin: 1px");
        let err = block.set_property("margin", "1px 2px 3px 4px 5px", false).unwrap_err();
        assert!(matches!(err, CssError::InvalidValue { .. }));
        assert_eq!(block.get_property_value("margin"), "1px");
    }

    #[test]
    fn test_unknown_property() {
        let mut block = DeclarationBlock::new();
        assert_eq!(
            block.set_property("colr", "red", false),
            Err(CssError::UnknownProperty("colr".to_string()))
        );
        assert!(block.set_property("-webkit-thing", "x", false).is_ok());
        assert!(block.set_property("--Brand", "Blue", false).is_ok());
        assert!(block.get("--Brand").is_some());
        assert!(block.get("--brand").is_none());
    }

    #[test]
    fn test_empty_value_removes() {
        let mut block = DeclarationBlock::parse("color: red");
        block.set_property("color", "  ", false).unwrap();
        assert!(block.is_empty());
    }

    #[test]
    fn test_remove_shorthand_returns_value() {
        let mut block = DeclarationBlock::parse("padding: 1px; color: red");
        assert_eq!(block.remove_property("padding"), "1px");
        assert_eq!(block.len(), 1);
        assert_eq!(block.remove_property("padding"), "");
    }

    #[test]
    fn test_shorthand_with_override_has_no_value() {
        let block = DeclarationBlock::parse("padding: 1px; padding-top: 2px !important");
        assert_eq!(block.get_property_value("padding"), "");
        assert_eq!(block.get_property_priority("padding"), "");
    }

    #[test]
    fn test_set_longhand_rejects_shorthand() {
        let mut block = DeclarationBlock::new();
        let keyword = PropertyValue::Keyword(GlobalKeyword::Inherit);
        assert!(matches!(
            block.set_longhand("margin", keyword.clone(), false),
            Err(CssError::InvalidModification(_))
        ));
        block.set_longhand("Margin-Top", keyword, true).unwrap();
        assert_eq!(block.get_property_value("margin-top"), "inherit");
    }

    #[test]
    fn test_set_css_text_replaces_everything() {
        let mut block = DeclarationBlock::parse("color: red");
        block.set_css_text("width: 1px");
        assert_eq!(block.css_text(), "width: 1px;");
    }
}
