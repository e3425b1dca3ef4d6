//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//! The parser produces component-value trees; deciding what a declaration
//! *means* is left to [`crate::declaration`] and [`crate::shorthands`].

use crate::tokenizer::{CSSToken, CSSTokenizer};

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red !important`).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name as written.
    pub name: String,
    /// The property value as component values, without `!important`.
    pub value: Vec<ComponentValue>,
    /// Whether the declaration has `!important`.
    pub important: bool,
}

/// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
///
/// A component value in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl ComponentValue {
    /// Wrap a token.
    #[must_use]
    pub const fn token(token: CSSToken) -> Self {
        Self::Token(token)
    }

    /// The identifier, if this is an `<ident-token>`.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Token(CSSToken::Ident(ident)) => Some(ident),
            _ => None,
        }
    }

    /// True if this is an `<ident-token>` matching `keyword` ASCII
    /// case-insensitively.
    #[must_use]
    pub fn is_ident(&self, keyword: &str) -> bool {
        self.as_ident().is_some_and(|ident| ident.eq_ignore_ascii_case(keyword))
    }

    /// True for a `<whitespace-token>`.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Whitespace))
    }

    /// True for a `<comma-token>`.
    #[must_use]
    pub const fn is_comma(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Comma))
    }

    /// True for a `/` delimiter.
    #[must_use]
    pub const fn is_slash(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Delim('/')))
    }

    /// The function name, if this is a function.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Function { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A CSS style rule (selector prelude + declarations).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The prelude (selector list) as component values.
    pub prelude: Vec<ComponentValue>,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
}

/// The contents of an at-rule's `{}` block.
#[derive(Debug, Clone, PartialEq)]
pub enum AtRuleBlock {
    /// A block of nested rules (`@media`, `@supports`, ...).
    Rules(Vec<Rule>),
    /// A block of descriptors (`@property`, `@font-face`, `@page`, ...).
    Declarations(Vec<Declaration>),
}

/// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
///
/// A CSS at-rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// The at-keyword name (without the `@`).
    pub name: String,
    /// The prelude component values.
    pub prelude: Vec<ComponentValue>,
    /// The optional block contents.
    pub block: Option<AtRuleBlock>,
}

/// A CSS rule (either a style rule or an at-rule).
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A style rule (qualified rule).
    Style(StyleRule),
    /// An at-rule.
    At(AtRule),
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet.
    pub rules: Vec<Rule>,
}

/// At-rules whose block holds nested rules rather than declarations.
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer", "container", "document", "scope", "starting-style"];

/// CSS parser
pub struct CSSParser {
    tokens: Vec<CSSToken>,
    position: usize,
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    pub const fn new(tokens: Vec<CSSToken>) -> Self {
        Self { tokens, position: 0 }
    }

    /// Tokenize and wrap `css` in one step.
    #[must_use]
    pub fn from_css(css: &str) -> Self {
        Self::new(CSSTokenizer::tokenize(css))
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        Stylesheet {
            rules: self.consume_list_of_rules(true),
        }
    }

    /// [§ 5.3.8 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or similar.
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        loop {
            declarations.extend(self.consume_list_of_declarations());
            // A stray `}` ends a nested block but not a top-level list.
            match self.peek() {
                Some(CSSToken::RightBrace) => {
                    let _ = self.consume();
                }
                _ => return declarations,
            }
        }
    }

    /// [§ 5.3.10 Parse a list of component values](https://www.w3.org/TR/css-syntax-3/#parse-list-of-component-values)
    pub fn parse_component_values(&mut self) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        while !matches!(self.peek(), None | Some(CSSToken::EOF)) {
            if let Some(value) = self.consume_component_value() {
                values.push(value);
            }
        }
        values
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Nested lists (`top_level == false`) stop at the closing `}` without
    /// consuming it.
    fn consume_list_of_rules(&mut self, top_level: bool) -> Vec<Rule> {
        let mut rules = Vec::new();

        loop {
            match self.peek() {
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }
                None | Some(CSSToken::EOF) => return rules,
                Some(CSSToken::RightBrace) if !top_level => return rules,
                Some(CSSToken::RightBrace) => {
                    // "This is a parse error." A stray `}` at the top level is dropped.
                    let _ = self.consume();
                }
                Some(CSSToken::CDO | CSSToken::CDC) if top_level => {
                    let _ = self.consume();
                }
                Some(CSSToken::AtKeyword(_)) => {
                    if let Some(at_rule) = self.consume_at_rule() {
                        rules.push(Rule::At(at_rule));
                    }
                }
                Some(_) => {
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(Rule::Style(rule));
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self) -> Option<AtRule> {
        let name = match self.consume() {
            Some(CSSToken::AtKeyword(name)) => name.to_ascii_lowercase(),
            _ => return None,
        };
        let mut prelude = Vec::new();

        loop {
            match self.peek() {
                Some(CSSToken::Semicolon) => {
                    let _ = self.consume();
                    return Some(AtRule { name, prelude, block: None });
                }
                None | Some(CSSToken::EOF | CSSToken::RightBrace) => {
                    return Some(AtRule { name, prelude, block: None });
                }
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume();
                    let block = if GROUPING_AT_RULES.contains(&name.as_str()) {
                        AtRuleBlock::Rules(self.consume_list_of_rules(false))
                    } else {
                        AtRuleBlock::Declarations(self.consume_list_of_declarations())
                    };
                    if self.peek() == Some(&CSSToken::RightBrace) {
                        let _ = self.consume();
                    }
                    return Some(AtRule {
                        name,
                        prelude,
                        block: Some(block),
                    });
                }
                Some(_) => {
                    if let Some(value) = self.consume_component_value() {
                        prelude.push(value);
                    }
                }
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<StyleRule> {
        let mut prelude = Vec::new();

        loop {
            match self.peek() {
                // "This is a parse error. Return nothing."
                None | Some(CSSToken::EOF) => return None,
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume();
                    let declarations = self.consume_list_of_declarations();
                    if self.peek() == Some(&CSSToken::RightBrace) {
                        let _ = self.consume();
                    }
                    return Some(StyleRule { prelude, declarations });
                }
                Some(_) => {
                    if let Some(value) = self.consume_component_value() {
                        prelude.push(value);
                    }
                }
            }
        }
    }

    /// [§ 5.4.7 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    fn consume_simple_block(&mut self) -> Option<ComponentValue> {
        let (token, ending) = match self.consume() {
            Some(CSSToken::LeftBrace) => ('{', CSSToken::RightBrace),
            Some(CSSToken::LeftBracket) => ('[', CSSToken::RightBracket),
            Some(CSSToken::LeftParen) => ('(', CSSToken::RightParen),
            _ => return None,
        };

        let mut value = Vec::new();
        loop {
            match self.peek() {
                Some(t) if *t == ending => {
                    let _ = self.consume();
                    break;
                }
                None | Some(CSSToken::EOF) => break,
                Some(_) => value.extend(self.consume_component_value()),
            }
        }
        Some(ComponentValue::Block { token, value })
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Stops (without consuming) at `}` or EOF.
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }
                None | Some(CSSToken::EOF | CSSToken::RightBrace) => return declarations,
                Some(CSSToken::AtKeyword(_)) => {
                    // Nested at-rules inside a declaration list are not kept.
                    let _ = self.consume_at_rule();
                }
                Some(CSSToken::Ident(_)) => {
                    if let Some(decl) = self.consume_declaration() {
                        declarations.push(decl);
                    }
                }
                Some(_) => {
                    // "This is a parse error. ... As long as the next input
                    // token is anything other than a <semicolon-token> or
                    // <EOF-token>, consume a component value and throw away
                    // the returned value."
                    while !matches!(
                        self.peek(),
                        None | Some(CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::EOF)
                    ) {
                        let _ = self.consume_component_value();
                    }
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Option<Declaration> {
        let name = match self.consume() {
            Some(CSSToken::Ident(name)) => name.clone(),
            _ => return None,
        };
        self.skip_whitespace();

        let has_colon = self.peek() == Some(&CSSToken::Colon);
        let mut value = Vec::new();
        if has_colon {
            let _ = self.consume();
        }
        while !matches!(
            self.peek(),
            None | Some(CSSToken::EOF | CSSToken::Semicolon | CSSToken::RightBrace)
        ) {
            value.extend(self.consume_component_value());
        }
        // "If the next input token is anything other than a <colon-token>,
        // this is a parse error. Return nothing." The value is still consumed
        // above so the next declaration starts cleanly.
        if !has_colon {
            return None;
        }

        let (value, important) = split_important(value);
        Some(Declaration { name, value, important })
    }

    /// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Option<ComponentValue> {
        match self.peek()? {
            CSSToken::LeftBrace | CSSToken::LeftBracket | CSSToken::LeftParen => self.consume_simple_block(),
            CSSToken::Function(_) => {
                let name = match self.consume() {
                    Some(CSSToken::Function(name)) => name.clone(),
                    _ => return None,
                };
                let mut value = Vec::new();
                loop {
                    match self.peek() {
                        Some(CSSToken::RightParen) => {
                            let _ = self.consume();
                            break;
                        }
                        None | Some(CSSToken::EOF) => break,
                        Some(_) => value.extend(self.consume_component_value()),
                    }
                }
                Some(ComponentValue::Function { name, value })
            }
            CSSToken::EOF => None,
            _ => self.consume().cloned().map(ComponentValue::Token),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(&CSSToken::Whitespace) {
            let _ = self.consume();
        }
    }

    fn consume(&mut self) -> Option<&CSSToken> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position)
    }
}

/// Parse `css` as a full style sheet.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    CSSParser::from_css(css).parse_stylesheet()
}

/// Parse `css` as the contents of a style attribute.
#[must_use]
pub fn parse_declaration_list(css: &str) -> Vec<Declaration> {
    CSSParser::from_css(css).parse_declaration_list()
}

/// Parse `css` as a single property value, splitting off a trailing
/// `!important`.
#[must_use]
pub fn parse_value(css: &str) -> (Vec<ComponentValue>, bool) {
    split_important(CSSParser::from_css(css).parse_component_values())
}

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
///
/// Returns the value with the annotation and surrounding whitespace removed.
fn split_important(mut value: Vec<ComponentValue>) -> (Vec<ComponentValue>, bool) {
    trim_trailing_whitespace(&mut value);

    let Some(last) = value.last() else {
        return (value, false);
    };
    if !last.is_ident("important") {
        return (value, false);
    }

    // STEP 1: Look past the ident and any whitespace for the `!`.
    let mut bang = value.len() - 1;
    while bang > 0 && value[bang - 1].is_whitespace() {
        bang -= 1;
    }
    if bang == 0 || value[bang - 1] != ComponentValue::Token(CSSToken::Delim('!')) {
        return (value, false);
    }

    // STEP 2: Drop `! important` and the whitespace before it.
    value.truncate(bang - 1);
    trim_trailing_whitespace(&mut value);
    (value, true)
}

fn trim_trailing_whitespace(value: &mut Vec<ComponentValue>) {
    while value.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = value.pop();
    }
}
