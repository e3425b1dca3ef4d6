//! Stored property values per [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/).
//!
//! A [`PropertyValue`] is what a declaration block keeps for one longhand:
//! a normalized component-value sequence, one of the CSS-wide keywords, or a
//! value whose meaning depends on an unresolved `var()`. Values are replaced,
//! never mutated in place.

pub mod classify;
pub mod grammar;

use core::fmt;

use crate::parser::{ComponentValue, parse_value};
use crate::tokenizer::CSSToken;

pub use classify::{Classification, classify, contains_var, is_hack_tagged};

/// [§ 7.3 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
///
/// "All CSS properties accept the CSS-wide keyword values as the sole
/// component of their property value."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKeyword {
    /// `inherit`
    Inherit,
    /// `initial`
    Initial,
    /// `unset`
    Unset,
    /// `revert`
    Revert,
}

impl GlobalKeyword {
    /// Match `ident` ASCII case-insensitively against the four keywords.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        [Self::Inherit, Self::Initial, Self::Unset, Self::Revert]
            .into_iter()
            .find(|keyword| ident.eq_ignore_ascii_case(keyword.as_str()))
    }

    /// The canonical (lowercase) spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::Initial => "initial",
            Self::Unset => "unset",
            Self::Revert => "revert",
        }
    }
}

impl fmt::Display for GlobalKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#variables-in-shorthands)
///
/// A value containing `var()` that cannot be checked until computed-value
/// time.
///
/// "If a shorthand property contains a var() function, its longhand
/// properties must be filled with a special, unobservable-to-authors
/// pending-substitution value that indicates the shorthand contains a var()."
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubstitution {
    /// The shorthand the value was set through, if any.
    pub shorthand: Option<&'static str>,
    /// The value as written (normalized), including its `var()` references.
    pub value: Vec<ComponentValue>,
}

/// The value stored for one longhand.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A concrete component-value sequence.
    Components(Vec<ComponentValue>),
    /// A single CSS-wide keyword.
    Keyword(GlobalKeyword),
    /// A value waiting for `var()` substitution.
    Pending(PendingSubstitution),
}

impl PropertyValue {
    /// Classify freshly parsed component values into a stored value.
    ///
    /// Whitespace is normalized first. Returns `None` for an empty value.
    #[must_use]
    pub fn from_components(values: &[ComponentValue]) -> Option<Self> {
        let values = normalize(values);
        if values.is_empty() {
            return None;
        }
        if let [single] = values.as_slice() {
            if let Some(keyword) = single.as_ident().and_then(GlobalKeyword::from_ident) {
                return Some(Self::Keyword(keyword));
            }
        }
        if contains_var(&values) {
            return Some(Self::Pending(PendingSubstitution {
                shorthand: None,
                value: values,
            }));
        }
        Some(Self::Components(values))
    }

    /// Parse a value from CSS text. `!important` is not accepted here.
    #[must_use]
    pub fn parse(css: &str) -> Option<Self> {
        let (values, important) = parse_value(css);
        if important {
            return None;
        }
        Self::from_components(&values)
    }

    /// The concrete components, if this value has any.
    #[must_use]
    pub fn components(&self) -> Option<&[ComponentValue]> {
        match self {
            Self::Components(values) => Some(values),
            _ => None,
        }
    }

    /// The CSS-wide keyword, if this value is one.
    #[must_use]
    pub const fn keyword(&self) -> Option<GlobalKeyword> {
        match self {
            Self::Keyword(keyword) => Some(*keyword),
            _ => None,
        }
    }

    /// Token-exact equivalence: keywords compare case-insensitively, custom
    /// property names and strings exactly, numbers by their written form.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Components(a), Self::Components(b)) => values_equivalent(a, b),
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::Pending(a), Self::Pending(b)) => {
                a.shorthand == b.shorthand && values_identical(&a.value, &b.value)
            }
            _ => false,
        }
    }
}

/// Normalize whitespace in a component-value sequence, recursively.
///
/// Leading and trailing whitespace is dropped, runs collapse to one
/// whitespace token, and whitespace next to `,` or `/` disappears.
#[must_use]
pub fn normalize(values: &[ComponentValue]) -> Vec<ComponentValue> {
    let mut out: Vec<ComponentValue> = Vec::with_capacity(values.len());
    for value in values {
        match value {
            ComponentValue::Token(CSSToken::Whitespace) => {
                let after_separator = out
                    .last()
                    .is_none_or(|last| last.is_whitespace() || last.is_comma() || last.is_slash());
                if !after_separator {
                    out.push(value.clone());
                }
            }
            v if v.is_comma() || v.is_slash() => {
                if out.last().is_some_and(ComponentValue::is_whitespace) {
                    let _ = out.pop();
                }
                out.push(v.clone());
            }
            ComponentValue::Function { name, value } => out.push(ComponentValue::Function {
                name: name.clone(),
                value: normalize(value),
            }),
            ComponentValue::Block { token, value } => out.push(ComponentValue::Block {
                token: *token,
                value: normalize(value),
            }),
            other => out.push(other.clone()),
        }
    }
    if out.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = out.pop();
    }
    out
}

/// Split a normalized value at top-level commas.
#[must_use]
pub fn split_commas(values: &[ComponentValue]) -> Vec<&[ComponentValue]> {
    values.split(ComponentValue::is_comma).collect()
}

/// Split a normalized value at top-level `/` delimiters.
#[must_use]
pub fn split_slashes(values: &[ComponentValue]) -> Vec<&[ComponentValue]> {
    values.split(ComponentValue::is_slash).collect()
}

/// The non-whitespace components of a value, in order. Each CSS component
/// (`10px`, `url(a)`, `"a"`, `/`) is exactly one component value.
#[must_use]
pub fn atoms(values: &[ComponentValue]) -> Vec<&ComponentValue> {
    values.iter().filter(|v| !v.is_whitespace()).collect()
}

/// Join parts with single whitespace tokens, skipping empty parts.
#[must_use]
pub fn join_spaced(parts: impl IntoIterator<Item = Vec<ComponentValue>>) -> Vec<ComponentValue> {
    join_with(parts, &ComponentValue::Token(CSSToken::Whitespace))
}

/// Join parts with commas (layer lists).
#[must_use]
pub fn join_commas(parts: impl IntoIterator<Item = Vec<ComponentValue>>) -> Vec<ComponentValue> {
    join_with(parts, &ComponentValue::Token(CSSToken::Comma))
}

fn join_with(
    parts: impl IntoIterator<Item = Vec<ComponentValue>>,
    separator: &ComponentValue,
) -> Vec<ComponentValue> {
    let mut out = Vec::new();
    for part in parts {
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(separator.clone());
        }
        out.extend(part);
    }
    out
}

/// A `/` delimiter component.
#[must_use]
pub const fn slash() -> ComponentValue {
    ComponentValue::Token(CSSToken::Delim('/'))
}

/// An ident component.
#[must_use]
pub fn ident(name: &str) -> ComponentValue {
    ComponentValue::Token(CSSToken::Ident(name.to_string()))
}

/// Token-exact comparison with ASCII case-insensitive keywords and units.
#[must_use]
pub fn values_equivalent(a: &[ComponentValue], b: &[ComponentValue]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| component_equivalent(x, y))
}

/// Exact comparison, including identifier case.
#[must_use]
pub fn values_identical(a: &[ComponentValue], b: &[ComponentValue]) -> bool {
    a == b
}

fn component_equivalent(a: &ComponentValue, b: &ComponentValue) -> bool {
    match (a, b) {
        (ComponentValue::Token(x), ComponentValue::Token(y)) => token_equivalent(x, y),
        (
            ComponentValue::Function { name: n1, value: v1 },
            ComponentValue::Function { name: n2, value: v2 },
        ) => n1.eq_ignore_ascii_case(n2) && values_equivalent(v1, v2),
        (
            ComponentValue::Block { token: t1, value: v1 },
            ComponentValue::Block { token: t2, value: v2 },
        ) => t1 == t2 && values_equivalent(v1, v2),
        _ => false,
    }
}

fn token_equivalent(a: &CSSToken, b: &CSSToken) -> bool {
    match (a, b) {
        (CSSToken::Ident(x), CSSToken::Ident(y)) => {
            // Custom property names are case-sensitive.
            if x.starts_with("--") || y.starts_with("--") {
                x == y
            } else {
                x.eq_ignore_ascii_case(y)
            }
        }
        (CSSToken::Number(x), CSSToken::Number(y)) | (CSSToken::Percentage(x), CSSToken::Percentage(y)) => {
            x.repr == y.repr
        }
        (CSSToken::Dimension { number: x, unit: u }, CSSToken::Dimension { number: y, unit: v }) => {
            x.repr == y.repr && u.eq_ignore_ascii_case(v)
        }
        (CSSToken::Hash { value: x, .. }, CSSToken::Hash { value: y, .. }) => x.eq_ignore_ascii_case(y),
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CSSParser;

    fn raw(css: &str) -> Vec<ComponentValue> {
        CSSParser::from_css(css).parse_component_values()
    }

    #[test]
    fn test_normalize_whitespace() {
        let values = normalize(&raw("  a   b ,  c / d  "));
        assert_eq!(values, normalize(&raw("a b,c/d")));
        assert_eq!(atoms(&values).len(), 6);
    }

    #[test]
    fn test_global_keyword_case_insensitive() {
        assert_eq!(PropertyValue::parse("INHERIT"), Some(PropertyValue::Keyword(GlobalKeyword::Inherit)));
        assert_eq!(GlobalKeyword::from_ident("revert-layer"), None);
    }

    #[test]
    fn test_var_makes_value_pending() {
        let value = PropertyValue::parse("calc(var(--x) + 1px)").unwrap();
        assert!(matches!(value, PropertyValue::Pending(PendingSubstitution { shorthand: None, .. })));
    }

    #[test]
    fn test_equivalence_is_token_exact() {
        let zero = PropertyValue::parse("0").unwrap();
        let zero_px = PropertyValue::parse("0px").unwrap();
        assert!(!zero.equivalent(&zero_px));
        assert!(PropertyValue::parse("SOLID").unwrap().equivalent(&PropertyValue::parse("solid").unwrap()));
        assert!(PropertyValue::parse("1PX").unwrap().equivalent(&PropertyValue::parse("1px").unwrap()));
    }

    #[test]
    fn test_custom_property_names_compare_case_sensitively() {
        assert!(!values_equivalent(&raw("--Foo"), &raw("--foo")));
    }

    #[test]
    fn test_split_commas_and_slashes() {
        let values = normalize(&raw("a 1/2, b"));
        assert_eq!(split_commas(&values).len(), 2);
        assert_eq!(split_slashes(split_commas(&values)[0]).len(), 2);
    }
}
