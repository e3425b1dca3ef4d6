//! Value classification for shorthand building.
//!
//! Every builder looks at a longhand through [`classify`] instead of
//! re-checking keywords, `var()` references or hack escapes itself.

use crate::parser::ComponentValue;
use crate::tokenizer::CSSToken;

use super::{GlobalKeyword, PropertyValue, atoms, split_commas};

/// How a stored longhand value may take part in a shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// An ordinary value that a builder may merge.
    Concrete,
    /// One of the four CSS-wide keywords.
    GlobalKeyword(GlobalKeyword),
    /// Contains an unresolved `var()`.
    PendingSubstitution,
    /// Ends in a legacy compatibility escape such as `\9`.
    HackTagged,
}

/// Classify a stored value.
#[must_use]
pub fn classify(value: &PropertyValue) -> Classification {
    match value {
        PropertyValue::Keyword(keyword) => Classification::GlobalKeyword(*keyword),
        PropertyValue::Pending(_) => Classification::PendingSubstitution,
        PropertyValue::Components(values) if is_hack_tagged(values) => Classification::HackTagged,
        PropertyValue::Components(_) => Classification::Concrete,
    }
}

/// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// True if any component, at any nesting depth, is a `var()` function.
#[must_use]
pub fn contains_var(values: &[ComponentValue]) -> bool {
    values.iter().any(|cv| match cv {
        ComponentValue::Function { name, value } => name.eq_ignore_ascii_case("var") || contains_var(value),
        ComponentValue::Block { value, .. } => contains_var(value),
        ComponentValue::Token(_) => false,
    })
}

/// True if the value, or any comma-separated item of it, ends in an
/// identifier or unit whose last code point is a control character between
/// U+0001 and U+0009.
///
/// Such characters only reach a value through an escape (`foo\9` tokenizes
/// as the identifier `"foo\t"`), which is how the legacy `\9` hack is
/// spelled.
#[must_use]
pub fn is_hack_tagged(values: &[ComponentValue]) -> bool {
    split_commas(values)
        .into_iter()
        .filter_map(|item| atoms(item).last().copied())
        .any(ends_with_hack_escape)
}

fn ends_with_hack_escape(value: &ComponentValue) -> bool {
    let text = match value {
        ComponentValue::Token(CSSToken::Ident(ident)) => ident.as_str(),
        ComponentValue::Token(CSSToken::Dimension { unit, .. }) => unit.as_str(),
        _ => return false,
    };
    text.chars().last().is_some_and(is_hack_char)
}

/// U+0001 through U+0009.
#[must_use]
pub const fn is_hack_char(c: char) -> bool {
    matches!(c, '\u{1}'..='\u{9}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_css(css: &str) -> Classification {
        classify(&PropertyValue::parse(css).unwrap())
    }

    #[test]
    fn test_concrete() {
        assert_eq!(classify_css("1px solid red"), Classification::Concrete);
    }

    #[test]
    fn test_keyword() {
        assert_eq!(classify_css("Unset"), Classification::GlobalKeyword(GlobalKeyword::Unset));
    }

    #[test]
    fn test_nested_var_is_pending() {
        assert_eq!(classify_css("1px calc(var(--w) * 2)"), Classification::PendingSubstitution);
    }

    #[test]
    fn test_ident_hack() {
        assert_eq!(classify_css("foo\\9"), Classification::HackTagged);
    }

    #[test]
    fn test_dimension_hack() {
        assert_eq!(classify_css("10px\\9"), Classification::HackTagged);
    }

    #[test]
    fn test_hack_on_one_list_item() {
        assert_eq!(classify_css("a, b\\9, c"), Classification::HackTagged);
    }

    #[test]
    fn test_hack_escape_in_middle_is_not_a_hack() {
        assert_eq!(classify_css("foo\\9 bar"), Classification::Concrete);
    }
}
