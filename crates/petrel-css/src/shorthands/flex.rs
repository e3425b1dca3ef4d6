//! [CSS Flexible Box Layout Level 1 § 7.1](https://www.w3.org/TR/css-flexbox-1/#flex-property)
//!
//! "none | [ <'flex-grow'> <'flex-shrink'>? || <'flex-basis'> ]"

use crate::parser::ComponentValue;
use crate::tokenizer::CSSToken;
use crate::values::{atoms, grammar, join_spaced};

/// A plain `<number>` flex factor. Math functions are not factors here; a
/// `calc()` is read as a basis.
fn is_factor(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::Number(n)) if n.value >= 0.0)
}

/// `content | <'width'>`
fn is_basis(value: &ComponentValue) -> bool {
    grammar::is_length_percentage_or_auto(value)
        || ["content", "min-content", "max-content"].iter().any(|k| value.is_ident(k))
        || value.function_name().is_some_and(|name| name.eq_ignore_ascii_case("fit-content"))
}

fn number(repr: &str) -> ComponentValue {
    ComponentValue::Token(CSSToken::number(repr))
}

/// "When omitted from the flex shorthand, [flex-grow's] specified value is
/// 1." Same for flex-shrink. "When omitted from the flex shorthand, its
/// specified value is 0."
///
/// A unitless zero not already preceded by two flex factors is a factor.
pub(super) fn expand(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let mut factors: Vec<ComponentValue> = Vec::new();
    let mut basis: Option<ComponentValue> = None;
    let mut factors_closed = false;

    for part in atoms(values) {
        if !factors_closed && factors.len() < 2 && is_factor(part) {
            factors.push(part.clone());
        } else if basis.is_none() && is_basis(part) {
            basis = Some(part.clone());
            factors_closed = !factors.is_empty();
        } else {
            return None;
        }
    }

    let mut factors = factors.into_iter();
    let (grow, shrink) = match (factors.next(), factors.next()) {
        (None, _) => (number("1"), number("1")),
        (Some(grow), None) => (grow, number("1")),
        (Some(grow), Some(shrink)) => (grow, shrink),
    };
    let basis = basis.unwrap_or_else(|| ComponentValue::Token(CSSToken::percentage("0")));
    Some(vec![vec![grow], vec![shrink], vec![basis]])
}

/// Always the three-value form, which reads back unambiguously.
pub(super) fn render(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[grow, shrink, basis] = slots else {
        return None;
    };
    let valid = grammar::is_single(grow, is_factor)
        && grammar::is_single(shrink, is_factor)
        && grammar::is_single(basis, is_basis);
    if !valid {
        return None;
    }
    Some(join_spaced([grow.to_vec(), shrink.to_vec(), basis.to_vec()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::serialize::value_to_string;
    use crate::values::normalize;

    fn expand_css(css: &str) -> Option<Vec<String>> {
        expand(&normalize(&parse_value(css).0)).map(|v| v.iter().map(|e| value_to_string(e)).collect())
    }

    #[test]
    fn test_single_number() {
        assert_eq!(expand_css("2").unwrap(), ["2", "1", "0%"]);
        assert_eq!(expand_css("0").unwrap(), ["0", "1", "0%"]);
    }

    #[test]
    fn test_basis_only() {
        assert_eq!(expand_css("10px").unwrap(), ["1", "1", "10px"]);
        assert_eq!(expand_css("content").unwrap(), ["1", "1", "content"]);
    }

    #[test]
    fn test_basis_before_or_after_factors() {
        assert_eq!(expand_css("1 0 auto").unwrap(), ["1", "0", "auto"]);
        assert_eq!(expand_css("auto 2 3").unwrap(), ["2", "3", "auto"]);
        assert_eq!(expand_css("0 0 0").unwrap(), ["0", "0", "0"]);
        assert_eq!(expand_css("1 auto 2"), None);
    }

    #[test]
    fn test_render_three_values() {
        let parsed: Vec<Vec<ComponentValue>> =
            ["1", "1", "0%"].iter().map(|e| normalize(&parse_value(e).0)).collect();
        let slots: Vec<&[ComponentValue]> = parsed.iter().map(Vec::as_slice).collect();
        assert_eq!(render(&slots).map(|v| value_to_string(&v)).as_deref(), Some("1 1 0%"));
    }
}
