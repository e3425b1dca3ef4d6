//! Case folding for minified output.
//!
//! [CSS Values Level 4 § 4.2](https://www.w3.org/TR/css-values-4/#keywords)
//!
//! "All of these keywords are normatively defined to be ASCII
//! case-insensitive."
//!
//! Author-chosen names (`animation-name`, `font-family`, custom properties)
//! keep their case; see [`IdentCase`].

use crate::declaration::LonghandEntry;
use crate::parser::ComponentValue;
use crate::properties::{IdentCase, ident_case};
use crate::tokenizer::CSSToken;
use crate::values::{PendingSubstitution, PropertyValue};

/// Lowercase what the grammar of each entry's property allows.
#[must_use]
pub fn fold_case(entries: &[LonghandEntry]) -> Vec<LonghandEntry> {
    entries
        .iter()
        .map(|entry| LonghandEntry {
            value: fold_value(&entry.value, ident_case(&entry.name)),
            ..entry.clone()
        })
        .collect()
}

fn fold_value(value: &PropertyValue, case: IdentCase) -> PropertyValue {
    match (value, case) {
        (_, IdentCase::Verbatim) | (PropertyValue::Keyword(_), _) => value.clone(),
        (PropertyValue::Components(values), IdentCase::Insensitive) => {
            PropertyValue::Components(fold(values, &|ident| !ident.starts_with("--")))
        }
        (PropertyValue::Components(values), IdentCase::Sensitive(keywords)) => PropertyValue::Components(fold(
            values,
            &|ident| keywords.iter().any(|keyword| ident.eq_ignore_ascii_case(keyword)),
        )),
        // Fallbacks of a var() are only checked after substitution; leave
        // their identifiers alone.
        (PropertyValue::Pending(pending), _) => PropertyValue::Pending(PendingSubstitution {
            shorthand: pending.shorthand,
            value: fold(&pending.value, &|_| false),
        }),
    }
}

/// Function names and units are always folded; identifiers when `lower`
/// says so.
fn fold(values: &[ComponentValue], lower: &dyn Fn(&str) -> bool) -> Vec<ComponentValue> {
    values
        .iter()
        .map(|value| match value {
            ComponentValue::Token(CSSToken::Ident(ident)) if lower(ident) => {
                ComponentValue::Token(CSSToken::Ident(ident.to_ascii_lowercase()))
            }
            ComponentValue::Token(CSSToken::Dimension { number, unit }) => ComponentValue::Token(CSSToken::Dimension {
                number: number.clone(),
                unit: unit.to_ascii_lowercase(),
            }),
            ComponentValue::Function { name, value } => ComponentValue::Function {
                name: name.to_ascii_lowercase(),
                value: fold(value, lower),
            },
            ComponentValue::Block { token, value } => ComponentValue::Block {
                token: *token,
                value: fold(value, lower),
            },
            other => other.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::DeclarationBlock;
    use crate::serialize::property_value_to_string;

    fn folded(css: &str) -> Vec<String> {
        let entries: Vec<LonghandEntry> = DeclarationBlock::parse(css).iter().cloned().collect();
        fold_case(&entries)
            .iter()
            .map(|entry| property_value_to_string(&entry.value))
            .collect()
    }

    #[test]
    fn test_insensitive_values() {
        assert_eq!(folded("width: CALC(10PX + 2Em)"), ["calc(10px + 2em)"]);
        assert_eq!(folded("color: Red"), ["red"]);
    }

    #[test]
    fn test_author_names_keep_case() {
        assert_eq!(folded("animation-name: FadeIn"), ["FadeIn"]);
        assert_eq!(folded("font-family: \"Open Sans\", Sans-Serif"), ["'Open Sans', sans-serif"]);
    }

    #[test]
    fn test_var_fallback_keeps_identifiers() {
        assert_eq!(folded("color: VAR(--Main, Red)"), ["var(--Main, Red)"]);
    }

    #[test]
    fn test_custom_property_untouched() {
        assert_eq!(folded("--Theme: DARK"), ["DARK"]);
    }
}
