//! Shorthands whose grammar is an unordered `a || b || c` of independent
//! components: `border-top` and the other sides, `outline`, `column-rule`,
//! `columns`, `text-decoration`, `flex-flow`.
//!
//! "Omitted values are set to their initial values."

use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, join_spaced, values_equivalent};

use super::{ShorthandSpec, initial_components, is_initial};

fn is_keyword_in(value: &ComponentValue, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| value.is_ident(keyword))
}

/// Single-component grammar of each longhand used by a generic shorthand.
fn accepts(longhand: &str, value: &ComponentValue) -> bool {
    match longhand {
        "border-top-width" | "border-right-width" | "border-bottom-width" | "border-left-width"
        | "outline-width" | "column-rule-width" => grammar::is_line_width(value),
        "border-top-style" | "border-right-style" | "border-bottom-style" | "border-left-style"
        | "column-rule-style" => grammar::is_line_style(value),
        "outline-style" => value.is_ident("auto") || grammar::is_line_style(value),
        "border-top-color" | "border-right-color" | "border-bottom-color" | "border-left-color"
        | "outline-color" | "column-rule-color" | "text-decoration-color" => grammar::is_color(value),
        "column-width" => value.is_ident("auto") || grammar::is_length(value),
        "column-count" => value.is_ident("auto") || grammar::is_integer(value),
        "text-decoration-line" => is_keyword_in(
            value,
            &["none", "underline", "overline", "line-through", "blink", "spelling-error", "grammar-error"],
        ),
        "text-decoration-style" => is_keyword_in(value, &["solid", "double", "dotted", "dashed", "wavy"]),
        "text-decoration-thickness" => {
            is_keyword_in(value, &["auto", "from-font"]) || grammar::is_length_percentage(value)
        }
        "flex-direction" => is_keyword_in(value, &["row", "row-reverse", "column", "column-reverse"]),
        "flex-wrap" => is_keyword_in(value, &["nowrap", "wrap", "wrap-reverse"]),
        _ => false,
    }
}

/// Longhands that take a space-separated set of keywords.
fn is_multi(longhand: &str) -> bool {
    longhand == "text-decoration-line"
}

/// True if `values` is a valid value of `longhand` in a generic shorthand.
pub(super) fn longhand_valid(longhand: &str, values: &[ComponentValue]) -> bool {
    let parts = atoms(values);
    match parts.as_slice() {
        [] => false,
        [single] => accepts(longhand, single),
        _ => {
            is_multi(longhand)
                && parts.iter().all(|part| accepts(longhand, part) && !part.is_ident("none"))
                && !has_duplicates(&parts)
        }
    }
}

fn has_duplicates(parts: &[&ComponentValue]) -> bool {
    parts
        .iter()
        .enumerate()
        .any(|(i, a)| parts[..i].iter().any(|b| values_equivalent(std::slice::from_ref(*a), std::slice::from_ref(*b))))
}

pub(super) fn expand(spec: &ShorthandSpec, values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    expand_longhands(spec.longhands, values)
}

/// Assign each component to the first longhand that accepts it and has no
/// value yet; missing longhands get their initial value.
pub(super) fn expand_longhands(longhands: &[&str], values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let mut assigned: Vec<Vec<ComponentValue>> = vec![Vec::new(); longhands.len()];
    let mut previous: Option<usize> = None;

    for part in atoms(values) {
        // A multi-keyword longhand keeps absorbing adjacent keywords.
        if let Some(i) = previous {
            if is_multi(longhands[i]) && accepts(longhands[i], part) {
                assigned[i].push(part.clone());
                continue;
            }
        }
        let slot = (0..longhands.len()).find(|&i| assigned[i].is_empty() && accepts(longhands[i], part))?;
        assigned[slot].push(part.clone());
        previous = Some(slot);
    }

    for (longhand, value) in longhands.iter().zip(assigned.iter_mut()) {
        if value.is_empty() {
            *value = initial_components(longhand).to_vec();
        } else if !longhand_valid(longhand, &join_spaced(value.iter().map(|v| vec![v.clone()]))) {
            return None;
        }
    }
    Some(
        assigned
            .into_iter()
            .map(|parts| join_spaced(parts.into_iter().map(|part| vec![part])))
            .collect(),
    )
}

pub(super) fn render(spec: &ShorthandSpec, slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    render_longhands(spec.longhands, slots)
}

/// Render the non-initial values in longhand order. When every value is
/// initial, the first one stands for all of them.
pub(super) fn render_longhands(longhands: &[&str], slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    if slots.len() != longhands.len()
        || !longhands.iter().zip(slots).all(|(longhand, slot)| longhand_valid(longhand, slot))
    {
        return None;
    }
    let parts: Vec<Vec<ComponentValue>> = longhands
        .iter()
        .zip(slots)
        .filter(|(longhand, slot)| !is_initial(longhand, slot))
        .map(|(_, slot)| slot.to_vec())
        .collect();
    if parts.is_empty() {
        return slots.first().map(|slot| slot.to_vec());
    }
    Some(join_spaced(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::serialize::value_to_string;
    use crate::shorthands::shorthand;
    use crate::values::normalize;

    fn expand_css(name: &str, css: &str) -> Option<Vec<String>> {
        let spec = shorthand(name).unwrap();
        expand(spec, &normalize(&parse_value(css).0)).map(|v| v.iter().map(|e| value_to_string(e)).collect())
    }

    fn render_css(name: &str, slots: &[&str]) -> Option<String> {
        let spec = shorthand(name).unwrap();
        let parsed: Vec<Vec<ComponentValue>> = slots.iter().map(|e| normalize(&parse_value(e).0)).collect();
        let slots: Vec<&[ComponentValue]> = parsed.iter().map(Vec::as_slice).collect();
        render(spec, &slots).map(|v| value_to_string(&v))
    }

    #[test]
    fn test_expand_any_order() {
        assert_eq!(expand_css("border-top", "red 2px").unwrap(), ["2px", "none", "red"]);
        assert_eq!(expand_css("outline", "auto").unwrap(), ["currentcolor", "auto", "medium"]);
    }

    #[test]
    fn test_expand_multi_keyword_line() {
        assert_eq!(
            expand_css("text-decoration", "underline overline wavy").unwrap(),
            ["underline overline", "wavy", "currentcolor", "auto"]
        );
        assert_eq!(expand_css("text-decoration", "underline underline"), None);
        assert_eq!(expand_css("text-decoration", "none underline"), None);
    }

    #[test]
    fn test_expand_rejects_repeated_component() {
        assert_eq!(expand_css("border-top", "solid dashed"), None);
        assert_eq!(expand_css("flex-flow", "row column"), None);
    }

    #[test]
    fn test_columns_disambiguation() {
        assert_eq!(expand_css("columns", "3 10em").unwrap(), ["10em", "3"]);
        assert_eq!(expand_css("columns", "auto 3").unwrap(), ["auto", "3"]);
    }

    #[test]
    fn test_render_omits_initial_values() {
        assert_eq!(render_css("border-top", &["1px", "solid", "currentcolor"]).as_deref(), Some("1px solid"));
        assert_eq!(render_css("flex-flow", &["row", "nowrap"]).as_deref(), Some("row"));
        assert_eq!(
            render_css("text-decoration", &["underline", "solid", "red", "auto"]).as_deref(),
            Some("underline red")
        );
    }

    #[test]
    fn test_render_rejects_invalid_slot() {
        assert_eq!(render_css("border-top", &["1px", "bogus", "red"]), None);
    }
}
