//! `border` and `border-image`.
//!
//! [CSS Backgrounds and Borders Level 3 § 3.6](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)

use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, join_spaced, slash, values_equivalent};

use super::generic::{expand_longhands, render_longhands};
use super::{is_initial, shorthand};

/// The per-side grammar `border` shares with `border-top`.
const SIDE: &[&str] = &["border-top-width", "border-top-style", "border-top-color"];

/// "The 'border' shorthand ... sets the same width, color, and style for all
/// four borders."
pub(super) fn expand(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let side = expand_longhands(SIDE, values)?;
    Some(side.into_iter().flat_map(|value| std::iter::repeat_n(value, 4)).collect())
}

/// Collapse only when every side has the same width, style, and color.
pub(super) fn render(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    if slots.len() != 12 {
        return None;
    }
    let mut side: Vec<&[ComponentValue]> = Vec::with_capacity(3);
    for group in slots.chunks(4) {
        let first = group[0];
        if !group.iter().all(|value| values_equivalent(value, first)) {
            return None;
        }
        side.push(first);
    }
    let reset = shorthand("border-top").and_then(|spec| spec.matching_reset(&side));
    match reset {
        Some(keyword) => Some(vec![crate::values::ident(keyword)]),
        None => render_longhands(SIDE, &side),
    }
}

fn is_slice_part(value: &ComponentValue) -> bool {
    matches!(
        value,
        ComponentValue::Token(crate::tokenizer::CSSToken::Number(_) | crate::tokenizer::CSSToken::Percentage(_))
    ) || grammar::is_math_function(value)
}

fn is_width_part(value: &ComponentValue) -> bool {
    value.is_ident("auto") || grammar::is_number(value) || grammar::is_length_percentage(value)
}

fn is_outset_part(value: &ComponentValue) -> bool {
    grammar::is_number(value) || grammar::is_length(value)
}

fn is_repeat_part(value: &ComponentValue) -> bool {
    ["stretch", "repeat", "round", "space"].iter().any(|k| value.is_ident(k))
}

/// `border-image-slice`: `[<number> | <percentage>]{1,4} && fill?`
fn slice_valid(values: &[&ComponentValue]) -> bool {
    let fills = values.iter().filter(|v| v.is_ident("fill")).count();
    let numbers: Vec<_> = values.iter().filter(|v| !v.is_ident("fill")).collect();
    let fill_at_edge = values.first().is_some_and(|v| v.is_ident("fill"))
        || values.last().is_some_and(|v| v.is_ident("fill"));
    fills <= 1
        && (fills == 0 || fill_at_edge)
        && (1..=4).contains(&numbers.len())
        && numbers.iter().all(|v| is_slice_part(v))
}

fn list_valid(values: &[&ComponentValue], pred: fn(&ComponentValue) -> bool) -> bool {
    (1..=4).contains(&values.len()) && values.iter().all(|v| pred(v))
}

/// True if `values` is a valid value for the border-image longhand at
/// `index` (source, slice, width, outset, repeat).
fn image_longhand_valid(index: usize, values: &[ComponentValue]) -> bool {
    let parts = atoms(values);
    match index {
        0 => matches!(parts.as_slice(), [single] if grammar::is_image_or_none(single)),
        1 => slice_valid(&parts),
        2 => list_valid(&parts, is_width_part),
        3 => list_valid(&parts, is_outset_part),
        4 => (1..=2).contains(&parts.len()) && parts.iter().all(|v| is_repeat_part(v)),
        _ => false,
    }
}

/// `<'border-image-source'> || <'border-image-slice'> [ / <'border-image-width'> |
/// / <'border-image-width'>? / <'border-image-outset'> ]? || <'border-image-repeat'>`
pub(super) fn expand_image(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let parts = atoms(values);
    let mut result: [Option<Vec<ComponentValue>>; 5] = Default::default();
    let mut i = 0;

    let take_while = |start: usize, pred: &dyn Fn(&ComponentValue) -> bool| -> usize {
        parts[start..].iter().take_while(|&&v| pred(v)).count()
    };

    while i < parts.len() {
        let part = parts[i];
        if result[0].is_none() && grammar::is_image_or_none(part) {
            result[0] = Some(vec![part.clone()]);
            i += 1;
        } else if result[1].is_none() && (is_slice_part(part) || part.is_ident("fill")) {
            // STEP 1: Slice, then the optional `/ width / outset` tail.
            let n = take_while(i, &|v| is_slice_part(v) || v.is_ident("fill"));
            result[1] = Some(spaced(&parts[i..i + n]));
            i += n;
            if parts.get(i).is_some_and(|v| v.is_slash()) {
                i += 1;
                let n = take_while(i, &is_width_part);
                if n > 0 {
                    result[2] = Some(spaced(&parts[i..i + n]));
                    i += n;
                }
                if parts.get(i).is_some_and(|v| v.is_slash()) {
                    i += 1;
                    let n = take_while(i, &is_outset_part);
                    if n == 0 {
                        return None;
                    }
                    result[3] = Some(spaced(&parts[i..i + n]));
                    i += n;
                } else if n == 0 {
                    return None;
                }
            }
        } else if result[4].is_none() && is_repeat_part(part) {
            let n = take_while(i, &is_repeat_part);
            result[4] = Some(spaced(&parts[i..i + n]));
            i += n;
        } else {
            return None;
        }
    }

    let longhands = super::BORDER_IMAGE_LONGHANDS;
    let mut expanded = Vec::with_capacity(5);
    for (index, (value, longhand)) in result.into_iter().zip(longhands).enumerate() {
        let value = value.unwrap_or_else(|| super::initial_components(longhand).to_vec());
        if !image_longhand_valid(index, &value) {
            return None;
        }
        expanded.push(value);
    }
    Some(expanded)
}

fn spaced(parts: &[&ComponentValue]) -> Vec<ComponentValue> {
    join_spaced(parts.iter().map(|part| vec![(*part).clone()]))
}

/// Render `source slice / width / outset repeat`, omitting initial parts.
pub(super) fn render_image(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[source, slice, width, outset, repeat] = slots else {
        return None;
    };
    if !slots.iter().enumerate().all(|(i, slot)| image_longhand_valid(i, slot)) {
        return None;
    }
    let longhands = super::BORDER_IMAGE_LONGHANDS;
    let non_initial = |i: usize, value: &[ComponentValue]| !is_initial(longhands[i], value);

    let mut parts: Vec<Vec<ComponentValue>> = Vec::new();
    if non_initial(0, source) {
        parts.push(source.to_vec());
    }
    if non_initial(3, outset) {
        parts.push(
            [slice.to_vec(), vec![slash()], width.to_vec(), vec![slash()], outset.to_vec()]
                .into_iter()
                .flatten()
                .collect(),
        );
    } else if non_initial(2, width) {
        parts.push([slice.to_vec(), vec![slash()], width.to_vec()].into_iter().flatten().collect());
    } else if non_initial(1, slice) {
        parts.push(slice.to_vec());
    }
    if non_initial(4, repeat) {
        parts.push(repeat.to_vec());
    }
    if parts.is_empty() {
        return Some(source.to_vec());
    }
    Some(join_spaced(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::serialize::value_to_string;
    use crate::values::normalize;

    fn expand_css(css: &str) -> Option<Vec<String>> {
        expand_image(&normalize(&parse_value(css).0)).map(|v| v.iter().map(|e| value_to_string(e)).collect())
    }

    fn render_css(slots: &[&str]) -> Option<String> {
        let parsed: Vec<Vec<ComponentValue>> = slots.iter().map(|e| normalize(&parse_value(e).0)).collect();
        let slots: Vec<&[ComponentValue]> = parsed.iter().map(Vec::as_slice).collect();
        render_image(&slots).map(|v| value_to_string(&v))
    }

    #[test]
    fn test_border_requires_equal_sides() {
        let values: Vec<Vec<ComponentValue>> = ["1px", "1px", "1px", "2px", "solid", "solid", "solid", "solid"]
            .iter()
            .chain(["red"; 4].iter())
            .map(|e| normalize(&parse_value(e).0))
            .collect();
        let slots: Vec<&[ComponentValue]> = values.iter().map(Vec::as_slice).collect();
        assert_eq!(render(&slots), None);
    }

    #[test]
    fn test_border_none() {
        let values: Vec<Vec<ComponentValue>> = ["medium"; 4]
            .iter()
            .chain(["none"; 4].iter())
            .chain(["currentcolor"; 4].iter())
            .map(|e| normalize(&parse_value(e).0))
            .collect();
        let slots: Vec<&[ComponentValue]> = values.iter().map(Vec::as_slice).collect();
        assert_eq!(render(&slots).map(|v| value_to_string(&v)).as_deref(), Some("none"));
    }

    #[test]
    fn test_expand_border_image() {
        assert_eq!(
            expand_css("url(a.png) 30 fill / 1em / 2px round").unwrap(),
            ["url(a.png)", "30 fill", "1em", "2px", "round"]
        );
        assert_eq!(expand_css("10% // 3px").unwrap(), ["none", "10%", "1", "3px", "stretch"]);
        assert_eq!(expand_css("10% /"), None);
        assert_eq!(expand_css("30 fill 20"), None);
    }

    #[test]
    fn test_render_border_image() {
        assert_eq!(
            render_css(&["url(a.png)", "30", "1", "0", "stretch"]).as_deref(),
            Some("url(a.png) 30")
        );
        assert_eq!(
            render_css(&["none", "100%", "1", "2px", "round"]).as_deref(),
            Some("100% / 1 / 2px round")
        );
        assert_eq!(render_css(&["none", "100%", "1", "0", "stretch"]).as_deref(), Some("none"));
    }
}
