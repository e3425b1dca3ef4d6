//! `font` and `list-style`.
//!
//! [CSS Fonts Level 4 § 2.8 Shorthand font property](https://www.w3.org/TR/css-fonts-4/#font-prop)
//!
//! "[ [ <'font-style'> || <font-variant-css2> || <'font-weight'> ||
//! <font-width-css3> ]? <'font-size'> [ / <'line-height'> ]? <'font-family'># ]
//! | <system-family-name>"

use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, ident, join_spaced, normalize, slash};

use super::is_initial;

const FONT_LONGHANDS: &[&str] = &[
    "font-style",
    "font-variant-caps",
    "font-weight",
    "font-stretch",
    "font-size",
    "line-height",
    "font-family",
];

const LIST_STYLE_LONGHANDS: &[&str] = &["list-style-position", "list-style-image", "list-style-type"];

/// Indices into [`FONT_LONGHANDS`].
const STYLE: usize = 0;
const CAPS: usize = 1;
const WEIGHT: usize = 2;
const STRETCH: usize = 3;
const SIZE: usize = 4;
const LINE_HEIGHT: usize = 5;
const FAMILY: usize = 6;

fn is_caps(value: &ComponentValue) -> bool {
    value.is_ident("normal") || value.is_ident("small-caps")
}

/// Index of the next non-whitespace component at or after `from`.
fn skip_whitespace(values: &[ComponentValue], from: usize) -> usize {
    values[from..]
        .iter()
        .position(|v| !v.is_whitespace())
        .map_or(values.len(), |offset| from + offset)
}

pub(super) fn expand(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let mut prefix: [Option<Vec<ComponentValue>>; 4] = Default::default();
    let mut prefix_count = 0;
    let mut i = skip_whitespace(values, 0);

    // STEP 1: Up to four style, variant, weight, or width components, any of
    // which may be `normal`.
    let size = loop {
        let value = values.get(i)?;
        if grammar::is_font_size(value) {
            break value.clone();
        }
        if prefix_count == 4 {
            return None;
        }
        prefix_count += 1;
        let next = skip_whitespace(values, i + 1);
        if value.is_ident("normal") {
            i = next;
        } else if prefix[STYLE].is_none() && value.is_ident("oblique") {
            match values.get(next) {
                Some(angle) if grammar::is_angle(angle) => {
                    prefix[STYLE] = Some(join_spaced([vec![value.clone()], vec![angle.clone()]]));
                    i = skip_whitespace(values, next + 1);
                }
                _ => {
                    prefix[STYLE] = Some(vec![value.clone()]);
                    i = next;
                }
            }
        } else if prefix[STYLE].is_none() && value.is_ident("italic") {
            prefix[STYLE] = Some(vec![value.clone()]);
            i = next;
        } else if prefix[CAPS].is_none() && value.is_ident("small-caps") {
            prefix[CAPS] = Some(vec![value.clone()]);
            i = next;
        } else if prefix[WEIGHT].is_none() && grammar::is_font_weight(value) {
            prefix[WEIGHT] = Some(vec![value.clone()]);
            i = next;
        } else if prefix[STRETCH].is_none() && grammar::is_font_stretch_keyword(value) {
            prefix[STRETCH] = Some(vec![value.clone()]);
            i = next;
        } else {
            return None;
        }
    };

    // STEP 2: `<font-size> [ / <line-height> ]?`
    i = skip_whitespace(values, i + 1);
    let mut line_height = None;
    if values.get(i).is_some_and(ComponentValue::is_slash) {
        i = skip_whitespace(values, i + 1);
        let value = values.get(i).filter(|v| grammar::is_line_height(v))?;
        line_height = Some(vec![value.clone()]);
        i = skip_whitespace(values, i + 1);
    }

    // STEP 3: Everything left is the family list.
    let family = normalize(&values[i..]);
    if family.is_empty() || !grammar::is_font_family(&family) {
        return None;
    }

    let [style, caps, weight, stretch] = prefix;
    let mut expanded: Vec<Vec<ComponentValue>> = [style, caps, weight, stretch]
        .into_iter()
        .zip(FONT_LONGHANDS)
        .map(|(value, longhand)| value.unwrap_or_else(|| super::initial_components(longhand).to_vec()))
        .collect();
    expanded.push(vec![size]);
    expanded.push(line_height.unwrap_or_else(|| super::initial_components("line-height").to_vec()));
    expanded.push(family);
    Some(expanded)
}

fn single(values: &[ComponentValue], pred: fn(&ComponentValue) -> bool) -> bool {
    grammar::is_single(values, pred)
}

/// True if the `font` shorthand can carry `value` for the longhand at
/// `slot`.
pub(super) fn accepts_slot(slot: usize, value: &[ComponentValue]) -> bool {
    match slot {
        STYLE => grammar::is_font_style(&atoms(value)),
        CAPS => single(value, is_caps),
        WEIGHT => single(value, grammar::is_font_weight),
        STRETCH => single(value, grammar::is_font_stretch_keyword),
        SIZE => single(value, grammar::is_font_size),
        LINE_HEIGHT => single(value, grammar::is_line_height),
        FAMILY => grammar::is_font_family(value),
        _ => false,
    }
}

/// Render `[style] [small-caps] [weight] [stretch] size[/line-height] family`.
///
/// Only values the shorthand grammar can carry are accepted: `font-variant-caps`
/// must be `normal` or `small-caps`, and `font-stretch` must be a keyword.
pub(super) fn render(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[style, caps, weight, stretch, size, line_height, family] = slots else {
        return None;
    };
    if !slots.iter().enumerate().all(|(slot, value)| accepts_slot(slot, value)) {
        return None;
    }

    let mut parts: Vec<Vec<ComponentValue>> = [style, caps, weight, stretch]
        .into_iter()
        .zip(FONT_LONGHANDS)
        .filter(|(value, longhand)| !is_initial(longhand, value))
        .map(|(value, _)| value.to_vec())
        .collect();
    let mut size_part = size.to_vec();
    if !is_initial("line-height", line_height) {
        size_part.push(slash());
        size_part.extend_from_slice(line_height);
    }
    parts.push(size_part);
    parts.push(family.to_vec());
    Some(join_spaced(parts))
}

/// [CSS Lists Level 3 § 3.3](https://www.w3.org/TR/css-lists-3/#list-style-property)
///
/// `<'list-style-position'> || <'list-style-image'> || <'list-style-type'>`
///
/// "Using a value of none in the shorthand is potentially ambiguous, as none
/// is a valid value for both list-style-image and list-style-type. To resolve
/// this ambiguity, a value of none in the shorthand must be applied to
/// whichever of the two properties aren't otherwise set by the shorthand."
pub(super) fn expand_list_style(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let mut result: [Option<ComponentValue>; 3] = Default::default();
    let [position, image, kind] = &mut result;
    let mut nones = 0;

    for part in atoms(values) {
        if part.is_ident("none") {
            nones += 1;
        } else if position.is_none() && is_list_position(part) {
            *position = Some(part.clone());
        } else if image.is_none() && grammar::is_image(part) {
            *image = Some(part.clone());
        } else if kind.is_none() && is_list_type(part) {
            *kind = Some(part.clone());
        } else {
            return None;
        }
    }

    let none = || Some(ident("none"));
    match (nones, image.is_none(), kind.is_none()) {
        (0, _, _) => {}
        (1, true, true) | (2, true, true) => (*image, *kind) = (none(), none()),
        (1, true, false) => *image = none(),
        (1, false, true) => *kind = none(),
        _ => return None,
    }

    Some(
        result
            .into_iter()
            .zip(LIST_STYLE_LONGHANDS)
            .map(|(value, longhand)| value.map_or_else(|| super::initial_components(longhand).to_vec(), |v| vec![v]))
            .collect(),
    )
}

fn is_list_position(value: &ComponentValue) -> bool {
    value.is_ident("inside") || value.is_ident("outside")
}

/// `<counter-style> | <string> | none`
fn is_list_type(value: &ComponentValue) -> bool {
    (grammar::is_custom_ident(value) && !is_list_position(value))
        || grammar::is_string(value)
        || value.function_name().is_some_and(|name| name.eq_ignore_ascii_case("symbols"))
}

/// True if `list-style` can carry `value` for the longhand at `slot`.
pub(super) fn accepts_list_style_slot(slot: usize, value: &[ComponentValue]) -> bool {
    match slot {
        0 => single(value, is_list_position),
        1 => single(value, grammar::is_image_or_none),
        2 => single(value, |v| v.is_ident("none") || is_list_type(v)),
        _ => false,
    }
}

pub(super) fn render_list_style(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let valid = slots.len() == LIST_STYLE_LONGHANDS.len()
        && slots.iter().enumerate().all(|(slot, value)| accepts_list_style_slot(slot, value));
    if !valid {
        return None;
    }
    let parts: Vec<Vec<ComponentValue>> = slots
        .iter()
        .zip(LIST_STYLE_LONGHANDS)
        .filter(|(value, longhand)| !is_initial(longhand, value))
        .map(|(value, _)| value.to_vec())
        .collect();
    if parts.is_empty() {
        return Some(slots[2].to_vec());
    }
    Some(join_spaced(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::serialize::value_to_string;

    fn expand_css(css: &str, list_style: bool) -> Option<Vec<String>> {
        let values = normalize(&parse_value(css).0);
        let expanded = if list_style { expand_list_style(&values) } else { expand(&values) };
        expanded.map(|v| v.iter().map(|e| value_to_string(e)).collect())
    }

    fn render_css(slots: &[&str], list_style: bool) -> Option<String> {
        let parsed: Vec<Vec<ComponentValue>> = slots.iter().map(|e| normalize(&parse_value(e).0)).collect();
        let slots: Vec<&[ComponentValue]> = parsed.iter().map(Vec::as_slice).collect();
        let rendered = if list_style { render_list_style(&slots) } else { render(&slots) };
        rendered.map(|v| value_to_string(&v))
    }

    #[test]
    fn test_expand_font() {
        assert_eq!(
            expand_css("italic bold 12px/1.5 Arial, sans-serif", false).unwrap(),
            ["italic", "normal", "bold", "normal", "12px", "1.5", "Arial, sans-serif"]
        );
        assert_eq!(
            expand_css("small-caps condensed large serif", false).unwrap(),
            ["normal", "small-caps", "normal", "condensed", "large", "normal", "serif"]
        );
    }

    #[test]
    fn test_expand_font_oblique_angle() {
        let expanded = expand_css("oblique 10deg 1em 'Fira Sans'", false).unwrap();
        assert_eq!(expanded[0], "oblique 10deg");
        assert_eq!(expanded[6], "'Fira Sans'");
    }

    #[test]
    fn test_expand_font_requires_size_and_family() {
        assert_eq!(expand_css("bold Arial", false), None);
        assert_eq!(expand_css("12px", false), None);
        assert_eq!(expand_css("12px/ Arial", false), None);
        assert_eq!(expand_css("normal normal normal normal normal 12px Arial", false), None);
    }

    #[test]
    fn test_render_font() {
        assert_eq!(
            render_css(&["normal", "normal", "bold", "normal", "12px", "1.5", "Arial"], false).as_deref(),
            Some("bold 12px / 1.5 Arial")
        );
        assert_eq!(
            render_css(&["normal", "normal", "normal", "normal", "medium", "normal", "serif"], false).as_deref(),
            Some("medium serif")
        );
    }

    #[test]
    fn test_render_font_rejects_inexpressible_values() {
        assert_eq!(
            render_css(&["normal", "all-small-caps", "normal", "normal", "12px", "normal", "serif"], false),
            None
        );
        assert_eq!(render_css(&["normal", "normal", "normal", "75%", "12px", "normal", "serif"], false), None);
    }

    #[test]
    fn test_accepts_slot() {
        let value = |css: &str| normalize(&parse_value(css).0);
        assert!(accepts_slot(CAPS, &value("small-caps")));
        assert!(!accepts_slot(CAPS, &value("all-small-caps")));
        assert!(accepts_slot(STYLE, &value("oblique 10deg")));
        assert!(!accepts_slot(STRETCH, &value("75%")));
        assert!(accepts_slot(FAMILY, &value("'Fira Sans', serif")));
        assert!(!accepts_list_style_slot(0, &value("square")));
    }

    #[test]
    fn test_list_style_none_fills_unset() {
        assert_eq!(expand_css("none", true).unwrap(), ["outside", "none", "none"]);
        assert_eq!(expand_css("url(a.png) none", true).unwrap(), ["outside", "url(a.png)", "none"]);
        assert_eq!(expand_css("none square inside", true).unwrap(), ["inside", "none", "square"]);
        assert_eq!(expand_css("none none none", true), None);
    }

    #[test]
    fn test_render_list_style() {
        assert_eq!(render_css(&["outside", "none", "disc"], true).as_deref(), Some("disc"));
        assert_eq!(render_css(&["inside", "none", "none"], true).as_deref(), Some("inside none"));
        assert_eq!(render_css(&["outside", "url(a.png)", "square"], true).as_deref(), Some("url(a.png) square"));
    }
}
