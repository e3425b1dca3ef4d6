//! Four-edge shorthands (`margin`, `padding`, `inset`, `border-width`,
//! `border-style`, `border-color`) and two-value pairs (`gap`, `overflow`).
//!
//! [CSS Box Model Level 3 § 4.2](https://www.w3.org/TR/css-box-3/#margin-shorthand)
//!
//! "If there is only one component value, it applies to all sides. If there
//! are two values, the top and bottom margins are set to the first value and
//! the right and left margins are set to the second. If there are three
//! values, the top is set to the first value, the left and right are set to
//! the second, and the bottom is set to the third. If there are four values
//! they apply to the top, right, bottom, and left, respectively."

use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, join_spaced, values_equivalent};

use super::ShorthandSpec;

/// The grammar of a single edge value for each box-edge shorthand.
fn edge_accepts(shorthand: &str, value: &ComponentValue) -> bool {
    match shorthand {
        "padding" => grammar::is_length_percentage(value),
        "margin" | "inset" => grammar::is_length_percentage_or_auto(value),
        "border-width" => grammar::is_line_width(value),
        "border-style" => grammar::is_line_style(value),
        "border-color" => grammar::is_color(value),
        _ => false,
    }
}

/// Expand one to four edge values into top, right, bottom, left.
pub(super) fn expand(spec: &ShorthandSpec, values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let edges = atoms(values);
    if !edges.iter().all(|edge| edge_accepts(spec.name, edge)) {
        return None;
    }
    let (top, right, bottom, left) = match edges.as_slice() {
        [all] => (*all, *all, *all, *all),
        [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
        [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
        [top, right, bottom, left] => (*top, *right, *bottom, *left),
        _ => return None,
    };
    Some(
        [top, right, bottom, left]
            .into_iter()
            .map(|edge| vec![edge.clone()])
            .collect(),
    )
}

/// Compress four edges to the shortest equivalent form.
///
/// Edges compare token-exactly, so `0` and `0px` never merge.
pub(super) fn render(spec: &ShorthandSpec, slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[top, right, bottom, left] = slots else {
        return None;
    };
    // Each edge must be a single component of the edge grammar.
    let valid = slots
        .iter()
        .all(|slot| matches!(atoms(slot).as_slice(), [edge] if edge_accepts(spec.name, edge)));
    if !valid {
        return None;
    }

    let edges: Vec<&[ComponentValue]> = if values_equivalent(left, right) {
        if values_equivalent(top, bottom) {
            if values_equivalent(top, right) { vec![top] } else { vec![top, right] }
        } else {
            vec![top, right, bottom]
        }
    } else {
        vec![top, right, bottom, left]
    };
    Some(join_spaced(edges.into_iter().map(<[_]>::to_vec)))
}

/// Expand `first second?` where the second value defaults to the first.
pub(super) fn expand_pair(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    match atoms(values).as_slice() {
        [both] => Some(vec![vec![(*both).clone()], vec![(*both).clone()]]),
        [first, second] => Some(vec![vec![(*first).clone()], vec![(*second).clone()]]),
        _ => None,
    }
}

fn pair_accepts(shorthand: &str, value: &ComponentValue) -> bool {
    match shorthand {
        "gap" => value.is_ident("normal") || grammar::is_length_percentage(value),
        "overflow" => ["visible", "hidden", "clip", "scroll", "auto"]
            .iter()
            .any(|keyword| value.is_ident(keyword)),
        _ => false,
    }
}

/// Render a pair, dropping the second value when it repeats the first.
pub(super) fn render_pair(spec: &ShorthandSpec, slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[first, second] = slots else {
        return None;
    };
    let valid = slots
        .iter()
        .all(|slot| matches!(atoms(slot).as_slice(), [value] if pair_accepts(spec.name, value)));
    if !valid {
        return None;
    }
    if values_equivalent(first, second) {
        Some(first.to_vec())
    } else {
        Some(join_spaced([first.to_vec(), second.to_vec()]))
    }
}
