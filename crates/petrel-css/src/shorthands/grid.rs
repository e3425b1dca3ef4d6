//! Grid placement and template shorthands.
//!
//! [CSS Grid Layout Level 2 § 8.4](https://www.w3.org/TR/css-grid-2/#placement-shorthands)
//! and [§ 7.4](https://www.w3.org/TR/css-grid-2/#explicit-grid-shorthand).

use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, ident, join_spaced, slash, split_slashes, values_identical};

use super::is_initial;

fn auto() -> Vec<ComponentValue> {
    vec![ident("auto")]
}

fn none() -> Vec<ComponentValue> {
    vec![ident("none")]
}

/// True if the line is a lone `<custom-ident>`.
fn is_line_name(values: &[ComponentValue]) -> bool {
    grammar::is_single(values, grammar::is_grid_line_ident)
}

fn is_grid_line(values: &[ComponentValue]) -> bool {
    grammar::is_grid_line(&atoms(values))
}

/// "When the second value is omitted, if the first value is a
/// <custom-ident>, the grid-row-end/grid-column-end longhand is also set to
/// that <custom-ident>; otherwise, it is set to auto."
fn implied_end(start: &[ComponentValue]) -> Vec<ComponentValue> {
    if is_line_name(start) { start.to_vec() } else { auto() }
}

/// True if `end` is what omitting it after `start` would produce.
///
/// Line names are case-sensitive, so the comparison is exact.
fn end_is_implied(start: &[ComponentValue], end: &[ComponentValue]) -> bool {
    if is_line_name(start) {
        values_identical(start, end)
    } else {
        end.len() == 1 && end[0].is_ident("auto")
    }
}

/// Split `a / b / c` into its parts, rejecting empty parts.
fn slash_parts(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let parts: Vec<Vec<ComponentValue>> = split_slashes(values).into_iter().map(<[_]>::to_vec).collect();
    if parts.iter().any(|part| atoms(part).is_empty()) {
        return None;
    }
    Some(parts)
}

fn join_slashes(parts: impl IntoIterator<Item = Vec<ComponentValue>>) -> Vec<ComponentValue> {
    let mut out = Vec::new();
    for part in parts {
        if !out.is_empty() {
            out.push(slash());
        }
        out.extend(part);
    }
    out
}

/// `<grid-line> [ / <grid-line> ]?`
pub(super) fn expand_line(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let parts = slash_parts(values)?;
    if !parts.iter().all(|part| is_grid_line(part)) {
        return None;
    }
    match parts.as_slice() {
        [start] => Some(vec![start.clone(), implied_end(start)]),
        [start, end] => Some(vec![start.clone(), end.clone()]),
        _ => None,
    }
}

pub(super) fn render_line(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[start, end] = slots else {
        return None;
    };
    if !is_grid_line(start) || !is_grid_line(end) {
        return None;
    }
    if end_is_implied(start, end) {
        Some(start.to_vec())
    } else {
        Some(join_slashes([start.to_vec(), end.to_vec()]))
    }
}

/// `<grid-line> [ / <grid-line> ]{0,3}` in the order row-start,
/// column-start, row-end, column-end.
pub(super) fn expand_area(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let mut parts = slash_parts(values)?;
    if parts.len() > 4 || !parts.iter().all(|part| is_grid_line(part)) {
        return None;
    }
    // STEP 1: A missing column-start and row-end default from row-start; a
    // missing column-end defaults from column-start.
    while parts.len() < 4 {
        let source = if parts.len() == 3 { &parts[1] } else { &parts[0] };
        let implied = implied_end(source);
        parts.push(implied);
    }
    Some(parts)
}

pub(super) fn render_area(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[row_start, column_start, row_end, column_end] = slots else {
        return None;
    };
    if !slots.iter().all(|slot| is_grid_line(slot)) {
        return None;
    }
    // Drop trailing components for as long as each equals its default.
    let mut count = 4;
    if end_is_implied(column_start, column_end) {
        count = 3;
        if end_is_implied(row_start, row_end) {
            count = 2;
            if end_is_implied(row_start, column_start) {
                count = 1;
            }
        }
    }
    Some(join_slashes(slots[..count].iter().map(|slot| slot.to_vec())))
}

fn is_track_list(values: &[ComponentValue]) -> bool {
    grammar::is_track_list(&atoms(values))
}

fn is_none(values: &[ComponentValue]) -> bool {
    grammar::is_single(values, |v| v.is_ident("none"))
}

fn merge_line_names(a: &ComponentValue, b: &ComponentValue) -> Option<ComponentValue> {
    match (a, b) {
        (ComponentValue::Block { token: '[', value: first }, ComponentValue::Block { token: '[', value: second }) => {
            Some(ComponentValue::Block {
                token: '[',
                value: join_spaced([first.clone(), second.clone()]),
            })
        }
        _ => None,
    }
}

/// Parse the `[ <line-names>? <string> <track-size>? <line-names>? ]+`
/// rows of the areas form into a row track list and the area strings.
fn parse_area_rows(values: &[ComponentValue]) -> Option<(Vec<ComponentValue>, Vec<ComponentValue>)> {
    let parts = atoms(values);
    let mut tracks: Vec<ComponentValue> = Vec::new();
    let mut strings: Vec<Vec<ComponentValue>> = Vec::new();
    let mut i = 0;

    while i < parts.len() {
        // Line names before the string merge with the previous row's
        // trailing names.
        if grammar::is_line_names(parts[i]) {
            match tracks.last().and_then(|last| merge_line_names(last, parts[i])) {
                Some(merged) => {
                    let _ = tracks.pop();
                    tracks.push(merged);
                }
                None => tracks.push(parts[i].clone()),
            }
            i += 1;
        }
        let string = parts.get(i).filter(|v| grammar::is_string(v))?;
        strings.push(vec![(*string).clone()]);
        i += 1;
        match parts.get(i) {
            Some(size) if grammar::is_track_size(size) && !grammar::is_line_names(size) => {
                tracks.push((*size).clone());
                i += 1;
            }
            _ => tracks.push(ident("auto")),
        }
        if parts.get(i).is_some_and(|v| grammar::is_line_names(v)) {
            tracks.push(parts[i].clone());
            i += 1;
        }
    }
    if strings.is_empty() {
        return None;
    }
    let tracks = join_spaced(tracks.into_iter().map(|track| vec![track]));
    Some((tracks, join_spaced(strings)))
}

/// `none | [ <'grid-template-rows'> / <'grid-template-columns'> ] |
/// [ <line-names>? <string> <track-size>? <line-names>? ]+ [ / <explicit-track-list> ]?`
pub(super) fn expand_template(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    if is_none(values) {
        return Some(vec![none(), none(), none()]);
    }
    let parts = slash_parts(values)?;
    let has_strings = atoms(values).iter().any(|v| grammar::is_string(v));

    if has_strings {
        let (rows, areas) = parse_area_rows(&parts[0])?;
        let columns = match parts.as_slice() {
            [_] => none(),
            [_, columns] if is_explicit_track_list(columns) => columns.clone(),
            _ => return None,
        };
        return Some(vec![rows, columns, areas]);
    }
    match parts.as_slice() {
        [rows, columns] if is_track_list(rows) && is_track_list(columns) => {
            Some(vec![rows.clone(), columns.clone(), none()])
        }
        _ => None,
    }
}

/// A track list that may follow the areas form.
fn is_explicit_track_list(values: &[ComponentValue]) -> bool {
    let parts = atoms(values);
    !parts.is_empty()
        && parts.iter().all(|v| grammar::is_track_component(v))
        && !parts.iter().any(|v| v.is_ident("none") || v.is_ident("subgrid"))
}

/// Interleave row tracks with the area strings.
///
/// Each string takes the next plain track size; line names stay where they
/// are. `None` if the counts differ or a row track is a `repeat()`.
fn render_area_rows(rows: &[ComponentValue], areas: &[ComponentValue]) -> Option<Vec<ComponentValue>> {
    let strings: Vec<&ComponentValue> = atoms(areas);
    if strings.is_empty() || !strings.iter().all(|v| grammar::is_string(v)) {
        return None;
    }
    let mut out: Vec<Vec<ComponentValue>> = Vec::new();
    let mut next = strings.iter();
    for track in atoms(rows) {
        if grammar::is_line_names(track) {
            out.push(vec![track.clone()]);
        } else if grammar::is_track_size(track) {
            out.push(vec![(*next.next()?).clone()]);
            if !track.is_ident("auto") {
                out.push(vec![track.clone()]);
            }
        } else {
            return None;
        }
    }
    if next.next().is_some() {
        return None;
    }
    Some(join_spaced(out))
}

pub(super) fn render_template(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[rows, columns, areas] = slots else {
        return None;
    };
    if !is_track_list(rows) || !is_track_list(columns) {
        return None;
    }
    if is_none(areas) {
        if is_none(rows) && is_none(columns) {
            return Some(none());
        }
        return Some(join_slashes([rows.to_vec(), columns.to_vec()]));
    }
    let area_rows = render_area_rows(rows, areas)?;
    if is_none(columns) {
        return Some(area_rows);
    }
    if !is_explicit_track_list(columns) {
        return None;
    }
    Some(join_slashes([area_rows, columns.to_vec()]))
}

/// `grid-auto-flow`: `[ row | column ] || dense`
fn parse_flow(values: &[ComponentValue]) -> Option<(bool, bool)> {
    let parts = atoms(values);
    let mut column = None;
    let mut dense = false;
    for part in parts {
        if part.is_ident("dense") && !dense {
            dense = true;
        } else if column.is_none() && (part.is_ident("row") || part.is_ident("column")) {
            column = Some(part.is_ident("column"));
        } else {
            return None;
        }
    }
    if column.is_none() && !dense {
        return None;
    }
    Some((column.unwrap_or(false), dense))
}

fn is_auto_tracks(values: &[ComponentValue]) -> bool {
    let parts = atoms(values);
    !parts.is_empty() && parts.iter().all(|v| grammar::is_track_size(v))
}

fn flow_value(column: bool, dense: bool) -> Vec<ComponentValue> {
    let mut parts = vec![vec![ident(if column { "column" } else { "row" })]];
    if dense {
        parts.push(vec![ident("dense")]);
    }
    join_spaced(parts)
}

/// Split `auto-flow && dense?` plus trailing track sizes.
fn parse_auto_flow_side(values: &[ComponentValue]) -> Option<(bool, Vec<ComponentValue>)> {
    let parts = atoms(values);
    let mut dense = false;
    let mut seen_flow = false;
    let mut i = 0;
    while let Some(part) = parts.get(i) {
        if part.is_ident("auto-flow") && !seen_flow {
            seen_flow = true;
        } else if part.is_ident("dense") && !dense {
            dense = true;
        } else {
            break;
        }
        i += 1;
    }
    if !seen_flow {
        return None;
    }
    let sizes: Vec<ComponentValue> = join_spaced(parts[i..].iter().map(|v| vec![(*v).clone()]));
    if sizes.is_empty() {
        return Some((dense, auto()));
    }
    is_auto_tracks(&sizes).then_some((dense, sizes))
}

/// `<'grid-template'> | <'grid-template-rows'> / [ auto-flow && dense? ]
/// <'grid-auto-columns'>? | [ auto-flow && dense? ] <'grid-auto-rows'>? /
/// <'grid-template-columns'>`
pub(super) fn expand_grid(values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
    let has_auto_flow = atoms(values).iter().any(|v| v.is_ident("auto-flow"));
    if !has_auto_flow {
        let mut expanded = expand_template(values)?;
        expanded.extend([auto(), auto(), vec![ident("row")]]);
        return Some(expanded);
    }
    let parts = slash_parts(values)?;
    let [left, right] = parts.as_slice() else {
        return None;
    };
    if let Some((dense, auto_rows)) = parse_auto_flow_side(left) {
        if !is_track_list(right) {
            return None;
        }
        return Some(vec![none(), right.clone(), none(), auto_rows, auto(), flow_value(false, dense)]);
    }
    let (dense, auto_columns) = parse_auto_flow_side(right)?;
    if !is_track_list(left) {
        return None;
    }
    Some(vec![left.clone(), none(), none(), auto(), auto_columns, flow_value(true, dense)])
}

pub(super) fn render_grid(slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let &[rows, columns, areas, auto_rows, auto_columns, flow] = slots else {
        return None;
    };
    let (column_flow, dense) = parse_flow(flow)?;
    if !is_auto_tracks(auto_rows) || !is_auto_tracks(auto_columns) {
        return None;
    }
    let rows_auto = is_initial("grid-auto-rows", auto_rows);
    let columns_auto = is_initial("grid-auto-columns", auto_columns);

    // STEP 1: Nothing implicit is set; the template form carries it all.
    if rows_auto && columns_auto && !column_flow && !dense {
        return render_template(&[rows, columns, areas]);
    }

    if !is_none(areas) || !is_track_list(rows) || !is_track_list(columns) {
        return None;
    }
    let mut flow_side = vec![vec![ident("auto-flow")]];
    if dense {
        flow_side.push(vec![ident("dense")]);
    }

    // STEP 2: `auto-flow [dense] <auto-rows>? / <columns>`
    if !column_flow {
        if !is_none(rows) || !columns_auto {
            return None;
        }
        if !rows_auto {
            flow_side.push(auto_rows.to_vec());
        }
        return Some(join_slashes([join_spaced(flow_side), columns.to_vec()]));
    }

    // STEP 3: `<rows> / auto-flow [dense] <auto-columns>?`
    if !is_none(columns) || !rows_auto {
        return None;
    }
    if !columns_auto {
        flow_side.push(auto_columns.to_vec());
    }
    Some(join_slashes([rows.to_vec(), join_spaced(flow_side)]))
}
