//! Rebuilding shorthands from the longhands of a declaration block.
//!
//! [CSSOM § 6.7.2 Serializing a CSS declaration block](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
//!
//! "If all properties that map to shorthand are not in longhands, continue
//! with the steps labeled shorthand loop. ... Let value be the result of
//! invoking serialize a CSS value of current longhands."
//!
//! [`build`] decides whether one shorthand can stand for the entries of a
//! block, and if so with which value and priority. It never fails: anything
//! it cannot express comes back as [`ShorthandOutcome::NoCollapse`], and the
//! serializer writes those entries as longhands.

/// Aligning comma-separated lists into layers.
pub mod layers;
/// Shorthands set through `var()`.
pub mod pending;
/// Choosing one priority for a shorthand.
pub mod priority;

use std::collections::HashMap;

use crate::declaration::LonghandEntry;
use crate::parser::ComponentValue;
use crate::shorthands::{FallbackOrder, ShorthandSpec, initial_components, is_initial};
use crate::values::{Classification, GlobalKeyword, PropertyValue, classify, ident};

use priority::{PriorityEntry, reconcile};

/// The entries of a block being serialized, with the ones already written.
#[derive(Debug)]
pub struct BlockView<'a> {
    entries: &'a [LonghandEntry],
    positions: HashMap<&'a str, usize>,
    done: Vec<bool>,
}

impl<'a> BlockView<'a> {
    /// A view in which nothing has been written yet.
    #[must_use]
    pub fn new(entries: &'a [LonghandEntry]) -> Self {
        Self {
            entries,
            positions: entries
                .iter()
                .enumerate()
                .map(|(index, entry)| (entry.name.as_str(), index))
                .collect(),
            done: vec![false; entries.len()],
        }
    }

    /// Every entry, in block order.
    #[must_use]
    pub const fn entries(&self) -> &'a [LonghandEntry] {
        self.entries
    }

    /// The entry at `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> &'a LonghandEntry {
        &self.entries[index]
    }

    /// Position of the entry named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// True once the entry at `index` has been written.
    #[must_use]
    pub fn is_done(&self, index: usize) -> bool {
        self.done[index]
    }

    /// Record that the entry at `index` has been written.
    pub fn mark_done(&mut self, index: usize) {
        self.done[index] = true;
    }
}

/// What [`build`] decided for one shorthand.
#[derive(Debug, Clone, PartialEq)]
pub enum ShorthandOutcome {
    /// The shorthand stands for every member. `overrides` must be written
    /// right after it, in order.
    Collapsed {
        /// The shorthand value.
        value: PropertyValue,
        /// Priority of the shorthand.
        important: bool,
        /// Entries the shorthand replaces.
        consumed: Vec<usize>,
        /// Entries that keep their own declaration after the shorthand.
        overrides: Vec<usize>,
    },
    /// The shorthand stands for `consumed` only; the other members are
    /// written on their own later.
    PartialCollapse {
        /// The shorthand value.
        value: PropertyValue,
        /// Priority of the shorthand.
        important: bool,
        /// Entries the shorthand replaces.
        consumed: Vec<usize>,
    },
    /// The shorthand cannot be written; the order to fall back to.
    NoCollapse(FallbackOrder),
}

/// One member of the shorthand under construction.
struct Member<'a> {
    name: &'static str,
    index: Option<usize>,
    entry: Option<&'a LonghandEntry>,
}

/// Decide whether `spec` can be written for the entries of `view` that have
/// not been written yet.
#[must_use]
pub fn build(spec: &'static ShorthandSpec, view: &BlockView<'_>) -> ShorthandOutcome {
    let members: Vec<Member<'_>> = spec
        .members()
        .map(|name| {
            let index = view.find(name);
            Member {
                name,
                index,
                entry: index.map(|i| view.entry(i)),
            }
        })
        .collect();

    // STEP 1: A member already written elsewhere would be reset by the
    // shorthand.
    if members.iter().filter_map(|m| m.index).any(|i| view.is_done(i)) {
        return ShorthandOutcome::NoCollapse(FallbackOrder::Source);
    }

    // STEP 2: var() only collapses when the whole shorthand was set through
    // the same reference.
    if members
        .iter()
        .filter_map(|m| m.entry)
        .any(|entry| matches!(entry.value, PropertyValue::Pending(_)))
    {
        return pending::collapse_whole(spec, view).unwrap_or(ShorthandOutcome::NoCollapse(FallbackOrder::Source));
    }

    // STEP 3: Only optional longhands may be absent. The shorthand would
    // give an absent reset-only longhand a declared value it did not have.
    let missing_required = members
        .iter()
        .any(|m| m.index.is_none() && !spec.is_optional(m.name));
    if missing_required {
        return ShorthandOutcome::NoCollapse(spec.fallback_order());
    }

    // STEP 4: One priority for the shorthand; the rest become overrides.
    let priorities: Vec<PriorityEntry> = members
        .iter()
        .map(|m| {
            m.entry.zip(m.index).map_or_else(PriorityEntry::virtual_initial, |(entry, index)| {
                PriorityEntry::present(index, entry.important)
            })
        })
        .collect();
    let Ok(reconciled) = reconcile(&priorities) else {
        return ShorthandOutcome::NoCollapse(FallbackOrder::Source);
    };
    let mut overrides = reconciled.overrides;

    // STEP 5: Hack-tagged values leave the shorthand and follow it.
    let mut merged: Vec<Option<&LonghandEntry>> = Vec::with_capacity(members.len());
    for member in &members {
        let entry = member
            .index
            .filter(|index| reconciled.mergeable.contains(index))
            .zip(member.entry);
        match entry {
            Some((index, entry)) if classify(&entry.value) == Classification::HackTagged => {
                overrides.push(index);
                merged.push(None);
            }
            Some((_, entry)) => merged.push(Some(entry)),
            None => merged.push(None),
        }
    }
    let consumed = |overrides: &[usize]| -> Vec<usize> {
        reconciled
            .mergeable
            .iter()
            .copied()
            .filter(|index| !overrides.contains(index))
            .collect()
    };
    if consumed(&overrides).is_empty() {
        return ShorthandOutcome::NoCollapse(FallbackOrder::Source);
    }

    // STEP 6: CSS-wide keywords collapse only when every member holds the
    // same one.
    let keywords: Vec<Option<GlobalKeyword>> = merged.iter().flatten().map(|entry| entry.value.keyword()).collect();
    if keywords.iter().any(Option::is_some) {
        let first = keywords[0];
        let uniform = keywords.iter().all(|keyword| *keyword == first);
        let complete = members.iter().all(|m| m.index.is_some());
        return match first {
            Some(keyword) if uniform && complete => {
                overrides.sort_unstable();
                ShorthandOutcome::Collapsed {
                    value: PropertyValue::Keyword(keyword),
                    important: reconciled.important,
                    consumed: consumed(&overrides),
                    overrides,
                }
            }
            _ => ShorthandOutcome::NoCollapse(spec.fallback_order()),
        };
    }

    // STEP 7: A value the shorthand cannot carry leaves it and follows it,
    // like a hack. Reset-only members can only be carried at their initial
    // value.
    let expressible = spec.longhands.len();
    for (slot, (member, entry)) in members.iter().zip(merged.iter_mut()).enumerate() {
        let Some((index, value)) = member.index.zip(entry.and_then(|entry| entry.value.components())) else {
            continue;
        };
        let carried = if slot < expressible {
            spec.kind.accepts(slot, value)
        } else {
            is_initial(member.name, value)
        };
        if !carried {
            overrides.push(index);
            *entry = None;
        }
    }
    overrides.sort_unstable();
    let consumed = consumed(&overrides);
    if consumed.is_empty() {
        return ShorthandOutcome::NoCollapse(FallbackOrder::Source);
    }

    // STEP 8: Render the expressible slots.
    let slots: Vec<&[ComponentValue]> = members
        .iter()
        .zip(&merged)
        .take(expressible)
        .map(|(member, entry)| {
            entry
                .and_then(|entry| entry.value.components())
                .unwrap_or_else(|| initial_components(member.name))
        })
        .collect();
    let value = match spec.matching_reset(&slots) {
        Some(keyword) => Some(vec![ident(keyword)]),
        None => spec.kind.render(spec, &slots),
    };
    match value {
        Some(value) => ShorthandOutcome::Collapsed {
            value: PropertyValue::Components(value),
            important: reconciled.important,
            consumed,
            overrides,
        },
        None => ShorthandOutcome::NoCollapse(FallbackOrder::Source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::DeclarationBlock;
    use crate::serialize::property_value_to_string;
    use crate::shorthands::shorthand;

    fn block(css: &str) -> DeclarationBlock {
        DeclarationBlock::parse(css)
    }

    /// The collapsed value and the names of the overrides.
    fn collapse(css: &str, name: &str) -> Option<(String, Vec<String>)> {
        let block = block(css);
        let entries: Vec<LonghandEntry> = block.iter().cloned().collect();
        let view = BlockView::new(&entries);
        match build(shorthand(name).unwrap(), &view) {
            ShorthandOutcome::Collapsed { value, overrides, .. } => Some((
                property_value_to_string(&value),
                overrides.iter().map(|&i| entries[i].name.clone()).collect(),
            )),
            _ => None,
        }
    }

    fn outcome(css: &str, name: &str) -> ShorthandOutcome {
        let block = block(css);
        let entries: Vec<LonghandEntry> = block.iter().cloned().collect();
        build(shorthand(name).unwrap(), &BlockView::new(&entries))
    }

    #[test]
    fn test_box_edge_collapse() {
        let (value, overrides) = collapse(
            "padding-top: 1px; padding-right: 2px; padding-bottom: 3px; padding-left: 4px",
            "padding",
        )
        .unwrap();
        assert_eq!(value, "1px 2px 3px 4px");
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_minority_priority_leaves_initial_slot() {
        let (value, overrides) = collapse(
            "padding-top: 5px !important; padding-right: 2px; padding-bottom: 3px; padding-left: 4px",
            "padding",
        )
        .unwrap();
        assert_eq!(value, "0 2px 3px 4px");
        assert_eq!(overrides, ["padding-top"]);
    }

    #[test]
    fn test_priority_tie_does_not_collapse() {
        assert_eq!(
            outcome(
                "margin-top: 1px !important; margin-right: 1px !important; margin-bottom: 1px; margin-left: 1px",
                "margin"
            ),
            ShorthandOutcome::NoCollapse(FallbackOrder::Source)
        );
    }

    #[test]
    fn test_missing_required_longhand() {
        assert_eq!(
            outcome("animation-duration: 1s; animation-name: foo", "animation"),
            ShorthandOutcome::NoCollapse(FallbackOrder::Alphabetical)
        );
        assert_eq!(
            outcome("margin-top: 1px; margin-right: 1px", "margin"),
            ShorthandOutcome::NoCollapse(FallbackOrder::Source)
        );
    }

    #[test]
    fn test_optional_longhand_may_be_absent() {
        let css = "text-decoration-line: underline; text-decoration-style: wavy; text-decoration-color: currentcolor";
        let (value, _) = collapse(css, "text-decoration").unwrap();
        assert_eq!(value, "underline wavy");
    }

    #[test]
    fn test_hack_tagged_value_follows_shorthand() {
        let (value, overrides) = collapse(
            r"margin-top: 1px; margin-right: 1px; margin-bottom: 1px; margin-left: 2px\9",
            "margin",
        )
        .unwrap();
        assert_eq!(value, "1px 1px 1px 0");
        assert_eq!(overrides, ["margin-left"]);
    }

    #[test]
    fn test_uniform_keyword() {
        let (value, _) = collapse(
            "margin-top: inherit; margin-right: INHERIT; margin-bottom: inherit; margin-left: inherit",
            "margin",
        )
        .unwrap();
        assert_eq!(value, "inherit");
    }

    #[test]
    fn test_mixed_keywords_fall_back() {
        assert_eq!(
            outcome(
                "list-style-type: inherit; list-style-position: inside; list-style-image: none",
                "list-style"
            ),
            ShorthandOutcome::NoCollapse(FallbackOrder::Alphabetical)
        );
    }

    #[test]
    fn test_var_collapses_only_as_a_whole() {
        let (value, _) = collapse("flex: var(--f)", "flex").unwrap();
        assert_eq!(value, "var(--f)");
        assert_eq!(
            outcome("flex: var(--f); flex-grow: 2", "flex"),
            ShorthandOutcome::NoCollapse(FallbackOrder::Source)
        );
    }

    #[test]
    fn test_keyword_bundle() {
        let (value, _) = collapse("flex-grow: 0; flex-shrink: 0; flex-basis: auto", "flex").unwrap();
        assert_eq!(value, "none");
    }

    #[test]
    fn test_reset_only_member_follows_shorthand() {
        let (value, overrides) = collapse("border: 1px solid red; border-image-source: url(a.png)", "border").unwrap();
        assert_eq!(value, "1px solid red");
        assert_eq!(overrides, ["border-image-source"]);
        let (value, overrides) = collapse("border: 1px solid red", "border").unwrap();
        assert_eq!(value, "1px solid red");
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_absent_reset_only_member_blocks_collapse() {
        let sides = "border-top: 1px solid red; border-right: 1px solid red; \
                     border-bottom: 1px solid red; border-left: 1px solid red";
        assert_eq!(outcome(sides, "border"), ShorthandOutcome::NoCollapse(FallbackOrder::Source));
        let font = "font-style: normal; font-variant-caps: normal; font-weight: bold; font-stretch: normal; \
                    font-size: 12px; line-height: 1.5; font-family: Arial";
        assert_eq!(outcome(font, "font"), ShorthandOutcome::NoCollapse(FallbackOrder::Alphabetical));
    }

    #[test]
    fn test_uncarried_value_follows_shorthand() {
        let (value, overrides) = collapse("background: url(a.png); background-size: foo", "background").unwrap();
        assert_eq!(value, "url(a.png)");
        assert_eq!(overrides, ["background-size"]);

        let (value, overrides) = collapse("font: 12px serif; font-variant-caps: all-small-caps", "font").unwrap();
        assert_eq!(value, "12px serif");
        assert_eq!(overrides, ["font-variant-caps"]);
    }

    #[test]
    fn test_unaligned_layers_are_not_overrides() {
        assert_eq!(
            outcome("background: url(a.png), url(b.png); background-size: 1px, 2px, 3px", "background"),
            ShorthandOutcome::NoCollapse(FallbackOrder::Source)
        );
    }

    #[test]
    fn test_written_member_blocks_collapse() {
        let block = block("margin-top: 1px; margin-right: 1px; margin-bottom: 1px; margin-left: 1px");
        let entries: Vec<LonghandEntry> = block.iter().cloned().collect();
        let mut view = BlockView::new(&entries);
        view.mark_done(0);
        assert_eq!(
            build(shorthand("margin").unwrap(), &view),
            ShorthandOutcome::NoCollapse(FallbackOrder::Source)
        );
    }
}
