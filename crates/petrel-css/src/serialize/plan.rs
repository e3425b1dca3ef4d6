//! Choosing between shorthands and longhands for a whole block.
//!
//! [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
//!
//! "Shorthand loop: For each shorthand in shorthands, follow these
//! substeps: ... If value is the empty string, continue with the steps
//! labeled shorthand loop. ... Append serialized declaration to list.
//! Append the property names of all items of current longhands to already
//! serialized. Continue with the steps labeled declaration loop."
//!
//! Declarations are written so that reading them back in order, with each
//! one replacing earlier values of the longhands it sets, reproduces the
//! block. Three rules follow from that:
//!
//! - a shorthand is never written after one of its members, since it would
//!   reset that member;
//! - longhands that override a shorthand come right after it;
//! - a `var()` shorthand is written before every longhand that replaced
//!   part of it, and before any `var()` shorthand that replaced part of it.

use crate::builder::pending::{PendingGroup, pending_groups};
use crate::builder::{BlockView, ShorthandOutcome, build};
use crate::declaration::LonghandEntry;
use crate::shorthands::{FallbackOrder, ShorthandSpec, candidates};
use crate::values::PropertyValue;

/// One declaration to be written: a shorthand or a longhand.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationNode {
    /// Property name.
    pub name: String,
    /// The value to write.
    pub value: PropertyValue,
    /// Whether to append `!important`.
    pub important: bool,
}

struct Planner<'a> {
    view: BlockView<'a>,
    groups: Vec<PendingGroup>,
    written_groups: Vec<bool>,
    nodes: Vec<DeclarationNode>,
}

/// Decide the declarations that represent `entries`, in write order.
#[must_use]
pub fn plan(entries: &[LonghandEntry]) -> Vec<DeclarationNode> {
    let view = BlockView::new(entries);
    let groups = pending_groups(&view);
    let mut planner = Planner {
        written_groups: vec![false; groups.len()],
        groups,
        view,
        nodes: Vec::with_capacity(entries.len()),
    };
    for index in 0..entries.len() {
        planner.visit(index);
    }
    planner.nodes
}

impl Planner<'_> {
    fn visit(&mut self, index: usize) {
        if self.view.is_done(index) {
            return;
        }
        let entry = self.view.entry(index);

        // STEP 1: var() shorthands touching this longhand come first.
        self.flush_pending(&[entry.name.as_str()]);
        if self.view.is_done(index) {
            return;
        }

        // STEP 2: Try each shorthand that can express the longhand, largest
        // first.
        let specs = candidates(&entry.name);
        for (position, &spec) in specs.iter().enumerate() {
            match build(spec, &self.view) {
                ShorthandOutcome::Collapsed {
                    value,
                    important,
                    consumed,
                    overrides,
                } => {
                    let members: Vec<&str> = spec.members().collect();
                    self.flush_pending(&members);
                    self.push_shorthand(spec.name, value, important, &consumed);
                    for index in overrides {
                        self.push_longhand(index);
                    }
                    return;
                }
                ShorthandOutcome::NoCollapse(FallbackOrder::Alphabetical) if position + 1 == specs.len() => {
                    self.push_alphabetical(spec);
                    return;
                }
                ShorthandOutcome::PartialCollapse { .. } | ShorthandOutcome::NoCollapse(_) => {}
            }
        }

        // STEP 3: Nothing collapsed; write the longhand as it is.
        self.push_longhand(index);
    }

    /// Write every unwritten `var()` shorthand that sets one of `names`,
    /// together with the ones it overlaps, oldest first.
    fn flush_pending(&mut self, names: &[&str]) {
        let mut selected: Vec<usize> = (0..self.groups.len())
            .filter(|&g| !self.written_groups[g] && names.iter().any(|name| self.groups[g].spec.contains(name)))
            .collect();
        if selected.is_empty() {
            return;
        }

        let mut grew = true;
        while grew {
            grew = false;
            for g in 0..self.groups.len() {
                if self.written_groups[g] || selected.contains(&g) {
                    continue;
                }
                if selected.iter().any(|&s| self.groups[s].overlaps(&self.groups[g])) {
                    selected.push(g);
                    grew = true;
                }
            }
        }

        selected.sort_by_key(|&g| self.groups[g].write_order());
        for g in selected {
            self.written_groups[g] = true;
            let group = self.groups[g].clone();
            let (ShorthandOutcome::Collapsed {
                value,
                important,
                consumed,
                ..
            }
            | ShorthandOutcome::PartialCollapse {
                value,
                important,
                consumed,
            }) = group.outcome()
            else {
                continue;
            };
            self.push_shorthand(group.spec.name, value, important, &consumed);
        }
    }

    /// A group that failed to collapse, written by property name.
    fn push_alphabetical(&mut self, spec: &'static ShorthandSpec) {
        let members: Vec<&str> = spec.members().collect();
        self.flush_pending(&members);

        let view = &self.view;
        let mut present: Vec<usize> = members
            .iter()
            .filter_map(|name| view.find(name))
            .filter(|&index| !view.is_done(index))
            .collect();
        present.sort_by(|&a, &b| view.entry(a).name.cmp(&view.entry(b).name));
        for index in present {
            self.push_longhand(index);
        }
    }

    fn push_shorthand(&mut self, name: &str, value: PropertyValue, important: bool, consumed: &[usize]) {
        for &index in consumed {
            self.view.mark_done(index);
        }
        self.nodes.push(DeclarationNode {
            name: name.to_string(),
            value,
            important,
        });
    }

    fn push_longhand(&mut self, index: usize) {
        self.view.mark_done(index);
        let entry = self.view.entry(index);
        self.nodes.push(DeclarationNode {
            name: entry.name.clone(),
            value: entry.value.clone(),
            important: entry.important,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::DeclarationBlock;
    use crate::serialize::property_value_to_string;

    fn planned(css: &str) -> Vec<String> {
        let entries: Vec<LonghandEntry> = DeclarationBlock::parse(css).iter().cloned().collect();
        plan(&entries)
            .iter()
            .map(|node| {
                let important = if node.important { " !important" } else { "" };
                format!("{}: {}{important}", node.name, property_value_to_string(&node.value))
            })
            .collect()
    }

    #[test]
    fn test_unrelated_longhands_keep_order() {
        assert_eq!(planned("width: 1px; color: red"), ["width: 1px", "color: red"]);
    }

    #[test]
    fn test_largest_shorthand_wins() {
        let css = "border: 2px dotted blue; border-top: 1px solid red; border-right: 1px solid red; \
                   border-bottom: 1px solid red; border-left: 1px solid red";
        assert_eq!(planned(css), ["border: 1px solid red"]);
    }

    #[test]
    fn test_sides_without_border_image_stay_narrow() {
        let css = "border-top: 1px solid red; border-right: 1px solid red; \
                   border-bottom: 1px solid red; border-left: 1px solid red";
        assert_eq!(planned(css), ["border-width: 1px", "border-style: solid", "border-color: red"]);
    }

    #[test]
    fn test_reset_only_override_follows_font() {
        assert_eq!(
            planned("font: 12px serif; font-kerning: none"),
            ["font: 12px serif", "font-kerning: none"]
        );
    }

    #[test]
    fn test_smaller_shorthands_when_sides_differ() {
        let css = "border-top: 1px solid red; border-right: 2px solid red; \
                   border-bottom: 1px solid red; border-left: 2px solid red";
        assert_eq!(
            planned(css),
            ["border-width: 1px 2px", "border-style: solid", "border-color: red"]
        );
    }

    #[test]
    fn test_override_follows_shorthand() {
        let css = "padding-top: 1px; padding-right: 2px; padding-bottom: 3px; padding-left: 4px; \
                   padding-top: 5px !important";
        assert_eq!(planned(css), ["padding: 0 2px 3px 4px", "padding-top: 5px !important"]);
    }

    #[test]
    fn test_alphabetical_fallback() {
        let css = r"animation-duration: 3200ms; animation-delay: 1s; animation-fill-mode: none; animation-name: foo\9";
        assert_eq!(
            planned(css),
            [
                "animation-delay: 1s",
                "animation-duration: 3200ms",
                "animation-fill-mode: none",
                r"animation-name: foo\9",
            ]
        );
    }

    #[test]
    fn test_var_shorthand_precedes_overriding_longhand() {
        assert_eq!(
            planned("border-top-width: 2px; border-top: var(--b); border-top-color: red"),
            ["border-top: var(--b)", "border-top-color: red"]
        );
    }

    #[test]
    fn test_overwritten_var_shorthand_written_first() {
        let planned = planned("border: var(--a); border-top: var(--b)");
        assert_eq!(planned, ["border: var(--a)", "border-top: var(--b)"]);
    }
}
