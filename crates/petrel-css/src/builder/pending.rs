//! Shorthands set through `var()`.
//!
//! [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#variables-in-shorthands)
//!
//! "If a shorthand property contains a var() function, its longhand
//! properties must be filled with a special, unobservable-to-authors
//! pending-substitution value that indicates the shorthand contains a var(),
//! and thus the longhand's value can't be determined until after
//! substituted."
//!
//! The only way to write such longhands back is the shorthand they came
//! from, with the original value. Entries that share a shorthand, a value
//! and a priority form a [`PendingGroup`].

use std::cmp::Reverse;

use crate::shorthands::{ShorthandSpec, shorthand};
use crate::values::{PendingSubstitution, PropertyValue, values_identical};

use super::{BlockView, ShorthandOutcome};

/// Entries still holding the value of one `var()` shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGroup {
    /// The shorthand the value was set through.
    pub spec: &'static ShorthandSpec,
    /// The shorthand value, with its `var()` references.
    pub value: PendingSubstitution,
    /// Priority the shorthand was set with.
    pub important: bool,
    /// Entries in the group, in block order.
    pub members: Vec<usize>,
}

impl PendingGroup {
    /// True if no member has been overwritten since the shorthand was set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.members.len() == self.spec.members().count()
    }

    /// True if the two shorthands set a longhand in common.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.spec.members().any(|name| other.spec.contains(name))
    }

    /// The shorthand declaration that restores this group.
    #[must_use]
    pub fn outcome(&self) -> ShorthandOutcome {
        let value = PropertyValue::Pending(self.value.clone());
        if self.is_complete() {
            ShorthandOutcome::Collapsed {
                value,
                important: self.important,
                consumed: self.members.clone(),
                overrides: Vec::new(),
            }
        } else {
            ShorthandOutcome::PartialCollapse {
                value,
                important: self.important,
                consumed: self.members.clone(),
            }
        }
    }

    /// Write order for groups that overlap.
    ///
    /// A later shorthand overwrites every member of an earlier one it
    /// overlaps, so an incomplete group was set before any complete group
    /// it overlaps. Among incomplete groups the larger shorthand goes first.
    #[must_use]
    pub fn write_order(&self) -> (bool, Reverse<usize>, usize) {
        (
            self.is_complete(),
            Reverse(self.spec.members().count()),
            self.members.first().copied().unwrap_or(0),
        )
    }
}

/// Every pending group among the entries of `view` not yet written.
#[must_use]
pub fn pending_groups(view: &BlockView<'_>) -> Vec<PendingGroup> {
    let mut groups: Vec<PendingGroup> = Vec::new();

    for (index, entry) in view.entries().iter().enumerate() {
        if view.is_done(index) {
            continue;
        }
        let PropertyValue::Pending(pending) = &entry.value else {
            continue;
        };
        let Some(spec) = pending.shorthand.and_then(shorthand) else {
            continue;
        };
        let existing = groups.iter_mut().find(|group| {
            group.spec.name == spec.name
                && group.important == entry.important
                && values_identical(&group.value.value, &pending.value)
        });
        match existing {
            Some(group) => group.members.push(index),
            None => groups.push(PendingGroup {
                spec,
                value: pending.clone(),
                important: entry.important,
                members: vec![index],
            }),
        }
    }
    groups
}

/// `spec` written as the `var()` value every member holds, when the whole
/// shorthand was set through that value and nothing has replaced a member
/// since.
#[must_use]
pub fn collapse_whole(spec: &'static ShorthandSpec, view: &BlockView<'_>) -> Option<ShorthandOutcome> {
    pending_groups(view)
        .into_iter()
        .find(|group| group.spec.name == spec.name && group.is_complete())
        .map(|group| group.outcome())
}
