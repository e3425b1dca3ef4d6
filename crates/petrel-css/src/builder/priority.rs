//! Choosing one priority for a shorthand.
//!
//! [CSS Cascading Level 4 § 6.4](https://www.w3.org/TR/css-cascade-4/#importance)
//!
//! "A declaration is important if it has a !important annotation."
//!
//! A shorthand carries a single priority. Longhands that disagree with the
//! priority chosen for the shorthand are written after it as separate
//! declarations, so that their own priority still applies on re-parse.

use thiserror::Error;

/// The priority of one member of a shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityEntry {
    /// Position of the entry in its declaration block, or `None` for an
    /// absent longhand standing in at its initial value.
    pub index: Option<usize>,
    /// Whether the entry is `!important`. Absent longhands are normal.
    pub important: bool,
}

impl PriorityEntry {
    /// An entry present in the block.
    #[must_use]
    pub const fn present(index: usize, important: bool) -> Self {
        Self {
            index: Some(index),
            important,
        }
    }

    /// An absent longhand.
    #[must_use]
    pub const fn virtual_initial() -> Self {
        Self {
            index: None,
            important: false,
        }
    }
}

/// Important and normal entries are evenly split.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{count} important and {count} normal declarations leave no majority priority")]
pub struct PriorityTie {
    /// Number of entries on each side.
    pub count: usize,
}

/// The outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The priority the shorthand is written with.
    pub important: bool,
    /// Present entries with the majority priority.
    pub mergeable: Vec<usize>,
    /// Present entries with the other priority, in block order.
    pub overrides: Vec<usize>,
}

/// Split `entries` into the majority priority and the overrides.
///
/// Absent longhands vote as normal entries but never become overrides.
///
/// # Errors
///
/// Returns [`PriorityTie`] when neither priority has a strict majority.
pub fn reconcile(entries: &[PriorityEntry]) -> Result<Reconciliation, PriorityTie> {
    let important_count = entries.iter().filter(|entry| entry.important).count();
    let normal_count = entries.len() - important_count;
    if important_count == normal_count {
        return Err(PriorityTie { count: important_count });
    }
    let important = important_count > normal_count;

    let (mut mergeable, mut overrides): (Vec<usize>, Vec<usize>) = (Vec::new(), Vec::new());
    for entry in entries {
        let Some(index) = entry.index else {
            continue;
        };
        if entry.important == important {
            mergeable.push(index);
        } else {
            overrides.push(index);
        }
    }
    mergeable.sort_unstable();
    overrides.sort_unstable();

    Ok(Reconciliation {
        important,
        mergeable,
        overrides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanimous() {
        let entries = [PriorityEntry::present(0, true), PriorityEntry::present(1, true)];
        let result = reconcile(&entries).unwrap();
        assert!(result.important);
        assert_eq!(result.mergeable, [0, 1]);
        assert!(result.overrides.is_empty());
    }

    #[test]
    fn test_minority_becomes_override() {
        let entries = [
            PriorityEntry::present(3, true),
            PriorityEntry::present(0, false),
            PriorityEntry::present(1, false),
            PriorityEntry::present(2, false),
        ];
        let result = reconcile(&entries).unwrap();
        assert!(!result.important);
        assert_eq!(result.mergeable, [0, 1, 2]);
        assert_eq!(result.overrides, [3]);
    }

    #[test]
    fn test_even_split_is_a_tie() {
        let entries = [
            PriorityEntry::present(0, true),
            PriorityEntry::present(1, true),
            PriorityEntry::present(2, false),
            PriorityEntry::present(3, false),
        ];
        assert_eq!(reconcile(&entries), Err(PriorityTie { count: 2 }));
    }

    #[test]
    fn test_absent_longhands_vote_normal() {
        let entries = [
            PriorityEntry::present(0, true),
            PriorityEntry::virtual_initial(),
            PriorityEntry::virtual_initial(),
        ];
        let result = reconcile(&entries).unwrap();
        assert!(!result.important);
        assert!(result.mergeable.is_empty());
        assert_eq!(result.overrides, [0]);
    }
}
