//! Aligning comma-separated lists into layers.
//!
//! [CSS Backgrounds and Borders Level 3 § 2.2](https://www.w3.org/TR/css-backgrounds-3/#layering)
//!
//! "The number of comma-separated items defines the number of background
//! layers. ... If a property doesn't have enough comma-separated values to
//! match the number of layers, the UA must calculate its used value by
//! repeating the list of values until there are enough. If a property has
//! more values than there are layers, the excess values are not used."

use thiserror::Error;

use crate::parser::ComponentValue;
use crate::values::split_commas;

/// The lists of a shorthand group cannot be aligned into layers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("a list of {found} items cannot be aligned to {layers} layers")]
pub struct NotLayerable {
    /// Number of layers, taken from the primary list.
    pub layers: usize,
    /// Length of the offending list.
    pub found: usize,
}

/// One value per longhand at a single comma position.
pub type Layer<'a> = Vec<&'a [ComponentValue]>;

/// Split each of `lists` at top-level commas and align them into layers.
///
/// The layer count is the length of `lists[primary]`. Shorter lists are
/// cycled and longer lists truncated, but only when one length divides the
/// other; `[a, b]` against three layers is rejected rather than producing
/// `[a, b, a]`, which would not survive a round trip.
///
/// # Errors
///
/// Returns [`NotLayerable`] when a list contains an empty item or its length
/// and the layer count do not divide one another.
pub fn split_layers<'a>(lists: &[&'a [ComponentValue]], primary: usize) -> Result<Vec<Layer<'a>>, NotLayerable> {
    let split: Vec<Vec<&'a [ComponentValue]>> = lists.iter().map(|&list| split_commas(list)).collect();
    let layers = split.get(primary).map_or(0, Vec::len);

    for items in &split {
        let found = items.len();
        let aligned = found == layers || (found > 0 && (layers % found == 0 || found % layers == 0));
        if layers == 0 || !aligned || items.iter().any(|item| item.is_empty()) {
            return Err(NotLayerable { layers, found });
        }
    }

    Ok((0..layers)
        .map(|layer| split.iter().map(|items| items[layer % items.len()]).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::serialize::value_to_string;
    use crate::values::normalize;

    fn layers(lists: &[&str]) -> Result<Vec<Vec<String>>, NotLayerable> {
        let parsed: Vec<Vec<ComponentValue>> = lists.iter().map(|l| normalize(&parse_value(l).0)).collect();
        let slices: Vec<&[ComponentValue]> = parsed.iter().map(Vec::as_slice).collect();
        Ok(split_layers(&slices, 0)?
            .into_iter()
            .map(|layer| layer.into_iter().map(value_to_string).collect())
            .collect())
    }

    #[test]
    fn test_equal_lengths() {
        assert_eq!(
            layers(&["url(a), url(b)", "0 0, center"]).unwrap(),
            [["url(a)", "0 0"], ["url(b)", "center"]]
        );
    }

    #[test]
    fn test_shorter_list_cycles() {
        let result = layers(&["a, b, c, d", "x, y"]).unwrap();
        let second: Vec<_> = result.iter().map(|layer| layer[1].as_str()).collect();
        assert_eq!(second, ["x", "y", "x", "y"]);
    }

    #[test]
    fn test_longer_list_truncates() {
        assert_eq!(layers(&["a", "x, y"]).unwrap(), [["a", "x"]]);
    }

    #[test]
    fn test_uneven_lengths_rejected() {
        assert_eq!(layers(&["a, b, c", "x, y"]), Err(NotLayerable { layers: 3, found: 2 }));
    }

    #[test]
    fn test_empty_item_rejected() {
        assert!(layers(&["a,", "x"]).is_err());
    }
}
