//! CSS object model with shorthand reconstruction and round-trip
//! serialization.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types, with the source text of numbers kept
//!   - Escape sequences, including the `\9` hack suffix
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style sheets, nested at-rules and declaration lists
//!
//! - **Declaration blocks** ([CSSOM § 6.7](https://drafts.csswg.org/cssom/#css-declaration-blocks))
//!   - Shorthands expanded into longhands on write
//!   - `setProperty`, `removeProperty`, `getPropertyValue`, `getPropertyPriority`
//!
//! - **Shorthand builder**
//!   - Rebuilding the shortest equivalent shorthand from stored longhands
//!   - Priority reconciliation, `var()` shorthands and `\9` hacks
//!
//! - **Serializer** ([CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block))
//!   - Formatted and minified text, both parsing back to the same block
//!
//! # Not Implemented
//!
//! - Selector matching and the cascade
//! - Computed values
//! - Reading style sheets from the network

/// Shorthand reconstruction from stored longhands.
pub mod builder;
/// Declaration blocks per [CSSOM § 6.7](https://drafts.csswg.org/cssom/#css-declaration-blocks).
pub mod declaration;
/// Errors reported by object-model edits.
pub mod error;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// The longhand property table.
pub mod properties;
/// Declaration block serialization.
pub mod serialize;
/// Shorthand descriptions and expansion.
pub mod shorthands;
/// Style sheets and their rule tree.
pub mod stylesheet;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Stored property values.
pub mod values;

// Re-exports for convenience
pub use declaration::{DeclarationBlock, LonghandEntry};
pub use error::{CssError, Result};
pub use parser::{CSSParser, ComponentValue, Declaration};
pub use serialize::{Mode, QuoteStyle, SerializeOptions};
pub use stylesheet::{CssRule, PropertyDescriptors, RuleId, RuleKind, StyleSheet};
pub use tokenizer::{CSSToken, CSSTokenizer};
pub use values::{GlobalKeyword, PendingSubstitution, PropertyValue};
