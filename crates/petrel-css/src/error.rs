//! Error types for the mutating object-model API.
//!
//! Parsing a whole style sheet never fails; invalid pieces are dropped with
//! a warning. Only explicit edits (`set_property`, descriptor writes) report
//! errors back to the caller.

use thiserror::Error;

/// Errors raised by declaration block and style sheet edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CssError {
    /// The property name is neither a known property, a custom property,
    /// nor vendor-prefixed.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// The value does not match the property's grammar.
    #[error("invalid value for {property}: {value}")]
    InvalidValue {
        /// Property being set.
        property: String,
        /// The rejected value text.
        value: String,
    },

    /// The value was empty after removing whitespace and `!important`.
    #[error("empty value for {0}")]
    EmptyValue(String),

    /// [CSSOM § 6.4](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    /// "throw an InvalidModificationError exception".
    #[error("invalid modification: {0}")]
    InvalidModification(String),

    /// No rule with this id exists in the style sheet.
    #[error("no rule with id {0}")]
    UnknownRule(usize),
}

/// Result alias for object-model edits.
pub type Result<T> = std::result::Result<T, CssError>;
