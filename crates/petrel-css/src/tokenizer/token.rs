//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! Numeric tokens carry the code points they were built from (`repr`) next to
//! their numeric value. Serialization writes `repr` back out, which keeps
//! `0`, `0px` and `0.50` distinct and lets a value survive any number of
//! parse/serialize round trips byte for byte.

use core::fmt;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// "id" - the hash token's value is a valid identifier
    Id,
    /// "unrestricted" - the hash token's value is not a valid identifier
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// "integer" - the number is an integer
    Integer,
    /// "number" - the number has a decimal point or exponent
    Number,
}

/// The numeric part shared by `<number-token>`, `<percentage-token>` and
/// `<dimension-token>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Numeric {
    /// "a numeric value"
    pub value: f64,
    /// The code points consumed by [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number),
    /// sign included.
    pub repr: String,
    /// "a type flag set to either 'integer' or 'number'"
    pub numeric_type: NumericType,
}

impl Numeric {
    /// Build a numeric from its textual representation.
    ///
    /// Returns `None` when `repr` is not a CSS number.
    #[must_use]
    pub fn parse(repr: &str) -> Option<Self> {
        let value: f64 = repr.parse().ok()?;
        let numeric_type = if repr.contains(['.', 'e', 'E']) {
            NumericType::Number
        } else {
            NumericType::Integer
        };
        Some(Self {
            value,
            repr: repr.to_string(),
            numeric_type,
        })
    }

    /// The value as an integer, if the token was an integer.
    #[must_use]
    pub fn int_value(&self) -> Option<i64> {
        match self.numeric_type {
            NumericType::Integer => self.repr.parse().ok(),
            NumericType::Number => None,
        }
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// CSS tokens as defined by the CSS Syntax Module Level 3 specification.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSToken {
    /// "`<ident-token>`"
    Ident(String),

    /// "`<function-token>`" (the name, without the opening parenthesis)
    Function(String),

    /// "`<at-keyword-token>`" (the name, without the `@`)
    AtKeyword(String),

    /// "`<hash-token>`"
    Hash {
        /// "a value composed of one or more code points"
        value: String,
        /// "a type flag set to either 'id' or 'unrestricted'"
        hash_type: HashType,
    },

    /// "`<string-token>`" with escapes already resolved
    String(String),

    /// "`<bad-string-token>`"
    BadString,

    /// "`<url-token>`" (an unquoted `url(...)`)
    Url(String),

    /// "`<bad-url-token>`"
    BadUrl,

    /// "`<delim-token>`"
    Delim(char),

    /// "`<number-token>`"
    Number(Numeric),

    /// "`<percentage-token>`"
    Percentage(Numeric),

    /// "`<dimension-token>`"
    Dimension {
        /// The number part.
        number: Numeric,
        /// "a unit", with escapes already resolved
        unit: String,
    },

    /// "`<whitespace-token>`"
    Whitespace,

    /// "`<CDO-token>`" (`<!--`)
    CDO,

    /// "`<CDC-token>`" (`-->`)
    CDC,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// "`<comma-token>`"
    Comma,

    /// `<[-token>`
    LeftBracket,

    /// `<]-token>`
    RightBracket,

    /// `<(-token>`
    LeftParen,

    /// `<)-token>`
    RightParen,

    /// `<{-token>`
    LeftBrace,

    /// `<}-token>`
    RightBrace,

    /// End of file - signals end of input
    EOF,
}

impl CSSToken {
    /// Create a new ident token.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// Create a new string token.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a number token from its textual representation.
    ///
    /// # Panics
    ///
    /// Panics if `repr` is not a number. Intended for literals in tests and
    /// static tables.
    #[must_use]
    pub fn number(repr: &str) -> Self {
        Self::Number(Numeric::parse(repr).expect("number literal"))
    }

    /// Create a dimension token from its number text and unit.
    ///
    /// # Panics
    ///
    /// Panics if `repr` is not a number.
    #[must_use]
    pub fn dimension(repr: &str, unit: impl Into<String>) -> Self {
        Self::Dimension {
            number: Numeric::parse(repr).expect("number literal"),
            unit: unit.into(),
        }
    }

    /// Create a percentage token from its number text.
    ///
    /// # Panics
    ///
    /// Panics if `repr` is not a number.
    #[must_use]
    pub fn percentage(repr: &str) -> Self {
        Self::Percentage(Numeric::parse(repr).expect("number literal"))
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// The numeric part of a number, percentage or dimension token.
    #[must_use]
    pub const fn numeric(&self) -> Option<&Numeric> {
        match self {
            Self::Number(n) | Self::Percentage(n) | Self::Dimension { number: n, .. } => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "<ident:{v}>"),
            Self::Function(v) => write!(f, "<function:{v}(>"),
            Self::AtKeyword(v) => write!(f, "<at-keyword:@{v}>"),
            Self::Hash { value, hash_type } => {
                let t = match hash_type {
                    HashType::Id => "id",
                    HashType::Unrestricted => "unrestricted",
                };
                write!(f, "<hash:#{value} ({t})>")
            }
            Self::String(v) => write!(f, "<string:\"{v}\">"),
            Self::BadString => write!(f, "<bad-string>"),
            Self::Url(v) => write!(f, "<url:{v}>"),
            Self::BadUrl => write!(f, "<bad-url>"),
            Self::Delim(c) => write!(f, "<delim:{c}>"),
            Self::Number(n) => write!(f, "<number:{}>", n.repr),
            Self::Percentage(n) => write!(f, "<percentage:{}%>", n.repr),
            Self::Dimension { number, unit } => write!(f, "<dimension:{}{unit}>", number.repr),
            Self::Whitespace => write!(f, "<whitespace>"),
            Self::CDO => write!(f, "<CDO>"),
            Self::CDC => write!(f, "<CDC>"),
            Self::Colon => write!(f, "<colon>"),
            Self::Semicolon => write!(f, "<semicolon>"),
            Self::Comma => write!(f, "<comma>"),
            Self::LeftBracket => write!(f, "<[>"),
            Self::RightBracket => write!(f, "<]>"),
            Self::LeftParen => write!(f, "<(>"),
            Self::RightParen => write!(f, "<)>"),
            Self::LeftBrace => write!(f, "<{{>"),
            Self::RightBrace => write!(f, "<}}>"),
            Self::EOF => write!(f, "<EOF>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keeps_representation() {
        let n = Numeric::parse("0.50").unwrap();
        assert_eq!(n.repr, "0.50");
        assert_eq!(n.numeric_type, NumericType::Number);
        assert!((n.value - 0.5).abs() < f64::EPSILON);
        assert_eq!(n.int_value(), None);
    }

    #[test]
    fn test_integer_numeric() {
        let n = Numeric::parse("-12").unwrap();
        assert_eq!(n.numeric_type, NumericType::Integer);
        assert_eq!(n.int_value(), Some(-12));
    }

    #[test]
    fn test_zero_and_zero_px_differ() {
        assert_ne!(CSSToken::number("0"), CSSToken::dimension("0", "px"));
    }
}
