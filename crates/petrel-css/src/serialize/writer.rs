//! Token-level CSS text output.
//!
//! [CSSOM § 6.7.2 Serializing CSS Values](https://drafts.csswg.org/cssom/#serializing-css-values)

use crate::parser::ComponentValue;
use crate::tokenizer::{CSSToken, HashType};

use super::{Mode, QuoteStyle, SerializeOptions};

/// Appends component values to a string.
///
/// A hex escape such as `\9` may absorb one following whitespace character
/// and swallows following hex digits, so the writer remembers when it has
/// just written one and inserts a separating space if the next character
/// would be read as part of the escape.
#[derive(Debug)]
pub struct CssWriter<'o> {
    out: String,
    mode: Mode,
    options: &'o SerializeOptions,
    after_escape: bool,
}

impl<'o> CssWriter<'o> {
    /// An empty writer.
    #[must_use]
    pub const fn new(mode: Mode, options: &'o SerializeOptions) -> Self {
        Self {
            out: String::new(),
            mode,
            options,
            after_escape: false,
        }
    }

    /// True if the last thing written was a hex escape.
    #[must_use]
    pub const fn ends_with_escape(&self) -> bool {
        self.after_escape
    }

    /// The text written so far.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    /// Append raw text.
    pub fn push_str(&mut self, text: &str) {
        if self.after_escape {
            if text.starts_with(|c: char| c.is_ascii_hexdigit() || c.is_ascii_whitespace()) {
                self.out.push(' ');
            }
            if !text.is_empty() {
                self.after_escape = false;
            }
        }
        self.out.push_str(text);
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    /// [§ 2.1 Common Serializing Idioms](https://drafts.csswg.org/cssom/#escape-a-character-as-code-point)
    ///
    /// "To escape a character as code point means to create a string of
    /// "\" (U+005C), followed by the Unicode code point as the smallest
    /// possible number of hexadecimal digits in the range 0-9 a-f (U+0030 to
    /// U+0039 and U+0061 to U+0066) to represent the code point in base 16,
    /// followed by a single SPACE (U+0020)."
    ///
    /// The space is left out unless the next character needs it.
    fn push_hex_escape(&mut self, c: char) {
        self.push_str(&format!("\\{:x}", u32::from(c)));
        self.after_escape = true;
    }

    /// Write a sequence of component values.
    pub fn write_values(&mut self, values: &[ComponentValue]) {
        for value in values {
            self.write_component(value);
        }
    }

    /// Write one component value.
    pub fn write_component(&mut self, value: &ComponentValue) {
        match value {
            ComponentValue::Token(token) => self.write_token(token),
            ComponentValue::Function { name, value } => {
                self.write_ident(name);
                self.push_str("(");
                self.write_values(value);
                self.push_str(")");
            }
            ComponentValue::Block { token, value } => {
                let close = match token {
                    '[' => ']',
                    '{' => '}',
                    _ => ')',
                };
                self.push_char(*token);
                self.write_values(value);
                self.push_char(close);
            }
        }
    }

    fn write_token(&mut self, token: &CSSToken) {
        match token {
            CSSToken::Ident(ident) => self.write_ident(ident),
            CSSToken::Function(name) => {
                self.write_ident(name);
                self.push_str("(");
            }
            CSSToken::AtKeyword(name) => {
                self.push_str("@");
                self.write_ident(name);
            }
            CSSToken::Hash { value, hash_type } => {
                self.push_str("#");
                match hash_type {
                    HashType::Id => self.write_ident(value),
                    HashType::Unrestricted => self.write_name(value),
                }
            }
            CSSToken::String(text) => self.write_string(text),
            CSSToken::Url(url) => self.write_url(url),
            CSSToken::Delim('/') => match self.mode {
                Mode::Formatted => self.push_str(" / "),
                Mode::Minified => self.push_str("/"),
            },
            CSSToken::Delim(c) => self.push_char(*c),
            CSSToken::Number(number) => self.push_str(&number.repr),
            CSSToken::Percentage(number) => {
                self.push_str(&number.repr);
                self.push_str("%");
            }
            CSSToken::Dimension { number, unit } => {
                self.push_str(&number.repr);
                self.write_unit(unit);
            }
            CSSToken::Whitespace => self.push_str(" "),
            CSSToken::Comma => match self.mode {
                Mode::Formatted => self.push_str(", "),
                Mode::Minified => self.push_str(","),
            },
            CSSToken::CDO => self.push_str("<!--"),
            CSSToken::CDC => self.push_str("-->"),
            CSSToken::Colon => self.push_str(":"),
            CSSToken::Semicolon => self.push_str(";"),
            CSSToken::LeftBracket => self.push_str("["),
            CSSToken::RightBracket => self.push_str("]"),
            CSSToken::LeftParen => self.push_str("("),
            CSSToken::RightParen => self.push_str(")"),
            CSSToken::LeftBrace => self.push_str("{"),
            CSSToken::RightBrace => self.push_str("}"),
            CSSToken::BadString | CSSToken::BadUrl | CSSToken::EOF => {}
        }
    }

    /// [§ 2.1 serialize an identifier](https://drafts.csswg.org/cssom/#serialize-an-identifier)
    pub fn write_ident(&mut self, ident: &str) {
        let first = ident.chars().next();
        for (i, c) in ident.chars().enumerate() {
            match c {
                '\0' => self.push_char('\u{FFFD}'),
                '\u{1}'..='\u{1f}' | '\u{7f}' => self.push_hex_escape(c),
                '0'..='9' if i == 0 || (i == 1 && first == Some('-')) => self.push_hex_escape(c),
                '-' if i == 0 && ident.len() == 1 => self.push_str("\\-"),
                c if is_name_char(c) => self.push_char(c),
                c => {
                    self.push_str("\\");
                    self.push_char(c);
                }
            }
        }
    }

    /// Like an identifier, but a leading digit needs no escape.
    fn write_name(&mut self, name: &str) {
        for c in name.chars() {
            match c {
                '\0' => self.push_char('\u{FFFD}'),
                '\u{1}'..='\u{1f}' | '\u{7f}' => self.push_hex_escape(c),
                c if is_name_char(c) => self.push_char(c),
                c => {
                    self.push_str("\\");
                    self.push_char(c);
                }
            }
        }
    }

    /// A unit directly follows its number, so a unit that starts like an
    /// exponent (`e3`, `e-3`) must escape its `e`.
    fn write_unit(&mut self, unit: &str) {
        let mut chars = unit.chars();
        let looks_like_exponent = matches!(chars.next(), Some('e' | 'E'))
            && chars.next().is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+');
        if looks_like_exponent {
            let (head, tail) = unit.split_at(1);
            self.push_hex_escape(head.chars().next().unwrap_or('e'));
            self.write_name(tail);
        } else {
            self.write_name(unit);
        }
    }

    /// [§ 2.1 serialize a string](https://drafts.csswg.org/cssom/#serialize-a-string)
    ///
    /// "To serialize a string means to create a string represented by '"'
    /// (U+0022), followed by the result of applying the rules below to each
    /// character of the given string, followed by '"' (U+0022)"
    ///
    /// The quote character follows [`SerializeOptions::quote_style`].
    pub fn write_string(&mut self, text: &str) {
        let quote = self.options.quote_style.quote();
        self.push_char(quote);
        for c in text.chars() {
            match c {
                '\0' => self.push_char('\u{FFFD}'),
                '\u{1}'..='\u{1f}' | '\u{7f}' => self.push_hex_escape(c),
                '\\' => self.push_str("\\\\"),
                c if c == quote => {
                    self.push_str("\\");
                    self.push_char(c);
                }
                c => self.push_char(c),
            }
        }
        self.push_char(quote);
    }

    /// [§ 2.1 serialize a URL](https://drafts.csswg.org/cssom/#serialize-a-url)
    ///
    /// An unquoted URL is kept unquoted when it contains nothing that would
    /// end or break the token.
    fn write_url(&mut self, url: &str) {
        self.push_str("url(");
        let plain = url
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '(' | ')' | '\\'));
        if plain {
            self.push_str(url);
        } else {
            self.write_string(url);
        }
        self.push_str(")");
    }
}

/// "ident code point": a letter, digit, `-`, `_` or non-ASCII.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_') || !c.is_ascii()
}

impl QuoteStyle {
    const fn quote(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::values::normalize;

    fn write(css: &str, mode: Mode, options: &SerializeOptions) -> String {
        let mut writer = CssWriter::new(mode, options);
        writer.write_values(&normalize(&parse_value(css).0));
        writer.finish()
    }

    fn formatted(css: &str) -> String {
        write(css, Mode::Formatted, &SerializeOptions::default())
    }

    fn minified(css: &str) -> String {
        write(css, Mode::Minified, &SerializeOptions::default())
    }

    #[test]
    fn test_separators() {
        assert_eq!(formatted("a ,b/ c"), "a, b / c");
        assert_eq!(minified("a , b / c"), "a,b/c");
        assert_eq!(formatted("rgb(0 0 0/50%)"), "rgb(0 0 0 / 50%)");
    }

    #[test]
    fn test_numbers_keep_their_spelling() {
        assert_eq!(formatted("0.50 0px 1e3 +5"), "0.50 0px 1e3 +5");
    }

    #[test]
    fn test_hack_escape() {
        assert_eq!(formatted(r"foo\9"), r"foo\9");
        assert_eq!(formatted(r"2px\9"), r"2px\9");
        assert_eq!(formatted(r"foo\9  bar"), r"foo\9  bar");
    }

    #[test]
    fn test_escape_guard_before_hex_digit() {
        let options = SerializeOptions::default();
        let mut writer = CssWriter::new(Mode::Minified, &options);
        writer.write_ident("a\tb");
        assert_eq!(writer.finish(), r"a\9 b");
    }

    #[test]
    fn test_ident_escapes() {
        let options = SerializeOptions::default();
        let mut writer = CssWriter::new(Mode::Formatted, &options);
        writer.write_ident("1st");
        writer.push_str(" ");
        writer.write_ident("a.b");
        assert_eq!(writer.finish(), r"\31st a\.b");
    }

    #[test]
    fn test_quote_style() {
        assert_eq!(formatted("\"it's\""), r"'it\'s'");
        let double = SerializeOptions {
            quote_style: QuoteStyle::Double,
            ..SerializeOptions::default()
        };
        assert_eq!(write("'a\"b'", Mode::Formatted, &double), r#""a\"b""#);
    }

    #[test]
    fn test_urls() {
        assert_eq!(formatted("url(a.png)"), "url(a.png)");
        assert_eq!(formatted("url('bkg.png')"), "url('bkg.png')");
    }
}
