//! Declaration block serialization.
//!
//! [CSSOM § 6.7.2 Serializing a CSS declaration block](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
//!
//! "To serialize a CSS declaration block declaration block means to run
//! the steps below: Let list be an empty array. Let already serialized be an
//! empty array. Declaration loop: For each CSS declaration declaration in
//! declaration block's declarations, follow these substeps..."
//!
//! [`plan`] walks the entries of a block and decides which of them are
//! written as shorthands; [`render_declaration`] turns one planned
//! declaration into text. Two modes are supported: formatted text keeps one
//! declaration per line with spaces after `:` and `,`, minified text drops
//! every optional space and folds case-insensitive identifiers to lower case.

mod case;
mod plan;
/// Token-level CSS text output.
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::declaration::LonghandEntry;
use crate::parser::ComponentValue;
use crate::values::PropertyValue;

pub use case::fold_case;
pub use plan::{DeclarationNode, plan};
pub use writer::CssWriter;

/// The quote character used for strings and quoted URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteStyle {
    /// `'text'`
    #[default]
    Single,
    /// `"text"`
    Double,
}

/// Serialization settings, loadable from JSON:
///
/// ```json
/// { "quote-style": "double", "indent": "  ", "lowercase-keywords": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SerializeOptions {
    /// Quote used when writing strings.
    pub quote_style: QuoteStyle,
    /// Indentation inside rules in formatted style sheets.
    pub indent: String,
    /// Whether minified output folds case-insensitive identifiers to lower
    /// case.
    pub lowercase_keywords: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            quote_style: QuoteStyle::Single,
            indent: "    ".to_string(),
            lowercase_keywords: true,
        }
    }
}

/// The two output forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One declaration per line, `name: value;`.
    Formatted,
    /// No optional whitespace, `name:value;`.
    Minified,
}

/// One declaration as text, without its terminating `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDeclaration {
    /// `name: value` or `name:value`, with any `!important`.
    pub text: String,
    /// True if the text ends in a hex escape such as `\9`.
    pub ends_with_escape: bool,
}

/// Write a stored value.
pub fn write_property_value(writer: &mut CssWriter<'_>, value: &PropertyValue) {
    match value {
        PropertyValue::Components(values) => writer.write_values(values),
        PropertyValue::Keyword(keyword) => writer.push_str(keyword.as_str()),
        PropertyValue::Pending(pending) => writer.write_values(&pending.value),
    }
}

/// [CSSOM § 6.7.2 serialize a CSS declaration](https://drafts.csswg.org/cssom/#serialize-a-css-declaration)
///
/// "Let s be the empty string. Append property to s. Append ": " (U+003A
/// U+0020) to s. Append value to s. If the important flag is set, append
/// " !important" (U+0020 U+0021 U+0069 U+006D U+0070 U+006F U+0072 U+0074
/// U+0061 U+006E U+0074) to s."
#[must_use]
pub fn render_declaration(node: &DeclarationNode, mode: Mode, options: &SerializeOptions) -> RenderedDeclaration {
    let mut writer = CssWriter::new(mode, options);
    writer.write_ident(&node.name);
    writer.push_str(match mode {
        Mode::Formatted => ": ",
        Mode::Minified => ":",
    });
    write_property_value(&mut writer, &node.value);
    if node.important {
        writer.push_str(match mode {
            Mode::Formatted => " !important",
            Mode::Minified => "!important",
        });
    }
    let ends_with_escape = writer.ends_with_escape();
    RenderedDeclaration {
        text: writer.finish(),
        ends_with_escape,
    }
}

/// Plan and render every declaration of a block.
#[must_use]
pub fn render_declarations(entries: &[LonghandEntry], mode: Mode, options: &SerializeOptions) -> Vec<RenderedDeclaration> {
    let nodes = if mode == Mode::Minified && options.lowercase_keywords {
        plan(&fold_case(entries))
    } else {
        plan(entries)
    };
    nodes
        .iter()
        .map(|node| render_declaration(node, mode, options))
        .collect()
}

/// Block text: one `name: value;` per line when formatted, `name:value;`
/// pairs back to back when minified.
#[must_use]
pub fn block_text(entries: &[LonghandEntry], mode: Mode, options: &SerializeOptions) -> String {
    let declarations = render_declarations(entries, mode, options);
    let separator = match mode {
        Mode::Formatted => "\n",
        Mode::Minified => "",
    };
    declarations
        .iter()
        .map(|declaration| format!("{};", declaration.text))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Formatted text of a component-value sequence with default options.
#[must_use]
pub fn value_to_string(values: &[ComponentValue]) -> String {
    let options = SerializeOptions::default();
    let mut writer = CssWriter::new(Mode::Formatted, &options);
    writer.write_values(values);
    writer.finish()
}

/// Formatted text of a stored value with default options.
#[must_use]
pub fn property_value_to_string(value: &PropertyValue) -> String {
    let options = SerializeOptions::default();
    let mut writer = CssWriter::new(Mode::Formatted, &options);
    write_property_value(&mut writer, value);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::DeclarationBlock;

    fn formatted(css: &str) -> String {
        let block = DeclarationBlock::parse(css);
        let entries: Vec<LonghandEntry> = block.iter().cloned().collect();
        block_text(&entries, Mode::Formatted, &SerializeOptions::default())
    }

    fn minified(css: &str) -> String {
        let block = DeclarationBlock::parse(css);
        let entries: Vec<LonghandEntry> = block.iter().cloned().collect();
        block_text(&entries, Mode::Minified, &SerializeOptions::default())
    }

    #[test]
    fn test_formatted_one_per_line() {
        assert_eq!(formatted("color: red; width: 10px !important"), "color: red;\nwidth: 10px !important;");
    }

    #[test]
    fn test_minified_pairs() {
        assert_eq!(minified("color: red; width: 10px !important"), "color:red;width:10px!important;");
    }

    #[test]
    fn test_minified_folds_case_insensitive_keywords() {
        assert_eq!(minified("COLOR: RED; --Brand: Blue"), "color:red;--Brand:Blue;");
        assert_eq!(minified("animation-name: Slide"), "animation-name:Slide;");
        assert_eq!(minified("font-family: Arial, SERIF"), "font-family:Arial,serif;");
    }

    #[test]
    fn test_keep_case_when_disabled() {
        let block = DeclarationBlock::parse("color: RED");
        let entries: Vec<LonghandEntry> = block.iter().cloned().collect();
        let options = SerializeOptions {
            lowercase_keywords: false,
            ..SerializeOptions::default()
        };
        assert_eq!(block_text(&entries, Mode::Minified, &options), "color:RED;");
    }

    #[test]
    fn test_options_from_json() {
        let options: SerializeOptions = serde_json::from_str(r#"{ "quote-style": "double" }"#).unwrap();
        assert_eq!(options.quote_style, QuoteStyle::Double);
        assert_eq!(options.indent, "    ");
        assert!(options.lowercase_keywords);
    }

    #[test]
    fn test_important_after_escape() {
        assert_eq!(formatted(r"color: red\9 !important"), "color: red\\9  !important;");
    }
}
