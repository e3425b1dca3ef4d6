//! Integration tests for style sheets and the declaration block object model.

use petrel_common::warning::{set_quiet, take_warnings};
use petrel_css::{CssError, DeclarationBlock, QuoteStyle, RuleKind, SerializeOptions, StyleSheet};

fn parse(css: &str) -> StyleSheet {
    set_quiet(true);
    StyleSheet::parse(css)
}

#[test]
fn test_edit_through_rule_id() {
    let mut sheet = parse("a { margin: 1px } b { color: red }");
    let first = sheet.top_level()[0];
    let block = sheet.style_mut(first).unwrap();
    block.set_property("margin-left", "2px", true).unwrap();
    assert_eq!(block.get_property_value("margin"), "");
    assert_eq!(block.get_property_priority("margin-left"), "important");
    assert_eq!(
        sheet.minified_css_text(),
        "a{margin:1px 1px 1px 0;margin-left:2px!important}b{color:red}"
    );
}

#[test]
fn test_style_of_non_style_rule() {
    let sheet = parse("@media print { a { color: red } }");
    let media = sheet.top_level()[0];
    assert!(matches!(sheet.style(media), Err(CssError::InvalidModification(_))));
    assert!(matches!(
        sheet.rule(media).map(|rule| &rule.kind),
        Ok(RuleKind::Grouping { .. })
    ));
}

#[test]
fn test_nested_formatted_text() {
    let sheet = parse("@media screen { a { padding: 0 } }");
    assert_eq!(
        sheet.css_text(),
        "@media screen {\n    a {\n        padding: 0;\n    }\n}\n"
    );
}

#[test]
fn test_quote_style_option() {
    set_quiet(true);
    let options = SerializeOptions {
        quote_style: QuoteStyle::Double,
        ..SerializeOptions::default()
    };
    let sheet = StyleSheet::parse_with("a { content: 'x' }", options);
    assert_eq!(sheet.minified_css_text(), "a{content:\"x\"}");
}

#[test]
fn test_dropped_declarations_are_reported() {
    let block = {
        set_quiet(true);
        DeclarationBlock::parse("colrxyz: red; width: 1px")
    };
    assert_eq!(block.css_text(), "width: 1px;");
    let warnings = take_warnings();
    assert!(
        warnings.iter().any(|w| w.contains("colrxyz")),
        "{warnings:?}"
    );
}

#[test]
fn test_empty_rule() {
    let sheet = parse("a {}");
    assert_eq!(sheet.css_text(), "a {}\n");
    assert_eq!(sheet.minified_css_text(), "a{}");
}
