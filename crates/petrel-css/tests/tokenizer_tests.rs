//! Integration tests for the CSS tokenizer.

use petrel_css::tokenizer::{CSSToken, CSSTokenizer, HashType, NumericType};

/// Tokens of `input` without the trailing EOF.
fn tokenize(input: &str) -> Vec<CSSToken> {
    let mut tokens = CSSTokenizer::tokenize(input);
    assert_eq!(tokens.pop(), Some(CSSToken::EOF));
    tokens
}

#[test]
fn test_whitespace_run_is_one_token() {
    assert_eq!(tokenize("   \t\n  "), [CSSToken::Whitespace]);
}

#[test]
fn test_idents() {
    assert_eq!(tokenize("background-color"), [CSSToken::ident("background-color")]);
    assert_eq!(tokenize("--Brand"), [CSSToken::ident("--Brand")]);
    assert_eq!(tokenize("_private"), [CSSToken::ident("_private")]);
}

#[test]
fn test_function_and_at_keyword() {
    assert_eq!(tokenize("rgb("), [CSSToken::Function("rgb".to_string())]);
    assert_eq!(tokenize("@media"), [CSSToken::AtKeyword("media".to_string())]);
}

#[test]
fn test_hash_types() {
    // `#ff0000` starts with an ident-start code point, so it is an id hash.
    assert_eq!(
        tokenize("#ff0000"),
        [CSSToken::Hash {
            value: "ff0000".to_string(),
            hash_type: HashType::Id,
        }]
    );
    assert_eq!(
        tokenize("#123"),
        [CSSToken::Hash {
            value: "123".to_string(),
            hash_type: HashType::Unrestricted,
        }]
    );
}

#[test]
fn test_strings_resolve_quotes() {
    assert_eq!(tokenize("\"hello world\""), [CSSToken::string("hello world")]);
    assert_eq!(tokenize("'it\\'s'"), [CSSToken::string("it's")]);
}

#[test]
fn test_numbers_keep_their_text() {
    let tokens = tokenize("-10");
    let [CSSToken::Number(number)] = tokens.as_slice() else {
        panic!("expected one number token");
    };
    assert_eq!(number.value, -10.0);
    assert_eq!(number.int_value(), Some(-10));
    assert_eq!(number.numeric_type, NumericType::Integer);

    let tokens = tokenize("+.50");
    let [CSSToken::Number(number)] = tokens.as_slice() else {
        panic!("expected one number token");
    };
    assert_eq!(number.repr, "+.50");
    assert_eq!(number.numeric_type, NumericType::Number);
    assert_eq!(number.int_value(), None);
}

#[test]
fn test_scientific_notation() {
    let tokens = tokenize("1e10");
    let [CSSToken::Number(number)] = tokens.as_slice() else {
        panic!("expected one number token");
    };
    assert_eq!(number.value, 1e10);
    assert_eq!(number.repr, "1e10");
}

#[test]
fn test_percentage_and_dimensions() {
    let tokens = tokenize("50%");
    let [CSSToken::Percentage(number)] = tokens.as_slice() else {
        panic!("expected one percentage token");
    };
    assert_eq!(number.repr, "50");
    assert_eq!(tokenize("16px"), [CSSToken::dimension("16", "px")]);
    assert_eq!(tokenize("1.5EM"), [CSSToken::dimension("1.5", "EM")]);
    assert_ne!(tokenize("0"), tokenize("0px"));
}

#[test]
fn test_punctuation() {
    assert_eq!(
        tokenize(":;,{}[]()"),
        [
            CSSToken::Colon,
            CSSToken::Semicolon,
            CSSToken::Comma,
            CSSToken::LeftBrace,
            CSSToken::RightBrace,
            CSSToken::LeftBracket,
            CSSToken::RightBracket,
            CSSToken::LeftParen,
            CSSToken::RightParen,
        ]
    );
}

#[test]
fn test_comments_are_dropped() {
    assert_eq!(
        tokenize("/* comment */ color"),
        [CSSToken::Whitespace, CSSToken::ident("color")]
    );
}

#[test]
fn test_cdo_cdc() {
    assert_eq!(tokenize("<!-- -->"), [CSSToken::CDO, CSSToken::Whitespace, CSSToken::CDC]);
}

#[test]
fn test_url_forms() {
    assert_eq!(tokenize("url(image.png)"), [CSSToken::Url("image.png".to_string())]);
    assert_eq!(
        tokenize("url('bkg.png')"),
        [
            CSSToken::Function("url".to_string()),
            CSSToken::string("bkg.png"),
            CSSToken::RightParen,
        ]
    );
}

#[test]
fn test_declaration_tokens() {
    assert_eq!(
        tokenize("color: red;"),
        [
            CSSToken::ident("color"),
            CSSToken::Colon,
            CSSToken::Whitespace,
            CSSToken::ident("red"),
            CSSToken::Semicolon,
        ]
    );
}

#[test]
fn test_escapes() {
    // `\41 ` is `A`; the space after a hex escape belongs to the escape.
    assert_eq!(tokenize("\\41 "), [CSSToken::ident("A")]);
    // `\9` hacks end up inside the identifier or unit.
    assert_eq!(tokenize("red\\9"), [CSSToken::ident("red\t")]);
    assert_eq!(tokenize("2px\\9"), [CSSToken::dimension("2", "px\t")]);
}
