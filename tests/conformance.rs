//! End-to-end `tokenize()` scenarios exercising multiple modules together.
//!
//! Per-module unit tests live alongside their code (`#[cfg(test)] mod
//! tests` in `scanner.rs`/`tokenizer.rs`/etc); this file covers the full
//! pipeline (preprocess → scan → tokenize) for scenarios spanning more than
//! one module.

use css_syntax::{tokenize, HashType, NumberValue, TokenKind, TokenizeOptions};

fn kinds(input: &str, options: TokenizeOptions) -> Vec<TokenKind> {
    tokenize(input, options).into_iter().map(|t| t.kind).collect()
}

/// Parse errors are logged through `log::warn!`, not returned as `Result`s
/// (see `error.rs`). `try_init` rather than `init` since multiple test
/// functions in this binary may call it. Run with `RUST_LOG=css=warn` to
/// see the records on stderr.
fn init_logger() {
    let _ = env_logger::try_init();
}

#[test]
fn crlf_is_folded_before_tokenization() {
    let tokens = tokenize("a\r\nb", TokenizeOptions::new());
    let raw: String = tokens.iter().filter_map(|t| t.raw.as_deref()).collect();
    assert_eq!(raw, "a\nb");
    assert_eq!(
        kinds("a\r\nb", TokenizeOptions::new()),
        vec![TokenKind::Ident, TokenKind::Whitespace, TokenKind::Ident]
    );
}

#[test]
fn nul_bytes_become_replacement_characters_end_to_end() {
    let tokens = tokenize("a\u{0000}b", TokenizeOptions::new());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value.as_deref(), Some("a\u{FFFD}b"));
}

#[test]
fn invalid_utf8_bytes_are_lossily_replaced() {
    let bytes: &[u8] = &[b'a', 0xFF, b'b'];
    let tokens = tokenize(bytes, TokenizeOptions::new());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value.as_deref(), Some("a\u{FFFD}b"));
}

#[test]
fn a_full_rule_tokenizes_into_the_expected_shape() {
    let tokens = tokenize("a.foo { color: #123456; }", TokenizeOptions::new());
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Delim, // '.'
            TokenKind::Ident,
            TokenKind::Whitespace,
            TokenKind::LeftBrace,
            TokenKind::Whitespace,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Whitespace,
            TokenKind::Hash,
            TokenKind::Semicolon,
            TokenKind::Whitespace,
            TokenKind::RightBrace,
        ]
    );
}

#[test]
fn numeric_grammar_across_forms() {
    let tokens = tokenize("10 -3 +4 .5 1.5e10 1e-3", TokenizeOptions::new());
    let numbers: Vec<_> = tokens
        .into_iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.number.unwrap())
        .collect();

    assert_eq!(numbers[0], NumberValue::Integer(10));
    assert_eq!(numbers[1], NumberValue::Integer(-3));
    assert_eq!(numbers[2], NumberValue::Integer(4));

    assert_eq!(numbers.len(), 6);
    assert!(matches!(numbers[3], NumberValue::Number(n) if (n - 0.5).abs() < 1e-9));
    assert!(matches!(numbers[4], NumberValue::Number(n) if (n - 1.5e10).abs() < 1.0));
    assert!(matches!(numbers[5], NumberValue::Number(n) if (n - 1e-3).abs() < 1e-12));
}

#[test]
fn declaration_with_vendor_star_hack_under_preserve_hacks() {
    let tokens = tokenize(
        "*zoom: 1;",
        TokenizeOptions::new().preserve_hacks(true),
    );
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].value.as_deref(), Some("zoom"));
}

#[test]
fn raw_concatenation_always_reproduces_preprocessed_input_when_comments_preserved() {
    let inputs = [
        "a { b: c }",
        "/* leading */ .x::before { content: 'hi \\\"there\\\"' }",
        "@media (min-width: 10px) { a { color: red } }",
        "a[href^='http://'] { color: blue }",
        "div { margin: -1.5em -2% }",
        "U+0-10FFFF",
    ];

    for input in inputs {
        let tokens = tokenize(input, TokenizeOptions::new().preserve_comments(true));
        let raw: String = tokens.iter().filter_map(|t| t.raw.as_deref()).collect();
        assert_eq!(raw, input, "raw fidelity broke for {input:?}");
    }
}

#[test]
fn positions_cover_the_whole_input() {
    let input = "a { color: red; }";
    let tokens = tokenize(input, TokenizeOptions::new());
    assert_eq!(tokens.first().unwrap().pos, 0);
    let last = tokens.last().unwrap();
    let last_len = last.raw.as_deref().map(str::chars).map(Iterator::count).unwrap_or(0);
    assert_eq!(last.pos + last_len, input.chars().count());
}

#[test]
fn hash_type_depends_on_identifier_start() {
    let tokens = tokenize("#abc #1 #-a #--a", TokenizeOptions::new());
    let hashes: Vec<_> = tokens
        .into_iter()
        .filter(|t| t.kind == TokenKind::Hash)
        .map(|t| t.hash_type.unwrap())
        .collect();
    assert_eq!(
        hashes,
        vec![
            HashType::Id,
            HashType::Unrestricted,
            HashType::Id,
            HashType::Id,
        ]
    );
}

#[test]
fn parse_errors_on_malformed_input_are_logged() {
    init_logger();

    let bad_string = tokenize("\"ab\nc\"", TokenizeOptions::new());
    assert_eq!(bad_string[0].kind, TokenKind::BadString);
    assert!(bad_string[0].error);

    let bad_url = tokenize("url(a\"b)", TokenizeOptions::new());
    assert_eq!(bad_url[0].kind, TokenKind::BadUrl);
    assert!(bad_url[0].error);

    let unterminated_comment = tokenize(
        "/* oops",
        TokenizeOptions::new().preserve_comments(true),
    );
    assert_eq!(unterminated_comment[0].kind, TokenKind::Comment);
    assert!(unterminated_comment[0].error);
}

#[test]
fn tokenizing_is_deterministic() {
    let input = "a.b#c[d=e]:hover::before { font: 12px/1.5 sans-serif; }";
    let once = tokenize(input, TokenizeOptions::new());
    let twice = tokenize(input, TokenizeOptions::new());
    assert_eq!(once, twice);
}
