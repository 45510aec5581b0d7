#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_string())
}

fn op(text: &str) -> TokenKind {
    TokenKind::Op(text.to_string())
}

fn string(value: &str) -> TokenKind {
    TokenKind::Str(value.to_string())
}

#[test]
fn tokenize___const_spec___inserts_semicolon_at_line_end() {
    let tokens = kinds("const A Status = \"a\"\n");

    assert_eq!(
        tokens,
        vec![
            ident("const"),
            ident("A"),
            ident("Status"),
            op("="),
            string("a"),
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn tokenize___open_paren_at_line_end___no_semicolon() {
    let tokens = kinds("const (\n)\n");

    assert_eq!(
        tokens,
        vec![ident("const"), op("("), op(")"), TokenKind::Semicolon]
    );
}

#[test]
fn tokenize___keyword_at_line_end___no_semicolon_except_return() {
    assert_eq!(kinds("func\n"), vec![ident("func")]);
    assert_eq!(kinds("return\n"), vec![ident("return"), TokenKind::Semicolon]);
}

#[test]
fn tokenize___comments___are_skipped() {
    let tokens = kinds("A // trailing \"quoted\"\n/* block */ B");

    assert_eq!(
        tokens,
        vec![
            ident("A"),
            TokenKind::Semicolon,
            ident("B"),
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn tokenize___multiline_block_comment___acts_as_newline() {
    let tokens = kinds("A /* one\ntwo */ B");

    assert_eq!(
        tokens,
        vec![
            ident("A"),
            TokenKind::Semicolon,
            ident("B"),
            TokenKind::Semicolon,
        ]
    );
}

#[test_case(r#""a\tb""#, "a\tb"; "interpreted with escape")]
#[test_case("`raw\\n`", "raw\\n"; "raw keeps backslashes")]
#[test_case("`two\r\nlines`", "two\nlines"; "raw drops carriage returns")]
#[test_case(r#""é""#, "\u{e9}"; "unicode text")]
fn tokenize___string_literals___are_decoded(source: &str, expected: &str) {
    let tokens = kinds(source);

    assert_eq!(tokens[0], string(expected));
}

#[test]
fn tokenize___raw_string___advances_line_numbers() {
    let tokens = tokenize("`a\nb`\nC").unwrap();

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens.last().map(|t| t.line), Some(3));
}

#[test]
fn tokenize___operators___match_longest_first() {
    let tokens = kinds("a <<= 1 ... b := c");

    assert!(tokens.contains(&op("<<=")));
    assert!(tokens.contains(&op("...")));
    assert!(tokens.contains(&op(":=")));
}

#[test_case("1.5e-3"; "float with exponent")]
#[test_case("0x1F"; "hex")]
#[test_case("1_000"; "separators")]
#[test_case(".25"; "leading dot")]
fn tokenize___numbers___keep_source_text(source: &str) {
    assert_eq!(kinds(source)[0], TokenKind::Number(source.to_string()));
}

#[test]
fn tokenize___rune_literal___is_char() {
    assert_eq!(kinds(r"'\''")[0], TokenKind::Char(r"'\''".to_string()));
}

#[test]
fn tokenize___unicode_identifier___is_ident() {
    assert_eq!(kinds("größe")[0], ident("größe"));
}

#[test_case("\"open"; "unterminated string")]
#[test_case("\"line\nbreak\""; "newline in string")]
#[test_case("`open"; "unterminated raw string")]
#[test_case("/* open"; "unterminated comment")]
#[test_case(r#""\q""#; "bad escape")]
fn tokenize___malformed_source___is_error(source: &str) {
    assert!(tokenize(source).is_err());
}

#[test]
fn tokenize___error___reports_line() {
    let err = tokenize("A\nB\n\"open").unwrap_err();

    assert_eq!(err.line, 3);
}
