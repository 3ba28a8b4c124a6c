#![expect(clippy::unwrap_used, reason = "test code")]

use pretty_assertions::assert_eq;

use super::*;

fn value(src: &str) -> ValueToken {
    Tokenizer::new(src, 0).read_value().unwrap().unwrap()
}

fn path(root: &str, segments: Vec<PathSegment>) -> Expr {
    Expr::Path(VariablePath {
        root: root.to_owned(),
        segments,
    })
}

#[test]
fn identifiers_and_words() {
    let mut tok = Tokenizer::new("  item in products", 0);
    assert_eq!(tok.read_identifier(), Some("item"));
    assert!(!tok.consume_word("i"));
    assert!(tok.consume_word("in"));
    assert_eq!(tok.read_identifier(), Some("products"));
    assert!(tok.end());
    assert_eq!(tok.read_identifier(), None);
}

#[test]
fn literals() {
    assert_eq!(value("42").expr, Expr::Literal(Literal::Int(42)));
    assert_eq!(value("-3").expr, Expr::Literal(Literal::Int(-3)));
    assert_eq!(value("2.5").expr, Expr::Literal(Literal::Float(2.5)));
    assert_eq!(value("'hi'").expr, Expr::Literal(Literal::Str("hi".into())));
    assert_eq!(value("\"a b\"").expr, Expr::Literal(Literal::Str("a b".into())));
    assert_eq!(value("nil").expr, Expr::Literal(Literal::Nil));
    assert_eq!(value("true").expr, Expr::Literal(Literal::Bool(true)));
}

#[test]
fn paths_with_dots_and_brackets() {
    let token = value("user.tags[0][\"k\"][i]");
    assert_eq!(
        token.expr,
        path(
            "user",
            vec![
                PathSegment::Name("tags".to_owned()),
                PathSegment::Index(Expr::Literal(Literal::Int(0))),
                PathSegment::Index(Expr::Literal(Literal::Str("k".into()))),
                PathSegment::Index(path("i", vec![])),
            ]
        )
    );
    assert_eq!(token.text(), "user.tags[0][\"k\"][i]");
}

#[test]
fn keyword_root_with_segments_is_a_path() {
    assert_eq!(
        value("nil.size").expr,
        path("nil", vec![PathSegment::Name("size".to_owned())])
    );
}

#[test]
fn ranges_keep_source_text() {
    let token = value("(1..n)");
    assert_eq!(
        token.expr,
        Expr::Range(
            Box::new(Expr::Literal(Literal::Int(1))),
            Box::new(path("n", vec![]))
        )
    );
    assert_eq!(token.text(), "(1..n)");
}

#[test]
fn value_spans_are_absolute() {
    let mut tok = Tokenizer::new(" x in list", 10);
    tok.read_identifier();
    tok.read_identifier();
    let token = tok.read_value().unwrap().unwrap();
    assert_eq!(token.span, Span::new(16, 20));
}

#[test]
fn no_value_is_not_an_error() {
    assert_eq!(Tokenizer::new("  ", 0).read_value().unwrap(), None);
    assert_eq!(Tokenizer::new(",", 0).read_value().unwrap(), None);
}

#[test]
fn malformed_values_are_errors() {
    let err = Tokenizer::new("'open", 0).read_value().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    let err = Tokenizer::new("a.", 0).read_value().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::ExpectedProperty);
    let err = Tokenizer::new("a[0", 0).read_value().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::ExpectedCloseBracket);
    let err = Tokenizer::new("(1..3", 0).read_value().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedRange);
    let err = Tokenizer::new("99999999999999999999", 0)
        .read_value()
        .unwrap_err();
    assert!(matches!(err.kind, LexErrorKind::InvalidNumber { .. }));
}

#[test]
fn operators() {
    let mut tok = Tokenizer::new(" <= >= < contains containsx", 0);
    assert_eq!(tok.read_operator(), Some("<="));
    assert_eq!(tok.read_operator(), Some(">="));
    assert_eq!(tok.read_operator(), Some("<"));
    assert_eq!(tok.read_operator(), Some("contains"));
    assert_eq!(tok.read_operator(), None);
    assert_eq!(tok.remaining(), "containsx");
}

#[test]
fn hash_keeps_author_order() {
    let mut tok = Tokenizer::new(" limit: 2, reversed offset:continue", 0);
    let hash = tok.read_hash(':').unwrap();
    let keys: Vec<_> = hash.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["limit", "reversed", "offset"]);
    assert!(hash.get("reversed").unwrap().value.is_none());
    assert_eq!(
        hash.get("offset").unwrap().value.as_ref().unwrap().text(),
        "continue"
    );
}

#[test]
fn hash_with_custom_separator() {
    let hash = Tokenizer::new("limit=3", 0).read_hash('=').unwrap();
    assert_eq!(
        hash.get("limit").unwrap().value.as_ref().unwrap().expr,
        Expr::Literal(Literal::Int(3))
    );
}

#[test]
fn hash_errors() {
    let err = Tokenizer::new("limit:", 0).read_hash(':').unwrap_err();
    assert_eq!(err.kind, LexErrorKind::ExpectedValue);
    let err = Tokenizer::new("limit:1 %", 0).read_hash(':').unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter { found: '%' });
}
