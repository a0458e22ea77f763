use pretty_assertions::assert_eq;
use shapeprint::{convert, ConvertConfig, Converter, Error, TokenKind};

use super::summary;

#[test]
fn test_c_style_for_loop() {
    let stream = convert("for (let i = 0; i < 3; i++) {}").unwrap();
    let tokens = summary(&stream);
    assert_eq!(tokens.first(), Some(&(TokenKind::ForBegin, 1, 0, 3)));
    assert_eq!(tokens.last(), Some(&(TokenKind::ForEnd, 1, 29, 1)));
    // Only the declarator and the update bind; the loop itself does not.
    let assigns: Vec<_> = tokens
        .iter()
        .filter(|(kind, ..)| *kind == TokenKind::Assign)
        .collect();
    assert_eq!(
        assigns,
        vec![&(TokenKind::Assign, 1, 9, 1), &(TokenKind::Assign, 1, 23, 2)]
    );
}

#[test]
fn test_member_call() {
    let stream = convert("a.b()").unwrap();
    assert_eq!(summary(&stream), vec![(TokenKind::Apply, 1, 2, 1)]);
}

#[test]
fn test_if_else() {
    let stream = convert("if (x) {} else {}").unwrap();
    assert_eq!(
        summary(&stream),
        vec![
            (TokenKind::IfBegin, 1, 0, 2),
            (TokenKind::Else, 1, 15, 1),
            (TokenKind::IfEnd, 1, 16, 1),
        ]
    );
}

#[test]
fn test_declarator() {
    let stream = convert("let x = 1").unwrap();
    assert_eq!(summary(&stream), vec![(TokenKind::Assign, 1, 4, 1)]);
}

#[test]
fn test_invalid_source_falls_back_to_lenient_parse() {
    let source = "let a = ;\nfoo()";
    let stream = convert(source).unwrap();
    assert!(!stream.is_empty());
    assert!(stream
        .iter()
        .any(|t| t.kind == TokenKind::Apply && t.line == 2));

    let strict = Converter::new(ConvertConfig {
        lenient_fallback: false,
        ..ConvertConfig::default()
    });
    assert!(matches!(strict.convert(source), Err(Error::Parse(_))));
}

#[test]
fn test_top_level_return_is_accepted() {
    let stream = convert("return f()").unwrap();
    assert_eq!(
        summary(&stream),
        vec![(TokenKind::Return, 1, 0, 6), (TokenKind::Apply, 1, 7, 1)]
    );
}

#[test]
fn test_multi_line_function() {
    let source = "function f(a) {\n  if (a) {\n    return [a];\n  }\n  return {};\n}\n";
    let stream = convert(source).unwrap();
    assert_eq!(
        summary(&stream),
        vec![
            (TokenKind::FunctionBegin, 1, 0, 8),
            (TokenKind::IfBegin, 2, 2, 2),
            (TokenKind::Return, 3, 4, 6),
            (TokenKind::ArrayBegin, 3, 11, 1),
            (TokenKind::ArrayEnd, 3, 13, 1),
            (TokenKind::IfEnd, 4, 2, 1),
            (TokenKind::Return, 5, 2, 6),
            (TokenKind::ObjectBegin, 5, 9, 1),
            (TokenKind::ObjectEnd, 5, 10, 1),
            (TokenKind::FunctionEnd, 6, 0, 1),
        ]
    );
}

#[test]
fn test_conversion_is_idempotent() {
    let source = "import x from 'y';\nexport default class A extends B {\n  m() { return x?.y ?? [1, 2]; }\n}\n";
    let first = serde_json::to_string(&convert(source).unwrap().to_records()).unwrap();
    let second = serde_json::to_string(&convert(source).unwrap().to_records()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_records_serialize_kind_name_and_id() {
    let records = convert("a.b()").unwrap().to_records();
    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        serde_json::json!([
            { "token": { "key": "APPLY", "value": 7 }, "line": 1, "column": 2, "length": 1 }
        ])
    );
}
