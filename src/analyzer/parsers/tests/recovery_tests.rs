use super::parse_lenient;
use crate::ast::{Expression, Statement};
use pretty_assertions::assert_eq;

#[test]
fn test_lenient_parse_skips_bad_statement() {
    let (program, diagnostics) = parse_lenient("let a = ;\nfoo();\n};\nbar();");
    assert!(!diagnostics.is_empty());
    let calls = program
        .body
        .iter()
        .filter(|statement| {
            matches!(
                statement,
                Statement::Expression {
                    expression: Expression::Call { .. },
                    ..
                }
            )
        })
        .count();
    assert_eq!(calls, 2);
}

#[test]
fn test_lenient_parse_inserts_invalid_expression() {
    let (program, diagnostics) = parse_lenient("x = ;");
    assert_eq!(diagnostics.len(), 1);
    let Statement::Expression {
        expression: Expression::Assignment { right, .. },
        ..
    } = &program.body[0]
    else {
        panic!("Expected assignment statement");
    };
    let Expression::Invalid { span } = right.as_ref() else {
        panic!("Expected invalid placeholder");
    };
    assert!(!span.is_empty());
}

#[test]
fn test_lenient_parse_closes_unterminated_block() {
    let (program, diagnostics) = parse_lenient("function f() {\n  g();\n");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(&program.body[0], Statement::FunctionDeclaration(_)));
}

#[test]
fn test_lenient_parse_recovers_inside_class_body() {
    let (program, diagnostics) = parse_lenient("class A { 42 m() {} }");
    assert!(!diagnostics.is_empty());
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("Expected class declaration");
    };
    assert!(!class.body.is_empty());
}

#[test]
fn test_lenient_parse_of_valid_source_has_no_diagnostics() {
    let (program, diagnostics) = parse_lenient("const a = [1, 2].map(x => x * 2);");
    assert!(diagnostics.is_empty());
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_lenient_parse_drops_decorators_without_class() {
    let (program, diagnostics) = parse_lenient("@d");
    assert!(program.body.is_empty());
    assert_eq!(diagnostics.len(), 1);

    let (program, diagnostics) = parse_lenient("@d;\nfoo();");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        &program.body[..],
        [Statement::Expression {
            expression: Expression::Call { .. },
            ..
        }]
    ));
}

#[test]
fn test_lenient_parse_discards_truncated_statement() {
    for source in ["f();\nfor", "f();\nwhile", "f();\ndo", "f();\nwith", "f();\nif ("] {
        let (program, diagnostics) = parse_lenient(source);
        assert_eq!(program.body.len(), 1, "{source}");
        assert!(!diagnostics.is_empty(), "{source}");
    }
}
