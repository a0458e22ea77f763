use super::{parse, parse_err};
use crate::ast::{ForHead, ForInit, Pattern, Position, Span, Statement, VariableKind};
use pretty_assertions::assert_eq;

#[test]
fn test_variable_declarations() {
    let program = parse("var a = 1, b;\nlet [c, d] = e\nconst { f } = g;");
    assert_eq!(program.body.len(), 3);
    match &program.body[0] {
        Statement::VariableDeclaration(declaration) => {
            assert_eq!(declaration.kind, VariableKind::Var);
            assert_eq!(declaration.declarations.len(), 2);
            assert!(declaration.declarations[1].init.is_none());
            assert_eq!(
                declaration.span,
                Span::new(Position::new(1, 0, 0), Position::new(1, 13, 13))
            );
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }
    match &program.body[1] {
        Statement::VariableDeclaration(declaration) => {
            assert_eq!(declaration.kind, VariableKind::Let);
            assert!(matches!(declaration.declarations[0].id, Pattern::Array { .. }));
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_let_as_identifier() {
    let program = parse("let = 1;");
    assert!(matches!(&program.body[0], Statement::Expression { .. }));
}

#[test]
fn test_if_else_chain() {
    let program = parse("if (a) b(); else if (c) { d } else e;");
    let Statement::If { alternate, .. } = &program.body[0] else {
        panic!("Expected if statement");
    };
    let Some(alternate) = alternate else {
        panic!("Expected else branch");
    };
    assert!(matches!(
        alternate.as_ref(),
        Statement::If {
            alternate: Some(_),
            ..
        }
    ));
}

#[test]
fn test_for_variants() {
    let program = parse(
        "for (let i = 0; i < n; i++) {}\nfor (;;) break\nfor (const k in o) ;\nfor (x of xs) ;\nfor await (const y of ys) ;",
    );
    assert_eq!(program.body.len(), 5);
    assert!(matches!(
        &program.body[0],
        Statement::For {
            init: Some(ForInit::Declaration(_)),
            test: Some(_),
            update: Some(_),
            ..
        }
    ));
    assert!(matches!(
        &program.body[1],
        Statement::For {
            init: None,
            test: None,
            update: None,
            ..
        }
    ));
    assert!(matches!(
        &program.body[2],
        Statement::ForIn {
            left: ForHead::Declaration(_),
            ..
        }
    ));
    assert!(matches!(
        &program.body[3],
        Statement::ForOf {
            left: ForHead::Pattern(Pattern::Identifier(_)),
            is_await: false,
            ..
        }
    ));
    assert!(matches!(
        &program.body[4],
        Statement::ForOf { is_await: true, .. }
    ));
}

#[test]
fn test_loops_and_jumps() {
    let program = parse("outer: while (a) { do { continue outer } while (b) }");
    let Statement::Labeled { label, body, .. } = &program.body[0] else {
        panic!("Expected labeled statement");
    };
    assert_eq!(label.name, "outer");
    assert!(matches!(body.as_ref(), Statement::While { .. }));
}

#[test]
fn test_do_while_span_includes_semicolon() {
    let program = parse("do x(); while (y);");
    assert_eq!(program.body[0].span().end, Position::new(1, 18, 18));
}

#[test]
fn test_try_catch_finally() {
    let program = parse("try { a() } catch ({ message }) { b() } finally { c() }\ntry {} catch { }");
    assert!(matches!(
        &program.body[0],
        Statement::Try {
            handler: Some(_),
            finalizer: Some(_),
            ..
        }
    ));
    let Statement::Try {
        handler: Some(handler),
        ..
    } = &program.body[1]
    else {
        panic!("Expected try with handler");
    };
    assert!(handler.param.is_none());
}

#[test]
fn test_switch_cases() {
    let program = parse("switch (x) { case 1: case 2: a(); break; default: b() }");
    let Statement::Switch { cases, .. } = &program.body[0] else {
        panic!("Expected switch statement");
    };
    assert_eq!(cases.len(), 3);
    assert!(cases[0].consequent.is_empty());
    assert_eq!(cases[1].consequent.len(), 2);
    assert!(cases[2].test.is_none());
}

#[test]
fn test_return_and_asi() {
    let program = parse("function f() {\n  return\n  1\n}");
    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("Expected function declaration");
    };
    let crate::ast::FunctionBody::Block(block) = &function.body else {
        panic!("Expected block body");
    };
    assert_eq!(block.body.len(), 2);
    assert!(matches!(
        &block.body[0],
        Statement::Return { argument: None, .. }
    ));
}

#[test]
fn test_missing_semicolon_on_same_line_fails() {
    assert!(parse_err("a b"));
    assert!(parse_err("try {}"));
    assert!(parse_err("throw\nerror"));
}

#[test]
fn test_with_and_debugger() {
    let program = parse("with (o) { debugger }");
    let Statement::With { body, .. } = &program.body[0] else {
        panic!("Expected with statement");
    };
    let Statement::Block(block) = body.as_ref() else {
        panic!("Expected block body");
    };
    assert!(matches!(&block.body[0], Statement::Debugger { .. }));
}

#[test]
fn test_program_span_starts_at_origin() {
    let program = parse("\n\n  x");
    assert_eq!(program.span.start, Position::new(1, 0, 0));
    assert_eq!(program.span.end, Position::new(3, 3, 5));
}
