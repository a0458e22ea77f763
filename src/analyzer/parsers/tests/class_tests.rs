use super::{parse, parse_err};
use crate::ast::{ClassMember, Expression, MethodKind, Position, PropertyKey, Statement};
use pretty_assertions::assert_eq;

#[test]
fn test_class_members() {
    let program = parse(
        "class A extends B {\n  static x = 1;\n  #y;\n  constructor() { super() }\n  get z() { return 1 }\n  static async *gen() {}\n  static { init() }\n  ;\n  'quoted'() {}\n}",
    );
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("Expected class declaration");
    };
    assert_eq!(class.id.as_ref().map(|id| id.name.as_str()), Some("A"));
    assert!(class.super_class.is_some());
    assert_eq!(class.body.len(), 8);
    assert!(matches!(
        &class.body[0],
        ClassMember::Property {
            is_static: true,
            value: Some(_),
            ..
        }
    ));
    assert!(matches!(
        &class.body[1],
        ClassMember::Property {
            key: PropertyKey::PrivateName(_),
            value: None,
            ..
        }
    ));
    assert!(matches!(
        &class.body[2],
        ClassMember::Method {
            kind: MethodKind::Constructor,
            ..
        }
    ));
    assert!(matches!(
        &class.body[3],
        ClassMember::Method {
            kind: MethodKind::Get,
            ..
        }
    ));
    let ClassMember::Method {
        function, is_static, ..
    } = &class.body[4]
    else {
        panic!("Expected method");
    };
    assert!(*is_static && function.is_async && function.is_generator);
    assert!(matches!(&class.body[5], ClassMember::StaticBlock(_)));
    assert!(matches!(&class.body[6], ClassMember::Empty { .. }));
    assert!(matches!(
        &class.body[7],
        ClassMember::Method {
            key: PropertyKey::Literal { .. },
            ..
        }
    ));
}

#[test]
fn test_modifier_words_as_member_names() {
    let program = parse("class A { static; get() {} async = 1 }");
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("Expected class declaration");
    };
    assert_eq!(class.body.len(), 3);
    assert!(matches!(
        &class.body[0],
        ClassMember::Property {
            is_static: false,
            ..
        }
    ));
    assert!(matches!(
        &class.body[1],
        ClassMember::Method {
            kind: MethodKind::Method,
            ..
        }
    ));
}

#[test]
fn test_decorators_keep_their_own_spans() {
    let program = parse("@sealed\n@log('x')\nclass A {\n  @bound m() {}\n}");
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("Expected class declaration");
    };
    assert_eq!(class.decorators.len(), 2);
    assert_eq!(class.decorators[0].span.start, Position::new(1, 0, 0));
    assert!(matches!(
        class.decorators[1].expression,
        Expression::Call { .. }
    ));
    assert_eq!(class.span.start, Position::new(3, 0, 18));
    let ClassMember::Method {
        decorators, span, ..
    } = &class.body[0]
    else {
        panic!("Expected method");
    };
    assert_eq!(decorators.len(), 1);
    assert_eq!(span.start, Position::new(4, 9, 37));
}

#[test]
fn test_class_expression() {
    let program = parse("const C = class extends Base {}");
    let Statement::VariableDeclaration(declaration) = &program.body[0] else {
        panic!("Expected declaration");
    };
    assert!(matches!(
        declaration.declarations[0].init,
        Some(Expression::Class(_))
    ));
}

#[test]
fn test_class_declaration_requires_name() {
    assert!(parse_err("class {}"));
    assert!(parse_err("class A { get x }"));
}

#[test]
fn test_decorators_must_precede_class() {
    assert!(parse_err("@d"));
    assert!(parse_err("@d;"));
    assert!(parse_err("@d function f() {}"));
}
