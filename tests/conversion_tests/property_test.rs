use proptest::prelude::*;
use shapeprint::convert;

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("x".to_string()),
        Just("1".to_string()),
        Just("'s'".to_string()),
        Just("f()".to_string()),
        Just("a.b()".to_string()),
        Just("[]".to_string()),
        Just("{}".to_string()),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("[{}, {}]", a, b)),
            inner.clone().prop_map(|a| format!("{{ k: {} }}", a)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(a, b, c)| format!("({} ? {} : {})", a, b, c)),
            inner.clone().prop_map(|a| format!("g({})", a)),
            inner.clone().prop_map(|a| format!("(y = {})", a)),
            inner
                .clone()
                .prop_map(|a| format!("function () {{ return {}; }}", a)),
            inner
                .clone()
                .prop_map(|a| format!("class {{ m() {{ return {}; }} }}", a)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("`a${{{}}}b${{{}}}`", a, b)),
            inner.prop_map(|a| format!("tag`x${{{}}}`", a)),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        expression().prop_map(|e| format!("let v = {};", e)),
        expression().prop_map(|e| format!("f({});", e)),
        Just("i++;".to_string()),
    ];
    leaf.prop_recursive(3, 24, 2, |inner| {
        let body = prop::collection::vec(inner, 0..3).prop_map(|stmts| stmts.join("\n"));
        prop_oneof![
            (expression(), body.clone(), body.clone())
                .prop_map(|(e, a, b)| format!("if ({}) {{\n{}\n}} else {{\n{}\n}}", e, a, b)),
            (expression(), body.clone())
                .prop_map(|(e, a)| format!("for (const i of {}) {{\n{}\n}}", e, a)),
            body.clone()
                .prop_map(|a| format!("for (let i = 0; i < 3; i++) {{\n{}\n}}", a)),
            (expression(), body.clone())
                .prop_map(|(e, a)| format!("while ({}) {{\n{}\n}}", e, a)),
            (body.clone(), expression())
                .prop_map(|(a, e)| format!("do {{\n{}\n}} while ({});", a, e)),
            (expression(), body.clone(), body.clone()).prop_map(|(e, a, b)| format!(
                "switch ({}) {{\ncase 1:\n{}\ndefault:\n{}\n}}",
                e, a, b
            )),
            (body.clone(), body.clone())
                .prop_map(|(a, b)| format!("try {{\n{}\n}} catch (err) {{\n{}\n}}", a, b)),
            (body.clone(), expression())
                .prop_map(|(a, e)| format!("function h() {{\n{}\nreturn {};\n}}", a, e)),
            body.prop_map(|a| format!("@d\n@e.f()\nclass C {{\nm() {{\n{}\n}}\n}}", a)),
        ]
    })
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(statement(), 1..5).prop_map(|stmts| stmts.join("\n"))
}

/// Cuts `source` after a generated number of characters.
fn truncated(source: &str, cut: prop::sample::Index) -> String {
    let count = source.chars().count();
    source.chars().take(cut.index(count + 1)).collect()
}

proptest! {
    #[test]
    fn test_tokens_have_positive_length(source in program()) {
        let stream = convert(&source).unwrap();
        prop_assert!(stream.iter().all(|t| t.length >= 1));
    }

    #[test]
    fn test_tokens_are_in_reading_order(source in program()) {
        let stream = convert(&source).unwrap();
        prop_assert!(stream.is_sorted());
    }

    #[test]
    fn test_begin_end_pairs_nest(source in program()) {
        let stream = convert(&source).unwrap();
        prop_assert!(stream.is_well_nested());
    }

    #[test]
    fn test_conversion_is_deterministic(source in program()) {
        let first = convert(&source).unwrap();
        let second = convert(&source).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_truncated_programs_still_convert(source in program(), cut in any::<prop::sample::Index>()) {
        let prefix = truncated(&source, cut);
        let stream = convert(&prefix);
        prop_assert!(stream.is_ok(), "{:?} -> {:?}", prefix, stream);
        let stream = stream.unwrap();
        prop_assert!(stream.iter().all(|t| t.length >= 1));
        prop_assert!(stream.is_sorted());
        prop_assert!(stream.is_well_nested());
    }
}
