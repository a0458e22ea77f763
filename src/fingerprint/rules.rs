//! Emission rules: which structural tokens each construct contributes.
//!
//! Tokens are anchored at the start of a node's span. BEGIN kinds use the
//! length of the keyword or bracket that opens the construct; the matching
//! END sits on the last character of the construct with length 1.

use super::error::{EmitError, EmitResult};
use super::stream::{Token, TokenStream};
use super::visitor::{
    walk_catch_clause, walk_class, walk_comprehension, walk_expression, walk_for_head,
    walk_function, walk_statement, walk_switch_case, walk_variable_declarator, AstVisitor,
};
use crate::ast::*;
use crate::vocabulary::{lengths, TokenKind};

/// Visitor that applies the emission rules and owns the resulting stream.
#[derive(Debug, Default)]
pub struct FingerprintVisitor {
    stream: TokenStream,
}

impl FingerprintVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the tokens of `program` and returns them in reading order.
    pub fn emit_program(mut self, program: &Program) -> EmitResult<TokenStream> {
        self.visit_program(program)?;
        self.stream.sort();
        Ok(self.stream)
    }

    fn emit(&mut self, kind: TokenKind, anchor: Span, length: usize) -> EmitResult<()> {
        check_span(kind, anchor)?;
        if length == 0 {
            return Err(EmitError::InvalidLength {
                kind,
                length,
                span: anchor,
            });
        }
        self.stream.push(Token::new(
            kind,
            anchor.start.line,
            anchor.start.column,
            length,
        ));
        Ok(())
    }

    /// END token on the last character of `span`.
    fn emit_end(&mut self, kind: TokenKind, span: Span) -> EmitResult<()> {
        check_span(kind, span)?;
        self.stream.push(Token::new(
            kind,
            span.end.line,
            span.end.column.saturating_sub(1),
            lengths::MARKER,
        ));
        Ok(())
    }

    /// BEGIN at the start of `span`, the children via `walk`, then END.
    fn scoped(
        &mut self,
        begin: TokenKind,
        length: usize,
        span: Span,
        walk: impl FnOnce(&mut Self) -> EmitResult<()>,
    ) -> EmitResult<()> {
        self.emit(begin, span, length)?;
        walk(self)?;
        match begin.end_kind() {
            Some(end) => self.emit_end(end, span),
            None => Err(EmitError::UnknownKind {
                key: begin.name().to_string(),
                id: begin.id(),
            }),
        }
    }

    /// for-in and for-of: the head binds each element, which counts as an
    /// assignment at the head.
    fn for_iteration(
        &mut self,
        left: &ForHead,
        right: &Expression,
        body: &Statement,
        span: Span,
    ) -> EmitResult<()> {
        self.scoped(TokenKind::ForBegin, lengths::FOR, span, |this| {
            walk_for_head(this, left)?;
            this.emit(TokenKind::Assign, left.span(), lengths::MARKER)?;
            this.visit_expression(right)?;
            this.visit_statement(body)
        })
    }

    fn call(&mut self, callee: &Expression) -> EmitResult<()> {
        let anchor = match callee {
            Expression::Member { property, .. } => property.span(),
            other => other.span(),
        };
        self.emit(TokenKind::Apply, anchor, anchor.len())
    }
}

fn check_span(kind: TokenKind, span: Span) -> EmitResult<()> {
    if span.end.offset <= span.start.offset || span.start.line == 0 || span.end < span.start {
        return Err(EmitError::DegenerateSpan { kind, span });
    }
    Ok(())
}

impl AstVisitor for FingerprintVisitor {
    type Error = EmitError;

    fn visit_statement(&mut self, statement: &Statement) -> EmitResult<()> {
        match statement {
            Statement::For { span, .. } => {
                self.scoped(TokenKind::ForBegin, lengths::FOR, *span, |this| {
                    walk_statement(this, statement)
                })
            }
            Statement::ForIn {
                left,
                right,
                body,
                span,
            }
            | Statement::ForOf {
                left,
                right,
                body,
                span,
                ..
            } => self.for_iteration(left, right, body, *span),
            Statement::If {
                test,
                consequent,
                alternate,
                span,
            } => self.scoped(TokenKind::IfBegin, lengths::IF, *span, |this| {
                this.visit_expression(test)?;
                this.visit_statement(consequent)?;
                if let Some(alternate) = alternate {
                    this.emit(TokenKind::Else, alternate.span(), lengths::MARKER)?;
                    this.visit_statement(alternate)?;
                }
                Ok(())
            }),
            Statement::While { span, .. } => {
                self.scoped(TokenKind::WhileBegin, lengths::WHILE, *span, |this| {
                    walk_statement(this, statement)
                })
            }
            Statement::DoWhile { span, .. } => {
                self.scoped(TokenKind::DoWhileBegin, lengths::DO, *span, |this| {
                    walk_statement(this, statement)
                })
            }
            Statement::With { span, .. } => {
                self.scoped(TokenKind::WithBegin, lengths::WITH, *span, |this| {
                    walk_statement(this, statement)
                })
            }
            Statement::Switch { span, .. } => {
                self.scoped(TokenKind::SwitchBegin, lengths::SWITCH, *span, |this| {
                    walk_statement(this, statement)
                })
            }
            Statement::Break { span, .. } => self.emit(TokenKind::Break, *span, lengths::BREAK),
            Statement::Continue { span, .. } => {
                self.emit(TokenKind::Continue, *span, lengths::CONTINUE)
            }
            Statement::Return { span, .. } => {
                self.emit(TokenKind::Return, *span, lengths::RETURN)?;
                walk_statement(self, statement)
            }
            Statement::Throw { span, .. } => {
                self.emit(TokenKind::Throw, *span, lengths::THROW)?;
                walk_statement(self, statement)
            }
            Statement::Try { span, .. } => {
                self.emit(TokenKind::Try, *span, lengths::TRY)?;
                walk_statement(self, statement)
            }
            Statement::Import(import) => {
                self.emit(TokenKind::Import, import.span, lengths::IMPORT)?;
                walk_statement(self, statement)
            }
            Statement::ExportNamed(ExportNamed { span, .. })
            | Statement::ExportDefault(ExportDefault { span, .. })
            | Statement::ExportAll(ExportAll { span, .. }) => {
                self.emit(TokenKind::Export, *span, lengths::EXPORT)?;
                walk_statement(self, statement)
            }
            Statement::Expression { .. }
            | Statement::Block(_)
            | Statement::Empty { .. }
            | Statement::Debugger { .. }
            | Statement::VariableDeclaration(_)
            | Statement::FunctionDeclaration(_)
            | Statement::ClassDeclaration(_)
            | Statement::Labeled { .. } => walk_statement(self, statement),
        }
    }

    fn visit_expression(&mut self, expression: &Expression) -> EmitResult<()> {
        match expression {
            Expression::Call { callee, .. } => {
                self.call(callee)?;
                walk_expression(self, expression)
            }
            Expression::Assignment {
                operator,
                left,
                right,
                span,
            } => {
                self.visit_pattern(left)?;
                self.emit(TokenKind::Assign, *span, operator.as_str().len())?;
                self.visit_expression(right)
            }
            Expression::Update { operator, span, .. } => {
                walk_expression(self, expression)?;
                self.emit(TokenKind::Assign, *span, operator.as_str().len())
            }
            Expression::Conditional { test, .. } => {
                let anchor = test.span();
                self.emit(
                    TokenKind::Ternary,
                    anchor,
                    anchor.len() + lengths::TERNARY_SUFFIX,
                )?;
                walk_expression(self, expression)
            }
            Expression::Yield { span, .. } => {
                self.emit(TokenKind::Yield, *span, lengths::YIELD)?;
                walk_expression(self, expression)
            }
            Expression::Await { span, .. } => {
                self.emit(TokenKind::Await, *span, lengths::AWAIT)?;
                walk_expression(self, expression)
            }
            Expression::Array { span, .. } => {
                self.scoped(TokenKind::ArrayBegin, lengths::MARKER, *span, |this| {
                    walk_expression(this, expression)
                })
            }
            Expression::Object { span, .. } => {
                self.scoped(TokenKind::ObjectBegin, lengths::MARKER, *span, |this| {
                    walk_expression(this, expression)
                })
            }
            Expression::Identifier(_)
            | Expression::Literal { .. }
            | Expression::This { .. }
            | Expression::Super { .. }
            | Expression::Template(_)
            | Expression::TaggedTemplate { .. }
            | Expression::Function(_)
            | Expression::Class(_)
            | Expression::Unary { .. }
            | Expression::Binary { .. }
            | Expression::New { .. }
            | Expression::Member { .. }
            | Expression::Sequence { .. }
            | Expression::Spread { .. }
            | Expression::Import { .. }
            | Expression::MetaProperty { .. }
            | Expression::Comprehension(_)
            | Expression::Generator(_)
            | Expression::Invalid { .. } => walk_expression(self, expression),
        }
    }

    fn visit_variable_declarator(&mut self, declarator: &VariableDeclarator) -> EmitResult<()> {
        if declarator.init.is_some() {
            let anchor = declarator.id.span();
            self.emit(TokenKind::Assign, anchor, anchor.len())?;
        }
        walk_variable_declarator(self, declarator)
    }

    fn visit_function(&mut self, function: &Function) -> EmitResult<()> {
        self.scoped(
            TokenKind::FunctionBegin,
            lengths::FUNCTION,
            function.span,
            |this| walk_function(this, function),
        )
    }

    fn visit_class_declaration(&mut self, class: &Class) -> EmitResult<()> {
        self.scoped(TokenKind::ClassBegin, lengths::CLASS, class.span, |this| {
            walk_class(this, class)
        })
    }

    fn visit_class_expression(&mut self, class: &Class) -> EmitResult<()> {
        self.scoped(
            TokenKind::ClassExpressionBegin,
            lengths::CLASS,
            class.span,
            |this| walk_class(this, class),
        )
    }

    fn visit_decorator(&mut self, decorator: &Decorator) -> EmitResult<()> {
        self.emit(TokenKind::Decorator, decorator.span, lengths::DECORATOR)?;
        self.visit_expression(&decorator.expression)
    }

    fn visit_switch_case(&mut self, case: &SwitchCase) -> EmitResult<()> {
        let length = if case.test.is_some() {
            lengths::CASE
        } else {
            lengths::DEFAULT
        };
        self.emit(TokenKind::Case, case.span, length)?;
        walk_switch_case(self, case)
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) -> EmitResult<()> {
        self.scoped(TokenKind::CatchBegin, lengths::CATCH, clause.span, |this| {
            walk_catch_clause(this, clause)
        })
    }

    fn visit_comprehension(
        &mut self,
        comprehension: &Comprehension,
        is_generator: bool,
    ) -> EmitResult<()> {
        let begin = if is_generator {
            TokenKind::GeneratorBegin
        } else {
            TokenKind::ComprehensionBegin
        };
        self.scoped(begin, lengths::MARKER, comprehension.span, |this| {
            walk_comprehension(this, comprehension)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Parser, StrictParser};
    use crate::preprocessor::{Preprocessor, TokenPreprocessor};
    use crate::tokenizer::token::Tokenizer;
    use pretty_assertions::assert_eq;

    fn emit(source: &str) -> Vec<(TokenKind, usize, usize, usize)> {
        let tokens = TokenPreprocessor::new().process(Tokenizer::new().tokenize(source).unwrap());
        let (_, program) = StrictParser::default().parse(&tokens, 0).unwrap();
        let stream = FingerprintVisitor::new().emit_program(&program).unwrap();
        assert!(stream.is_well_nested());
        stream
            .iter()
            .map(|t| (t.kind, t.line, t.column, t.length))
            .collect()
    }

    #[test]
    fn test_c_style_for_emits_no_loop_assign() {
        assert_eq!(
            emit("for (let i = 0; i < 3; i++) {}"),
            vec![
                (TokenKind::ForBegin, 1, 0, 3),
                (TokenKind::Assign, 1, 9, 1),
                (TokenKind::Assign, 1, 23, 2),
                (TokenKind::ForEnd, 1, 29, 1),
            ]
        );
    }

    #[test]
    fn test_for_of_and_for_in_bind_at_head() {
        let expected = vec![
            (TokenKind::ForBegin, 1, 0, 3),
            (TokenKind::Assign, 1, 5, 1),
            (TokenKind::ForEnd, 1, 15, 1),
        ];
        assert_eq!(emit("for (x of xs) {}"), expected);
        assert_eq!(emit("for (x in xs) {}"), expected);
        assert_eq!(
            emit("for (const [k, v] of m) {}"),
            vec![
                (TokenKind::ForBegin, 1, 0, 3),
                (TokenKind::Assign, 1, 5, 1),
                (TokenKind::ForEnd, 1, 25, 1),
            ]
        );
    }

    #[test]
    fn test_member_call_anchors_on_property() {
        assert_eq!(emit("a.b()"), vec![(TokenKind::Apply, 1, 2, 1)]);
        assert_eq!(emit("foo(1)"), vec![(TokenKind::Apply, 1, 0, 3)]);
        assert_eq!(emit("new Foo()"), vec![]);
    }

    #[test]
    fn test_if_else_markers() {
        assert_eq!(
            emit("if (x) {} else {}"),
            vec![
                (TokenKind::IfBegin, 1, 0, 2),
                (TokenKind::Else, 1, 15, 1),
                (TokenKind::IfEnd, 1, 16, 1),
            ]
        );
    }

    #[test]
    fn test_declarator_assign_uses_binding_length() {
        assert_eq!(emit("let x = 1"), vec![(TokenKind::Assign, 1, 4, 1)]);
        assert_eq!(emit("let value"), vec![]);
        assert_eq!(
            emit("const [a, b] = c"),
            vec![(TokenKind::Assign, 1, 6, 6)]
        );
    }

    #[test]
    fn test_assignment_operator_length() {
        assert_eq!(emit("x **= 2"), vec![(TokenKind::Assign, 1, 0, 3)]);
    }

    #[test]
    fn test_ternary_length() {
        assert_eq!(emit("ok ? a : b"), vec![(TokenKind::Ternary, 1, 0, 4)]);
    }

    #[test]
    fn test_jump_statements() {
        assert_eq!(
            emit("function f() { while (1) { break; continue } return; throw e }"),
            vec![
                (TokenKind::FunctionBegin, 1, 0, 8),
                (TokenKind::WhileBegin, 1, 15, 5),
                (TokenKind::Break, 1, 27, 5),
                (TokenKind::Continue, 1, 34, 8),
                (TokenKind::WhileEnd, 1, 43, 1),
                (TokenKind::Return, 1, 45, 6),
                (TokenKind::Throw, 1, 53, 5),
                (TokenKind::FunctionEnd, 1, 61, 1),
            ]
        );
    }

    #[test]
    fn test_switch_and_try() {
        assert_eq!(
            emit("switch (x) { case 1: default: }\ntry {} catch (e) {}"),
            vec![
                (TokenKind::SwitchBegin, 1, 0, 6),
                (TokenKind::Case, 1, 13, 4),
                (TokenKind::Case, 1, 21, 7),
                (TokenKind::SwitchEnd, 1, 30, 1),
                (TokenKind::Try, 2, 0, 3),
                (TokenKind::CatchBegin, 2, 7, 5),
                (TokenKind::CatchEnd, 2, 18, 1),
            ]
        );
    }

    #[test]
    fn test_literals_and_comprehensions() {
        assert_eq!(
            emit("[{}, (for (x of y) x)]"),
            vec![
                (TokenKind::ArrayBegin, 1, 0, 1),
                (TokenKind::ObjectBegin, 1, 1, 1),
                (TokenKind::ObjectEnd, 1, 2, 1),
                (TokenKind::GeneratorBegin, 1, 5, 1),
                (TokenKind::GeneratorEnd, 1, 20, 1),
                (TokenKind::ArrayEnd, 1, 21, 1),
            ]
        );
        assert_eq!(
            emit("[for (x of y) x]"),
            vec![
                (TokenKind::ComprehensionBegin, 1, 0, 1),
                (TokenKind::ComprehensionEnd, 1, 15, 1),
            ]
        );
    }

    #[test]
    fn test_classes_and_decorators() {
        assert_eq!(
            emit("@d class A { m() {} }\nx = class {}"),
            vec![
                (TokenKind::Decorator, 1, 0, 1),
                (TokenKind::ClassBegin, 1, 3, 5),
                (TokenKind::FunctionBegin, 1, 13, 8),
                (TokenKind::FunctionEnd, 1, 18, 1),
                (TokenKind::ClassEnd, 1, 20, 1),
                (TokenKind::Assign, 2, 0, 1),
                (TokenKind::ClassExpressionBegin, 2, 4, 5),
                (TokenKind::ClassExpressionEnd, 2, 11, 1),
            ]
        );
    }

    #[test]
    fn test_modules_yield_and_await() {
        assert_eq!(
            emit("import a from 'a'\nexport default async function* g() { yield await a }"),
            vec![
                (TokenKind::Import, 1, 0, 6),
                (TokenKind::Export, 2, 0, 6),
                (TokenKind::FunctionBegin, 2, 15, 8),
                (TokenKind::Yield, 2, 37, 5),
                (TokenKind::Await, 2, 43, 5),
                (TokenKind::FunctionEnd, 2, 51, 1),
            ]
        );
    }

    #[test]
    fn test_degenerate_span_is_rejected() {
        let mut visitor = FingerprintVisitor::new();
        let point = Position::new(1, 4, 4);
        let result = visitor.emit(TokenKind::Return, Span::new(point, point), lengths::RETURN);
        assert!(matches!(result, Err(EmitError::DegenerateSpan { .. })));

        let span = Span::new(point, Position::new(1, 5, 5));
        let result = visitor.emit(TokenKind::Apply, span, 0);
        assert!(matches!(result, Err(EmitError::InvalidLength { .. })));
    }
}
