use crate::analyzer::parser::{JsParser, PResult};
use crate::ast::{
    Block, CatchClause, Expression, ForHead, ForInit, Statement, SwitchCase, VariableDeclaration,
    VariableDeclarator, VariableKind,
};
use crate::tokenizer::{keyword::Keyword, symbol::Punctuator, token::Token};

impl<'a> JsParser<'a> {
    /// Statements up to end of input.
    pub(crate) fn parse_statement_list(&mut self, in_block: bool) -> PResult<Vec<Statement>> {
        if in_block {
            self.parse_statements_until(|p| p.at(Punctuator::RightBrace))
        } else {
            self.parse_statements_until(|_| false)
        }
    }

    fn parse_statements_until(&mut self, stop: impl Fn(&Self) -> bool) -> PResult<Vec<Statement>> {
        let mut body = Vec::new();
        while !self.is_eof() && !stop(self) {
            if self.at(Punctuator::RightBrace) {
                let error = self.unexpected("statement");
                self.synchronize(error)?;
                continue;
            }
            let before = self.pos;
            match self.parse_statement() {
                Ok(statement) if self.pos > before => body.push(statement),
                Ok(_) => {
                    let error = self.unexpected("statement");
                    self.synchronize(error)?;
                }
                Err(error) if self.is_lenient() => self.synchronize(error)?,
                Err(error) => return Err(error),
            }
        }
        Ok(body)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub(crate) fn parse_statement(&mut self) -> PResult<Statement> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("statement"));
        };
        match &token.token {
            Token::Punctuator(Punctuator::LeftBrace) => self.parse_block().map(Statement::Block),
            Token::Punctuator(Punctuator::Semicolon) => {
                self.bump();
                Ok(Statement::Empty { span: token.span })
            }
            Token::Punctuator(Punctuator::At) => {
                let decorators = self.parse_decorators()?;
                if self.at_keyword(Keyword::Export) {
                    return self.parse_export(decorators);
                }
                let class = self.parse_class(decorators, true)?;
                Ok(Statement::ClassDeclaration(Box::new(class)))
            }
            Token::Keyword(keyword) => match keyword {
                Keyword::Var | Keyword::Const => self.parse_variable_statement(),
                Keyword::Function => {
                    let function = self.parse_function(true)?;
                    Ok(Statement::FunctionDeclaration(Box::new(function)))
                }
                Keyword::Class => {
                    let class = self.parse_class(Vec::new(), true)?;
                    Ok(Statement::ClassDeclaration(Box::new(class)))
                }
                Keyword::If => self.parse_if(),
                Keyword::For => self.parse_for(),
                Keyword::While => self.parse_while(),
                Keyword::Do => self.parse_do_while(),
                Keyword::Return => self.parse_return(),
                Keyword::Break | Keyword::Continue => self.parse_break_or_continue(),
                Keyword::Throw => self.parse_throw(),
                Keyword::Try => self.parse_try(),
                Keyword::Switch => self.parse_switch(),
                Keyword::With => self.parse_with(),
                Keyword::Debugger => {
                    self.bump();
                    self.consume_semicolon()?;
                    Ok(Statement::Debugger {
                        span: self.span_from(token.span.start),
                    })
                }
                Keyword::Import
                    if !self.nth_is(1, Punctuator::LeftParen) && !self.nth_is(1, Punctuator::Dot) =>
                {
                    self.parse_import_declaration()
                }
                Keyword::Export => self.parse_export(Vec::new()),
                _ => self.parse_expression_statement(),
            },
            Token::Identifier(name) => {
                if name == "let" && self.let_starts_declaration() {
                    self.parse_variable_statement()
                } else if name == "async"
                    && self.nth_is_keyword(1, Keyword::Function)
                    && !self.nth_newline_before(1)
                {
                    let function = self.parse_function(true)?;
                    Ok(Statement::FunctionDeclaration(Box::new(function)))
                } else if self.nth_is(1, Punctuator::Colon) {
                    self.parse_labeled()
                } else {
                    self.parse_expression_statement()
                }
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn let_starts_declaration(&self) -> bool {
        self.nth_is_identifier(1)
            || self.nth_is(1, Punctuator::LeftBracket)
            || self.nth_is(1, Punctuator::LeftBrace)
    }

    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        let start = self.start();
        self.expect(Punctuator::LeftBrace)?;
        self.context.depth += 1;
        let body = self.parse_statement_list(true);
        self.context.depth -= 1;
        let body = body?;
        self.expect(Punctuator::RightBrace)?;
        Ok(Block {
            body,
            span: self.span_from(start),
        })
    }

    fn parse_expression_statement(&mut self) -> PResult<Statement> {
        let start = self.start();
        let before = self.pos;
        let expression = self.parse_expression(false)?;
        self.consume_semicolon()?;
        // a placeholder that consumed nothing keeps the offending token's span
        let span = match &expression {
            Expression::Invalid { span } if self.pos == before => *span,
            _ => self.span_from(start),
        };
        Ok(Statement::Expression { expression, span })
    }

    fn parse_variable_statement(&mut self) -> PResult<Statement> {
        let start = self.start();
        let mut declaration = self.parse_variable_declaration(false)?;
        self.consume_semicolon()?;
        declaration.span = self.span_from(start);
        Ok(Statement::VariableDeclaration(declaration))
    }

    /// `var`/`let`/`const` and its declarators, without the terminator.
    pub(crate) fn parse_variable_declaration(&mut self, no_in: bool) -> PResult<VariableDeclaration> {
        let start = self.start();
        let kind = if self.eat_keyword(Keyword::Var) {
            VariableKind::Var
        } else if self.eat_keyword(Keyword::Const) {
            VariableKind::Const
        } else if self.eat_contextual("let") {
            VariableKind::Let
        } else {
            return Err(self.unexpected("variable declaration"));
        };

        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.start();
            let id = self.parse_binding_target()?;
            let init = if self.eat(Punctuator::Equal) {
                Some(self.parse_assignment(no_in)?)
            } else {
                None
            };
            declarations.push(VariableDeclarator {
                id,
                init,
                span: self.span_from(declarator_start),
            });
            if !self.eat(Punctuator::Comma) {
                break;
            }
        }

        Ok(VariableDeclaration {
            kind,
            declarations,
            span: self.span_from(start),
        })
    }

    fn parse_if(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        self.expect(Punctuator::LeftParen)?;
        let test = self.parse_expression(false)?;
        self.expect(Punctuator::RightParen)?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::If {
            test,
            consequent,
            alternate,
            span: self.span_from(start),
        })
    }

    fn parse_for(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        let is_await = self.eat_contextual("await");
        self.expect(Punctuator::LeftParen)?;

        let init = if self.at(Punctuator::Semicolon) {
            None
        } else if self.at_keyword(Keyword::Var)
            || self.at_keyword(Keyword::Const)
            || (self.at_contextual("let") && self.let_starts_declaration())
        {
            let declaration = self.parse_variable_declaration(true)?;
            if self.at_contextual("of") || self.at_keyword(Keyword::In) {
                return self.parse_for_in_of(start, ForHead::Declaration(declaration), is_await);
            }
            Some(ForInit::Declaration(declaration))
        } else {
            let expression = self.parse_expression(true)?;
            if self.at_contextual("of") || self.at_keyword(Keyword::In) {
                let target = self.to_assignment_target(expression)?;
                return self.parse_for_in_of(start, ForHead::Pattern(target), is_await);
            }
            Some(ForInit::Expression(expression))
        };

        self.expect(Punctuator::Semicolon)?;
        let test = if self.at(Punctuator::Semicolon) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(Punctuator::Semicolon)?;
        let update = if self.at(Punctuator::RightParen) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(Punctuator::RightParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Statement::For {
            init,
            test,
            update,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_for_in_of(
        &mut self,
        start: crate::ast::Position,
        left: ForHead,
        is_await: bool,
    ) -> PResult<Statement> {
        if self.eat_keyword(Keyword::In) {
            let right = self.parse_expression(false)?;
            self.expect(Punctuator::RightParen)?;
            let body = Box::new(self.parse_statement()?);
            return Ok(Statement::ForIn {
                left,
                right,
                body,
                span: self.span_from(start),
            });
        }

        self.bump(); // of
        let right = self.parse_assignment(false)?;
        self.expect(Punctuator::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::ForOf {
            left,
            right,
            body,
            is_await,
            span: self.span_from(start),
        })
    }

    fn parse_while(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        self.expect(Punctuator::LeftParen)?;
        let test = self.parse_expression(false)?;
        self.expect(Punctuator::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While {
            test,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_do_while(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        let body = Box::new(self.parse_statement()?);
        self.expect_keyword(Keyword::While)?;
        self.expect(Punctuator::LeftParen)?;
        let test = self.parse_expression(false)?;
        self.expect(Punctuator::RightParen)?;
        // the semicolon after do-while is always optional
        self.eat(Punctuator::Semicolon);
        Ok(Statement::DoWhile {
            body,
            test,
            span: self.span_from(start),
        })
    }

    fn parse_return(&mut self) -> PResult<Statement> {
        let start = self.start();
        if !self.context.in_function && !self.options().allow_return_outside_function {
            let error = self.failure("'return' outside of function");
            self.report(error)?;
        }
        self.bump();
        let argument = if self.at(Punctuator::Semicolon)
            || self.at(Punctuator::RightBrace)
            || self.is_eof()
            || self.newline_before()
        {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.consume_semicolon()?;
        Ok(Statement::Return {
            argument,
            span: self.span_from(start),
        })
    }

    fn parse_break_or_continue(&mut self) -> PResult<Statement> {
        let start = self.start();
        let is_break = self.at_keyword(Keyword::Break);
        self.bump();
        let label = if self.at_identifier() && !self.newline_before() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let span = self.span_from(start);
        Ok(if is_break {
            Statement::Break { label, span }
        } else {
            Statement::Continue { label, span }
        })
    }

    fn parse_throw(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        if self.newline_before() {
            let error = self.failure("illegal newline after throw");
            self.report(error)?;
        }
        let argument = self.parse_expression(false)?;
        self.consume_semicolon()?;
        Ok(Statement::Throw {
            argument,
            span: self.span_from(start),
        })
    }

    fn parse_try(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        let block = self.parse_block()?;

        let handler = if self.at_keyword(Keyword::Catch) {
            let catch_start = self.start();
            self.bump();
            let param = if self.eat(Punctuator::LeftParen) {
                let param = self.parse_binding_target()?;
                self.expect(Punctuator::RightParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                body,
                span: self.span_from(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.eat_keyword(Keyword::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            let error = self.unexpected("catch or finally");
            self.report(error)?;
        }

        Ok(Statement::Try {
            block,
            handler,
            finalizer,
            span: self.span_from(start),
        })
    }

    fn parse_switch(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        self.expect(Punctuator::LeftParen)?;
        let discriminant = self.parse_expression(false)?;
        self.expect(Punctuator::RightParen)?;
        self.expect(Punctuator::LeftBrace)?;

        let mut cases = Vec::new();
        while !self.at(Punctuator::RightBrace) && !self.is_eof() {
            let case_start = self.start();
            let test = if self.eat_keyword(Keyword::Case) {
                Some(self.parse_expression(false)?)
            } else if self.eat_keyword(Keyword::Default) {
                None
            } else {
                let error = self.unexpected("case or default");
                self.report(error)?;
                self.bump();
                continue;
            };
            self.expect(Punctuator::Colon)?;
            self.context.depth += 1;
            let consequent = self.parse_statements_until(|p| {
                p.at(Punctuator::RightBrace)
                    || p.at_keyword(Keyword::Case)
                    || p.at_keyword(Keyword::Default)
            });
            self.context.depth -= 1;
            cases.push(SwitchCase {
                test,
                consequent: consequent?,
                span: self.span_from(case_start),
            });
        }
        self.expect(Punctuator::RightBrace)?;

        Ok(Statement::Switch {
            discriminant,
            cases,
            span: self.span_from(start),
        })
    }

    fn parse_with(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.bump();
        self.expect(Punctuator::LeftParen)?;
        let object = self.parse_expression(false)?;
        self.expect(Punctuator::RightParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::With {
            object,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_labeled(&mut self) -> PResult<Statement> {
        let start = self.start();
        let label = self.parse_identifier()?;
        self.bump(); // :
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::Labeled {
            label,
            body,
            span: self.span_from(start),
        })
    }
}
