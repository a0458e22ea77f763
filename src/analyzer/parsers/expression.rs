use crate::analyzer::parser::{JsParser, PResult};
use crate::ast::{
    Comprehension, ComprehensionBlock, Expression, Function, FunctionBody, Identifier,
    LiteralValue, MemberProperty, MethodKind, Operator, Pattern, Position, Property,
    PropertyKey, TemplateElement, TemplateLiteral,
};
use crate::tokenizer::{
    keyword::Keyword,
    literal::{Literal, TemplatePart},
    symbol::Punctuator,
    token::{Token, TokenSpan},
};

impl From<&Literal> for LiteralValue {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::String(s) => LiteralValue::String(s.clone()),
            Literal::Number(n) => LiteralValue::Number(n.clone()),
            Literal::BigInt(n) => LiteralValue::BigInt(n.clone()),
            Literal::Regex { pattern, flags } => LiteralValue::Regex {
                pattern: pattern.clone(),
                flags: flags.clone(),
            },
        }
    }
}

fn binary_precedence(punctuator: Punctuator) -> Option<u8> {
    let precedence = match punctuator {
        Punctuator::QuestionQuestion => 1,
        Punctuator::PipePipe => 2,
        Punctuator::AmpAmp => 3,
        Punctuator::Pipe => 4,
        Punctuator::Caret => 5,
        Punctuator::Ampersand => 6,
        Punctuator::EqualEqual
        | Punctuator::NotEqual
        | Punctuator::StrictEqual
        | Punctuator::StrictNotEqual => 7,
        Punctuator::Less | Punctuator::Greater | Punctuator::LessEqual | Punctuator::GreaterEqual => 8,
        Punctuator::ShiftLeft | Punctuator::ShiftRight | Punctuator::UnsignedShiftRight => 9,
        Punctuator::Plus | Punctuator::Minus => 10,
        Punctuator::Star | Punctuator::Slash | Punctuator::Percent => 11,
        Punctuator::StarStar => 12,
        _ => return None,
    };
    Some(precedence)
}

impl<'a> JsParser<'a> {
    /// Comma-separated expression. `no_in` keeps `in` from being read as an
    /// operator inside a `for` head.
    pub(crate) fn parse_expression(&mut self, no_in: bool) -> PResult<Expression> {
        let start = self.start();
        let first = self.parse_assignment(no_in)?;
        if !self.at(Punctuator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(Punctuator::Comma) {
            expressions.push(self.parse_assignment(no_in)?);
        }
        Ok(Expression::Sequence {
            expressions,
            span: self.span_from(start),
        })
    }

    pub(crate) fn parse_assignment(&mut self, no_in: bool) -> PResult<Expression> {
        if self.at_contextual("yield") && self.context.in_generator {
            return self.parse_yield(no_in);
        }
        if let Some(arrow) = self.try_parse_arrow(no_in)? {
            return Ok(arrow);
        }

        let start = self.start();
        let left = self.parse_conditional(no_in)?;
        let operator = match self.peek_token() {
            Some(Token::Punctuator(p)) if p.is_assignment() => *p,
            _ => return Ok(left),
        };
        self.bump();
        let target = if operator == Punctuator::Equal {
            self.to_assignment_target(left)?
        } else {
            self.to_simple_target(left)?
        };
        let right = self.parse_assignment(no_in)?;
        Ok(Expression::Assignment {
            operator,
            left: Box::new(target),
            right: Box::new(right),
            span: self.span_from(start),
        })
    }

    fn parse_yield(&mut self, no_in: bool) -> PResult<Expression> {
        let start = self.start();
        self.bump();
        let delegate = !self.newline_before() && self.eat(Punctuator::Star);
        let argument = if !delegate && (self.newline_before() || self.at_expression_end()) {
            None
        } else {
            Some(Box::new(self.parse_assignment(no_in)?))
        };
        Ok(Expression::Yield {
            argument,
            delegate,
            span: self.span_from(start),
        })
    }

    /// Tokens that close the expression being parsed.
    fn at_expression_end(&self) -> bool {
        self.is_eof()
            || matches!(
                self.peek_token(),
                Some(Token::Punctuator(
                    Punctuator::RightParen
                        | Punctuator::RightBracket
                        | Punctuator::RightBrace
                        | Punctuator::Semicolon
                        | Punctuator::Comma
                        | Punctuator::Colon
                ))
            )
    }

    /// The parenthesis opened at token `open` is closed by a `)` directly
    /// followed by `=>` on the same line.
    fn arrow_follows_paren(&self, open: usize) -> bool {
        match self.matching_close(open) {
            Some(close) => {
                let arrow = self.token_at(close + 1);
                matches!(arrow, Some(TokenSpan { token: Token::Punctuator(Punctuator::Arrow), newline_before: false, .. }))
                    && matches!(self.token_at(close), Some(TokenSpan { token: Token::Punctuator(Punctuator::RightParen), .. }))
            }
            None => false,
        }
    }

    /// `x =>`
    fn nth_starts_simple_arrow(&self, n: usize) -> bool {
        self.nth_is_identifier(n)
            && self.nth_is(n + 1, Punctuator::Arrow)
            && !self.nth_newline_before(n + 1)
    }

    fn try_parse_arrow(&mut self, no_in: bool) -> PResult<Option<Expression>> {
        let is_async = self.at_contextual("async")
            && !self.nth_newline_before(1)
            && (self.nth_starts_simple_arrow(1)
                || (self.nth_is(1, Punctuator::LeftParen) && self.arrow_follows_paren(self.pos + 1)));
        let is_arrow = is_async
            || self.nth_starts_simple_arrow(0)
            || (self.at(Punctuator::LeftParen) && self.arrow_follows_paren(self.pos));
        if !is_arrow {
            return Ok(None);
        }

        let start = self.start();
        if is_async {
            self.bump();
        }
        let params = if self.at_identifier() {
            vec![Pattern::Identifier(self.parse_identifier()?)]
        } else {
            self.parse_formal_params()?
        };
        self.expect(Punctuator::Arrow)?;

        let saved = self.context;
        self.context.in_function = true;
        self.context.in_async = is_async;
        self.context.in_generator = false;
        let body = if self.at(Punctuator::LeftBrace) {
            self.parse_block().map(FunctionBody::Block)
        } else {
            self.parse_assignment(no_in)
                .map(|expression| FunctionBody::Expression(Box::new(expression)))
        };
        self.context = saved;

        Ok(Some(Expression::Function(Box::new(Function {
            id: None,
            params,
            body: body?,
            is_async,
            is_generator: false,
            is_arrow: true,
            span: self.span_from(start),
        }))))
    }

    fn parse_conditional(&mut self, no_in: bool) -> PResult<Expression> {
        let start = self.start();
        let test = self.parse_binary(0, no_in)?;
        if !self.eat(Punctuator::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect(Punctuator::Colon)?;
        let alternate = self.parse_assignment(no_in)?;
        Ok(Expression::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            span: self.span_from(start),
        })
    }

    fn peek_binary_operator(&self, no_in: bool) -> Option<(Operator, u8)> {
        match self.peek_token()? {
            Token::Punctuator(p) => binary_precedence(*p).map(|prec| (Operator::Punctuator(*p), prec)),
            Token::Keyword(Keyword::Instanceof) => Some((Operator::Keyword(Keyword::Instanceof), 8)),
            Token::Keyword(Keyword::In) if !no_in => Some((Operator::Keyword(Keyword::In), 8)),
            _ => None,
        }
    }

    /// Precedence climbing over binary and logical operators.
    fn parse_binary(&mut self, min_precedence: u8, no_in: bool) -> PResult<Expression> {
        let start = self.start();
        let mut left = self.parse_unary()?;
        while let Some((operator, precedence)) = self.peek_binary_operator(no_in) {
            if precedence <= min_precedence {
                break;
            }
            self.bump();
            // `**` is right-associative
            let next = if operator == Operator::Punctuator(Punctuator::StarStar) {
                precedence - 1
            } else {
                precedence
            };
            let right = self.parse_binary(next, no_in)?;
            left = Expression::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span: self.span_from(start),
            };
        }
        Ok(left)
    }

    fn await_allowed(&self) -> bool {
        self.context.in_async
            || (!self.context.in_function && self.options().allow_await_outside_function)
    }

    fn parse_unary(&mut self) -> PResult<Expression> {
        let start = self.start();
        let operator = match self.peek_token() {
            Some(Token::Punctuator(
                p @ (Punctuator::Plus | Punctuator::Minus | Punctuator::Bang | Punctuator::Tilde),
            )) => Operator::Punctuator(*p),
            Some(Token::Keyword(k @ (Keyword::Typeof | Keyword::Void | Keyword::Delete))) => {
                Operator::Keyword(*k)
            }
            Some(Token::Punctuator(p @ (Punctuator::PlusPlus | Punctuator::MinusMinus))) => {
                let operator = *p;
                self.bump();
                let argument = self.parse_unary()?;
                return Ok(Expression::Update {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                    span: self.span_from(start),
                });
            }
            Some(Token::Identifier(name)) if name == "await" && self.await_allowed() => {
                self.bump();
                let argument = self.parse_unary()?;
                return Ok(Expression::Await {
                    argument: Box::new(argument),
                    span: self.span_from(start),
                });
            }
            _ => return self.parse_postfix(),
        };
        self.bump();
        let argument = self.parse_unary()?;
        Ok(Expression::Unary {
            operator,
            argument: Box::new(argument),
            span: self.span_from(start),
        })
    }

    fn parse_postfix(&mut self) -> PResult<Expression> {
        let start = self.start();
        let expression = self.parse_left_hand_side()?;
        match self.peek() {
            Some(TokenSpan {
                token: Token::Punctuator(p @ (Punctuator::PlusPlus | Punctuator::MinusMinus)),
                newline_before: false,
                ..
            }) => {
                self.bump();
                Ok(Expression::Update {
                    operator: *p,
                    prefix: false,
                    argument: Box::new(expression),
                    span: self.span_from(start),
                })
            }
            _ => Ok(expression),
        }
    }

    /// Member accesses, calls and tagged templates on top of a primary.
    pub(crate) fn parse_left_hand_side(&mut self) -> PResult<Expression> {
        let start = self.start();
        let expression = if self.at_keyword(Keyword::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_call_tail(start, expression, true)
    }

    fn parse_call_tail(
        &mut self,
        start: Position,
        mut expression: Expression,
        allow_call: bool,
    ) -> PResult<Expression> {
        loop {
            if self.eat(Punctuator::Dot) {
                let property = self.parse_member_property()?;
                expression = Expression::Member {
                    object: Box::new(expression),
                    property,
                    optional: false,
                    span: self.span_from(start),
                };
            } else if allow_call && self.eat(Punctuator::QuestionDot) {
                expression = if self.at(Punctuator::LeftParen) {
                    let arguments = self.parse_arguments()?;
                    Expression::Call {
                        callee: Box::new(expression),
                        arguments,
                        optional: true,
                        span: self.span_from(start),
                    }
                } else if self.eat(Punctuator::LeftBracket) {
                    let property = self.parse_expression(false)?;
                    self.expect(Punctuator::RightBracket)?;
                    Expression::Member {
                        object: Box::new(expression),
                        property: MemberProperty::Computed(Box::new(property)),
                        optional: true,
                        span: self.span_from(start),
                    }
                } else {
                    let property = self.parse_member_property()?;
                    Expression::Member {
                        object: Box::new(expression),
                        property,
                        optional: true,
                        span: self.span_from(start),
                    }
                };
            } else if self.eat(Punctuator::LeftBracket) {
                let property = self.parse_expression(false)?;
                self.expect(Punctuator::RightBracket)?;
                expression = Expression::Member {
                    object: Box::new(expression),
                    property: MemberProperty::Computed(Box::new(property)),
                    optional: false,
                    span: self.span_from(start),
                };
            } else if allow_call && self.at(Punctuator::LeftParen) {
                let arguments = self.parse_arguments()?;
                expression = Expression::Call {
                    callee: Box::new(expression),
                    arguments,
                    optional: false,
                    span: self.span_from(start),
                };
            } else if self.at_template_start() {
                let quasi = self.parse_template()?;
                expression = Expression::TaggedTemplate {
                    tag: Box::new(expression),
                    quasi,
                    span: self.span_from(start),
                };
            } else {
                break;
            }
        }
        Ok(expression)
    }

    fn parse_member_property(&mut self) -> PResult<MemberProperty> {
        if let Some(TokenSpan {
            token: Token::PrivateName(name),
            span,
            ..
        }) = self.peek()
        {
            self.bump();
            return Ok(MemberProperty::PrivateName(Identifier {
                name: name.clone(),
                span: *span,
            }));
        }
        self.parse_identifier_name().map(MemberProperty::Identifier)
    }

    fn parse_new(&mut self) -> PResult<Expression> {
        let start = self.start();
        let keyword_span = self.current_span();
        self.bump();
        if self.eat(Punctuator::Dot) {
            let property = self.parse_identifier_name()?;
            return Ok(Expression::MetaProperty {
                meta: Identifier {
                    name: "new".to_string(),
                    span: keyword_span,
                },
                property,
                span: self.span_from(start),
            });
        }

        let callee_start = self.start();
        let callee = if self.at_keyword(Keyword::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_call_tail(callee_start, callee, false)?;
        let arguments = if self.at(Punctuator::LeftParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::New {
            callee: Box::new(callee),
            arguments,
            span: self.span_from(start),
        })
    }

    pub(crate) fn parse_arguments(&mut self) -> PResult<Vec<Expression>> {
        self.expect(Punctuator::LeftParen)?;
        let mut arguments = Vec::new();
        while !self.at(Punctuator::RightParen) && !self.is_eof() {
            let argument = if self.at(Punctuator::Ellipsis) {
                self.parse_spread()?
            } else {
                self.parse_assignment(false)?
            };
            arguments.push(argument);
            if !self.eat(Punctuator::Comma) {
                break;
            }
        }
        self.expect(Punctuator::RightParen)?;
        Ok(arguments)
    }

    fn parse_spread(&mut self) -> PResult<Expression> {
        let start = self.start();
        self.bump();
        let argument = self.parse_assignment(false)?;
        Ok(Expression::Spread {
            argument: Box::new(argument),
            span: self.span_from(start),
        })
    }

    pub(crate) fn parse_primary(&mut self) -> PResult<Expression> {
        let Some(token) = self.peek() else {
            return self.missing_expression();
        };
        let span = token.span;
        match &token.token {
            Token::Identifier(name) => {
                if name == "async"
                    && self.nth_is_keyword(1, Keyword::Function)
                    && !self.nth_newline_before(1)
                {
                    return self.parse_function_expression();
                }
                self.bump();
                Ok(Expression::Identifier(Identifier {
                    name: name.clone(),
                    span,
                }))
            }
            Token::PrivateName(name) => {
                // `#x in obj`
                self.bump();
                Ok(Expression::Identifier(Identifier {
                    name: format!("#{}", name),
                    span,
                }))
            }
            Token::Literal(literal) => {
                self.bump();
                Ok(Expression::Literal {
                    value: literal.into(),
                    span,
                })
            }
            Token::Template(_) => self.parse_template().map(Expression::Template),
            Token::Keyword(keyword) => {
                let value = match keyword {
                    Keyword::Function => return self.parse_function_expression(),
                    Keyword::Class => {
                        let class = self.parse_class(Vec::new(), false)?;
                        return Ok(Expression::Class(Box::new(class)));
                    }
                    Keyword::Import => return self.parse_import_expression(),
                    Keyword::This => Expression::This { span },
                    Keyword::Super => Expression::Super { span },
                    Keyword::Null => Expression::Literal {
                        value: LiteralValue::Null,
                        span,
                    },
                    Keyword::True | Keyword::False => Expression::Literal {
                        value: LiteralValue::Boolean(*keyword == Keyword::True),
                        span,
                    },
                    _ => return self.missing_expression(),
                };
                self.bump();
                Ok(value)
            }
            Token::Punctuator(Punctuator::LeftParen) => self.parse_parenthesized(),
            Token::Punctuator(Punctuator::LeftBracket) => self.parse_array(),
            Token::Punctuator(Punctuator::LeftBrace) => self.parse_object(),
            Token::Punctuator(Punctuator::At) => {
                let decorators = self.parse_decorators()?;
                let class = self.parse_class(decorators, false)?;
                Ok(Expression::Class(Box::new(class)))
            }
            Token::Punctuator(_)
            | Token::Whitespace(_)
            | Token::Newline
            | Token::Comment { .. } => self.missing_expression(),
        }
    }

    /// Strict mode fails; lenient mode reports and stands in an
    /// [`Expression::Invalid`] for the offending token, consuming it unless
    /// it closes an enclosing construct.
    fn missing_expression(&mut self) -> PResult<Expression> {
        let error = self.unexpected("expression");
        self.report(error)?;
        let span = self.current_span();
        if !self.at_expression_end() {
            self.bump();
        }
        Ok(Expression::Invalid { span })
    }

    fn parse_function_expression(&mut self) -> PResult<Expression> {
        let function = self.parse_function(false)?;
        Ok(Expression::Function(Box::new(function)))
    }

    fn parse_import_expression(&mut self) -> PResult<Expression> {
        let start = self.start();
        let span = self.current_span();
        self.bump();
        if self.eat(Punctuator::Dot) {
            let property = self.parse_identifier_name()?;
            return Ok(Expression::MetaProperty {
                meta: Identifier {
                    name: "import".to_string(),
                    span,
                },
                property,
                span: self.span_from(start),
            });
        }
        if !self.at(Punctuator::LeftParen) {
            return Err(self.unexpected("( or ."));
        }
        Ok(Expression::Import { span })
    }

    fn parse_parenthesized(&mut self) -> PResult<Expression> {
        if self.nth_is_keyword(1, Keyword::For) {
            return self.parse_comprehension(Punctuator::RightParen);
        }
        self.bump();
        let expression = self.parse_expression(false)?;
        self.expect(Punctuator::RightParen)?;
        Ok(expression)
    }

    fn parse_array(&mut self) -> PResult<Expression> {
        if self.nth_is_keyword(1, Keyword::For) {
            return self.parse_comprehension(Punctuator::RightBracket);
        }
        let start = self.start();
        self.bump();
        let mut elements = Vec::new();
        while !self.at(Punctuator::RightBracket) && !self.is_eof() {
            if self.eat(Punctuator::Comma) {
                elements.push(None);
                continue;
            }
            let element = if self.at(Punctuator::Ellipsis) {
                self.parse_spread()?
            } else {
                self.parse_assignment(false)?
            };
            elements.push(Some(element));
            if !self.at(Punctuator::RightBracket) && !self.eat(Punctuator::Comma) {
                break;
            }
        }
        self.expect(Punctuator::RightBracket)?;
        Ok(Expression::Array {
            elements,
            span: self.span_from(start),
        })
    }

    /// `[for (x of xs) if (c) body]` or, with `close` = `)`, the generator
    /// expression `(for (x of xs) body)`.
    fn parse_comprehension(&mut self, close: Punctuator) -> PResult<Expression> {
        let start = self.start();
        self.bump();

        let mut blocks = Vec::new();
        while self.at_keyword(Keyword::For) {
            let block_start = self.start();
            self.bump();
            self.expect(Punctuator::LeftParen)?;
            let left = self.parse_binding_target()?;
            let of = if self.eat_contextual("of") {
                true
            } else {
                self.expect_keyword(Keyword::In)?;
                false
            };
            let right = self.parse_assignment(false)?;
            self.expect(Punctuator::RightParen)?;
            blocks.push(ComprehensionBlock {
                left,
                right,
                of,
                span: self.span_from(block_start),
            });
        }

        let filter = if self.eat_keyword(Keyword::If) {
            self.expect(Punctuator::LeftParen)?;
            let filter = self.parse_expression(false)?;
            self.expect(Punctuator::RightParen)?;
            Some(Box::new(filter))
        } else {
            None
        };

        let body = Box::new(self.parse_assignment(false)?);
        self.expect(close)?;
        let comprehension = Comprehension {
            blocks,
            filter,
            body,
            span: self.span_from(start),
        };
        Ok(if close == Punctuator::RightParen {
            Expression::Generator(comprehension)
        } else {
            Expression::Comprehension(comprehension)
        })
    }

    fn parse_object(&mut self) -> PResult<Expression> {
        let start = self.start();
        self.bump();
        let mut properties = Vec::new();
        while !self.at(Punctuator::RightBrace) && !self.is_eof() {
            properties.push(self.parse_property()?);
            if !self.eat(Punctuator::Comma) {
                break;
            }
        }
        self.expect(Punctuator::RightBrace)?;
        Ok(Expression::Object {
            properties,
            span: self.span_from(start),
        })
    }

    /// The `n`th token ends a property key, so a preceding `get`, `set` or
    /// `async` is itself the key.
    pub(crate) fn nth_ends_key(&self, n: usize) -> bool {
        self.peek_nth(n).is_none()
            || [
                Punctuator::LeftParen,
                Punctuator::Colon,
                Punctuator::Comma,
                Punctuator::RightBrace,
                Punctuator::Equal,
                Punctuator::Semicolon,
            ]
            .iter()
            .any(|p| self.nth_is(n, *p))
    }

    fn parse_property(&mut self) -> PResult<Property> {
        let start = self.start();
        if self.eat(Punctuator::Ellipsis) {
            let argument = self.parse_assignment(false)?;
            return Ok(Property::Spread {
                argument,
                span: self.span_from(start),
            });
        }

        let is_async =
            self.at_contextual("async") && !self.nth_ends_key(1) && !self.nth_newline_before(1);
        if is_async {
            self.bump();
        }
        let is_generator = self.eat(Punctuator::Star);
        let mut kind = MethodKind::Method;
        if !is_async && !is_generator && !self.nth_ends_key(1) {
            if self.eat_contextual("get") {
                kind = MethodKind::Get;
            } else if self.eat_contextual("set") {
                kind = MethodKind::Set;
            }
        }

        let key = self.parse_property_key()?;
        if self.at(Punctuator::LeftParen) || is_async || is_generator || kind != MethodKind::Method {
            let function = self.parse_method_function(start, is_async, is_generator)?;
            return Ok(Property::Method {
                key,
                kind,
                function,
                span: self.span_from(start),
            });
        }

        if self.eat(Punctuator::Colon) {
            let value = self.parse_assignment(false)?;
            return Ok(Property::KeyValue {
                key,
                value,
                shorthand: false,
                span: self.span_from(start),
            });
        }

        let PropertyKey::Identifier(identifier) = &key else {
            return Err(self.unexpected(":"));
        };
        let mut value = Expression::Identifier(identifier.clone());
        // `{ a = 1 }` is only valid once reinterpreted as a pattern
        if self.eat(Punctuator::Equal) {
            let right = self.parse_assignment(false)?;
            value = Expression::Assignment {
                operator: Punctuator::Equal,
                left: Box::new(Pattern::Identifier(identifier.clone())),
                right: Box::new(right),
                span: self.span_from(start),
            };
        }
        Ok(Property::KeyValue {
            key,
            value,
            shorthand: true,
            span: self.span_from(start),
        })
    }

    /// A chunk that opens a template. `Middle` and `Tail` chunks close a
    /// substitution and never start a tagged template.
    fn at_template_start(&self) -> bool {
        matches!(
            self.peek_token(),
            Some(Token::Template(chunk))
                if matches!(chunk.part, TemplatePart::Head | TemplatePart::NoSubstitution)
        )
    }

    pub(crate) fn parse_template(&mut self) -> PResult<TemplateLiteral> {
        let start = self.start();
        let Some(TokenSpan {
            token: Token::Template(head),
            span,
            ..
        }) = self.peek()
        else {
            return Err(self.unexpected("template literal"));
        };
        self.bump();

        let mut quasis = vec![TemplateElement {
            raw: head.raw.clone(),
            span: *span,
        }];
        let mut expressions = Vec::new();
        let mut part = head.part;
        while matches!(part, TemplatePart::Head | TemplatePart::Middle) {
            expressions.push(self.parse_expression(false)?);
            match self.peek() {
                Some(TokenSpan {
                    token: Token::Template(chunk),
                    span,
                    ..
                }) if matches!(chunk.part, TemplatePart::Middle | TemplatePart::Tail) => {
                    self.bump();
                    quasis.push(TemplateElement {
                        raw: chunk.raw.clone(),
                        span: *span,
                    });
                    part = chunk.part;
                }
                _ => {
                    let error = self.unexpected("end of template substitution");
                    self.report(error)?;
                    break;
                }
            }
        }

        Ok(TemplateLiteral {
            quasis,
            expressions,
            span: self.span_from(start),
        })
    }
}
