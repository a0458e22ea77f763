use crate::analyzer::core::ParseError;
use crate::analyzer::parser::{JsParser, PResult};
use crate::ast::{
    Class, ClassMember, Decorator, Identifier, LiteralValue, MethodKind, PropertyKey,
};
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::Punctuator,
    token::{Token, TokenSpan},
};

impl<'a> JsParser<'a> {
    pub(crate) fn parse_decorators(&mut self) -> PResult<Vec<Decorator>> {
        let mut decorators = Vec::new();
        while self.at(Punctuator::At) {
            let start = self.start();
            self.bump();
            let expression = self.parse_left_hand_side()?;
            decorators.push(Decorator {
                expression,
                span: self.span_from(start),
            });
        }
        Ok(decorators)
    }

    /// `class [name] [extends Base] { members }`. The span starts at `class`;
    /// `decorators` keep their own spans.
    pub(crate) fn parse_class(
        &mut self,
        decorators: Vec<Decorator>,
        require_name: bool,
    ) -> PResult<Class> {
        // Without the keyword there is nothing to anchor the class on, so the
        // whole statement fails and the lenient parser resynchronizes.
        if !self.at_keyword(Keyword::Class) {
            return Err(self.unexpected("class"));
        }
        let start = self.start();
        self.bump();
        let id = if self.at_identifier() {
            Some(self.parse_identifier()?)
        } else {
            if require_name {
                let error = self.unexpected("class name");
                self.report(error)?;
            }
            None
        };
        let super_class = if self.eat_keyword(Keyword::Extends) {
            Some(self.parse_left_hand_side()?)
        } else {
            None
        };

        self.expect(Punctuator::LeftBrace)?;
        let mut body = Vec::new();
        while !self.at(Punctuator::RightBrace) && !self.is_eof() {
            let before = self.pos;
            match self.parse_class_member() {
                Ok(member) => body.push(member),
                Err(error) if self.is_lenient() => {
                    self.report(error.with_context("class body"))?;
                    if self.pos == before {
                        self.bump();
                    }
                }
                Err(error) => return Err(error.with_context("class body")),
            }
        }
        self.expect(Punctuator::RightBrace)?;

        Ok(Class {
            decorators,
            id,
            super_class,
            body,
            span: self.span_from(start),
        })
    }

    /// Key of an object property or class member.
    pub(crate) fn parse_property_key(&mut self) -> PResult<PropertyKey> {
        let Some(TokenSpan { token, span, .. }) = self.peek() else {
            return Err(self.unexpected("property key"));
        };
        let span = *span;
        match token {
            Token::Identifier(_) | Token::Keyword(_) => {
                self.parse_identifier_name().map(PropertyKey::Identifier)
            }
            Token::PrivateName(name) => {
                self.bump();
                Ok(PropertyKey::PrivateName(Identifier {
                    name: name.clone(),
                    span,
                }))
            }
            Token::Literal(literal @ (Literal::String(_) | Literal::Number(_) | Literal::BigInt(_))) => {
                self.bump();
                Ok(PropertyKey::Literal {
                    value: literal.into(),
                    span,
                })
            }
            Token::Punctuator(Punctuator::LeftBracket) => {
                self.bump();
                let expression = self.parse_assignment(false)?;
                self.expect(Punctuator::RightBracket)?;
                Ok(PropertyKey::Computed(Box::new(expression)))
            }
            other => Err(ParseError::NoAlternative {
                parsed: other.to_string(),
                position: self.pos,
                context: Some(span.start.to_string()),
            }),
        }
    }

    fn parse_class_member(&mut self) -> PResult<ClassMember> {
        if self.at(Punctuator::Semicolon) {
            let span = self.current_span();
            self.bump();
            return Ok(ClassMember::Empty { span });
        }

        let decorators = self.parse_decorators()?;
        let start = self.start();

        let mut is_static = false;
        if self.at_contextual("static") && !self.nth_ends_key(1) {
            if self.nth_is(1, Punctuator::LeftBrace) {
                self.bump();
                let saved = self.context;
                self.context.in_function = true;
                self.context.in_async = false;
                self.context.in_generator = false;
                let block = self.parse_block();
                self.context = saved;
                return Ok(ClassMember::StaticBlock(block?));
            }
            self.bump();
            is_static = true;
        }

        let is_async = self.at_contextual("async")
            && !self.nth_ends_key(1)
            && !self.nth_newline_before(1);
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
        if self.at(Punctuator::LeftParen) {
            if kind == MethodKind::Method && !is_static && is_constructor_key(&key) {
                kind = MethodKind::Constructor;
            }
            let function = self.parse_method_function(start, is_async, is_generator)?;
            return Ok(ClassMember::Method {
                decorators,
                key,
                kind,
                is_static,
                function,
                span: self.span_from(start),
            });
        }
        if is_async || is_generator || kind != MethodKind::Method {
            return Err(self.unexpected("("));
        }

        let value = if self.eat(Punctuator::Equal) {
            let saved = self.context;
            self.context.in_function = true;
            let value = self.parse_assignment(false);
            self.context = saved;
            Some(value?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(ClassMember::Property {
            decorators,
            key,
            value,
            is_static,
            span: self.span_from(start),
        })
    }
}

fn is_constructor_key(key: &PropertyKey) -> bool {
    match key {
        PropertyKey::Identifier(identifier) => identifier.name == "constructor",
        PropertyKey::Literal {
            value: LiteralValue::String(value),
            ..
        } => value == "constructor",
        _ => false,
    }
}
