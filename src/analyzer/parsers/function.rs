use crate::analyzer::parser::{JsParser, PResult};
use crate::ast::{Block, Function, FunctionBody, Pattern, Position};
use crate::tokenizer::{keyword::Keyword, symbol::Punctuator};

impl<'a> JsParser<'a> {
    /// `[async] function [*] [name] (params) { body }`
    pub(crate) fn parse_function(&mut self, require_name: bool) -> PResult<Function> {
        let start = self.start();
        let is_async = self.eat_contextual("async");
        self.expect_keyword(Keyword::Function)?;
        let is_generator = self.eat(Punctuator::Star);
        let id = if self.at_identifier() {
            Some(self.parse_identifier()?)
        } else {
            if require_name {
                let error = self.unexpected("function name");
                self.report(error)?;
            }
            None
        };

        let (params, body) = self.parse_function_rest(is_async, is_generator)?;
        Ok(Function {
            id,
            params,
            body: FunctionBody::Block(body),
            is_async,
            is_generator,
            is_arrow: false,
            span: self.span_from(start),
        })
    }

    /// Parameters and body of an object or class method. The method's span
    /// starts at `start`, its first modifier or its key.
    pub(crate) fn parse_method_function(
        &mut self,
        start: Position,
        is_async: bool,
        is_generator: bool,
    ) -> PResult<Function> {
        let (params, body) = self.parse_function_rest(is_async, is_generator)?;
        Ok(Function {
            id: None,
            params,
            body: FunctionBody::Block(body),
            is_async,
            is_generator,
            is_arrow: false,
            span: self.span_from(start),
        })
    }

    fn parse_function_rest(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> PResult<(Vec<Pattern>, Block)> {
        let saved = self.context;
        self.context.in_function = true;
        self.context.in_async = is_async;
        self.context.in_generator = is_generator;
        let result = self
            .parse_formal_params()
            .and_then(|params| Ok((params, self.parse_block()?)));
        self.context = saved;
        result
    }

    pub(crate) fn parse_formal_params(&mut self) -> PResult<Vec<Pattern>> {
        self.expect(Punctuator::LeftParen)?;
        let mut params = Vec::new();
        while !self.at(Punctuator::RightParen) && !self.is_eof() {
            let param = if self.at(Punctuator::Ellipsis) {
                let start = self.start();
                self.bump();
                let argument = self.parse_binding_target()?;
                Pattern::Rest {
                    argument: Box::new(argument),
                    span: self.span_from(start),
                }
            } else {
                self.parse_binding_element()?
            };
            params.push(param);
            if !self.eat(Punctuator::Comma) {
                break;
            }
        }
        self.expect(Punctuator::RightParen)?;
        Ok(params)
    }
}
