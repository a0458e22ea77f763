//! Parser state, cursor primitives and the two [`Parser`] entry points.
//!
//! [`JsParser`] is a recursive-descent parser over the preprocessed token
//! slice. The grammar itself lives in [`super::parsers`] as further
//! `impl JsParser` blocks; this file owns the cursor and the rules for how
//! errors are treated in each [`ParseMode`].

use serde::{Deserialize, Serialize};

use super::core::{ParseError, ParseResult, Parser};
use super::recovery::ParseDiagnostic;
use crate::ast::{Identifier, Position, Program, Span};
use crate::tokenizer::{
    keyword::Keyword,
    symbol::Punctuator,
    token::{Token, TokenSpan},
};

pub type PResult<T> = Result<T, ParseError>;

/// Options accepted by the analyzer. Sources are always parsed as modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub allow_return_outside_function: bool,
    pub allow_await_outside_function: bool,
    pub allow_import_export_everywhere: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_return_outside_function: true,
            allow_await_outside_function: true,
            allow_import_export_everywhere: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// The first error aborts the parse.
    Strict,
    /// Errors become diagnostics; the parser always yields a tree.
    Lenient,
}

/// Enclosing-function facts that change how words parse.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    pub in_function: bool,
    pub in_async: bool,
    pub in_generator: bool,
    /// Nesting depth of blocks, used for the top-level import/export check.
    pub depth: usize,
}

pub struct JsParser<'a> {
    tokens: &'a [TokenSpan],
    pub(crate) pos: usize,
    options: ParseOptions,
    mode: ParseMode,
    pub(crate) context: Context,
    diagnostics: Vec<ParseDiagnostic>,
}

impl<'a> JsParser<'a> {
    pub fn new(tokens: &'a [TokenSpan], options: ParseOptions, mode: ParseMode) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            mode,
            context: Context::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<ParseDiagnostic> {
        self.diagnostics
    }

    pub(crate) fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub(crate) fn is_lenient(&self) -> bool {
        self.mode == ParseMode::Lenient
    }

    #[tracing::instrument(level = "debug", skip(self), fields(mode = ?self.mode))]
    pub fn parse_program(&mut self) -> PResult<Program> {
        let body = self.parse_statement_list(false)?;
        let end = self.prev_end();
        Ok(Program {
            body,
            span: Span::new(Position::new(1, 0, 0), end),
        })
    }

    // ---- cursor ----

    pub(crate) fn peek(&self) -> Option<&'a TokenSpan> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'a TokenSpan> {
        self.tokens.get(self.pos + n)
    }

    pub(crate) fn peek_token(&self) -> Option<&'a Token> {
        self.peek().map(|t| &t.token)
    }

    pub(crate) fn token_at(&self, index: usize) -> Option<&'a TokenSpan> {
        self.tokens.get(index)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn bump(&mut self) -> Option<&'a TokenSpan> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at(&self, punctuator: Punctuator) -> bool {
        self.nth_is(0, punctuator)
    }

    pub(crate) fn nth_is(&self, n: usize, punctuator: Punctuator) -> bool {
        matches!(self.peek_nth(n), Some(TokenSpan { token: Token::Punctuator(p), .. }) if *p == punctuator)
    }

    pub(crate) fn at_keyword(&self, keyword: Keyword) -> bool {
        self.nth_is_keyword(0, keyword)
    }

    pub(crate) fn nth_is_keyword(&self, n: usize, keyword: Keyword) -> bool {
        matches!(self.peek_nth(n), Some(TokenSpan { token: Token::Keyword(k), .. }) if *k == keyword)
    }

    /// Current token is the identifier `word` (contextual keywords).
    pub(crate) fn at_contextual(&self, word: &str) -> bool {
        self.nth_is_contextual(0, word)
    }

    pub(crate) fn nth_is_contextual(&self, n: usize, word: &str) -> bool {
        matches!(self.peek_nth(n), Some(TokenSpan { token: Token::Identifier(name), .. }) if name == word)
    }

    pub(crate) fn at_identifier(&self) -> bool {
        matches!(self.peek_token(), Some(Token::Identifier(_)))
    }

    pub(crate) fn nth_is_identifier(&self, n: usize) -> bool {
        matches!(
            self.peek_nth(n),
            Some(TokenSpan {
                token: Token::Identifier(_),
                ..
            })
        )
    }

    pub(crate) fn eat(&mut self, punctuator: Punctuator) -> bool {
        if self.at(punctuator) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_contextual(&mut self, word: &str) -> bool {
        if self.at_contextual(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// A line terminator precedes the `n`th upcoming token.
    pub(crate) fn nth_newline_before(&self, n: usize) -> bool {
        self.peek_nth(n).map_or(false, |t| t.newline_before)
    }

    pub(crate) fn newline_before(&self) -> bool {
        self.nth_newline_before(0)
    }

    /// Start of the current token, or the end of input.
    pub(crate) fn start(&self) -> Position {
        match self.peek() {
            Some(token) => token.span.start,
            None => self.prev_end(),
        }
    }

    /// End of the last consumed token.
    pub(crate) fn prev_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end,
            None => Position::new(1, 0, 0),
        }
    }

    pub(crate) fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.prev_end())
    }

    /// Span of the current token, falling back to the last token at end of input.
    pub(crate) fn current_span(&self) -> Span {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or_default()
    }

    // ---- errors ----

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::Unexpected {
                expected: expected.to_string(),
                parsed: token.token.to_string(),
                position: self.pos,
                context: Some(token.span.start.to_string()),
            },
            None => ParseError::UnexpectedEOF {
                message: format!("expected {}", expected),
                position: self.pos,
                context: None,
            },
        }
    }

    pub(crate) fn failure(&self, message: impl Into<String>) -> ParseError {
        ParseError::Failure {
            message: message.into(),
            position: self.pos,
            context: Some(self.start().to_string()),
        }
    }

    /// Strict mode propagates `error`; lenient mode records it and carries on.
    pub(crate) fn report(&mut self, error: ParseError) -> PResult<()> {
        match self.mode {
            ParseMode::Strict => Err(error),
            ParseMode::Lenient => {
                let span = self.current_span();
                tracing::debug!("recovered from {} at {}", error, span.start);
                self.diagnostics.push(ParseDiagnostic::new(error, span));
                Ok(())
            }
        }
    }

    pub(crate) fn expect(&mut self, punctuator: Punctuator) -> PResult<()> {
        if self.eat(punctuator) {
            return Ok(());
        }
        let error = self.unexpected(punctuator.as_str());
        self.report(error)
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> PResult<()> {
        if self.eat_keyword(keyword) {
            return Ok(());
        }
        let error = self.unexpected(keyword.as_ref());
        self.report(error)
    }

    /// Statement terminator with automatic semicolon insertion.
    pub(crate) fn consume_semicolon(&mut self) -> PResult<()> {
        if self.eat(Punctuator::Semicolon)
            || self.at(Punctuator::RightBrace)
            || self.is_eof()
            || self.newline_before()
        {
            return Ok(());
        }
        let error = self.unexpected(";");
        self.report(error)
    }

    /// An identifier in binding or reference position.
    pub(crate) fn parse_identifier(&mut self) -> PResult<Identifier> {
        match self.peek() {
            Some(TokenSpan {
                token: Token::Identifier(name),
                span,
                ..
            }) => {
                self.pos += 1;
                Ok(Identifier {
                    name: name.clone(),
                    span: *span,
                })
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Any identifier name, reserved words included (property names, labels
    /// after `.`, import/export names).
    pub(crate) fn parse_identifier_name(&mut self) -> PResult<Identifier> {
        match self.peek() {
            Some(TokenSpan {
                token: Token::Identifier(name),
                span,
                ..
            }) => {
                self.pos += 1;
                Ok(Identifier {
                    name: name.clone(),
                    span: *span,
                })
            }
            Some(TokenSpan {
                token: Token::Keyword(keyword),
                span,
                ..
            }) => {
                self.pos += 1;
                Ok(Identifier {
                    name: keyword.to_string(),
                    span: *span,
                })
            }
            _ => Err(self.unexpected("identifier name")),
        }
    }

    /// Index of the token closing the bracket at `open`, if the brackets balance.
    pub(crate) fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match &token.token {
                Token::Punctuator(
                    Punctuator::LeftParen | Punctuator::LeftBracket | Punctuator::LeftBrace,
                ) => depth += 1,
                Token::Punctuator(
                    Punctuator::RightParen | Punctuator::RightBracket | Punctuator::RightBrace,
                ) => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Parser that fails on the first syntax error.
#[derive(Debug, Clone, Default)]
pub struct StrictParser {
    options: ParseOptions,
}

impl StrictParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Parser<TokenSpan, Program> for StrictParser {
    fn parse(&self, input: &[TokenSpan], pos: usize) -> ParseResult<Program> {
        let mut parser = JsParser::new(input, self.options, ParseMode::Strict);
        parser.pos = pos;
        let program = parser.parse_program()?;
        Ok((parser.pos, program))
    }
}

/// Parser that recovers from syntax errors and always yields a tree.
#[derive(Debug, Clone, Default)]
pub struct LenientParser {
    options: ParseOptions,
}

impl LenientParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parses and returns the tree together with what had to be skipped.
    pub fn parse_with_diagnostics(
        &self,
        input: &[TokenSpan],
        pos: usize,
    ) -> ParseResult<(Program, Vec<ParseDiagnostic>)> {
        let mut parser = JsParser::new(input, self.options, ParseMode::Lenient);
        parser.pos = pos;
        let program = parser.parse_program()?;
        let end = parser.pos;
        Ok((end, (program, parser.into_diagnostics())))
    }
}

impl Parser<TokenSpan, Program> for LenientParser {
    fn parse(&self, input: &[TokenSpan], pos: usize) -> ParseResult<Program> {
        let (end, (program, diagnostics)) = self.parse_with_diagnostics(input, pos)?;
        for diagnostic in &diagnostics {
            tracing::debug!("{}", diagnostic);
        }
        Ok((end, program))
    }
}
