//! Recovery support for the lenient parser.
//!
//! A statement whose parse fails is discarded as a whole, so a truncated
//! `for (`, `while` or `if (` at the end of the input leaves nothing behind.
//! Missing punctuation, invalid expressions and bad class members are patched
//! in place instead and keep the surrounding statement.

use super::core::ParseError;
use super::parser::{JsParser, PResult};
use crate::ast::Span;
use crate::tokenizer::{keyword::Keyword, symbol::Punctuator, token::Token};

/// Something the lenient parser had to step over or invent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDiagnostic {
    pub error: ParseError,
    /// Token the parser was looking at when the error was recorded.
    pub span: Span,
}

impl ParseDiagnostic {
    pub fn new(error: ParseError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.span)
    }
}

fn starts_statement(token: &Token) -> bool {
    matches!(
        token,
        Token::Keyword(
            Keyword::Var
                | Keyword::Const
                | Keyword::Function
                | Keyword::Class
                | Keyword::If
                | Keyword::For
                | Keyword::While
                | Keyword::Do
                | Keyword::Return
                | Keyword::Try
                | Keyword::Switch
                | Keyword::Throw
                | Keyword::Import
                | Keyword::Export
        )
    )
}

impl<'a> JsParser<'a> {
    /// Records `error` and skips ahead to the next statement boundary: past a
    /// `;`, before a `}`, or before a statement keyword on a new line. At
    /// least one token is always consumed so the caller makes progress.
    pub(crate) fn synchronize(&mut self, error: ParseError) -> PResult<()> {
        self.report(error)?;
        let resume_from = self.pos;
        while let Some(token) = self.peek() {
            if self.pos > resume_from {
                if token.token == Token::Punctuator(Punctuator::RightBrace) {
                    break;
                }
                if token.newline_before && starts_statement(&token.token) {
                    break;
                }
            }
            self.bump();
            if token.token == Token::Punctuator(Punctuator::Semicolon) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::{ParseMode, ParseOptions};
    use crate::preprocessor::{Preprocessor, TokenPreprocessor};
    use crate::tokenizer::token::Tokenizer;

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let tokens = TokenPreprocessor::new()
            .process(Tokenizer::new().tokenize("a b c; d").unwrap());
        let mut parser = JsParser::new(&tokens, ParseOptions::default(), ParseMode::Lenient);
        let error = parser.failure("test");
        parser.synchronize(error).unwrap();
        assert_eq!(parser.pos, 4);
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_synchronize_stops_before_statement_on_new_line() {
        let tokens = TokenPreprocessor::new()
            .process(Tokenizer::new().tokenize("a b\nif (x) {}").unwrap());
        let mut parser = JsParser::new(&tokens, ParseOptions::default(), ParseMode::Lenient);
        let error = parser.failure("test");
        parser.synchronize(error).unwrap();
        assert!(parser.at_keyword(Keyword::If));
    }

    #[test]
    fn test_synchronize_propagates_in_strict_mode() {
        let tokens = TokenPreprocessor::new().process(Tokenizer::new().tokenize("a b").unwrap());
        let mut parser = JsParser::new(&tokens, ParseOptions::default(), ParseMode::Strict);
        let error = parser.failure("test");
        assert!(parser.synchronize(error).is_err());
        assert_eq!(parser.pos, 0);
    }
}
