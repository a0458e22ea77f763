//! # Core Parser Definitions
//!
//! This module defines the parser interface and error types shared by the
//! strict and lenient analyzers.

use thiserror::Error;

/// Parser trait defines the core parsing interface.
///
/// A parser takes an input slice and a position, and returns either the new
/// position together with the parsed value, or a parse error.
///
/// # Type Parameters
///
/// * `I` - The input token type
/// * `O` - The output value type
pub trait Parser<I, O> {
    /// Attempts to parse the input starting at the given position.
    ///
    /// # Returns
    ///
    /// * `Ok((new_pos, output))` - If parsing succeeds, returns the new position and the parsed value
    /// * `Err(error)` - If parsing fails, returns a ParseError
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

/// Result type for parsing operations.
///
/// On success, returns a tuple of the new position and the parsed value.
/// On failure, returns a ParseError.
pub type ParseResult<O> = Result<(usize, O), ParseError>;

/// Error type for parsing operations.
///
/// `position` is the index of the offending token in the preprocessed token
/// slice; `context` is a ` -> ` separated chain of the constructs being parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected end of file
    #[error("Unexpected EOF: {message} at position {position}, context: {context:?}")]
    UnexpectedEOF {
        message: String,
        position: usize,
        context: Option<String>,
    },
    /// Unexpected token
    #[error(
        "Unexpected: expected {expected}, parsed {parsed} at position {position}, context: {context:?}"
    )]
    Unexpected {
        expected: String,
        parsed: String,
        position: usize,
        context: Option<String>,
    },
    /// No alternative matched
    #[error(
        "No alternative: no construct starts with {parsed} at position {position}, context: {context:?}"
    )]
    NoAlternative {
        parsed: String,
        position: usize,
        context: Option<String>,
    },
    /// Explicit failure
    #[error("Failure: {message} at position {position}, context: {context:?}")]
    Failure {
        message: String,
        position: usize,
        context: Option<String>,
    },
}

fn push_context(context: Option<String>, ctx: &str) -> Option<String> {
    match context {
        Some(c) => Some(format!("{} -> {}", c, ctx)),
        None => Some(ctx.to_string()),
    }
}

impl ParseError {
    pub fn with_context(self, ctx: &str) -> Self {
        match self {
            ParseError::UnexpectedEOF {
                message,
                position,
                context,
            } => ParseError::UnexpectedEOF {
                message,
                position,
                context: push_context(context, ctx),
            },
            ParseError::Unexpected {
                expected,
                parsed,
                position,
                context,
            } => ParseError::Unexpected {
                expected,
                parsed,
                position,
                context: push_context(context, ctx),
            },
            ParseError::NoAlternative {
                parsed,
                position,
                context,
            } => ParseError::NoAlternative {
                parsed,
                position,
                context: push_context(context, ctx),
            },
            ParseError::Failure {
                message,
                position,
                context,
            } => ParseError::Failure {
                message,
                position,
                context: push_context(context, ctx),
            },
        }
    }

    pub fn get_position(&self) -> usize {
        match self {
            ParseError::UnexpectedEOF { position, .. } => *position,
            ParseError::Unexpected { position, .. } => *position,
            ParseError::NoAlternative { position, .. } => *position,
            ParseError::Failure { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_chains() {
        let error = ParseError::Failure {
            message: "boom".to_string(),
            position: 3,
            context: None,
        }
        .with_context("expression")
        .with_context("statement");

        assert_eq!(error.get_position(), 3);
        match error {
            ParseError::Failure { context, .. } => {
                assert_eq!(context.as_deref(), Some("expression -> statement"));
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }
}
