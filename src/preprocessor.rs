//! # Token Preprocessor
//!
//! Sits between the tokenizer and the analyzer:
//!
//! ```text
//! Source Code → Tokenizer → Preprocessor → Analyzer → Fingerprint
//! ```
//!
//! Whitespace, comment and newline tokens are removed. Before they go, every
//! significant token is marked with whether a line terminator preceded it,
//! either as a newline token or inside a multi-line block comment.

use crate::tokenizer::{
    token::{Token, TokenSpan},
    whitespace::is_line_terminator,
};

/// A trait for preprocessing different types of input
pub trait Preprocessor<T, U = T> {
    /// Process the input of type T and return the processed result
    fn process(&self, input: T) -> U;
}

/// Token-specific preprocessor implementation
#[derive(Debug, Default, Clone)]
pub struct TokenPreprocessor {}

impl TokenPreprocessor {
    pub fn new() -> Self {
        Self {}
    }
}

fn breaks_line(token: &Token) -> bool {
    match token {
        Token::Newline => true,
        Token::Comment { content, .. } => content.chars().any(is_line_terminator),
        _ => false,
    }
}

impl Preprocessor<Vec<TokenSpan>> for TokenPreprocessor {
    fn process(&self, input: Vec<TokenSpan>) -> Vec<TokenSpan> {
        let mut pending_newline = false;
        input
            .into_iter()
            .filter_map(|mut span| {
                if span.token.is_trivia() {
                    pending_newline |= breaks_line(&span.token);
                    return None;
                }
                span.newline_before = std::mem::take(&mut pending_newline);
                Some(span)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::token::Tokenizer;

    fn preprocess(input: &str) -> Vec<TokenSpan> {
        let tokens = Tokenizer::new().tokenize(input).unwrap();
        TokenPreprocessor::new().process(tokens)
    }

    #[test]
    fn test_removes_trivia() {
        let tokens = preprocess("a // comment\n  /* block */ b");
        let names: Vec<_> = tokens.iter().map(|t| t.token.to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_newline_before() {
        let tokens = preprocess("return\nx; y /* one line */ z /* two\nlines */ w");
        let flags: Vec<_> = tokens
            .iter()
            .map(|t| (t.token.to_string(), t.newline_before))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("return".to_string(), false),
                ("x".to_string(), true),
                (";".to_string(), false),
                ("y".to_string(), false),
                ("z".to_string(), false),
                ("w".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_spans_survive_preprocessing() {
        let tokens = preprocess("  a\n b");
        assert_eq!(tokens[0].span.start.column, 2);
        assert_eq!(tokens[1].span.start.line, 2);
        assert_eq!(tokens[1].span.start.column, 1);
    }
}
