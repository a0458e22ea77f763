//! # Keyword Token Handling
//!
//! This module defines the reserved words of ECMAScript and provides
//! functionality for parsing keyword tokens.
//!
//! ## Reserved vs. Contextual Words
//!
//! Only words that can never be used as a binding name appear in [`Keyword`].
//! Contextual words such as `let`, `async`, `of`, `yield`, `await`, `get`,
//! `set`, `static`, `from` and `as` are tokenized as identifiers and recognized
//! by the parser where the grammar gives them meaning.
//!
//! ## Parsing Strategy
//!
//! Keywords are parsed boundary-aware: a whole identifier word is consumed first
//! and only then looked up, so `format` or `instanceOfThing` never split into a
//! keyword followed by an identifier.

use std::str::FromStr;

use nom::{
    bytes::complete::{take_while, take_while1},
    combinator::{map_res, recognize},
    error::context,
    sequence::pair,
};

use super::token::{is_identifier_part, is_identifier_start, ParserResult, Token};

/// Represents the reserved words recognized by the tokenizer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
}

impl Keyword {
    /// Keywords after which a `/` starts a division rather than a regular expression.
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            Keyword::This | Keyword::Super | Keyword::Null | Keyword::True | Keyword::False
        )
    }
}

/// Parses a keyword token from the input string.
///
/// # Examples
///
/// ```
/// # use shapeprint::tokenizer::keyword::{parse_keyword, Keyword};
/// # use shapeprint::tokenizer::token::Token;
/// let (rest, token) = parse_keyword("while (x)").unwrap();
/// assert_eq!(token, Token::Keyword(Keyword::While));
/// assert_eq!(rest, " (x)");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_keyword(input: &str) -> ParserResult<Token> {
    context(
        "keyword",
        map_res(
            recognize(pair(
                take_while1(is_identifier_start),
                take_while(is_identifier_part),
            )),
            |word: &str| Keyword::from_str(word).map(Token::Keyword),
        ),
    )(input)
}
