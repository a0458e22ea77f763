//! # Punctuator Token Handling
//!
//! This module defines the punctuators (operators and delimiters) of ECMAScript
//! and provides functionality for parsing them.
//!
//! ## Parsing Strategy
//!
//! Punctuators are parsed using a longest-match approach so that `>>>=` is never
//! read as `>>` followed by `>=`. The groups in [`parse_punctuator`] are ordered
//! from four characters down to one.
//!
//! The optional-chaining operator `?.` is only recognized when it is not followed
//! by a decimal digit, so `a?.5:0` stays a conditional expression.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::satisfy,
    combinator::{map, not, peek, value},
    error::context,
    sequence::terminated,
};

use super::token::{ParserResult, Token};

/// Represents operators and delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Punctuator {
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    Ellipsis,
    Semicolon,
    Comma,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    PlusPlus,
    MinusMinus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Ampersand,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    QuestionQuestion,
    Question,
    QuestionDot,
    Colon,
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    StarStarEqual,
    ShiftLeftEqual,
    ShiftRightEqual,
    UnsignedShiftRightEqual,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,
    AmpAmpEqual,
    PipePipeEqual,
    QuestionQuestionEqual,
    Arrow,
    At,
}

impl Punctuator {
    /// Source text of the punctuator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuator::LeftBrace => "{",
            Punctuator::RightBrace => "}",
            Punctuator::LeftParen => "(",
            Punctuator::RightParen => ")",
            Punctuator::LeftBracket => "[",
            Punctuator::RightBracket => "]",
            Punctuator::Dot => ".",
            Punctuator::Ellipsis => "...",
            Punctuator::Semicolon => ";",
            Punctuator::Comma => ",",
            Punctuator::Less => "<",
            Punctuator::Greater => ">",
            Punctuator::LessEqual => "<=",
            Punctuator::GreaterEqual => ">=",
            Punctuator::EqualEqual => "==",
            Punctuator::NotEqual => "!=",
            Punctuator::StrictEqual => "===",
            Punctuator::StrictNotEqual => "!==",
            Punctuator::Plus => "+",
            Punctuator::Minus => "-",
            Punctuator::Star => "*",
            Punctuator::Slash => "/",
            Punctuator::Percent => "%",
            Punctuator::StarStar => "**",
            Punctuator::PlusPlus => "++",
            Punctuator::MinusMinus => "--",
            Punctuator::ShiftLeft => "<<",
            Punctuator::ShiftRight => ">>",
            Punctuator::UnsignedShiftRight => ">>>",
            Punctuator::Ampersand => "&",
            Punctuator::Pipe => "|",
            Punctuator::Caret => "^",
            Punctuator::Bang => "!",
            Punctuator::Tilde => "~",
            Punctuator::AmpAmp => "&&",
            Punctuator::PipePipe => "||",
            Punctuator::QuestionQuestion => "??",
            Punctuator::Question => "?",
            Punctuator::QuestionDot => "?.",
            Punctuator::Colon => ":",
            Punctuator::Equal => "=",
            Punctuator::PlusEqual => "+=",
            Punctuator::MinusEqual => "-=",
            Punctuator::StarEqual => "*=",
            Punctuator::SlashEqual => "/=",
            Punctuator::PercentEqual => "%=",
            Punctuator::StarStarEqual => "**=",
            Punctuator::ShiftLeftEqual => "<<=",
            Punctuator::ShiftRightEqual => ">>=",
            Punctuator::UnsignedShiftRightEqual => ">>>=",
            Punctuator::AmpersandEqual => "&=",
            Punctuator::PipeEqual => "|=",
            Punctuator::CaretEqual => "^=",
            Punctuator::AmpAmpEqual => "&&=",
            Punctuator::PipePipeEqual => "||=",
            Punctuator::QuestionQuestionEqual => "??=",
            Punctuator::Arrow => "=>",
            Punctuator::At => "@",
        }
    }

    /// `=` and every compound assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            Punctuator::Equal
                | Punctuator::PlusEqual
                | Punctuator::MinusEqual
                | Punctuator::StarEqual
                | Punctuator::SlashEqual
                | Punctuator::PercentEqual
                | Punctuator::StarStarEqual
                | Punctuator::ShiftLeftEqual
                | Punctuator::ShiftRightEqual
                | Punctuator::UnsignedShiftRightEqual
                | Punctuator::AmpersandEqual
                | Punctuator::PipeEqual
                | Punctuator::CaretEqual
                | Punctuator::AmpAmpEqual
                | Punctuator::PipePipeEqual
                | Punctuator::QuestionQuestionEqual
        )
    }

    /// Punctuators after which a `/` is a division operator.
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            Punctuator::RightParen
                | Punctuator::RightBracket
                | Punctuator::RightBrace
                | Punctuator::PlusPlus
                | Punctuator::MinusMinus
        )
    }
}

impl std::fmt::Display for Punctuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a punctuator token from the input string.
///
/// # Examples
///
/// ```
/// # use shapeprint::tokenizer::symbol::{parse_punctuator, Punctuator};
/// # use shapeprint::tokenizer::token::Token;
/// let (rest, token) = parse_punctuator(">>>= 1").unwrap();
/// assert_eq!(token, Token::Punctuator(Punctuator::UnsignedShiftRightEqual));
/// assert_eq!(rest, " 1");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_punctuator(input: &str) -> ParserResult<Token> {
    context(
        "punctuator",
        map(
            alt((
                // four and three characters
                alt((
                    value(Punctuator::UnsignedShiftRightEqual, tag(">>>=")),
                    value(Punctuator::Ellipsis, tag("...")),
                    value(Punctuator::StrictEqual, tag("===")),
                    value(Punctuator::StrictNotEqual, tag("!==")),
                    value(Punctuator::StarStarEqual, tag("**=")),
                    value(Punctuator::ShiftLeftEqual, tag("<<=")),
                    value(Punctuator::ShiftRightEqual, tag(">>=")),
                    value(Punctuator::UnsignedShiftRight, tag(">>>")),
                    value(Punctuator::AmpAmpEqual, tag("&&=")),
                    value(Punctuator::PipePipeEqual, tag("||=")),
                    value(Punctuator::QuestionQuestionEqual, tag("??=")),
                )),
                // two characters
                alt((
                    value(Punctuator::Arrow, tag("=>")),
                    value(Punctuator::EqualEqual, tag("==")),
                    value(Punctuator::NotEqual, tag("!=")),
                    value(Punctuator::LessEqual, tag("<=")),
                    value(Punctuator::GreaterEqual, tag(">=")),
                    value(Punctuator::AmpAmp, tag("&&")),
                    value(Punctuator::PipePipe, tag("||")),
                    value(Punctuator::QuestionQuestion, tag("??")),
                    value(
                        Punctuator::QuestionDot,
                        terminated(tag("?."), not(peek(satisfy(|c| c.is_ascii_digit())))),
                    ),
                    value(Punctuator::PlusPlus, tag("++")),
                    value(Punctuator::MinusMinus, tag("--")),
                    value(Punctuator::PlusEqual, tag("+=")),
                    value(Punctuator::MinusEqual, tag("-=")),
                    value(Punctuator::StarEqual, tag("*=")),
                    value(Punctuator::SlashEqual, tag("/=")),
                    value(Punctuator::PercentEqual, tag("%=")),
                    value(Punctuator::AmpersandEqual, tag("&=")),
                    value(Punctuator::PipeEqual, tag("|=")),
                    value(Punctuator::CaretEqual, tag("^=")),
                    value(Punctuator::StarStar, tag("**")),
                    value(Punctuator::ShiftLeft, tag("<<")),
                )),
                alt((
                    value(Punctuator::ShiftRight, tag(">>")),
                    // single characters
                    value(Punctuator::LeftBrace, tag("{")),
                    value(Punctuator::RightBrace, tag("}")),
                    value(Punctuator::LeftParen, tag("(")),
                    value(Punctuator::RightParen, tag(")")),
                    value(Punctuator::LeftBracket, tag("[")),
                    value(Punctuator::RightBracket, tag("]")),
                    value(Punctuator::Dot, tag(".")),
                    value(Punctuator::Semicolon, tag(";")),
                    value(Punctuator::Comma, tag(",")),
                    value(Punctuator::Less, tag("<")),
                    value(Punctuator::Greater, tag(">")),
                    value(Punctuator::Plus, tag("+")),
                    value(Punctuator::Minus, tag("-")),
                    value(Punctuator::Star, tag("*")),
                    value(Punctuator::Slash, tag("/")),
                    value(Punctuator::Percent, tag("%")),
                    value(Punctuator::Ampersand, tag("&")),
                    value(Punctuator::Pipe, tag("|")),
                    value(Punctuator::Caret, tag("^")),
                )),
                alt((
                    value(Punctuator::Bang, tag("!")),
                    value(Punctuator::Tilde, tag("~")),
                    value(Punctuator::Question, tag("?")),
                    value(Punctuator::Colon, tag(":")),
                    value(Punctuator::Equal, tag("=")),
                    value(Punctuator::At, tag("@")),
                )),
            )),
            Token::Punctuator,
        ),
    )(input)
}
