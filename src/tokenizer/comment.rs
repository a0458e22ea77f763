use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    combinator::map,
    error::context,
    sequence::{delimited, preceded},
};

use super::{
    token::{CommentType, ParserResult, Token},
    whitespace::is_line_terminator,
};

fn rest_of_line(input: &str) -> ParserResult<&str> {
    take_while(|c: char| !is_line_terminator(c))(input)
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_line_comment(input: &str) -> ParserResult<Token> {
    context(
        "line comment",
        map(preceded(tag("//"), rest_of_line), |content: &str| {
            Token::Comment {
                content: content.trim().to_string(),
                comment_type: CommentType::Line,
            }
        }),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_block_comment(input: &str) -> ParserResult<Token> {
    context(
        "block comment",
        map(
            delimited(tag("/*"), take_until("*/"), tag("*/")),
            |content: &str| Token::Comment {
                content: content.to_string(),
                comment_type: CommentType::Block,
            },
        ),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_block_documentation_comment(input: &str) -> ParserResult<Token> {
    context(
        "block document comment",
        map(
            delimited(tag("/**"), take_until("*/"), tag("*/")),
            |content: &str| Token::Comment {
                content: content.to_string(),
                comment_type: CommentType::DocumentationBlock,
            },
        ),
    )(input)
}

/// `#!` interpreter line. The tokenizer only tries this at offset zero.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_hashbang(input: &str) -> ParserResult<Token> {
    context(
        "hashbang",
        map(preceded(tag("#!"), rest_of_line), |content: &str| {
            Token::Comment {
                content: content.trim().to_string(),
                comment_type: CommentType::Hashbang,
            }
        }),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<Token> {
    context(
        "comment",
        alt((
            // `/**/` is an empty block comment, not an unterminated doc comment
            map(tag("/**/"), |_| Token::Comment {
                content: String::new(),
                comment_type: CommentType::Block,
            }),
            parse_block_documentation_comment,
            parse_block_comment,
            parse_line_comment,
        )),
    )(input)
}
