//! # Whitespace Token Handling
//!
//! Whitespace and line terminators are kept as tokens by the tokenizer. The
//! preprocessor drops them again, but not before recording which significant
//! tokens follow a line break, which is what automatic semicolon insertion and
//! the restricted productions (`return`, postfix `++`, `=>`) depend on.
//!
//! ## Token Types
//!
//! * [`Token::Whitespace`]: tab, vertical tab, form feed, space, no-break space,
//!   byte order mark and other Unicode space separators
//! * [`Token::Newline`]: `\n`, `\r\n`, `\r`, `U+2028` and `U+2029`

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::map,
    error::context,
};

use super::token::{ParserResult, Token};

pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | '\u{FEFF}'
    ) || (c.is_whitespace() && !is_line_terminator(c) && c != '\u{0085}')
}

/// Parses a run of whitespace from the input string.
///
/// # Examples
///
/// ```
/// # use shapeprint::tokenizer::whitespace::parse_whitespace;
/// # use shapeprint::tokenizer::token::Token;
/// let (rest, token) = parse_whitespace(" \t x").unwrap();
/// assert_eq!(token, Token::Whitespace(" \t ".to_string()));
/// assert_eq!(rest, "x");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace expected",
        map(take_while1(is_whitespace), |ws: &str| {
            Token::Whitespace(ws.to_string())
        }),
    )(input)
}

/// Parses a single line terminator. `\r\n` counts as one.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "newline expected",
        map(
            alt((
                tag("\r\n"),
                tag("\n"),
                tag("\r"),
                tag("\u{2028}"),
                tag("\u{2029}"),
            )),
            |_| Token::Newline,
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace() {
        let (rest, token) = parse_whitespace("   hello").unwrap();
        assert_eq!(token, Token::Whitespace("   ".to_string()));
        assert_eq!(rest, "hello");

        let (rest, token) = parse_whitespace("\u{00A0}\u{FEFF}\t\nnext").unwrap();
        assert_eq!(token, Token::Whitespace("\u{00A0}\u{FEFF}\t".to_string()));
        assert_eq!(rest, "\nnext");
    }

    #[test]
    fn test_newline() {
        let test_cases = [
            ("\nhello", "hello"),
            ("\r\nworld", "world"),
            ("\r\rtwice", "\rtwice"),
            ("\u{2028}sep", "sep"),
        ];
        for (input, expected_rest) in test_cases {
            let (rest, token) = parse_newline(input).unwrap();
            assert_eq!(token, Token::Newline);
            assert_eq!(rest, expected_rest);
        }
    }

    #[test]
    fn test_error() {
        assert!(parse_whitespace("hello").is_err());
        assert!(parse_newline("hello").is_err());
        assert!(parse_whitespace("\n").is_err());
    }
}
