//! # Literal Token Handling
//!
//! Numeric, string, regular-expression and template literals. Literal values are
//! kept as raw source text: nothing downstream needs the cooked value, and raw
//! text keeps every literal's length equal to its span.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{char, digit1, one_of},
    combinator::{map, opt, recognize},
    error::{context, ErrorKind, ParseError as _, VerboseError},
    sequence::{pair, tuple},
};

use super::token::{is_identifier_part, ParserResult, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Content between the quotes, escapes untouched.
    String(String),
    Number(String),
    BigInt(String),
    Regex { pattern: String, flags: String },
}

/// Which piece of a template literal a chunk is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart {
    /// `` `text` ``
    NoSubstitution,
    /// `` `text${ ``
    Head,
    /// `}text${`
    Middle,
    /// `` }text` ``
    Tail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateChunk {
    pub raw: String,
    pub part: TemplatePart,
}

fn error<'a, T>(input: &'a str, kind: ErrorKind) -> ParserResult<'a, T> {
    Err(nom::Err::Error(VerboseError::from_error_kind(input, kind)))
}

fn decimal_digits(input: &str) -> ParserResult<&str> {
    recognize(pair(
        digit1,
        take_while(|c: char| c.is_ascii_digit() || c == '_'),
    ))(input)
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_radix_integer(input: &str) -> ParserResult<&str> {
    context(
        "radix integer",
        recognize(pair(
            alt((tag_no_case("0x"), tag_no_case("0o"), tag_no_case("0b"))),
            take_while1(|c: char| c.is_ascii_hexdigit() || c == '_'),
        )),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_decimal(input: &str) -> ParserResult<&str> {
    context(
        "decimal literal",
        recognize(pair(
            alt((
                recognize(pair(decimal_digits, opt(pair(char('.'), opt(decimal_digits))))),
                recognize(pair(char('.'), decimal_digits)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), decimal_digits))),
        )),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_number_literal(input: &str) -> ParserResult<Literal> {
    let (rest, text) = alt((parse_radix_integer, parse_decimal))(input)?;
    match rest.strip_prefix('n') {
        Some(rest) => Ok((rest, Literal::BigInt(text.to_string()))),
        None => Ok((rest, Literal::Number(text.to_string()))),
    }
}

fn scan_quoted(input: &str, quote: char) -> ParserResult<&str> {
    let (body, _) = char(quote)(input)?;
    let mut chars = body.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                // a line continuation may be `\` followed by CRLF
                if let Some((_, '\r')) = chars.next() {
                    if let Some((_, '\n')) = chars.peek() {
                        chars.next();
                    }
                }
            }
            '\n' | '\r' => break,
            c if c == quote => return Ok((&body[index + c.len_utf8()..], &body[..index])),
            _ => {}
        }
    }
    error(input, ErrorKind::Char)
}

fn double_quoted(input: &str) -> ParserResult<&str> {
    scan_quoted(input, '"')
}

fn single_quoted(input: &str) -> ParserResult<&str> {
    scan_quoted(input, '\'')
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_string_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(alt((double_quoted, single_quoted)), |content: &str| {
            Literal::String(content.to_string())
        }),
    )(input)
}

/// Parses a numeric or string literal.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((parse_string_literal, parse_number_literal)),
            Token::Literal,
        ),
    )(input)
}

/// Parses a regular-expression literal. Only called where the tokenizer has
/// decided that a `/` cannot be a division operator.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_regex(input: &str) -> ParserResult<Token> {
    let (body, _) = context("regular expression", char('/'))(input)?;
    let mut in_class = false;
    let mut chars = body.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, '\n' | '\r')) = chars.next() {
                    break;
                }
            }
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => break,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                if index == 0 {
                    break;
                }
                let (rest, flags) = take_while(is_identifier_part)(&body[index + 1..])?;
                return Ok((
                    rest,
                    Token::Literal(Literal::Regex {
                        pattern: body[..index].to_string(),
                        flags: flags.to_string(),
                    }),
                ));
            }
            _ => {}
        }
    }
    error(input, ErrorKind::RegexpMatch)
}

/// Scans one template chunk. `input` starts either with the opening backtick or
/// with the `}` closing a substitution.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_template_chunk(input: &str) -> ParserResult<Token> {
    let (body, opener) = context("template literal", one_of("`}"))(input)?;
    let mut chars = body.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '`' => {
                let part = if opener == '`' {
                    TemplatePart::NoSubstitution
                } else {
                    TemplatePart::Tail
                };
                return Ok((
                    &body[index + 1..],
                    Token::Template(TemplateChunk {
                        raw: body[..index].to_string(),
                        part,
                    }),
                ));
            }
            '$' if matches!(chars.peek(), Some((_, '{'))) => {
                let part = if opener == '`' {
                    TemplatePart::Head
                } else {
                    TemplatePart::Middle
                };
                return Ok((
                    &body[index + 2..],
                    Token::Template(TemplateChunk {
                        raw: body[..index].to_string(),
                        part,
                    }),
                ));
            }
            _ => {}
        }
    }
    error(input, ErrorKind::Char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let (rest, result) = parse_string_literal("\"hello world\";").unwrap();
        assert_eq!(rest, ";");
        assert_eq!(result, Literal::String("hello world".to_string()));

        let (rest, result) = parse_string_literal("'it\\'s' + x").unwrap();
        assert_eq!(rest, " + x");
        assert_eq!(result, Literal::String("it\\'s".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_string_literal("\"open\nclose\"").is_err());
        assert!(parse_string_literal("'never").is_err());
    }

    #[test]
    fn test_number_literals() {
        let test_cases = [
            ("123", Literal::Number("123".to_string()), ""),
            ("1_000.5e-3;", Literal::Number("1_000.5e-3".to_string()), ";"),
            (".5)", Literal::Number(".5".to_string()), ")"),
            ("0xFF ", Literal::Number("0xFF".to_string()), " "),
            ("0b1010", Literal::Number("0b1010".to_string()), ""),
            ("10n", Literal::BigInt("10".to_string()), ""),
            ("1..toString", Literal::Number("1.".to_string()), ".toString"),
        ];

        for (input, expected, expected_rest) in test_cases {
            let (rest, result) = parse_number_literal(input).unwrap();
            assert_eq!(result, expected, "{}", input);
            assert_eq!(rest, expected_rest, "{}", input);
        }
    }

    #[test]
    fn test_member_dot_is_not_a_number() {
        assert!(parse_number_literal(".b").is_err());
        assert!(parse_number_literal("_1").is_err());
    }

    #[test]
    fn test_regex() {
        let (rest, token) = parse_regex("/[/]a\\/b/gi.test(s)").unwrap();
        assert_eq!(rest, ".test(s)");
        assert_eq!(
            token,
            Token::Literal(Literal::Regex {
                pattern: "[/]a\\/b".to_string(),
                flags: "gi".to_string(),
            })
        );
        assert!(parse_regex("/unterminated\n/").is_err());
    }

    #[test]
    fn test_template_chunks() {
        let (rest, token) = parse_template_chunk("`a ${b} c`").unwrap();
        assert_eq!(rest, "b} c`");
        assert_eq!(
            token,
            Token::Template(TemplateChunk {
                raw: "a ".to_string(),
                part: TemplatePart::Head,
            })
        );

        let (rest, token) = parse_template_chunk("} c`;").unwrap();
        assert_eq!(rest, ";");
        assert_eq!(
            token,
            Token::Template(TemplateChunk {
                raw: " c".to_string(),
                part: TemplatePart::Tail,
            })
        );

        let (_, token) = parse_template_chunk("`line\nbreak \\` ok`").unwrap();
        assert_eq!(
            token,
            Token::Template(TemplateChunk {
                raw: "line\nbreak \\` ok".to_string(),
                part: TemplatePart::NoSubstitution,
            })
        );
    }
}
