use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    combinator::{map, recognize},
    error::{context, VerboseError},
    sequence::{pair, preceded},
    IResult,
};
use thiserror::Error;

use super::{
    comment::{parse_comment, parse_hashbang},
    keyword::{parse_keyword, Keyword},
    literal::{parse_literal, parse_regex, parse_template_chunk, Literal, TemplateChunk, TemplatePart},
    symbol::{parse_punctuator, Punctuator},
    whitespace::{parse_newline, parse_whitespace},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Identifier(String),
    /// `#name` class member, stored without the `#`.
    PrivateName(String),
    Punctuator(Punctuator),
    Literal(Literal),
    Template(TemplateChunk),
    // Trivia
    Whitespace(String),
    Newline,
    Comment {
        content: String,
        comment_type: CommentType,
    },
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace(_) | Token::Newline | Token::Comment { .. }
        )
    }

    /// Whether a `/` following this token is a division operator.
    fn ends_expression(&self) -> bool {
        match self {
            Token::Identifier(_) | Token::PrivateName(_) | Token::Literal(_) => true,
            Token::Keyword(keyword) => keyword.ends_expression(),
            Token::Punctuator(punctuator) => punctuator.ends_expression(),
            Token::Template(chunk) => matches!(
                chunk.part,
                TemplatePart::NoSubstitution | TemplatePart::Tail
            ),
            Token::Whitespace(_) | Token::Newline | Token::Comment { .. } => false,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "{}", keyword),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::PrivateName(name) => write!(f, "#{}", name),
            Token::Punctuator(punctuator) => write!(f, "{}", punctuator),
            Token::Literal(Literal::String(s)) => write!(f, "\"{}\"", s),
            Token::Literal(Literal::Number(n)) => write!(f, "{}", n),
            Token::Literal(Literal::BigInt(n)) => write!(f, "{}n", n),
            Token::Literal(Literal::Regex { pattern, flags }) => {
                write!(f, "/{}/{}", pattern, flags)
            }
            Token::Template(_) => write!(f, "template"),
            Token::Whitespace(_) => write!(f, "whitespace"),
            Token::Newline => write!(f, "newline"),
            Token::Comment { .. } => write!(f, "comment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentType {
    Line,               // //
    Block,              // /* */
    DocumentationBlock, // /** */
    Hashbang,           // #!
}

/// A point in the source. `line` is 1-based, `column` 0-based, `offset` counts
/// characters from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Character count covered by the span.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn to(&self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.start.line, self.start.column, self.start.offset, self.end.offset
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub span: Span,
    /// A line terminator sits between this token and the previous significant
    /// one. Filled in by the preprocessor.
    pub newline_before: bool,
}

impl TokenSpan {
    pub fn new(token: Token, span: Span) -> Self {
        Self {
            token,
            span,
            newline_before: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    Block,
    Template,
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    current_offset: usize,
    current_line: usize,
    current_column: usize,
    pending_cr: bool,
    braces: Vec<Brace>,
    /// One entry per open `(`: true when it opened an `if`/`for`/`while`/`with` head.
    parens: Vec<bool>,
    /// The last significant token was the `)` closing a statement head, after
    /// which a `/` starts a regular expression.
    after_statement_head: bool,
    last_significant: Option<Token>,
    lenient: bool,
    skipped: Vec<Span>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_line: 1, // 1-based
            ..Default::default()
        }
    }

    /// A tokenizer that steps over characters it cannot lex instead of failing.
    pub fn lenient() -> Self {
        Self {
            lenient: true,
            ..Self::new()
        }
    }

    /// Spans the lenient tokenizer stepped over.
    pub fn skipped(&self) -> &[Span] {
        &self.skipped
    }

    fn position(&self) -> Position {
        Position::new(self.current_line, self.current_column, self.current_offset)
    }

    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start = self.position();
            let result = if start.offset == 0 && remaining.starts_with("#!") {
                parse_hashbang(remaining)
            } else {
                self.next_token(remaining)
            };

            match result {
                Ok((new_remaining, token)) => {
                    let consumed = &remaining[..(remaining.len() - new_remaining.len())];
                    self.update_position(consumed);
                    self.track_context(&token);
                    tokens.push(TokenSpan::new(token, Span::new(start, self.position())));
                    remaining = new_remaining;
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let mut end = start;
                    end.column += 1;
                    end.offset += 1;
                    let span = Span::new(start, end);

                    if self.lenient {
                        let skip = remaining.chars().next().map_or(0, char::len_utf8);
                        tracing::warn!("skipping unexpected input {:?} at {}", found, start);
                        self.update_position(&remaining[..skip]);
                        self.skipped.push(Span::new(start, self.position()));
                        remaining = &remaining[skip..];
                        continue;
                    }

                    let error = match e {
                        nom::Err::Incomplete(e) => TokenizerError::ParseError {
                            message: format!("Incomplete input, {:?}", e),
                            found,
                            span,
                        },
                        nom::Err::Error(e) | nom::Err::Failure(e) => TokenizerError::ParseError {
                            message: nom::error::convert_error(remaining, e).to_string(),
                            found,
                            span,
                        },
                    };
                    tracing::error!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }

    fn next_token<'a>(&self, input: &'a str) -> ParserResult<'a, Token> {
        if input.starts_with('`')
            || (input.starts_with('}') && self.braces.last() == Some(&Brace::Template))
        {
            return parse_template_chunk(input);
        }
        if input.starts_with('/') && !input.starts_with("//") && !input.starts_with("/*") {
            let regex_allowed = self.after_statement_head
                || self
                    .last_significant
                    .as_ref()
                    .map_or(true, |token| !token.ends_expression());
            if regex_allowed {
                if let Ok(result) = parse_regex(input) {
                    return Ok(result);
                }
            }
        }

        alt((
            // Formatting
            parse_whitespace,
            parse_newline,
            parse_comment,
            // Literals
            parse_literal,
            // Code elements
            parse_keyword,
            parse_private_name,
            parse_identifier,
            parse_punctuator,
        ))(input)
    }

    fn track_context(&mut self, token: &Token) {
        if token.is_trivia() {
            return;
        }
        self.after_statement_head = false;
        match token {
            Token::Punctuator(Punctuator::LeftParen) => {
                let opens_head = matches!(
                    self.last_significant,
                    Some(Token::Keyword(
                        Keyword::If | Keyword::For | Keyword::While | Keyword::With
                    ))
                );
                self.parens.push(opens_head);
            }
            Token::Punctuator(Punctuator::RightParen) => {
                self.after_statement_head = self.parens.pop().unwrap_or(false);
            }
            Token::Punctuator(Punctuator::LeftBrace) => self.braces.push(Brace::Block),
            Token::Punctuator(Punctuator::RightBrace) => {
                self.braces.pop();
            }
            Token::Template(chunk) => match chunk.part {
                TemplatePart::Head => self.braces.push(Brace::Template),
                TemplatePart::Tail => {
                    self.braces.pop();
                }
                TemplatePart::NoSubstitution | TemplatePart::Middle => {}
            },
            _ => {}
        }
        self.last_significant = Some(token.clone());
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_offset += 1;
            match c {
                '\n' if self.pending_cr => {}
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.current_line += 1;
                    self.current_column = 0;
                }
                _ => self.current_column += 1,
            }
            self.pending_cr = c == '\r';
        }
    }
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '\u{200C}' || c == '\u{200D}'
}

fn identifier_name(input: &str) -> ParserResult<&str> {
    recognize(pair(
        take_while1(is_identifier_start),
        take_while(is_identifier_part),
    ))(input)
}

/// Parses any identifier-shaped word. Reserved words are taken by
/// [`parse_keyword`] first, so reaching this means the word is an identifier
/// (which includes contextual words such as `let` or `async`).
#[tracing::instrument(level = "trace", skip(input))]
fn parse_identifier(input: &str) -> ParserResult<Token> {
    context(
        "identifier",
        map(identifier_name, |name: &str| {
            Token::Identifier(name.to_string())
        }),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
fn parse_private_name(input: &str) -> ParserResult<Token> {
    context(
        "private name",
        map(preceded(tag("#"), identifier_name), |name: &str| {
            Token::PrivateName(name.to_string())
        }),
    )(input)
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Parse error: {message} at position {span}")]
    ParseError {
        message: String,
        found: String,
        span: Span,
    },
}
