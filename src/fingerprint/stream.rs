//! Token buffer filled during traversal and put into reading order at the end.

use serde::{Deserialize, Serialize};

use super::error::{EmitError, EmitResult};
use crate::vocabulary::TokenKind;

/// One structural token. `line` is 1-based, `column` 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize, length: usize) -> Self {
        Self {
            kind,
            line,
            column,
            length,
        }
    }

    pub fn to_record(&self) -> TokenRecord {
        TokenRecord {
            token: KindRecord {
                key: self.kind.name().to_string(),
                value: self.kind.id(),
            },
            line: self.line,
            column: self.column,
            length: self.length,
        }
    }
}

/// `{"key": <kind name>, "value": <kind id>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindRecord {
    pub key: String,
    pub value: u32,
}

/// Serialized form of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: KindRecord,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl TryFrom<TokenRecord> for Token {
    type Error = EmitError;

    /// Reads a record back; the name and id must agree with the vocabulary.
    fn try_from(record: TokenRecord) -> EmitResult<Self> {
        let kind = TokenKind::from_id(record.token.value)
            .filter(|kind| kind.name() == record.token.key)
            .ok_or(EmitError::UnknownKind {
                key: record.token.key,
                id: record.token.value,
            })?;
        Ok(Token::new(kind, record.line, record.column, record.length))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Puts the tokens into reading order. The sort is stable, so tokens at
    /// the same position keep their emission order.
    pub fn sort(&mut self) {
        self.tokens.sort_by_key(|token| (token.line, token.column));
    }

    pub fn is_sorted(&self) -> bool {
        self.tokens
            .windows(2)
            .all(|pair| (pair[0].line, pair[0].column) <= (pair[1].line, pair[1].column))
    }

    /// Every BEGIN is closed by its own END, innermost first.
    pub fn is_well_nested(&self) -> bool {
        let mut open: Vec<TokenKind> = Vec::new();
        for token in &self.tokens {
            if let Some(end) = token.kind.end_kind() {
                open.push(end);
            } else if token.kind.is_end() && open.pop() != Some(token.kind) {
                return false;
            }
        }
        open.is_empty()
    }

    pub fn to_records(&self) -> Vec<TokenRecord> {
        self.tokens.iter().map(Token::to_record).collect()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}
