//! # Structural Token Vocabulary
//!
//! The closed set of token kinds a fingerprint is written in. Every kind has a
//! stable integer id starting at 1; id 0 is reserved, so the "amount" reported
//! to consumers is the kind count plus one.
//!
//! Kinds are never added or reordered at runtime, which lets a consumer store
//! the id to name mapping once and reuse it across runs.

use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use strum::{EnumCount, IntoEnumIterator};

/// Kinds of structural tokens. The discriminant is the public id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum TokenKind {
    ForBegin = 1,
    ForEnd,
    FunctionBegin,
    FunctionEnd,
    Break,
    Continue,
    Apply,
    IfBegin,
    IfEnd,
    Else,
    ClassBegin,
    ClassEnd,
    ClassExpressionBegin,
    ClassExpressionEnd,
    WithBegin,
    WithEnd,
    SwitchBegin,
    SwitchEnd,
    Case,
    Return,
    Throw,
    Try,
    CatchBegin,
    CatchEnd,
    WhileBegin,
    WhileEnd,
    DoWhileBegin,
    DoWhileEnd,
    Assign,
    ArrayBegin,
    ArrayEnd,
    ObjectBegin,
    ObjectEnd,
    Ternary,
    Yield,
    GeneratorBegin,
    GeneratorEnd,
    ComprehensionBegin,
    ComprehensionEnd,
    Import,
    Await,
    Decorator,
    Export,
}

impl TokenKind {
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_id(id: u32) -> Option<Self> {
        TokenKind::iter().find(|kind| kind.id() == id)
    }

    /// The END kind closing this BEGIN kind.
    pub fn end_kind(self) -> Option<Self> {
        let end = match self {
            TokenKind::ForBegin => TokenKind::ForEnd,
            TokenKind::FunctionBegin => TokenKind::FunctionEnd,
            TokenKind::IfBegin => TokenKind::IfEnd,
            TokenKind::ClassBegin => TokenKind::ClassEnd,
            TokenKind::ClassExpressionBegin => TokenKind::ClassExpressionEnd,
            TokenKind::WithBegin => TokenKind::WithEnd,
            TokenKind::SwitchBegin => TokenKind::SwitchEnd,
            TokenKind::CatchBegin => TokenKind::CatchEnd,
            TokenKind::WhileBegin => TokenKind::WhileEnd,
            TokenKind::DoWhileBegin => TokenKind::DoWhileEnd,
            TokenKind::ArrayBegin => TokenKind::ArrayEnd,
            TokenKind::ObjectBegin => TokenKind::ObjectEnd,
            TokenKind::GeneratorBegin => TokenKind::GeneratorEnd,
            TokenKind::ComprehensionBegin => TokenKind::ComprehensionEnd,
            _ => return None,
        };
        Some(end)
    }

    pub fn is_begin(self) -> bool {
        self.end_kind().is_some()
    }

    pub fn is_end(self) -> bool {
        self.name().ends_with("_END")
    }
}

/// Number of token kinds.
pub fn kind_count() -> usize {
    TokenKind::COUNT
}

/// Vocabulary size as reported to consumers; slot 0 is reserved.
pub fn amount() -> usize {
    kind_count() + 1
}

pub fn id_of(name: &str) -> Option<u32> {
    TokenKind::from_str(name).ok().map(TokenKind::id)
}

pub fn name_of(id: u32) -> Option<&'static str> {
    TokenKind::from_id(id).map(TokenKind::name)
}

/// The id to name table, serialized as a JSON object in id order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mapping;

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(kind_count()))?;
        for kind in TokenKind::iter() {
            map.serialize_entry(&kind.id().to_string(), kind.name())?;
        }
        map.end()
    }
}

/// Source lengths of the keywords and symbols that anchor tokens.
pub mod lengths {
    pub const FOR: usize = "for".len();
    pub const FUNCTION: usize = "function".len();
    pub const CLASS: usize = "class".len();
    pub const WITH: usize = "with".len();
    pub const SWITCH: usize = "switch".len();
    pub const CATCH: usize = "catch".len();
    pub const WHILE: usize = "while".len();
    pub const DO: usize = "do".len();
    pub const IF: usize = "if".len();
    pub const BREAK: usize = "break".len();
    pub const CONTINUE: usize = "continue".len();
    pub const RETURN: usize = "return".len();
    pub const THROW: usize = "throw".len();
    pub const TRY: usize = "try".len();
    pub const CASE: usize = "case".len();
    pub const DEFAULT: usize = "default".len();
    pub const YIELD: usize = "yield".len();
    pub const AWAIT: usize = "await".len();
    pub const IMPORT: usize = "import".len();
    pub const EXPORT: usize = "export".len();
    pub const DECORATOR: usize = "@".len();
    /// Single-character markers: brackets, ELSE, the implicit for-in/of bind
    /// and every END token.
    pub const MARKER: usize = 1;
    /// The ` ?` following a conditional's test.
    pub const TERNARY_SUFFIX: usize = " ?".len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_are_dense_and_start_at_one() {
        let ids: Vec<u32> = TokenKind::iter().map(TokenKind::id).collect();
        let expected: Vec<u32> = (1..=kind_count() as u32).collect();
        assert_eq!(ids, expected);
        assert_eq!(amount(), 44);
    }

    #[test]
    fn test_name_lookup_round_trips() {
        assert_eq!(id_of("FOR_BEGIN"), Some(1));
        assert_eq!(id_of("DO_WHILE_END"), Some(28));
        assert_eq!(name_of(43), Some("EXPORT"));
        assert_eq!(name_of(0), None);
        assert_eq!(id_of("NOT_A_KIND"), None);
    }

    #[test]
    fn test_begin_and_end_kinds_pair_up() {
        let begins = TokenKind::iter().filter(|k| k.is_begin()).count();
        let ends = TokenKind::iter().filter(|k| k.is_end()).count();
        assert_eq!(begins, ends);
        for kind in TokenKind::iter().filter(|k| k.is_begin()) {
            let end = kind.end_kind().unwrap();
            assert_eq!(kind.name().replace("_BEGIN", "_END"), end.name());
        }
    }

    #[test]
    fn test_mapping_serializes_in_id_order() {
        let json = serde_json::to_string(&Mapping).unwrap();
        assert!(json.starts_with(r#"{"1":"FOR_BEGIN","2":"FOR_END","3":"FUNCTION_BEGIN""#));
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len() + 1, amount());
    }
}
