use thiserror::Error;

use crate::ast::Span;
use crate::vocabulary::TokenKind;

/// Internal-consistency failures while emitting tokens. None of these is
/// caused by the input; each one aborts the conversion of the file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    #[error("Invalid length for {kind}: {length} at {span}")]
    InvalidLength {
        kind: TokenKind,
        length: usize,
        span: Span,
    },

    #[error("Degenerate span for {kind}: {span}")]
    DegenerateSpan { kind: TokenKind, span: Span },

    #[error("Unknown token kind: {key} ({id})")]
    UnknownKind { key: String, id: u32 },
}

pub type EmitResult<T> = Result<T, EmitError>;
