//! # Fingerprint
//!
//! Maps a syntax tree to its structural token stream.
//!
//! - [`visitor`]: the depth-first traversal and its default recursion
//! - [`rules`]: the per-construct emission rules
//! - [`stream`]: the token buffer, its ordering and its serialized form

pub mod error;
pub mod rules;
pub mod stream;
pub mod visitor;

pub use error::{EmitError, EmitResult};
pub use rules::FingerprintVisitor;
pub use stream::{Token, TokenRecord, TokenStream};
pub use visitor::AstVisitor;

use crate::ast::Program;

/// Emits and orders the structural tokens of `program`.
#[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
pub fn fingerprint(program: &Program) -> EmitResult<TokenStream> {
    let stream = FingerprintVisitor::new().emit_program(program)?;
    tracing::debug!("emitted {} tokens", stream.len());
    Ok(stream)
}
