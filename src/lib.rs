//! # shapeprint
//!
//! Converts JavaScript source into a flat, position-ordered stream of
//! structural tokens: markers for control flow, declarations, calls and
//! nesting, each with a line, a column and a length.
//!
//! ```rust
//! use shapeprint::{convert, TokenKind};
//!
//! let stream = convert("a.b()").unwrap();
//! let kinds: Vec<TokenKind> = stream.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![TokenKind::Apply]);
//! ```

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod converter;
pub mod error;
pub mod fingerprint;
pub mod preprocessor;
pub mod tokenizer;
pub mod vocabulary;

// Re-exports
pub use config::ConvertConfig;
pub use converter::{convert, convert_file, Converter};
pub use error::{Error, InternalResult};
pub use fingerprint::{fingerprint, Token, TokenRecord, TokenStream};
pub use vocabulary::{Mapping, TokenKind};
