//! Syntax analysis: turns the preprocessed token stream into an
//! [`ast::Program`].
//!
//! Two entry points share one grammar. [`StrictParser`] stops at the first
//! error. [`LenientParser`] records the error as a [`ParseDiagnostic`],
//! resynchronizes at the next statement boundary and keeps going, so it
//! always yields a tree.

pub mod core;
pub mod parser;
mod parsers;
pub mod recovery;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;
pub use parser::{JsParser, LenientParser, ParseMode, ParseOptions, StrictParser};
pub use recovery::ParseDiagnostic;

pub use crate::ast;
