//! # Tokenizer Component
//!
//! Lexical analysis of JavaScript source text, producing a stream of
//! [`TokenSpan`](token::TokenSpan)s for the preprocessor and parser.
//!
//! ## Design Principles
//!
//! * **Position Information**: every token carries a [`Span`](token::Span) with
//!   line (1-based), column (0-based) and character offset for both ends.
//! * **Trivia Preservation**: whitespace, comments and line terminators are
//!   emitted as tokens so the preprocessor can derive line-break information.
//! * **Context Sensitivity**: a `/` is read as a regular expression or as a
//!   division depending on the previous significant token, and a `}` resumes a
//!   template literal when it closes a `${` substitution.
//!
//! ## Component Structure
//!
//! * [`token`]: core token types and the [`Tokenizer`](token::Tokenizer)
//! * [`keyword`]: reserved words
//! * [`symbol`]: punctuators
//! * [`literal`]: numeric, string, regular-expression and template literals
//! * [`whitespace`]: whitespace and line terminators
//! * [`comment`]: line, block and hashbang comments
//!
//! ## Usage Example
//!
//! ```rust
//! use shapeprint::tokenizer::token::{TokenSpan, Tokenizer};
//!
//! fn tokenize_example() -> Result<Vec<TokenSpan>, Box<dyn std::error::Error>> {
//!     let input = "for (const x of xs) { total += x; }";
//!     let mut tokenizer = Tokenizer::new();
//!     let tokens = tokenizer.tokenize(input)?;
//!     Ok(tokens)
//! }
//! # tokenize_example().unwrap();
//! ```

pub mod comment;
pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;
