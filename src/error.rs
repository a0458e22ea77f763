use thiserror::Error;

use crate::analyzer::ParseError;
use crate::config::ConfigError;
use crate::fingerprint::EmitError;
use crate::tokenizer::token::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
