//! The file-level pipeline: tokenize, preprocess, parse, fingerprint.

use std::path::Path;

use tracing::{debug, warn};

use crate::analyzer::{LenientParser, Parser, StrictParser};
use crate::ast::Program;
use crate::config::ConvertConfig;
use crate::error::{Error, InternalResult};
use crate::fingerprint::{self, TokenStream};
use crate::preprocessor::{Preprocessor, TokenPreprocessor};
use crate::tokenizer::token::Tokenizer;

/// Converts JavaScript source text into its ordered structural token stream.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    #[tracing::instrument(level = "debug", skip(self, source), fields(len = source.len()))]
    pub fn convert(&self, source: &str) -> InternalResult<TokenStream> {
        let program = match self.parse_strict(source) {
            Ok(program) => program,
            Err(error) if self.config.lenient_fallback => {
                warn!("strict parse failed, retrying leniently: {}", error);
                self.parse_lenient(source)?
            }
            Err(error) => return Err(error),
        };
        Ok(fingerprint::fingerprint(&program)?)
    }

    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> InternalResult<TokenStream> {
        let path = path.as_ref();
        debug!("reading {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.convert(&source)
    }

    fn parse_strict(&self, source: &str) -> InternalResult<Program> {
        let tokens = Tokenizer::new().tokenize(source)?;
        let tokens = TokenPreprocessor::new().process(tokens);
        let (_, program) = StrictParser::new(self.config.parse).parse(&tokens, 0)?;
        Ok(program)
    }

    fn parse_lenient(&self, source: &str) -> InternalResult<Program> {
        let mut tokenizer = Tokenizer::lenient();
        let tokens = tokenizer.tokenize(source)?;
        for span in tokenizer.skipped() {
            debug!("skipped unlexable input at {}", span);
        }
        let tokens = TokenPreprocessor::new().process(tokens);
        let (_, (program, diagnostics)) =
            LenientParser::new(self.config.parse).parse_with_diagnostics(&tokens, 0)?;
        for diagnostic in &diagnostics {
            debug!("{}", diagnostic);
        }
        Ok(program)
    }
}

/// Converts `source` with the default configuration.
pub fn convert(source: &str) -> InternalResult<TokenStream> {
    Converter::default().convert(source)
}

pub fn convert_file<P: AsRef<Path>>(path: P) -> InternalResult<TokenStream> {
    Converter::default().convert_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::TokenKind;

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.iter().map(|token| token.kind).collect()
    }

    #[test]
    fn test_convert_valid_source() {
        let stream = convert("function f() { return g(1); }").unwrap();
        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::FunctionBegin,
                TokenKind::Return,
                TokenKind::Apply,
                TokenKind::FunctionEnd
            ]
        );
    }

    #[test]
    fn test_lenient_fallback_recovers() {
        let source = "let a = ;\nfoo()";
        let stream = convert(source).unwrap();
        assert!(kinds(&stream).contains(&TokenKind::Apply));
        assert!(stream.is_sorted());
    }

    #[test]
    fn test_dangling_decorators_recover_without_tokens() {
        for source in ["@", "@d", "@ class A {}", "@d\n"] {
            let stream = convert(source).unwrap();
            assert!(stream.is_empty(), "{source}");
        }
        let stream = convert("@d;\nf()").unwrap();
        assert_eq!(kinds(&stream), vec![TokenKind::Apply]);
    }

    #[test]
    fn test_templates_parse_strictly() {
        let converter = Converter::new(ConvertConfig {
            lenient_fallback: false,
            ..ConvertConfig::default()
        });
        assert!(converter.convert("`a${b}`").unwrap().is_empty());
        let stream = converter.convert("x = `${f()}`").unwrap();
        assert_eq!(kinds(&stream), vec![TokenKind::Assign, TokenKind::Apply]);
    }

    #[test]
    fn test_regex_after_statement_head() {
        let converter = Converter::new(ConvertConfig {
            lenient_fallback: false,
            ..ConvertConfig::default()
        });
        let stream = converter.convert("if (x) /a/.test(y)").unwrap();
        let tokens: Vec<_> = stream
            .iter()
            .map(|t| (t.kind, t.column, t.length))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (TokenKind::IfBegin, 0, 2),
                (TokenKind::Apply, 11, 4),
                (TokenKind::IfEnd, 17, 1),
            ]
        );
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let converter = Converter::new(ConvertConfig {
            lenient_fallback: false,
            ..ConvertConfig::default()
        });
        assert!(matches!(
            converter.convert("let a = ;\nfoo()"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        assert!(matches!(
            convert_file("/nonexistent/input.js"),
            Err(Error::Read { .. })
        ));
    }

    #[test]
    fn test_empty_source_yields_empty_stream() {
        assert!(convert("").unwrap().is_empty());
    }
}
