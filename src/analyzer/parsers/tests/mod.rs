use crate::analyzer::core::Parser;
use crate::analyzer::parser::{LenientParser, ParseOptions, StrictParser};
use crate::analyzer::recovery::ParseDiagnostic;
use crate::ast::Program;
use crate::preprocessor::{Preprocessor, TokenPreprocessor};
use crate::tokenizer::token::{TokenSpan, Tokenizer};

mod class_tests;
mod recovery_tests;
mod statement_tests;

fn tokens(source: &str) -> Vec<TokenSpan> {
    TokenPreprocessor::new().process(Tokenizer::new().tokenize(source).unwrap())
}

fn parse(source: &str) -> Program {
    let (_, program) = StrictParser::default().parse(&tokens(source), 0).unwrap();
    program
}

fn parse_err(source: &str) -> bool {
    StrictParser::default().parse(&tokens(source), 0).is_err()
}

fn parse_lenient(source: &str) -> (Program, Vec<ParseDiagnostic>) {
    let (_, result) = LenientParser::new(ParseOptions::default())
        .parse_with_diagnostics(&tokens(source), 0)
        .unwrap();
    result
}
