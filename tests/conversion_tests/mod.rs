mod property_test;
mod scenario_test;

use shapeprint::{TokenKind, TokenStream};

pub fn summary(stream: &TokenStream) -> Vec<(TokenKind, usize, usize, usize)> {
    stream
        .iter()
        .map(|t| (t.kind, t.line, t.column, t.length))
        .collect()
}
