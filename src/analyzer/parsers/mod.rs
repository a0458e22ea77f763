//! Grammar productions, written as `impl JsParser` blocks grouped by the
//! kind of construct they recognize.

mod class;
mod expression;
mod function;
mod module;
mod pattern;
mod statement;

#[cfg(test)]
mod tests;
