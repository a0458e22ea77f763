//! Syntax tree produced by the analyzer and walked by the fingerprint visitor.
//!
//! Every node carries a [`Span`]. Node spans follow the usual ESTree reading:
//! parentheses around an expression are not part of its span, a method's span
//! starts at its first modifier or key, and a class's span starts at the
//! `class` keyword (decorators carry their own spans).

use std::fmt;

pub use crate::tokenizer::token::{Position, Span};
use crate::tokenizer::{keyword::Keyword, symbol::Punctuator};

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Statement>,
    pub span: Span,
}

// 文
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression {
        expression: Expression,
        span: Span,
    },
    Block(Block),
    Empty {
        span: Span,
    },
    Debugger {
        span: Span,
    },
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Box<Function>),
    ClassDeclaration(Box<Class>),
    // control flow
    If {
        test: Expression,
        consequent: Box<Statement>,
        alternate: Option<Box<Statement>>,
        span: Span,
    },
    For {
        init: Option<ForInit>,
        test: Option<Expression>,
        update: Option<Expression>,
        body: Box<Statement>,
        span: Span,
    },
    ForIn {
        left: ForHead,
        right: Expression,
        body: Box<Statement>,
        span: Span,
    },
    ForOf {
        left: ForHead,
        right: Expression,
        body: Box<Statement>,
        is_await: bool,
        span: Span,
    },
    While {
        test: Expression,
        body: Box<Statement>,
        span: Span,
    },
    DoWhile {
        body: Box<Statement>,
        test: Expression,
        span: Span,
    },
    Return {
        argument: Option<Expression>,
        span: Span,
    },
    Break {
        label: Option<Identifier>,
        span: Span,
    },
    Continue {
        label: Option<Identifier>,
        span: Span,
    },
    Throw {
        argument: Expression,
        span: Span,
    },
    Try {
        block: Block,
        handler: Option<CatchClause>,
        finalizer: Option<Block>,
        span: Span,
    },
    Switch {
        discriminant: Expression,
        cases: Vec<SwitchCase>,
        span: Span,
    },
    Labeled {
        label: Identifier,
        body: Box<Statement>,
        span: Span,
    },
    With {
        object: Expression,
        body: Box<Statement>,
        span: Span,
    },
    // modules
    Import(ImportDeclaration),
    ExportNamed(ExportNamed),
    ExportDefault(ExportDefault),
    ExportAll(ExportAll),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(block) => block.span,
            Statement::VariableDeclaration(declaration) => declaration.span,
            Statement::FunctionDeclaration(function) => function.span,
            Statement::ClassDeclaration(class) => class.span,
            Statement::Import(import) => import.span,
            Statement::ExportNamed(export) => export.span,
            Statement::ExportDefault(export) => export.span,
            Statement::ExportAll(export) => export.span,
            Statement::Expression { span, .. }
            | Statement::Empty { span }
            | Statement::Debugger { span }
            | Statement::If { span, .. }
            | Statement::For { span, .. }
            | Statement::ForIn { span, .. }
            | Statement::ForOf { span, .. }
            | Statement::While { span, .. }
            | Statement::DoWhile { span, .. }
            | Statement::Return { span, .. }
            | Statement::Break { span, .. }
            | Statement::Continue { span, .. }
            | Statement::Throw { span, .. }
            | Statement::Try { span, .. }
            | Statement::Switch { span, .. }
            | Statement::Labeled { span, .. }
            | Statement::With { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expression>,
    pub span: Span,
}

/// Initializer slot of a C-style `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Expression),
}

/// Left-hand side of `for-in` / `for-of`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHead {
    Declaration(VariableDeclaration),
    Pattern(Pattern),
}

impl ForHead {
    pub fn span(&self) -> Span {
        match self {
            ForHead::Declaration(declaration) => declaration.span,
            ForHead::Pattern(pattern) => pattern.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default:`
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pattern>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Block),
    /// Concise arrow body.
    Expression(Box<Expression>),
}

/// Function declarations, function expressions, arrows and methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: FunctionBody,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_arrow: bool,
    pub span: Span,
}

/// Class declarations and class expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub decorators: Vec<Decorator>,
    pub id: Option<Identifier>,
    pub super_class: Option<Expression>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method {
        decorators: Vec<Decorator>,
        key: PropertyKey,
        kind: MethodKind,
        is_static: bool,
        function: Function,
        span: Span,
    },
    Property {
        decorators: Vec<Decorator>,
        key: PropertyKey,
        value: Option<Expression>,
        is_static: bool,
        span: Span,
    },
    StaticBlock(Block),
    /// Stray `;` between members.
    Empty {
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub expression: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    PrivateName(Identifier),
    Literal { value: LiteralValue, span: Span },
    Computed(Box<Expression>),
}

impl PropertyKey {
    pub fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(identifier) | PropertyKey::PrivateName(identifier) => {
                identifier.span
            }
            PropertyKey::Literal { span, .. } => *span,
            PropertyKey::Computed(expression) => expression.span(),
        }
    }
}

/// Object literal entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    KeyValue {
        key: PropertyKey,
        value: Expression,
        shorthand: bool,
        span: Span,
    },
    Method {
        key: PropertyKey,
        kind: MethodKind,
        function: Function,
        span: Span,
    },
    Spread {
        argument: Expression,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    String(String),
    Number(String),
    BigInt(String),
    Regex { pattern: String, flags: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
    pub span: Span,
}

/// Operator written either as a punctuator or as a keyword (`typeof`, `in`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Punctuator(Punctuator),
    Keyword(Keyword),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Punctuator(punctuator) => punctuator.as_str(),
            Operator::Keyword(keyword) => keyword.as_ref(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    Identifier(Identifier),
    PrivateName(Identifier),
    Computed(Box<Expression>),
}

impl MemberProperty {
    pub fn span(&self) -> Span {
        match self {
            MemberProperty::Identifier(identifier) | MemberProperty::PrivateName(identifier) => {
                identifier.span
            }
            MemberProperty::Computed(expression) => expression.span(),
        }
    }
}

/// One `for (x of xs)` clause of a comprehension or generator expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensionBlock {
    pub left: Pattern,
    pub right: Expression,
    /// `for (x of y)` rather than `for (x in y)`
    pub of: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub blocks: Vec<ComprehensionBlock>,
    pub filter: Option<Box<Expression>>,
    pub body: Box<Expression>,
    pub span: Span,
}

// 式
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Literal {
        value: LiteralValue,
        span: Span,
    },
    This {
        span: Span,
    },
    Super {
        span: Span,
    },
    Template(TemplateLiteral),
    TaggedTemplate {
        tag: Box<Expression>,
        quasi: TemplateLiteral,
        span: Span,
    },
    /// `None` elements are holes.
    Array {
        elements: Vec<Option<Expression>>,
        span: Span,
    },
    Object {
        properties: Vec<Property>,
        span: Span,
    },
    Function(Box<Function>),
    Class(Box<Class>),
    Unary {
        operator: Operator,
        argument: Box<Expression>,
        span: Span,
    },
    Update {
        operator: Punctuator,
        prefix: bool,
        argument: Box<Expression>,
        span: Span,
    },
    Binary {
        operator: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    Assignment {
        operator: Punctuator,
        left: Box<Pattern>,
        right: Box<Expression>,
        span: Span,
    },
    Conditional {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
        span: Span,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        optional: bool,
        span: Span,
    },
    New {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        span: Span,
    },
    Member {
        object: Box<Expression>,
        property: MemberProperty,
        optional: bool,
        span: Span,
    },
    Sequence {
        expressions: Vec<Expression>,
        span: Span,
    },
    Spread {
        argument: Box<Expression>,
        span: Span,
    },
    Yield {
        argument: Option<Box<Expression>>,
        delegate: bool,
        span: Span,
    },
    Await {
        argument: Box<Expression>,
        span: Span,
    },
    /// Callee of a dynamic `import(...)`.
    Import {
        span: Span,
    },
    /// `new.target`, `import.meta`
    MetaProperty {
        meta: Identifier,
        property: Identifier,
        span: Span,
    },
    /// `[for (x of xs) if (x) x * 2]`
    Comprehension(Comprehension),
    /// `(for (x of xs) x * 2)`
    Generator(Comprehension),
    /// Placeholder the lenient parser inserts where an expression was missing.
    Invalid {
        span: Span,
    },
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(identifier) => identifier.span,
            Expression::Template(template) => template.span,
            Expression::Function(function) => function.span,
            Expression::Class(class) => class.span,
            Expression::Comprehension(comprehension) | Expression::Generator(comprehension) => {
                comprehension.span
            }
            Expression::Literal { span, .. }
            | Expression::This { span }
            | Expression::Super { span }
            | Expression::TaggedTemplate { span, .. }
            | Expression::Array { span, .. }
            | Expression::Object { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Update { span, .. }
            | Expression::Binary { span, .. }
            | Expression::Assignment { span, .. }
            | Expression::Conditional { span, .. }
            | Expression::Call { span, .. }
            | Expression::New { span, .. }
            | Expression::Member { span, .. }
            | Expression::Sequence { span, .. }
            | Expression::Spread { span, .. }
            | Expression::Yield { span, .. }
            | Expression::Await { span, .. }
            | Expression::Import { span }
            | Expression::MetaProperty { span, .. }
            | Expression::Invalid { span } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    Property {
        key: PropertyKey,
        value: Pattern,
        shorthand: bool,
        span: Span,
    },
    Rest(Pattern),
}

/// Binding and assignment targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Object {
        properties: Vec<ObjectPatternProperty>,
        span: Span,
    },
    /// `None` elements are holes.
    Array {
        elements: Vec<Option<Pattern>>,
        span: Span,
    },
    Rest {
        argument: Box<Pattern>,
        span: Span,
    },
    /// Binding with a default value, `x = 1`.
    Assignment {
        left: Box<Pattern>,
        right: Box<Expression>,
        span: Span,
    },
    /// Member expression used as an assignment target.
    Expression(Box<Expression>),
    Invalid {
        span: Span,
    },
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(identifier) => identifier.span,
            Pattern::Expression(expression) => expression.span(),
            Pattern::Object { span, .. }
            | Pattern::Array { span, .. }
            | Pattern::Rest { span, .. }
            | Pattern::Assignment { span, .. }
            | Pattern::Invalid { span } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import a from "m"`
    Default(Identifier),
    /// `import * as ns from "m"`
    Namespace { local: Identifier, span: Span },
    /// `import { a as b } from "m"`
    Named {
        imported: Identifier,
        local: Identifier,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub local: Identifier,
    pub exported: Identifier,
    pub span: Span,
}

/// `export { a, b as c }`, `export { a } from "m"`, `export const x = 1`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamed {
    pub declaration: Option<Box<Statement>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultDeclaration {
    Function(Box<Function>),
    Class(Box<Class>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefault {
    pub declaration: DefaultDeclaration,
    pub span: Span,
}

/// `export * from "m"`, `export * as ns from "m"`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAll {
    pub exported: Option<Identifier>,
    pub source: String,
    pub span: Span,
}
