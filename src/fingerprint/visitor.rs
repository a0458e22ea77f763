//! Depth-first traversal over the syntax tree.
//!
//! [`AstVisitor`] has one method per node family. Each default method calls
//! the matching `walk_*` function, which visits the node's children in source
//! order and emits nothing. An implementor overrides only the methods it has
//! rules for. An override either calls the `walk_*` function to continue the
//! default recursion or visits a chosen subset of children itself. In both
//! cases each node is visited once.
//!
//! The `walk_*` functions match exhaustively, so a new node variant does not
//! compile until its traversal is written.

use crate::ast::*;

pub trait AstVisitor: Sized {
    type Error;

    fn visit_program(&mut self, program: &Program) -> Result<(), Self::Error> {
        walk_program(self, program)
    }

    fn visit_statement(&mut self, statement: &Statement) -> Result<(), Self::Error> {
        walk_statement(self, statement)
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), Self::Error> {
        walk_block(self, block)
    }

    fn visit_expression(&mut self, expression: &Expression) -> Result<(), Self::Error> {
        walk_expression(self, expression)
    }

    fn visit_pattern(&mut self, pattern: &Pattern) -> Result<(), Self::Error> {
        walk_pattern(self, pattern)
    }

    fn visit_variable_declarator(
        &mut self,
        declarator: &VariableDeclarator,
    ) -> Result<(), Self::Error> {
        walk_variable_declarator(self, declarator)
    }

    fn visit_function(&mut self, function: &Function) -> Result<(), Self::Error> {
        walk_function(self, function)
    }

    fn visit_class_declaration(&mut self, class: &Class) -> Result<(), Self::Error> {
        walk_class(self, class)
    }

    fn visit_class_expression(&mut self, class: &Class) -> Result<(), Self::Error> {
        walk_class(self, class)
    }

    fn visit_decorator(&mut self, decorator: &Decorator) -> Result<(), Self::Error> {
        self.visit_expression(&decorator.expression)
    }

    fn visit_switch_case(&mut self, case: &SwitchCase) -> Result<(), Self::Error> {
        walk_switch_case(self, case)
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) -> Result<(), Self::Error> {
        walk_catch_clause(self, clause)
    }

    fn visit_comprehension(
        &mut self,
        comprehension: &Comprehension,
        _is_generator: bool,
    ) -> Result<(), Self::Error> {
        walk_comprehension(self, comprehension)
    }
}

pub fn walk_program<V: AstVisitor>(visitor: &mut V, program: &Program) -> Result<(), V::Error> {
    for statement in &program.body {
        visitor.visit_statement(statement)?;
    }
    Ok(())
}

pub fn walk_block<V: AstVisitor>(visitor: &mut V, block: &Block) -> Result<(), V::Error> {
    for statement in &block.body {
        visitor.visit_statement(statement)?;
    }
    Ok(())
}

fn walk_variable_declaration<V: AstVisitor>(
    visitor: &mut V,
    declaration: &VariableDeclaration,
) -> Result<(), V::Error> {
    for declarator in &declaration.declarations {
        visitor.visit_variable_declarator(declarator)?;
    }
    Ok(())
}

pub fn walk_variable_declarator<V: AstVisitor>(
    visitor: &mut V,
    declarator: &VariableDeclarator,
) -> Result<(), V::Error> {
    visitor.visit_pattern(&declarator.id)?;
    if let Some(init) = &declarator.init {
        visitor.visit_expression(init)?;
    }
    Ok(())
}

pub fn walk_for_head<V: AstVisitor>(visitor: &mut V, head: &ForHead) -> Result<(), V::Error> {
    match head {
        ForHead::Declaration(declaration) => walk_variable_declaration(visitor, declaration),
        ForHead::Pattern(pattern) => visitor.visit_pattern(pattern),
    }
}

fn walk_optional<V: AstVisitor>(
    visitor: &mut V,
    expression: Option<&Expression>,
) -> Result<(), V::Error> {
    match expression {
        Some(expression) => visitor.visit_expression(expression),
        None => Ok(()),
    }
}

pub fn walk_statement<V: AstVisitor>(
    visitor: &mut V,
    statement: &Statement,
) -> Result<(), V::Error> {
    match statement {
        Statement::Expression { expression, .. } => visitor.visit_expression(expression),
        Statement::Block(block) => visitor.visit_block(block),
        Statement::Empty { .. } | Statement::Debugger { .. } => Ok(()),
        Statement::VariableDeclaration(declaration) => {
            walk_variable_declaration(visitor, declaration)
        }
        Statement::FunctionDeclaration(function) => visitor.visit_function(function),
        Statement::ClassDeclaration(class) => visitor.visit_class_declaration(class),
        Statement::If {
            test,
            consequent,
            alternate,
            ..
        } => {
            visitor.visit_expression(test)?;
            visitor.visit_statement(consequent)?;
            match alternate {
                Some(alternate) => visitor.visit_statement(alternate),
                None => Ok(()),
            }
        }
        Statement::For {
            init,
            test,
            update,
            body,
            ..
        } => {
            match init {
                Some(ForInit::Declaration(declaration)) => {
                    walk_variable_declaration(visitor, declaration)?
                }
                Some(ForInit::Expression(expression)) => visitor.visit_expression(expression)?,
                None => {}
            }
            walk_optional(visitor, test.as_ref())?;
            walk_optional(visitor, update.as_ref())?;
            visitor.visit_statement(body)
        }
        Statement::ForIn {
            left, right, body, ..
        }
        | Statement::ForOf {
            left, right, body, ..
        } => {
            walk_for_head(visitor, left)?;
            visitor.visit_expression(right)?;
            visitor.visit_statement(body)
        }
        Statement::While { test, body, .. } => {
            visitor.visit_expression(test)?;
            visitor.visit_statement(body)
        }
        Statement::DoWhile { body, test, .. } => {
            visitor.visit_statement(body)?;
            visitor.visit_expression(test)
        }
        Statement::Return { argument, .. } => walk_optional(visitor, argument.as_ref()),
        Statement::Break { .. } | Statement::Continue { .. } => Ok(()),
        Statement::Throw { argument, .. } => visitor.visit_expression(argument),
        Statement::Try {
            block,
            handler,
            finalizer,
            ..
        } => {
            visitor.visit_block(block)?;
            if let Some(handler) = handler {
                visitor.visit_catch_clause(handler)?;
            }
            match finalizer {
                Some(finalizer) => visitor.visit_block(finalizer),
                None => Ok(()),
            }
        }
        Statement::Switch {
            discriminant,
            cases,
            ..
        } => {
            visitor.visit_expression(discriminant)?;
            for case in cases {
                visitor.visit_switch_case(case)?;
            }
            Ok(())
        }
        Statement::Labeled { body, .. } => visitor.visit_statement(body),
        Statement::With { object, body, .. } => {
            visitor.visit_expression(object)?;
            visitor.visit_statement(body)
        }
        Statement::Import(_) | Statement::ExportAll(_) => Ok(()),
        Statement::ExportNamed(export) => match &export.declaration {
            Some(declaration) => visitor.visit_statement(declaration),
            None => Ok(()),
        },
        Statement::ExportDefault(export) => match &export.declaration {
            DefaultDeclaration::Function(function) => visitor.visit_function(function),
            DefaultDeclaration::Class(class) => visitor.visit_class_declaration(class),
            DefaultDeclaration::Expression(expression) => visitor.visit_expression(expression),
        },
    }
}

pub fn walk_switch_case<V: AstVisitor>(visitor: &mut V, case: &SwitchCase) -> Result<(), V::Error> {
    walk_optional(visitor, case.test.as_ref())?;
    for statement in &case.consequent {
        visitor.visit_statement(statement)?;
    }
    Ok(())
}

pub fn walk_catch_clause<V: AstVisitor>(
    visitor: &mut V,
    clause: &CatchClause,
) -> Result<(), V::Error> {
    if let Some(param) = &clause.param {
        visitor.visit_pattern(param)?;
    }
    visitor.visit_block(&clause.body)
}

pub fn walk_function<V: AstVisitor>(visitor: &mut V, function: &Function) -> Result<(), V::Error> {
    for param in &function.params {
        visitor.visit_pattern(param)?;
    }
    match &function.body {
        FunctionBody::Block(block) => visitor.visit_block(block),
        FunctionBody::Expression(expression) => visitor.visit_expression(expression),
    }
}

fn walk_property_key<V: AstVisitor>(visitor: &mut V, key: &PropertyKey) -> Result<(), V::Error> {
    match key {
        PropertyKey::Computed(expression) => visitor.visit_expression(expression),
        PropertyKey::Identifier(_) | PropertyKey::PrivateName(_) | PropertyKey::Literal { .. } => {
            Ok(())
        }
    }
}

pub fn walk_class<V: AstVisitor>(visitor: &mut V, class: &Class) -> Result<(), V::Error> {
    for decorator in &class.decorators {
        visitor.visit_decorator(decorator)?;
    }
    walk_optional(visitor, class.super_class.as_ref())?;
    for member in &class.body {
        match member {
            ClassMember::Method {
                decorators,
                key,
                function,
                ..
            } => {
                for decorator in decorators {
                    visitor.visit_decorator(decorator)?;
                }
                walk_property_key(visitor, key)?;
                visitor.visit_function(function)?;
            }
            ClassMember::Property {
                decorators,
                key,
                value,
                ..
            } => {
                for decorator in decorators {
                    visitor.visit_decorator(decorator)?;
                }
                walk_property_key(visitor, key)?;
                walk_optional(visitor, value.as_ref())?;
            }
            ClassMember::StaticBlock(block) => visitor.visit_block(block)?,
            ClassMember::Empty { .. } => {}
        }
    }
    Ok(())
}

pub fn walk_comprehension<V: AstVisitor>(
    visitor: &mut V,
    comprehension: &Comprehension,
) -> Result<(), V::Error> {
    for block in &comprehension.blocks {
        visitor.visit_pattern(&block.left)?;
        visitor.visit_expression(&block.right)?;
    }
    if let Some(filter) = &comprehension.filter {
        visitor.visit_expression(filter)?;
    }
    visitor.visit_expression(&comprehension.body)
}

fn walk_template<V: AstVisitor>(
    visitor: &mut V,
    template: &TemplateLiteral,
) -> Result<(), V::Error> {
    for expression in &template.expressions {
        visitor.visit_expression(expression)?;
    }
    Ok(())
}

fn walk_all<'e, V: AstVisitor>(
    visitor: &mut V,
    expressions: impl IntoIterator<Item = &'e Expression>,
) -> Result<(), V::Error> {
    for expression in expressions {
        visitor.visit_expression(expression)?;
    }
    Ok(())
}

pub fn walk_expression<V: AstVisitor>(
    visitor: &mut V,
    expression: &Expression,
) -> Result<(), V::Error> {
    match expression {
        Expression::Identifier(_)
        | Expression::Literal { .. }
        | Expression::This { .. }
        | Expression::Super { .. }
        | Expression::Import { .. }
        | Expression::MetaProperty { .. }
        | Expression::Invalid { .. } => Ok(()),
        Expression::Template(template) => walk_template(visitor, template),
        Expression::TaggedTemplate { tag, quasi, .. } => {
            visitor.visit_expression(tag)?;
            walk_template(visitor, quasi)
        }
        Expression::Array { elements, .. } => walk_all(visitor, elements.iter().flatten()),
        Expression::Object { properties, .. } => {
            for property in properties {
                match property {
                    Property::KeyValue { key, value, .. } => {
                        walk_property_key(visitor, key)?;
                        visitor.visit_expression(value)?;
                    }
                    Property::Method { key, function, .. } => {
                        walk_property_key(visitor, key)?;
                        visitor.visit_function(function)?;
                    }
                    Property::Spread { argument, .. } => visitor.visit_expression(argument)?,
                }
            }
            Ok(())
        }
        Expression::Function(function) => visitor.visit_function(function),
        Expression::Class(class) => visitor.visit_class_expression(class),
        Expression::Unary { argument, .. }
        | Expression::Update { argument, .. }
        | Expression::Spread { argument, .. }
        | Expression::Await { argument, .. } => visitor.visit_expression(argument),
        Expression::Binary { left, right, .. } => {
            visitor.visit_expression(left)?;
            visitor.visit_expression(right)
        }
        Expression::Assignment { left, right, .. } => {
            visitor.visit_pattern(left)?;
            visitor.visit_expression(right)
        }
        Expression::Conditional {
            test,
            consequent,
            alternate,
            ..
        } => {
            visitor.visit_expression(test)?;
            visitor.visit_expression(consequent)?;
            visitor.visit_expression(alternate)
        }
        Expression::Call {
            callee, arguments, ..
        }
        | Expression::New {
            callee, arguments, ..
        } => {
            visitor.visit_expression(callee)?;
            walk_all(visitor, arguments)
        }
        Expression::Member {
            object, property, ..
        } => {
            visitor.visit_expression(object)?;
            match property {
                MemberProperty::Computed(expression) => visitor.visit_expression(expression),
                MemberProperty::Identifier(_) | MemberProperty::PrivateName(_) => Ok(()),
            }
        }
        Expression::Sequence { expressions, .. } => walk_all(visitor, expressions),
        Expression::Yield { argument, .. } => match argument {
            Some(argument) => visitor.visit_expression(argument),
            None => Ok(()),
        },
        Expression::Comprehension(comprehension) => {
            visitor.visit_comprehension(comprehension, false)
        }
        Expression::Generator(comprehension) => visitor.visit_comprehension(comprehension, true),
    }
}

pub fn walk_pattern<V: AstVisitor>(visitor: &mut V, pattern: &Pattern) -> Result<(), V::Error> {
    match pattern {
        Pattern::Identifier(_) | Pattern::Invalid { .. } => Ok(()),
        Pattern::Object { properties, .. } => {
            for property in properties {
                match property {
                    ObjectPatternProperty::Property { key, value, .. } => {
                        walk_property_key(visitor, key)?;
                        visitor.visit_pattern(value)?;
                    }
                    ObjectPatternProperty::Rest(rest) => visitor.visit_pattern(rest)?,
                }
            }
            Ok(())
        }
        Pattern::Array { elements, .. } => {
            for element in elements.iter().flatten() {
                visitor.visit_pattern(element)?;
            }
            Ok(())
        }
        Pattern::Rest { argument, .. } => visitor.visit_pattern(argument),
        Pattern::Assignment { left, right, .. } => {
            visitor.visit_pattern(left)?;
            visitor.visit_expression(right)
        }
        Pattern::Expression(expression) => visitor.visit_expression(expression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Parser, StrictParser};
    use crate::preprocessor::{Preprocessor, TokenPreprocessor};
    use crate::tokenizer::token::Tokenizer;
    use pretty_assertions::assert_eq;

    /// Records identifier names in visiting order.
    #[derive(Default)]
    struct NameCollector {
        names: Vec<String>,
    }

    impl AstVisitor for NameCollector {
        type Error = ();

        fn visit_expression(&mut self, expression: &Expression) -> Result<(), ()> {
            if let Expression::Identifier(identifier) = expression {
                self.names.push(identifier.name.clone());
            }
            walk_expression(self, expression)
        }

        fn visit_pattern(&mut self, pattern: &Pattern) -> Result<(), ()> {
            if let Pattern::Identifier(identifier) = pattern {
                self.names.push(identifier.name.clone());
            }
            walk_pattern(self, pattern)
        }
    }

    fn names(source: &str) -> Vec<String> {
        let tokens = TokenPreprocessor::new().process(Tokenizer::new().tokenize(source).unwrap());
        let (_, program) = StrictParser::default().parse(&tokens, 0).unwrap();
        let mut collector = NameCollector::default();
        collector.visit_program(&program).unwrap();
        collector.names
    }

    #[test]
    fn test_default_walk_visits_children_in_source_order() {
        assert_eq!(
            names("let a = b; if (c) d(e); else { for (f of g) h }"),
            vec!["a", "b", "c", "d", "e", "f", "g", "h"]
        );
    }

    #[test]
    fn test_default_walk_reaches_nested_functions_and_classes() {
        assert_eq!(
            names("class A extends B { m(p = q) { return [r, ...s] } static t = u }"),
            vec!["B", "p", "q", "r", "s", "u"]
        );
        assert_eq!(names("do x(); while (y)"), vec!["x", "y"]);
        assert_eq!(names("[for (v of w) if (v) v]"), vec!["v", "w", "v", "v"]);
    }

    #[test]
    fn test_each_node_visited_once() {
        assert_eq!(names("a = b = c"), vec!["a", "b", "c"]);
        assert_eq!(names("export default x; export { y }"), vec!["x"]);
    }
}
