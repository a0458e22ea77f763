use crate::analyzer::parser::{JsParser, PResult};
use crate::ast::{
    Decorator, DefaultDeclaration, ExportAll, ExportDefault, ExportNamed, ExportSpecifier,
    Identifier, ImportDeclaration, ImportSpecifier, Statement,
};
use crate::tokenizer::{
    keyword::Keyword,
    literal::Literal,
    symbol::Punctuator,
    token::{Token, TokenSpan},
};

impl<'a> JsParser<'a> {
    /// Imports and exports belong at the top level unless the options say
    /// otherwise.
    fn check_module_item_position(&mut self) -> PResult<()> {
        if self.options().allow_import_export_everywhere
            || (self.context.depth == 0 && !self.context.in_function)
        {
            return Ok(());
        }
        let error = self.failure("import and export may only appear at the top level");
        self.report(error)
    }

    fn expect_contextual(&mut self, word: &str) -> PResult<()> {
        if self.eat_contextual(word) {
            return Ok(());
        }
        let error = self.unexpected(word);
        self.report(error)
    }

    /// The string after `from`, or after a bare `import`.
    fn parse_module_source(&mut self) -> PResult<String> {
        match self.peek() {
            Some(TokenSpan {
                token: Token::Literal(Literal::String(source)),
                ..
            }) => {
                self.bump();
                Ok(source.clone())
            }
            _ => {
                let error = self.unexpected("module source");
                self.report(error)?;
                Ok(String::new())
            }
        }
    }

    /// Names in specifier lists may be reserved words or string literals.
    fn parse_module_export_name(&mut self) -> PResult<Identifier> {
        if let Some(TokenSpan {
            token: Token::Literal(Literal::String(name)),
            span,
            ..
        }) = self.peek()
        {
            self.bump();
            return Ok(Identifier {
                name: name.clone(),
                span: *span,
            });
        }
        self.parse_identifier_name()
    }

    /// `with { type: "json" }` or the older `assert { ... }`. Attributes do
    /// not take part in the structure, so they are stepped over.
    fn skip_import_attributes(&mut self) -> PResult<()> {
        let introduced = self.eat_keyword(Keyword::With)
            || (!self.newline_before() && self.eat_contextual("assert"));
        if !introduced {
            return Ok(());
        }
        if !self.at(Punctuator::LeftBrace) {
            let error = self.unexpected("{");
            return self.report(error);
        }
        match self.matching_close(self.pos) {
            Some(close) => {
                self.pos = close + 1;
                Ok(())
            }
            None => {
                let error = self.unexpected("}");
                self.report(error)
            }
        }
    }

    pub(crate) fn parse_import_declaration(&mut self) -> PResult<Statement> {
        let start = self.start();
        self.check_module_item_position()?;
        self.expect_keyword(Keyword::Import)?;

        let mut specifiers = Vec::new();
        if !matches!(self.peek_token(), Some(Token::Literal(Literal::String(_)))) {
            if self.at_identifier() {
                specifiers.push(ImportSpecifier::Default(self.parse_identifier()?));
                self.eat(Punctuator::Comma);
            }
            if self.at(Punctuator::Star) {
                let namespace_start = self.start();
                self.bump();
                self.expect_contextual("as")?;
                let local = self.parse_identifier()?;
                specifiers.push(ImportSpecifier::Namespace {
                    local,
                    span: self.span_from(namespace_start),
                });
            } else if self.eat(Punctuator::LeftBrace) {
                while !self.at(Punctuator::RightBrace) && !self.is_eof() {
                    let specifier_start = self.start();
                    let imported = self.parse_module_export_name()?;
                    let local = if self.eat_contextual("as") {
                        self.parse_identifier()?
                    } else {
                        imported.clone()
                    };
                    specifiers.push(ImportSpecifier::Named {
                        imported,
                        local,
                        span: self.span_from(specifier_start),
                    });
                    if !self.eat(Punctuator::Comma) {
                        break;
                    }
                }
                self.expect(Punctuator::RightBrace)?;
            }
            self.expect_contextual("from")?;
        }

        let source = self.parse_module_source()?;
        self.skip_import_attributes()?;
        self.consume_semicolon()?;
        Ok(Statement::Import(ImportDeclaration {
            specifiers,
            source,
            span: self.span_from(start),
        }))
    }

    /// Every `export` form. `decorators` were written before `export` and
    /// belong to the exported class.
    pub(crate) fn parse_export(&mut self, decorators: Vec<Decorator>) -> PResult<Statement> {
        let start = self.start();
        self.check_module_item_position()?;
        self.expect_keyword(Keyword::Export)?;

        if self.eat_keyword(Keyword::Default) {
            let declaration = self.parse_export_default(decorators)?;
            return Ok(Statement::ExportDefault(ExportDefault {
                declaration,
                span: self.span_from(start),
            }));
        }

        if self.eat(Punctuator::Star) {
            let exported = if self.eat_contextual("as") {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_module_source()?;
            self.skip_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(Statement::ExportAll(ExportAll {
                exported,
                source,
                span: self.span_from(start),
            }));
        }

        if self.eat(Punctuator::LeftBrace) {
            let mut specifiers = Vec::new();
            while !self.at(Punctuator::RightBrace) && !self.is_eof() {
                let specifier_start = self.start();
                let local = self.parse_module_export_name()?;
                let exported = if self.eat_contextual("as") {
                    self.parse_module_export_name()?
                } else {
                    local.clone()
                };
                specifiers.push(ExportSpecifier {
                    local,
                    exported,
                    span: self.span_from(specifier_start),
                });
                if !self.eat(Punctuator::Comma) {
                    break;
                }
            }
            self.expect(Punctuator::RightBrace)?;
            let source = if self.eat_contextual("from") {
                let source = self.parse_module_source()?;
                self.skip_import_attributes()?;
                Some(source)
            } else {
                None
            };
            self.consume_semicolon()?;
            return Ok(Statement::ExportNamed(ExportNamed {
                declaration: None,
                specifiers,
                source,
                span: self.span_from(start),
            }));
        }

        let declaration = if self.at_keyword(Keyword::Class) || self.at(Punctuator::At) {
            let mut decorators = decorators;
            decorators.extend(self.parse_decorators()?);
            Statement::ClassDeclaration(Box::new(self.parse_class(decorators, true)?))
        } else {
            let starts_declaration = self.at_keyword(Keyword::Var)
                || self.at_keyword(Keyword::Const)
                || self.at_keyword(Keyword::Function)
                || self.at_contextual("let")
                || (self.at_contextual("async") && self.nth_is_keyword(1, Keyword::Function));
            if !starts_declaration {
                return Err(self.unexpected("declaration"));
            }
            self.parse_statement()?
        };
        Ok(Statement::ExportNamed(ExportNamed {
            declaration: Some(Box::new(declaration)),
            specifiers: Vec::new(),
            source: None,
            span: self.span_from(start),
        }))
    }

    fn parse_export_default(&mut self, decorators: Vec<Decorator>) -> PResult<DefaultDeclaration> {
        if self.at_keyword(Keyword::Class) || self.at(Punctuator::At) {
            let mut decorators = decorators;
            decorators.extend(self.parse_decorators()?);
            let class = self.parse_class(decorators, false)?;
            return Ok(DefaultDeclaration::Class(Box::new(class)));
        }
        let is_function = self.at_keyword(Keyword::Function)
            || (self.at_contextual("async")
                && self.nth_is_keyword(1, Keyword::Function)
                && !self.nth_newline_before(1));
        if is_function {
            let function = self.parse_function(false)?;
            return Ok(DefaultDeclaration::Function(Box::new(function)));
        }
        let expression = self.parse_assignment(false)?;
        self.consume_semicolon()?;
        Ok(DefaultDeclaration::Expression(expression))
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::parser::{JsParser, ParseMode, ParseOptions};
    use crate::ast::{DefaultDeclaration, ImportSpecifier, Statement};
    use crate::preprocessor::{Preprocessor, TokenPreprocessor};
    use crate::tokenizer::token::Tokenizer;
    use pretty_assertions::assert_eq;

    fn parse(source: &str, options: ParseOptions) -> Result<Vec<Statement>, String> {
        let tokens = TokenPreprocessor::new().process(Tokenizer::new().tokenize(source).unwrap());
        let mut parser = JsParser::new(&tokens, options, ParseMode::Strict);
        parser
            .parse_program()
            .map(|program| program.body)
            .map_err(|e| e.to_string())
    }

    #[test]
    fn test_import_forms() {
        let body = parse(
            r#"import a, { b as c, default as d } from "m"; import * as ns from "n"; import "side";"#,
            ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(body.len(), 3);
        let Statement::Import(first) = &body[0] else {
            panic!("expected import");
        };
        assert_eq!(first.source, "m");
        assert_eq!(first.specifiers.len(), 3);
        assert!(matches!(&first.specifiers[0], ImportSpecifier::Default(id) if id.name == "a"));
        let Statement::Import(bare) = &body[2] else {
            panic!("expected import");
        };
        assert!(bare.specifiers.is_empty());
    }

    #[test]
    fn test_import_attributes_are_skipped() {
        let body = parse(
            r#"import data from "./d.json" with { type: "json" };"#,
            ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_export_forms() {
        let body = parse(
            "export default async function () {}\nexport * as all from 'x'\nexport { a as b }\nexport const c = 1\n@dec export class D {}",
            ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(body.len(), 5);
        assert!(matches!(
            &body[0],
            Statement::ExportDefault(export) if matches!(export.declaration, DefaultDeclaration::Function(_))
        ));
        assert!(matches!(&body[1], Statement::ExportAll(all) if all.exported.is_some()));
        let Statement::ExportNamed(class_export) = &body[4] else {
            panic!("expected named export");
        };
        let Some(declaration) = &class_export.declaration else {
            panic!("expected declaration");
        };
        assert!(
            matches!(declaration.as_ref(), Statement::ClassDeclaration(class) if class.decorators.len() == 1)
        );
    }

    #[test]
    fn test_nested_import_respects_options() {
        let source = "{ import x from 'y' }";
        assert!(parse(source, ParseOptions::default()).is_ok());
        let options = ParseOptions {
            allow_import_export_everywhere: false,
            ..ParseOptions::default()
        };
        assert!(parse(source, options).is_err());
    }
}
