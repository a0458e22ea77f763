use crate::analyzer::parser::{JsParser, PResult};
use crate::ast::{Expression, ObjectPatternProperty, Pattern, Property, PropertyKey, Span};
use crate::tokenizer::{symbol::Punctuator, token::Token};

impl<'a> JsParser<'a> {
    /// Identifier, array pattern or object pattern in binding position.
    pub(crate) fn parse_binding_target(&mut self) -> PResult<Pattern> {
        match self.peek_token() {
            Some(Token::Punctuator(Punctuator::LeftBracket)) => self.parse_array_binding(),
            Some(Token::Punctuator(Punctuator::LeftBrace)) => self.parse_object_binding(),
            _ => match self.parse_identifier() {
                Ok(identifier) => Ok(Pattern::Identifier(identifier)),
                Err(error) => {
                    self.report(error)?;
                    Ok(Pattern::Invalid {
                        span: self.current_span(),
                    })
                }
            },
        }
    }

    /// Binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self) -> PResult<Pattern> {
        let start = self.start();
        let target = self.parse_binding_target()?;
        if !self.eat(Punctuator::Equal) {
            return Ok(target);
        }
        let right = self.parse_assignment(false)?;
        Ok(Pattern::Assignment {
            left: Box::new(target),
            right: Box::new(right),
            span: self.span_from(start),
        })
    }

    fn parse_binding_rest(&mut self) -> PResult<Pattern> {
        let start = self.start();
        self.bump();
        let argument = self.parse_binding_target()?;
        Ok(Pattern::Rest {
            argument: Box::new(argument),
            span: self.span_from(start),
        })
    }

    fn parse_array_binding(&mut self) -> PResult<Pattern> {
        let start = self.start();
        self.bump();
        let mut elements = Vec::new();
        while !self.at(Punctuator::RightBracket) && !self.is_eof() {
            if self.eat(Punctuator::Comma) {
                elements.push(None);
                continue;
            }
            let element = if self.at(Punctuator::Ellipsis) {
                self.parse_binding_rest()?
            } else {
                self.parse_binding_element()?
            };
            elements.push(Some(element));
            if !self.at(Punctuator::RightBracket) && !self.eat(Punctuator::Comma) {
                break;
            }
        }
        self.expect(Punctuator::RightBracket)?;
        Ok(Pattern::Array {
            elements,
            span: self.span_from(start),
        })
    }

    fn parse_object_binding(&mut self) -> PResult<Pattern> {
        let start = self.start();
        self.bump();
        let mut properties = Vec::new();
        while !self.at(Punctuator::RightBrace) && !self.is_eof() {
            if self.at(Punctuator::Ellipsis) {
                properties.push(ObjectPatternProperty::Rest(self.parse_binding_rest()?));
            } else {
                properties.push(self.parse_binding_property()?);
            }
            if !self.eat(Punctuator::Comma) {
                break;
            }
        }
        self.expect(Punctuator::RightBrace)?;
        Ok(Pattern::Object {
            properties,
            span: self.span_from(start),
        })
    }

    fn parse_binding_property(&mut self) -> PResult<ObjectPatternProperty> {
        let start = self.start();
        let key = self.parse_property_key()?;
        if self.eat(Punctuator::Colon) {
            let value = self.parse_binding_element()?;
            return Ok(ObjectPatternProperty::Property {
                key,
                value,
                shorthand: false,
                span: self.span_from(start),
            });
        }

        let PropertyKey::Identifier(identifier) = &key else {
            return Err(self.unexpected(":"));
        };
        let mut value = Pattern::Identifier(identifier.clone());
        if self.eat(Punctuator::Equal) {
            let right = self.parse_assignment(false)?;
            value = Pattern::Assignment {
                left: Box::new(value),
                right: Box::new(right),
                span: self.span_from(start),
            };
        }
        Ok(ObjectPatternProperty::Property {
            key,
            value,
            shorthand: true,
            span: self.span_from(start),
        })
    }

    /// Reinterprets an expression already parsed as the left side of `=` (or
    /// a `for-in`/`for-of` head) as a pattern.
    pub(crate) fn to_assignment_target(&mut self, expression: Expression) -> PResult<Pattern> {
        match expression {
            Expression::Array { elements, span } => {
                let elements = elements
                    .into_iter()
                    .map(|element| element.map(|e| self.to_element_target(e)).transpose())
                    .collect::<PResult<Vec<_>>>()?;
                Ok(Pattern::Array { elements, span })
            }
            Expression::Object { properties, span } => {
                let properties = properties
                    .into_iter()
                    .map(|property| self.to_object_target(property))
                    .collect::<PResult<Vec<_>>>()?;
                Ok(Pattern::Object { properties, span })
            }
            other => self.to_simple_target(other),
        }
    }

    /// Target of a compound assignment or update: a name or a member.
    pub(crate) fn to_simple_target(&mut self, expression: Expression) -> PResult<Pattern> {
        match expression {
            Expression::Identifier(identifier) => Ok(Pattern::Identifier(identifier)),
            Expression::Member { .. } => Ok(Pattern::Expression(Box::new(expression))),
            Expression::Invalid { span } => Ok(Pattern::Invalid { span }),
            other => self.invalid_target(other.span()),
        }
    }

    fn to_element_target(&mut self, expression: Expression) -> PResult<Pattern> {
        match expression {
            Expression::Spread { argument, span } => Ok(Pattern::Rest {
                argument: Box::new(self.to_assignment_target(*argument)?),
                span,
            }),
            Expression::Assignment {
                operator: Punctuator::Equal,
                left,
                right,
                span,
            } => Ok(Pattern::Assignment { left, right, span }),
            other => self.to_assignment_target(other),
        }
    }

    fn to_object_target(&mut self, property: Property) -> PResult<ObjectPatternProperty> {
        match property {
            Property::KeyValue {
                key,
                value,
                shorthand,
                span,
            } => Ok(ObjectPatternProperty::Property {
                key,
                value: self.to_element_target(value)?,
                shorthand,
                span,
            }),
            Property::Spread { argument, span } => Ok(ObjectPatternProperty::Rest(Pattern::Rest {
                argument: Box::new(self.to_assignment_target(argument)?),
                span,
            })),
            Property::Method { span, .. } => {
                let invalid = self.invalid_target(span)?;
                Ok(ObjectPatternProperty::Rest(invalid))
            }
        }
    }

    fn invalid_target(&mut self, span: Span) -> PResult<Pattern> {
        let error = self.failure(format!("invalid assignment target at {}", span.start));
        self.report(error)?;
        Ok(Pattern::Invalid { span })
    }
}
