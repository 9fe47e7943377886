use std::iter::once;

use logos::{Lexer, Logos, Span};

use crate::{
    ast::{self, Position},
    error::ParseErrorKind,
    lex::{next_token, Token},
    lines::LineResolver,
};

#[cfg(test)]
mod tests;

/// Stands in for "any identifier" in a list of terminators.
const ANY_IDENT: Token<'static> = Token::Ident("");

pub(crate) fn parse_file(
    source: &str,
    allow_mixed_reserved: bool,
) -> Result<ast::Proto, ParseErrorKind> {
    let mut parser = Parser::new(source, allow_mixed_reserved);
    parser.parse_proto()
}

struct Parser<'a> {
    lexer: Lexer<'a, Token<'a>>,
    peek: Option<(Token<'a>, Span)>,
    lines: LineResolver<'a>,
    allow_mixed_reserved: bool,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, allow_mixed_reserved: bool) -> Self {
        Parser {
            lexer: Token::lexer(source),
            peek: None,
            lines: LineResolver::new(source),
            allow_mixed_reserved,
        }
    }

    fn parse_proto(&mut self) -> Result<ast::Proto, ParseErrorKind> {
        let position = self.position()?;

        self.expect_eq(Token::SYNTAX)?;
        self.expect_eq(Token::Equals)?;
        let syntax = self.parse_string()?;
        self.expect_eq(Token::Semicolon)?;

        let mut imports = Vec::new();
        let mut packages = Vec::new();
        let mut options = Vec::new();
        let mut enums = Vec::new();
        let mut services = Vec::new();
        let mut messages = Vec::new();
        let mut extends = Vec::new();

        loop {
            match self.peek()? {
                Some((Token::Ident("import"), _)) => imports.push(self.parse_import()?),
                Some((Token::Ident("package"), _)) => packages.push(self.parse_package()?),
                Some((Token::Ident("option"), _)) => options.push(self.parse_option()?),
                Some((Token::Ident("enum"), _)) => enums.push(self.parse_enum()?),
                Some((Token::Ident("service"), _)) => services.push(self.parse_service()?),
                Some((Token::Ident("message"), _)) => messages.push(self.parse_message()?),
                Some((Token::Ident("extend"), _)) => extends.push(self.parse_extend()?),
                Some((Token::Semicolon, _)) => {
                    self.bump();
                }
                None => break,
                _ => self.unexpected_token(
                    "'import', 'package', 'option', 'enum', 'service', 'message', 'extend' or ';'",
                )?,
            }
        }

        Ok(ast::Proto {
            position,
            syntax,
            imports,
            packages,
            options,
            enums,
            services,
            messages,
            extends,
        })
    }

    fn parse_import(&mut self) -> Result<ast::Import, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::IMPORT)?;

        let kind = match self.peek()? {
            Some((Token::Ident("weak"), _)) => {
                self.bump();
                Some(ast::ImportKind::Weak)
            }
            Some((Token::Ident("public"), _)) => {
                self.bump();
                Some(ast::ImportKind::Public)
            }
            Some((Token::StringLiteral(_), _)) => None,
            _ => self.unexpected_token("a string literal, 'public' or 'weak'")?,
        };

        let path = self.parse_string()?;

        self.expect_eq(Token::Semicolon)?;

        Ok(ast::Import {
            position,
            kind,
            path,
        })
    }

    fn parse_package(&mut self) -> Result<ast::Package, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::PACKAGE)?;

        let name = self.parse_full_ident(&[Token::Semicolon])?;

        self.expect_eq(Token::Semicolon)?;

        Ok(ast::Package { position, name })
    }

    fn parse_option(&mut self) -> Result<ast::Option, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::OPTION)?;

        let body = self.parse_option_body(&[Token::Semicolon])?;

        self.expect_eq(Token::Semicolon)?;

        Ok(ast::Option { position, body })
    }

    fn parse_options_list(&mut self) -> Result<Vec<ast::ValueOption>, ParseErrorKind> {
        const TERMINATORS: &[Token<'static>] = &[Token::Comma, Token::RightBracket];

        self.expect_eq(Token::LeftBracket)?;

        let mut options = vec![self.parse_option_body(TERMINATORS)?];
        loop {
            match self.peek()? {
                Some((Token::Comma, _)) => {
                    self.bump();
                    options.push(self.parse_option_body(TERMINATORS)?);
                }
                Some((Token::RightBracket, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("',' or ']'")?,
            }
        }

        Ok(options)
    }

    fn parse_option_body(
        &mut self,
        terminators: &[Token<'a>],
    ) -> Result<ast::ValueOption, ParseErrorKind> {
        let position = self.position()?;

        let mut parts = vec![self.parse_option_name_part()?];
        loop {
            match self.peek()? {
                Some((Token::Dot, _)) => {
                    self.bump();
                    parts.push(self.parse_option_name_part()?);
                }
                Some((Token::Equals, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("'.' or '='")?,
            }
        }

        let value = self.parse_constant(terminators)?;

        Ok(ast::ValueOption {
            position,
            name: ast::OptionName { parts },
            value,
        })
    }

    fn parse_option_name_part(&mut self) -> Result<ast::OptionNamePart, ParseErrorKind> {
        match self.peek()? {
            Some((Token::LeftParen, _)) => {
                self.bump();
                let name = self.parse_type_name(&[Token::RightParen])?;
                self.expect_eq(Token::RightParen)?;
                Ok(ast::OptionNamePart::Extension(name))
            }
            Some((Token::Ident(value), _)) => {
                self.bump();
                Ok(ast::OptionNamePart::Ident(value.to_owned()))
            }
            _ => self.unexpected_token("an identifier or '('"),
        }
    }

    fn parse_constant(&mut self, terminators: &[Token<'a>]) -> Result<ast::Constant, ParseErrorKind> {
        match self.peek()? {
            Some((Token::Minus, _)) => {
                self.bump();
                let value = match self.peek()? {
                    Some((Token::IntLiteral(_) | Token::FloatLiteral(_), _)) => {
                        self.parse_number()?
                    }
                    Some((Token::Ident(value), _)) if !is_bool(value) => {
                        ast::Constant::Reference(self.parse_full_ident(terminators)?)
                    }
                    _ => self.unexpected_token("a numeric literal or identifier")?,
                };
                Ok(ast::Constant::Negated(Box::new(value)))
            }
            Some((Token::Plus, _)) => {
                self.bump();
                self.parse_number()
            }
            Some((Token::IntLiteral(_) | Token::FloatLiteral(_), _)) => self.parse_number(),
            Some((Token::StringLiteral(_), _)) => Ok(ast::Constant::String(self.parse_string()?)),
            Some((Token::Ident("true"), _)) => {
                self.bump();
                Ok(ast::Constant::Bool(true))
            }
            Some((Token::Ident("false"), _)) => {
                self.bump();
                Ok(ast::Constant::Bool(false))
            }
            Some((Token::Ident(_), _)) => {
                Ok(ast::Constant::Reference(self.parse_full_ident(terminators)?))
            }
            _ => self.unexpected_token("a constant"),
        }
    }

    fn parse_number(&mut self) -> Result<ast::Constant, ParseErrorKind> {
        match self.peek()? {
            Some((Token::IntLiteral(value), _)) => {
                self.bump();
                Ok(ast::Constant::Int(value))
            }
            Some((Token::FloatLiteral(value), _)) => {
                self.bump();
                Ok(ast::Constant::Float(value))
            }
            _ => self.unexpected_token("a numeric literal"),
        }
    }

    fn parse_message(&mut self) -> Result<ast::Message, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::MESSAGE)?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::LeftBrace)?;

        let mut enums = Vec::new();
        let mut messages = Vec::new();
        let mut map_fields = Vec::new();
        let mut options = Vec::new();
        let mut oneofs = Vec::new();
        let mut reserved = Vec::new();
        let mut fields = Vec::new();
        let mut extends = Vec::new();

        loop {
            match self.peek()? {
                Some((Token::Ident("enum"), _)) => enums.push(self.parse_enum()?),
                Some((Token::Ident("message"), _)) => messages.push(self.parse_message()?),
                Some((Token::Ident("map"), _)) => map_fields.push(self.parse_map_field()?),
                Some((Token::Ident("option"), _)) => options.push(self.parse_option()?),
                Some((Token::Ident("oneof"), _)) => oneofs.push(self.parse_oneof()?),
                Some((Token::Ident("reserved"), _)) => reserved.push(self.parse_reserved(false)?),
                Some((Token::Ident("extend"), _)) => extends.push(self.parse_extend()?),
                Some((Token::Ident(_) | Token::Dot, _)) => fields.push(self.parse_field()?),
                Some((Token::Semicolon, _)) => {
                    self.bump();
                }
                Some((Token::RightBrace, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token(
                    "a message field, oneof, reserved range, enum, message, option or '}'",
                )?,
            }
        }

        Ok(ast::Message {
            position,
            name,
            enums,
            messages,
            map_fields,
            options,
            oneofs,
            reserved,
            fields,
            extends,
        })
    }

    fn parse_field(&mut self) -> Result<ast::Field, ParseErrorKind> {
        let position = self.position()?;

        let label = match self.peek()? {
            Some((Token::Ident("repeated"), _)) => {
                self.bump();
                Some(ast::FieldLabel::Repeated)
            }
            Some((Token::Ident("optional"), _)) => {
                self.bump();
                Some(ast::FieldLabel::Optional)
            }
            _ => None,
        };

        let ty = self.parse_type_name(&[ANY_IDENT])?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::Equals)?;

        let number = self.parse_int(false)?;

        let options = self.parse_field_options()?;

        Ok(ast::Field {
            position,
            label,
            ty,
            name,
            number,
            options,
        })
    }

    fn parse_field_options(&mut self) -> Result<Vec<ast::ValueOption>, ParseErrorKind> {
        match self.peek()? {
            Some((Token::LeftBracket, _)) => {
                let options = self.parse_options_list()?;
                self.expect_eq(Token::Semicolon)?;
                Ok(options)
            }
            Some((Token::Semicolon, _)) => {
                self.bump();
                Ok(vec![])
            }
            _ => self.unexpected_token("';' or '['"),
        }
    }

    fn parse_oneof(&mut self) -> Result<ast::Oneof, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::ONEOF)?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::LeftBrace)?;

        let mut options = Vec::new();
        let mut fields = Vec::new();

        loop {
            match self.peek()? {
                Some((Token::Ident("option"), _)) => options.push(self.parse_option()?),
                Some((Token::Ident(_) | Token::Dot, _)) => fields.push(self.parse_oneof_field()?),
                Some((Token::Semicolon, _)) => {
                    self.bump();
                }
                Some((Token::RightBrace, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("a oneof field, option or '}'")?,
            }
        }

        Ok(ast::Oneof {
            position,
            name,
            options,
            fields,
        })
    }

    fn parse_oneof_field(&mut self) -> Result<ast::OneofField, ParseErrorKind> {
        let position = self.position()?;

        // Oneof members cannot carry a label.
        if let Some((Token::Ident("repeated" | "optional"), _)) = self.peek()? {
            return self.unexpected_token("a field type");
        }

        let ty = self.parse_type_name(&[ANY_IDENT])?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::Equals)?;

        let number = self.parse_int(false)?;

        let options = self.parse_field_options()?;

        Ok(ast::OneofField {
            position,
            ty,
            name,
            number,
            options,
        })
    }

    fn parse_map_field(&mut self) -> Result<ast::MapField, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::MAP)?;

        self.expect_eq(Token::LeftAngleBracket)?;
        let key_type = match self.peek()? {
            Some((Token::Ident(name), _)) => ast::KeyType::from_name(name),
            _ => None,
        };
        let key_type = match key_type {
            Some(key_type) => {
                self.bump();
                key_type
            }
            None => self.unexpected_token("an integer type, 'bool' or 'string'")?,
        };
        self.expect_eq(Token::Comma)?;
        let value_type = self.parse_type_name(&[Token::RightAngleBracket])?;
        self.expect_eq(Token::RightAngleBracket)?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::Equals)?;

        let number = self.parse_int(false)?;

        let options = self.parse_field_options()?;

        Ok(ast::MapField {
            position,
            key_type,
            value_type,
            name,
            number,
            options,
        })
    }

    /// Parses a `reserved` statement. Enums may reserve negative values.
    fn parse_reserved(&mut self, allow_negative: bool) -> Result<ast::Reserved, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::RESERVED)?;

        let mut names = Vec::new();
        let mut ranges = Vec::new();

        loop {
            match self.peek()? {
                Some((Token::StringLiteral(_), span)) => {
                    if !ranges.is_empty() && !self.allow_mixed_reserved {
                        return Err(ParseErrorKind::MixedReserved { span });
                    }
                    names.push(self.parse_string()?);
                }
                Some((Token::IntLiteral(_) | Token::Minus, span)) => {
                    if !names.is_empty() && !self.allow_mixed_reserved {
                        return Err(ParseErrorKind::MixedReserved { span });
                    }
                    ranges.push(self.parse_range(allow_negative)?);
                }
                _ => self.unexpected_token("a string literal or integer")?,
            }

            match self.peek()? {
                Some((Token::Comma, _)) => {
                    self.bump();
                }
                Some((Token::Semicolon, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("',' or ';'")?,
            }
        }

        Ok(ast::Reserved {
            position,
            names,
            ranges,
        })
    }

    fn parse_range(&mut self, allow_negative: bool) -> Result<ast::Range, ParseErrorKind> {
        let from = self.parse_int(allow_negative)?;

        let to = match self.peek()? {
            Some((Token::Ident("to"), _)) => {
                self.bump();
                match self.peek()? {
                    Some((Token::Ident("max"), _)) => {
                        self.bump();
                        ast::RangeEnd::Max
                    }
                    Some((Token::IntLiteral(_), _)) => ast::RangeEnd::Int(self.parse_int(false)?),
                    Some((Token::Minus, _)) if allow_negative => {
                        ast::RangeEnd::Int(self.parse_int(true)?)
                    }
                    _ => self.unexpected_token("an integer or 'max'")?,
                }
            }
            Some((Token::Comma | Token::Semicolon, _)) => ast::RangeEnd::None,
            _ => self.unexpected_token("'to', ',' or ';'")?,
        };

        Ok(ast::Range { from, to })
    }

    fn parse_enum(&mut self) -> Result<ast::Enum, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::ENUM)?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::LeftBrace)?;

        let mut options = Vec::new();
        let mut fields = Vec::new();
        let mut reserved = Vec::new();

        loop {
            match self.peek()? {
                Some((Token::Ident("option"), _)) => options.push(self.parse_option()?),
                Some((Token::Ident("reserved"), _)) => reserved.push(self.parse_reserved(true)?),
                Some((Token::Ident(_), _)) => fields.push(self.parse_enum_value()?),
                Some((Token::Semicolon, _)) => {
                    self.bump();
                }
                Some((Token::RightBrace, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("an identifier, 'option', 'reserved' or '}'")?,
            }
        }

        Ok(ast::Enum {
            position,
            name,
            options,
            fields,
            reserved,
        })
    }

    fn parse_enum_value(&mut self) -> Result<ast::EnumField, ParseErrorKind> {
        let position = self.position()?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::Equals)?;

        let value = self.parse_int(true)?;

        let options = self.parse_field_options()?;

        Ok(ast::EnumField {
            position,
            name,
            value,
            options,
        })
    }

    fn parse_service(&mut self) -> Result<ast::Service, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::SERVICE)?;

        let name = self.parse_ident()?;

        self.expect_eq(Token::LeftBrace)?;

        let mut options = Vec::new();
        let mut rpcs = Vec::new();

        loop {
            match self.peek()? {
                Some((Token::Ident("rpc"), _)) => rpcs.push(self.parse_rpc()?),
                Some((Token::Ident("option"), _)) => options.push(self.parse_option()?),
                Some((Token::Semicolon, _)) => {
                    self.bump();
                }
                Some((Token::RightBrace, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("'rpc', 'option', ';' or '}'")?,
            }
        }

        Ok(ast::Service {
            position,
            name,
            options,
            rpcs,
        })
    }

    fn parse_rpc(&mut self) -> Result<ast::Rpc, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::RPC)?;

        let name = self.parse_ident()?;

        let (request_stream, request_type) = self.parse_rpc_type()?;
        self.expect_eq(Token::RETURNS)?;
        let (return_stream, return_type) = self.parse_rpc_type()?;

        let mut options = Vec::new();
        match self.peek()? {
            Some((Token::Semicolon, _)) => {
                self.bump();
            }
            Some((Token::LeftBrace, _)) => {
                self.bump();
                loop {
                    match self.peek()? {
                        Some((Token::Ident("option"), _)) => options.push(self.parse_option()?),
                        Some((Token::Semicolon, _)) => {
                            self.bump();
                        }
                        Some((Token::RightBrace, _)) => {
                            self.bump();
                            break;
                        }
                        _ => self.unexpected_token("'option', ';' or '}'")?,
                    }
                }
            }
            _ => self.unexpected_token("';' or '{'")?,
        }

        Ok(ast::Rpc {
            position,
            name,
            request_type,
            request_stream,
            return_type,
            return_stream,
            options,
        })
    }

    /// Parses `( [stream] Type )`. A type named `stream` is recognized when the keyword is
    /// followed by `)`, or by a `.` with no whitespace in between.
    fn parse_rpc_type(&mut self) -> Result<(bool, ast::TypeName), ParseErrorKind> {
        const TERMINATORS: &[Token<'static>] = &[Token::RightParen];

        self.expect_eq(Token::LeftParen)?;

        let result = match self.peek()? {
            Some((Token::Ident("stream"), stream)) => {
                self.bump();
                match self.peek()? {
                    Some((Token::RightParen, _)) => (false, ast::TypeName::from("stream")),
                    Some((Token::Dot, dot)) if dot.start == stream.end => {
                        let name =
                            self.parse_full_ident_rest(vec!["stream".to_owned()], TERMINATORS)?;
                        (
                            false,
                            ast::TypeName {
                                leading_dot: false,
                                name,
                            },
                        )
                    }
                    _ => (true, self.parse_type_name(TERMINATORS)?),
                }
            }
            _ => (false, self.parse_type_name(TERMINATORS)?),
        };

        self.expect_eq(Token::RightParen)?;

        Ok(result)
    }

    fn parse_extend(&mut self) -> Result<ast::Extend, ParseErrorKind> {
        let position = self.position()?;
        self.expect_eq(Token::EXTEND)?;

        let extendee = self.parse_type_name(&[Token::LeftBrace])?;

        self.expect_eq(Token::LeftBrace)?;

        let mut fields = Vec::new();
        loop {
            match self.peek()? {
                Some((Token::Ident(_) | Token::Dot, _)) => fields.push(self.parse_field()?),
                Some((Token::Semicolon, _)) => {
                    self.bump();
                }
                Some((Token::RightBrace, _)) => {
                    self.bump();
                    break;
                }
                _ => self.unexpected_token("a message field, ';' or '}'")?,
            }
        }

        Ok(ast::Extend {
            position,
            extendee,
            fields,
        })
    }

    fn parse_type_name(&mut self, terminators: &[Token<'a>]) -> Result<ast::TypeName, ParseErrorKind> {
        let leading_dot = match self.peek()? {
            Some((Token::Dot, _)) => {
                self.bump();
                true
            }
            Some((Token::Ident(_), _)) => false,
            _ => self.unexpected_token("a type name")?,
        };

        let name = self.parse_full_ident(terminators)?;

        Ok(ast::TypeName { leading_dot, name })
    }

    fn parse_full_ident(&mut self, terminators: &[Token<'a>]) -> Result<ast::FullIdent, ParseErrorKind> {
        let first = self.parse_ident()?;
        self.parse_full_ident_rest(vec![first], terminators)
    }

    fn parse_full_ident_rest(
        &mut self,
        mut parts: Vec<String>,
        terminators: &[Token<'a>],
    ) -> Result<ast::FullIdent, ParseErrorKind> {
        loop {
            match self.peek()? {
                Some((Token::Dot, _)) => {
                    self.bump();
                }
                Some((tok, _)) if is_terminator(terminators, &tok) => {
                    return Ok(ast::FullIdent { parts });
                }
                _ => self.unexpected_token(fmt_expected(
                    once(Token::Dot).chain(terminators.iter().cloned()),
                ))?,
            }

            parts.push(self.parse_ident()?);
        }
    }

    fn parse_ident(&mut self) -> Result<String, ParseErrorKind> {
        match self.peek()? {
            Some((Token::Ident(value), _)) => {
                self.bump();
                Ok(value.to_owned())
            }
            _ => self.unexpected_token("an identifier"),
        }
    }

    /// Parses an integer into an `i64`, optionally preceded by a `-`.
    fn parse_int(&mut self, allow_negative: bool) -> Result<i64, ParseErrorKind> {
        let negative = match self.peek()? {
            Some((Token::Minus, span)) if allow_negative => {
                self.bump();
                Some(span)
            }
            _ => None,
        };

        match self.peek()? {
            Some((Token::IntLiteral(value), span)) => {
                self.bump();
                match negative {
                    Some(minus) => i64::try_from(-i128::from(value)).map_err(|_| {
                        ParseErrorKind::IntegerOutOfRange {
                            span: minus.start..span.end,
                        }
                    }),
                    None => i64::try_from(value)
                        .map_err(|_| ParseErrorKind::IntegerOutOfRange { span }),
                }
            }
            _ if allow_negative => self.unexpected_token("an integer"),
            _ => self.unexpected_token("a positive integer"),
        }
    }

    /// Parses a string literal, concatenating any adjacent literals.
    fn parse_string(&mut self) -> Result<String, ParseErrorKind> {
        let (mut bytes, mut span) = match self.peek()? {
            Some((Token::StringLiteral(value), span)) => {
                self.bump();
                (value.into_owned(), span)
            }
            _ => return self.unexpected_token("a string literal"),
        };

        while let Some((Token::StringLiteral(value), next)) = self.peek()? {
            self.bump();
            bytes.extend_from_slice(&value);
            span.end = next.end;
        }

        String::from_utf8(bytes).map_err(|_| ParseErrorKind::InvalidUtf8String { span })
    }

    fn expect_eq(&mut self, t: Token<'a>) -> Result<(), ParseErrorKind> {
        match self.peek()? {
            Some((tok, _)) if tok == t => {
                self.bump();
                Ok(())
            }
            _ => self.unexpected_token(format!("'{}'", t)),
        }
    }

    /// Gets the position of the next token, or of the end of input.
    fn position(&mut self) -> Result<Position, ParseErrorKind> {
        let offset = match self.peek()? {
            Some((_, span)) => span.start,
            None => self.lexer.source().len(),
        };
        Ok(self.lines.resolve(offset))
    }

    fn bump(&mut self) -> (Token<'a>, Span) {
        self.peek
            .take()
            .expect("called bump without peek returning Some()")
    }

    fn peek(&mut self) -> Result<Option<(Token<'a>, Span)>, ParseErrorKind> {
        if self.peek.is_none() {
            self.peek = next_token(&mut self.lexer)?;
        }
        Ok(self.peek.clone())
    }

    fn unexpected_token<T>(&mut self, expected: impl ToString) -> Result<T, ParseErrorKind> {
        match self.peek()? {
            Some((_, span)) => Err(ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: self.lexer.source()[span.clone()].to_owned(),
                span,
            }),
            None => {
                let end = self.lexer.source().len();
                Err(ParseErrorKind::UnexpectedEof {
                    expected: expected.to_string(),
                    span: end..end,
                })
            }
        }
    }
}

fn is_bool(value: &str) -> bool {
    value == "true" || value == "false"
}

fn is_terminator(terminators: &[Token], tok: &Token) -> bool {
    terminators.iter().any(|t| match (t, tok) {
        (Token::Ident(""), Token::Ident(_)) => true,
        _ => t == tok,
    })
}

fn fmt_expected<'a>(ts: impl Iterator<Item = Token<'a>>) -> String {
    fn fmt_token(s: &mut String, t: &Token) {
        if *t == ANY_IDENT {
            s.push_str("an identifier");
        } else {
            s.push_str(&format!("'{}'", t));
        }
    }

    let ts: Vec<_> = ts.collect();

    let mut s = String::with_capacity(32);
    fmt_token(&mut s, &ts[0]);
    if ts.len() > 1 {
        for t in &ts[1..][..ts.len() - 2] {
            s.push_str(", ");
            fmt_token(&mut s, t);
        }
        s.push_str(" or ");
        fmt_token(&mut s, &ts[ts.len() - 1]);
    }
    s
}
