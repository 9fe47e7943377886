//! A parser for protobuf source files written with `syntax = "proto3"`.
//!
//! The parser only looks at the syntax of a file. It does not resolve type names, read imported
//! files, or check that field numbers are unique or in range. See the documentation for
//! [`parse()`] and [`Parser`] for details.
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/proto3-parser/0.1.0/")]

pub mod ast;
mod error;
mod lex;
mod lines;
mod parse;

pub use crate::error::ParseError;
pub use crate::lex::{RawToken, TokenKind, Tokens};

/// Options for parsing protobuf source files.
///
/// A `Parser` holds no state between calls, so a single value may be reused for any number of
/// files, including from several threads at once.
///
/// # Examples
///
/// ```
/// # use proto3_parser::Parser;
/// let source = r#"
///     syntax = "proto3";
///     message Foo {
///         reserved "bar", 2;
///     }
/// "#;
///
/// assert!(Parser::new().parse(source).is_err());
///
/// let file = Parser::new().allow_mixed_reserved(true).parse(source).unwrap();
/// let reserved = &file.messages[0].reserved[0];
/// assert_eq!(reserved.names, ["bar"]);
/// assert_eq!(reserved.ranges.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    allow_mixed_reserved: bool,
}

impl Parser {
    /// Creates a parser with the default options.
    pub fn new() -> Self {
        Parser::default()
    }

    /// Allow a single `reserved` statement to list both field names and field numbers.
    ///
    /// The proto3 language requires names and numbers to be reserved in separate statements, so
    /// this is disabled by default.
    pub fn allow_mixed_reserved(&mut self, yes: bool) -> &mut Self {
        self.allow_mixed_reserved = yes;
        self
    }

    /// Parses a single protobuf source file.
    pub fn parse(&self, source: &str) -> Result<ast::Proto, ParseError> {
        self.parse_named("", source)
    }

    /// Parses a single protobuf source file. The given name is included in any error returned.
    pub fn parse_named(&self, name: &str, source: &str) -> Result<ast::Proto, ParseError> {
        parse::parse_file(source, self.allow_mixed_reserved)
            .map_err(|kind| ParseError::new(kind, name, source))
    }
}

/// Parses a single protobuf source file into an [`ast::Proto`], using the default [`Parser`]
/// options.
///
/// Parsing stops at the first error.
///
/// # Examples
///
/// ```
/// # use proto3_parser::{ast, parse};
/// let source = r#"
///     syntax = "proto3";
///     import "dep.proto";
///
///     message Foo {
///         Bar bar = 1;
///     }
/// "#;
///
/// let file = parse(source).unwrap();
/// assert_eq!(file.imports[0].path, "dep.proto");
///
/// let field = &file.messages[0].fields[0];
/// assert_eq!(field.ty, ast::TypeName::from("Bar"));
/// assert_eq!(field.name, "bar");
/// assert_eq!(field.number, 1);
/// assert_eq!(field.position.line, 6);
///
/// let err = parse("syntax = \"proto3\"; message { }").unwrap_err();
/// assert_eq!(err.to_string(), "expected an identifier, but found '{'");
/// assert_eq!(err.position().column, 28);
/// ```
pub fn parse(source: &str) -> Result<ast::Proto, ParseError> {
    Parser::new().parse(source)
}

/// Splits a protobuf source file into tokens, without parsing it.
///
/// Whitespace and comments are skipped. The iterator finishes with a single
/// [`TokenKind::EndOfInput`] token, or stops early after yielding an error.
///
/// # Examples
///
/// ```
/// # use proto3_parser::{tokenize, TokenKind};
/// let tokens: Vec<_> = tokenize("package foo; // comment")
///     .map(|token| token.unwrap())
///     .map(|token| (token.kind, token.text))
///     .collect();
///
/// assert_eq!(tokens, [
///     (TokenKind::Identifier, "package"),
///     (TokenKind::Identifier, "foo"),
///     (TokenKind::Punctuation, ";"),
///     (TokenKind::EndOfInput, ""),
/// ]);
/// ```
pub fn tokenize(source: &str) -> Tokens<'_> {
    lex::tokenize(source)
}
