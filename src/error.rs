use std::fmt;

use logos::Span;
use miette::{Diagnostic, NamedSource};
use thiserror::Error;

use crate::{ast::Position, lines::LineResolver};

/// An error that may occur while parsing a protobuf source file.
///
/// Parsing stops at the first error, so each `ParseError` describes exactly one problem. The
/// error implements [`Diagnostic`], and carries the source code it refers to so it can be
/// rendered with [`miette`].
#[derive(Error, Diagnostic)]
#[error("{}", kind)]
#[diagnostic(forward(kind))]
pub struct ParseError {
    kind: Box<ParseErrorKind>,
    position: Position,
    file: String,
    #[source_code]
    source_code: NamedSource,
}

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub(crate) enum ParseErrorKind {
    #[error("invalid token")]
    InvalidToken {
        #[label("found here")]
        span: Span,
    },
    #[error("integer is too large")]
    IntegerOutOfRange {
        #[label("integer defined here")]
        span: Span,
    },
    #[error("invalid digit in octal integer")]
    InvalidOctalInteger {
        #[label("integer defined here")]
        span: Span,
    },
    #[error("invalid string character")]
    InvalidStringCharacters {
        #[label("invalid characters")]
        span: Span,
    },
    #[error("unterminated string")]
    UnterminatedString {
        #[label("string starts here")]
        span: Span,
    },
    #[error("invalid string escape")]
    InvalidStringEscape {
        #[label("defined here")]
        span: Span,
    },
    #[error("string is not valid utf-8")]
    InvalidUtf8String {
        #[label("defined here")]
        span: Span,
    },
    #[error("unterminated block comment")]
    UnterminatedBlockComment {
        #[label("comment starts here")]
        span: Span,
    },
    #[error("whitespace is required between an integer literal and an identifier")]
    NoSpaceBetweenIntAndIdent {
        #[label("found here")]
        span: Span,
    },
    #[error("expected {expected}, but found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected {expected}, but reached end of file")]
    UnexpectedEof {
        expected: String,
        #[label("file ends here")]
        span: Span,
    },
    #[error("reserved names and reserved numbers must be declared in separate statements")]
    #[diagnostic(help("split this into one 'reserved' statement for names and one for numbers"))]
    MixedReserved {
        #[label("defined here")]
        span: Span,
    },
}

impl ParseErrorKind {
    pub(crate) fn span(&self) -> Span {
        match self {
            ParseErrorKind::InvalidToken { span }
            | ParseErrorKind::IntegerOutOfRange { span }
            | ParseErrorKind::InvalidOctalInteger { span }
            | ParseErrorKind::InvalidStringCharacters { span }
            | ParseErrorKind::UnterminatedString { span }
            | ParseErrorKind::InvalidStringEscape { span }
            | ParseErrorKind::InvalidUtf8String { span }
            | ParseErrorKind::UnterminatedBlockComment { span }
            | ParseErrorKind::NoSpaceBetweenIntAndIdent { span }
            | ParseErrorKind::UnexpectedToken { span, .. }
            | ParseErrorKind::UnexpectedEof { span, .. }
            | ParseErrorKind::MixedReserved { span } => span.clone(),
        }
    }

    fn is_lex_error(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::InvalidToken { .. }
                | ParseErrorKind::IntegerOutOfRange { .. }
                | ParseErrorKind::InvalidOctalInteger { .. }
                | ParseErrorKind::InvalidStringCharacters { .. }
                | ParseErrorKind::UnterminatedString { .. }
                | ParseErrorKind::InvalidStringEscape { .. }
                | ParseErrorKind::InvalidUtf8String { .. }
                | ParseErrorKind::UnterminatedBlockComment { .. }
                | ParseErrorKind::NoSpaceBetweenIntAndIdent { .. }
        )
    }
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, name: &str, source: &str) -> Self {
        let position = LineResolver::new(source).resolve(kind.span().start);
        ParseError {
            kind: Box::new(kind),
            position,
            file: name.to_owned(),
            source_code: NamedSource::new(name, source.to_owned()),
        }
    }

    /// Gets the name of the file in which this error occurred, or an empty string if no name was
    /// given.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Gets the location of the start of the offending token.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Gets the byte range of the source code this error refers to.
    pub fn span(&self) -> Span {
        self.kind.span()
    }

    /// Returns `true` if the source could not be split into tokens, for example because of an
    /// unterminated string or an invalid character.
    pub fn is_lex_error(&self) -> bool {
        self.kind.is_lex_error()
    }

    /// Returns `true` if the tokens did not match the proto3 grammar.
    pub fn is_syntax_error(&self) -> bool {
        !self.kind.is_lex_error()
    }

    /// For an unexpected token or end of file, describes what the parser was looking for.
    pub fn expected(&self) -> Option<&str> {
        match &*self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. }
            | ParseErrorKind::UnexpectedEof { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// For an unexpected token, gets the token that was found instead.
    pub fn found(&self) -> Option<&str> {
        match &*self.kind {
            ParseErrorKind::UnexpectedToken { found, .. } => Some(found),
            _ => None,
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.file.is_empty() {
            write!(f, "{}:", self.file)?;
        }

        write!(
            f,
            "{}:{}: {}",
            self.position.line, self.position.column, self
        )
    }
}
