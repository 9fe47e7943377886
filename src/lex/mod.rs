
use std::{ascii, borrow::Cow, fmt, num::IntErrorKind};

use logos::{Lexer, Logos, Skip, Span};

use crate::{ast::Position, error::ParseErrorKind, lines::LineResolver, ParseError};

#[derive(Debug, Clone, Logos, PartialEq)]
#[logos(extras = TokenExtras)]
#[logos(skip r"[\t\n\v\f\r ]+")]
#[logos(skip r"//[^\n]*")]
#[logos(subpattern exponent = r"[eE][+\-]?[0-9]+")]
pub(crate) enum Token<'a> {
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Ident(&'a str),
    #[regex("0", |_| 0)]
    #[regex("0[0-9]+", |lex| int(lex, 8, 1))]
    #[regex("[1-9][0-9]*", |lex| int(lex, 10, 0))]
    #[regex("0[xX][0-9A-Fa-f]+", |lex| int(lex, 16, 2))]
    IntLiteral(u64),
    #[regex(r#"[0-9]+\.[0-9]*(?&exponent)?"#, float)]
    #[regex(r#"[0-9]+(?&exponent)"#, float)]
    #[regex(r#"\.[0-9]+(?&exponent)?"#, float)]
    FloatLiteral(f64),
    #[regex(r#"'|""#, string)]
    StringLiteral(Cow<'a, [u8]>),
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("<")]
    LeftAngleBracket,
    #[token(">")]
    RightAngleBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token(";")]
    Semicolon,
    #[token("/*", block_comment)]
    BlockComment,
}

/// The lexical category of a [`RawToken`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    StringLiteral,
    IntLiteral,
    FloatLiteral,
    Punctuation,
    EndOfInput,
}

/// A token as it appears in the source, returned by [`tokenize`](crate::tokenize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub kind: TokenKind,
    /// The exact source text of the token, including quotes for string literals.
    pub text: &'a str,
    pub span: Span,
    pub position: Position,
}

/// An iterator over the tokens of a source file.
///
/// Iteration ends after an [`TokenKind::EndOfInput`] token, or after the first error.
pub struct Tokens<'a> {
    lexer: Lexer<'a, Token<'a>>,
    lines: LineResolver<'a>,
    done: bool,
}

impl Token<'_> {
    pub const SYNTAX: Token<'static> = Token::Ident("syntax");
    pub const PACKAGE: Token<'static> = Token::Ident("package");
    pub const IMPORT: Token<'static> = Token::Ident("import");
    pub const ENUM: Token<'static> = Token::Ident("enum");
    pub const OPTION: Token<'static> = Token::Ident("option");
    pub const SERVICE: Token<'static> = Token::Ident("service");
    pub const RPC: Token<'static> = Token::Ident("rpc");
    pub const RETURNS: Token<'static> = Token::Ident("returns");
    pub const EXTEND: Token<'static> = Token::Ident("extend");
    pub const MESSAGE: Token<'static> = Token::Ident("message");
    pub const MAP: Token<'static> = Token::Ident("map");
    pub const ONEOF: Token<'static> = Token::Ident("oneof");
    pub const RESERVED: Token<'static> = Token::Ident("reserved");

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Ident(_) => TokenKind::Identifier,
            Token::IntLiteral(_) => TokenKind::IntLiteral,
            Token::FloatLiteral(_) => TokenKind::FloatLiteral,
            Token::StringLiteral(_) => TokenKind::StringLiteral,
            _ => TokenKind::Punctuation,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(value) => write!(f, "{}", value),
            Token::IntLiteral(value) => write!(f, "{}", value),
            Token::FloatLiteral(value) => {
                if value.fract() == 0.0 {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Token::StringLiteral(bytes) => {
                write!(f, "\"")?;
                for &ch in bytes.as_ref() {
                    write!(f, "{}", ascii::escape_default(ch))?;
                }
                write!(f, "\"")?;
                Ok(())
            }
            Token::Dot => write!(f, "."),
            Token::Minus => write!(f, "-"),
            Token::Plus => write!(f, "+"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftAngleBracket => write!(f, "<"),
            Token::RightAngleBracket => write!(f, ">"),
            Token::Comma => write!(f, ","),
            Token::Equals => write!(f, "="),
            Token::Semicolon => write!(f, ";"),
            Token::BlockComment => write!(f, "/*"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::StringLiteral => write!(f, "string"),
            TokenKind::IntLiteral => write!(f, "int"),
            TokenKind::FloatLiteral => write!(f, "float"),
            TokenKind::Punctuation => write!(f, "punctuation"),
            TokenKind::EndOfInput => write!(f, "EOF"),
        }
    }
}

#[derive(Default)]
pub(crate) struct TokenExtras {
    pub errors: Vec<ParseErrorKind>,
}

/// Pulls the next token from the lexer, converting the first lexical error into an `Err`.
pub(crate) fn next_token<'a>(
    lexer: &mut Lexer<'a, Token<'a>>,
) -> Result<Option<(Token<'a>, Span)>, ParseErrorKind> {
    let token = lexer.next();
    if !lexer.extras.errors.is_empty() {
        return Err(lexer.extras.errors.remove(0));
    }

    match token {
        Some(Ok(token)) => Ok(Some((token, lexer.span()))),
        Some(Err(())) => Err(ParseErrorKind::InvalidToken {
            span: lexer.span(),
        }),
        None => Ok(None),
    }
}

pub(crate) fn tokenize(source: &str) -> Tokens<'_> {
    Tokens {
        lexer: Token::lexer(source),
        lines: LineResolver::new(source),
        done: false,
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<RawToken<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match next_token(&mut self.lexer) {
            Ok(Some((token, span))) => Some(Ok(RawToken {
                kind: token.kind(),
                text: &self.lexer.source()[span.clone()],
                position: self.lines.resolve(span.start),
                span,
            })),
            Ok(None) => {
                self.done = true;
                let end = self.lexer.source().len();
                Some(Ok(RawToken {
                    kind: TokenKind::EndOfInput,
                    text: "",
                    span: end..end,
                    position: self.lines.resolve(end),
                }))
            }
            Err(err) => {
                self.done = true;
                Some(Err(ParseError::new(err, "", self.lexer.source())))
            }
        }
    }
}

impl fmt::Debug for Tokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("span", &self.lexer.span())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

fn int<'a>(lex: &mut Lexer<'a, Token<'a>>, radix: u32, prefix_len: usize) -> u64 {
    debug_assert!(lex.slice().len() > prefix_len);
    let span = lex.span().start + prefix_len..lex.span().end;

    if matches!(lex.remainder().chars().next(), Some(ch) if ch.is_ascii_alphabetic() || ch == '_') {
        let mut end = span.end + 1;
        while end < lex.source().len() && lex.source().as_bytes()[end].is_ascii_alphabetic() {
            end += 1;
        }
        lex.extras
            .errors
            .push(ParseErrorKind::NoSpaceBetweenIntAndIdent {
                span: lex.span().start..end,
            })
    }

    match u64::from_str_radix(&lex.source()[span], radix) {
        Ok(value) => value,
        Err(err) => {
            let span = lex.span();
            lex.extras.errors.push(match err.kind() {
                IntErrorKind::InvalidDigit => ParseErrorKind::InvalidOctalInteger { span },
                _ => ParseErrorKind::IntegerOutOfRange { span },
            });
            Default::default()
        }
    }
}

fn block_comment<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Skip {
    match lex.remainder().find("*/") {
        Some(end) => lex.bump(end + 2),
        None => {
            let start = lex.span().start;
            lex.extras
                .errors
                .push(ParseErrorKind::UnterminatedBlockComment {
                    span: start..start + 2,
                });
            lex.bump(lex.remainder().len());
        }
    }
    Skip
}

fn float<'a>(lex: &mut Lexer<'a, Token<'a>>) -> f64 {
    match lex.slice().parse() {
        Ok(value) => value,
        Err(_) => {
            lex.extras
                .errors
                .push(ParseErrorKind::InvalidToken { span: lex.span() });
            Default::default()
        }
    }
}

fn string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Cow<'a, [u8]> {
    #[derive(Logos)]
    #[logos(subpattern hex = r"[0-9A-Fa-f]")]
    enum Component<'a> {
        #[regex(r#"[^\x00\n\\'"]+"#)]
        Unescaped(&'a str),
        #[regex(r#"['"]"#, terminator)]
        Terminator(u8),
        #[regex(r#"\\[xX](?&hex)(?&hex)?"#, hex_escape)]
        #[regex(r#"\\[0-7][0-7]?[0-7]?"#, oct_escape)]
        #[regex(r#"\\[abfnrtv?\\'"]"#, char_escape)]
        Byte(u8),
        #[regex(r#"\\u(?&hex)(?&hex)(?&hex)(?&hex)"#, unicode_escape)]
        #[regex(
            r#"\\U(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)(?&hex)"#,
            unicode_escape
        )]
        Char(char),
    }

    fn terminator<'a>(lex: &mut Lexer<'a, Component<'a>>) -> u8 {
        debug_assert_eq!(lex.slice().len(), 1);
        lex.slice().as_bytes()[0]
    }

    fn hex_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Option<u8> {
        u8::from_str_radix(&lex.slice()[2..], 16).ok()
    }

    fn oct_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Option<u8> {
        u32::from_str_radix(&lex.slice()[1..], 8)
            .ok()
            .and_then(|value| value.try_into().ok())
    }

    fn char_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> u8 {
        match lex.slice().as_bytes()[1] {
            b'a' => b'\x07',
            b'b' => b'\x08',
            b'f' => b'\x0c',
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => b'\x0b',
            b'?' => b'?',
            b'\\' => b'\\',
            b'\'' => b'\'',
            b'"' => b'"',
            _ => unreachable!("failed to parse char escape"),
        }
    }

    fn unicode_escape<'a>(lex: &mut Lexer<'a, Component<'a>>) -> Option<char> {
        u32::from_str_radix(&lex.slice()[2..], 16)
            .ok()
            .and_then(char::from_u32)
    }

    let mut result: Option<Cow<'a, [u8]>> = None;

    let mut char_lexer = Component::lexer(lex.remainder());
    let terminator = lex.slice().as_bytes()[0];

    loop {
        match char_lexer.next() {
            Some(Ok(Component::Unescaped(s))) => cow_push_bytes(&mut result, s.as_bytes()),
            Some(Ok(Component::Terminator(t))) if t == terminator => {
                break;
            }
            Some(Ok(Component::Terminator(ch) | Component::Byte(ch))) => {
                result.get_or_insert_with(Cow::default).to_mut().push(ch)
            }
            Some(Ok(Component::Char(ch))) => {
                let mut buf = [0; 4];
                let ch = ch.encode_utf8(&mut buf);
                result
                    .get_or_insert_with(Cow::default)
                    .to_mut()
                    .extend_from_slice(ch.as_bytes())
            }
            Some(Err(())) => {
                let start = lex.span().end + char_lexer.span().start;
                let end = lex.span().end + char_lexer.span().end;

                if char_lexer.slice().contains('\n') {
                    lex.extras.errors.push(ParseErrorKind::UnterminatedString {
                        span: lex.span().start..start,
                    });
                    break;
                } else if char_lexer.slice().starts_with('\\') {
                    lex.extras
                        .errors
                        .push(ParseErrorKind::InvalidStringEscape { span: start..end });
                    break;
                } else {
                    lex.extras
                        .errors
                        .push(ParseErrorKind::InvalidStringCharacters { span: start..end });
                    break;
                }
            }
            None => {
                lex.extras.errors.push(ParseErrorKind::UnterminatedString {
                    span: lex.span().start..lex.source().len(),
                });
                break;
            }
        }
    }

    lex.bump(char_lexer.span().end);
    result.unwrap_or_default()
}

fn cow_push_bytes<'a>(cow: &mut Option<Cow<'a, [u8]>>, s: &'a [u8]) {
    match cow {
        Some(cow) => cow.to_mut().extend_from_slice(s),
        None => *cow = Some(Cow::Borrowed(s)),
    }
}
