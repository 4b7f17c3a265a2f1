use std::fmt;
use std::iter::FusedIterator;

use crate::input::{Cursor, Pos};

/// Character span into an input stream
/// (first pos, one past last pos)
pub type Span = (Pos, Pos);

/// A lexical error
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A character that cannot start any token
    IllegalChar { span: Span, found: char },
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::IllegalChar { span, .. } => *span,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IllegalChar { found, .. } => write!(f, "'{}'", found),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Value of a number literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{:?}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { span, kind }
    }

    pub fn start(&self) -> Pos {
        self.span.0
    }

    pub fn end(&self) -> Pos {
        self.span.1
    }

    /// The literal value, for `Int` and `Float` tokens only
    pub fn value(&self) -> Option<Number> {
        match self.kind {
            TokenKind::Int(n) => Some(Number::Int(n)),
            TokenKind::Float(n) => Some(Number::Float(n)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{} | {}", self.kind.name(), value),
            None => f.write_str(self.kind.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Int(i128),
    Float(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "INT",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Plus => "ADD",
            TokenKind::Minus => "SUB",
            TokenKind::Star => "MUL",
            TokenKind::Slash => "DIV",
            TokenKind::LParen => "O_PAREN",
            TokenKind::RParen => "C_PAREN",
            TokenKind::Eof => "EOF",
        }
    }

    /// Whether both kinds are the same variant, ignoring literal values
    pub fn same_variant(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Tokenize the whole input.
///
/// On success the returned sequence always ends with a single [`TokenKind::Eof`].
/// On failure, no token is returned, only the first error.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    tokenizer(input.chars()).collect()
}

/// Build a streaming tokenizer over `chars`.
pub fn tokenizer<I>(chars: I) -> Tokenizer<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    Tokenizer::new(Cursor::new(chars.into_iter()))
}

#[derive(Debug, Clone)]
pub struct Tokenizer<I> {
    cursor: Cursor<I>,
    done: bool,
}

impl<I> Tokenizer<I> {
    pub fn new(cursor: Cursor<I>) -> Tokenizer<I> {
        Tokenizer {
            cursor,
            done: false,
        }
    }
}

impl<I> Iterator for Tokenizer<I>
where
    I: Iterator<Item = char> + Clone,
{
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if self.done {
            return None;
        }
        self.skip_blanks();
        let pos = self.cursor.pos();
        let kind = match self.next_token_kind(pos) {
            Ok(kind) => kind,
            Err(err) => {
                log::trace!("lexing stopped at offset {}: {}", pos.offset, err);
                self.done = true;
                return Some(Err(err));
            }
        };
        if kind == TokenKind::Eof {
            self.done = true;
        }
        let end = self.cursor.pos();
        let tok = Token {
            kind,
            span: (pos, end),
        };
        log::trace!("token {} at {}..{}", tok, pos.offset, end.offset);
        Some(Ok(tok))
    }
}

// `done` latches after Eof or the first error
impl<I> FusedIterator for Tokenizer<I> where I: Iterator<Item = char> + Clone {}

impl<I> Tokenizer<I>
where
    I: Iterator<Item = char> + Clone,
{
    fn skip_blanks(&mut self) {
        while let Some(' ' | '\t') = self.cursor.first() {
            self.cursor.next();
        }
    }

    fn next_token_kind(&mut self, start_pos: Pos) -> Result<TokenKind> {
        let Some(c) = self.cursor.first() else {
            return Ok(TokenKind::Eof);
        };
        if matches!(c, '0'..='9' | '.') {
            return Ok(self.parse_number());
        }
        self.cursor.next();
        match c {
            '+' => Ok(TokenKind::Plus),
            '-' => Ok(TokenKind::Minus),
            '*' => Ok(TokenKind::Star),
            '/' => Ok(TokenKind::Slash),
            '(' => Ok(TokenKind::LParen),
            ')' => Ok(TokenKind::RParen),
            _ => Err(Error::IllegalChar {
                span: (start_pos, self.cursor.pos()),
                found: c,
            }),
        }
    }

    /// Scan digits with at most one '.'.
    /// A second '.' is left in the input and starts the next token.
    fn parse_number(&mut self) -> TokenKind {
        let mut s = String::new();
        let mut has_dot = false;
        while let Some(c) = self.cursor.first() {
            match c {
                '0'..='9' => s.push(c),
                '.' if !has_dot => {
                    has_dot = true;
                    s.push(c);
                }
                _ => break,
            }
            self.cursor.next();
        }

        if !has_dot {
            // only overflow can fail here, the digit run is never empty
            let n = s.parse::<i128>().unwrap_or_else(|_| {
                log::warn!("integer literal {} saturated to {}", s, i128::MAX);
                i128::MAX
            });
            return TokenKind::Int(n);
        }

        // a lone '.' carries no digit at all
        TokenKind::Float(s.parse::<f64>().unwrap_or(0.0))
    }
}
