use std::fmt;

use crate::ast;
use crate::diag::{DiagTrait, ErrorKind};
use crate::lex::{self, Span, Token, TokenKind};

/// What the parser was looking for when it met an unexpected token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A number, a sign or an opening parenthesis
    Number,
    /// The parenthesis closing a group
    CloseParen,
    /// An operator, or the end of input after a complete expression
    Operator,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Number => f.write_str("Expected number instance (int or float)"),
            Expected::CloseParen => f.write_str("Expected ')'"),
            Expected::Operator => f.write_str("Expected operator instance ('+', '-', '*', '/')"),
        }
    }
}

/// Deepest nesting of parenthesized groups accepted by the parser
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(lex::Error),
    InvalidSyntax { token: Token, expected: Expected },
    /// The opening parenthesis of a group nested deeper than [`MAX_NESTING`]
    TooDeep { token: Token },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex(..) => ErrorKind::IllegalCharacter,
            Error::InvalidSyntax { .. } | Error::TooDeep { .. } => ErrorKind::InvalidSyntax,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Error::Lex(err) => err.span(),
            Error::InvalidSyntax { token, .. } | Error::TooDeep { token } => token.span,
        }
    }
}

impl From<lex::Error> for Error {
    fn from(e: lex::Error) -> Self {
        Error::Lex(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(err) => write!(f, "{}", err),
            Error::InvalidSyntax { expected, .. } => write!(f, "{}", expected),
            Error::TooDeep { .. } => {
                write!(f, "Groups nested deeper than {} levels", MAX_NESTING)
            }
        }
    }
}

impl std::error::Error for Error {}

impl DiagTrait for Error {
    fn kind(&self) -> ErrorKind {
        Error::kind(self)
    }

    fn span(&self) -> Span {
        Error::span(self)
    }

    fn message(&self) -> String {
        format!("{}", self)
    }

    fn help(&self) -> Option<String> {
        match self {
            Error::InvalidSyntax {
                token:
                    Token {
                        kind: TokenKind::Eof,
                        ..
                    },
                expected: Expected::Number | Expected::CloseParen,
            } => Some("the expression ends too early".to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Tokenize and parse `input` as a single expression.
/// Parsing starts only if the whole input was tokenized.
pub fn parse(input: &str) -> Result<ast::Node> {
    let tokens = lex::tokenize(input)?;
    let mut parser = Parser::new(tokens);
    parser.parse()
}

/// Recursive descent parser over a complete token sequence.
///
/// Grammar, from the highest binding tier to the lowest:
///
/// ```text
/// factor := ('+' | '-') factor | INT | FLOAT | '(' expr ')'
/// term   := factor (('*' | '/') factor)*
/// expr   := term (('+' | '-') term)*
/// ```
///
/// Sign runs are read iteratively. Groups recurse, and are limited to
/// [`MAX_NESTING`] levels.
#[derive(Debug, Clone)]
pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
    depth: usize,
}

impl Parser {
    /// A trailing `Eof` token is added if `tokens` lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let has_eof = matches!(
            tokens.last(),
            Some(Token {
                kind: TokenKind::Eof,
                ..
            })
        );
        if !has_eof {
            let end = tokens.last().map(Token::end).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, (end, end)));
        }
        Self {
            tokens,
            idx: 0,
            depth: 0,
        }
    }

    /// Parse one expression spanning the whole token sequence.
    pub fn parse(&mut self) -> Result<ast::Node> {
        let node = self.expr()?;
        let tok = self.current();
        if tok.kind != TokenKind::Eof {
            return Err(Error::InvalidSyntax {
                token: tok,
                expected: Expected::Operator,
            });
        }
        Ok(node)
    }

    fn factor(&mut self) -> Result<ast::Node> {
        let mut signs = Vec::new();
        while matches!(self.current().kind, TokenKind::Plus | TokenKind::Minus) {
            signs.push(self.current());
            self.bump_token();
        }
        let mut node = self.primary()?;
        for sign in signs.into_iter().rev() {
            log::trace!("unary {} at {}", sign, sign.start().offset);
            node = ast::Node::unary(sign, node);
        }
        Ok(node)
    }

    fn primary(&mut self) -> Result<ast::Node> {
        let tok = self.current();
        match tok.kind {
            TokenKind::Int(_) | TokenKind::Float(_) => {
                self.bump_token();
                Ok(ast::Node::number(tok))
            }
            TokenKind::LParen => {
                if self.depth >= MAX_NESTING {
                    return Err(Error::TooDeep { token: tok });
                }
                self.bump_token();
                self.depth += 1;
                let node = self.expr()?;
                self.depth -= 1;
                let close = self.current();
                if close.kind != TokenKind::RParen {
                    return Err(Error::InvalidSyntax {
                        token: close,
                        expected: Expected::CloseParen,
                    });
                }
                self.bump_token();
                Ok(node)
            }
            _ => Err(Error::InvalidSyntax {
                token: tok,
                expected: Expected::Number,
            }),
        }
    }

    fn term(&mut self) -> Result<ast::Node> {
        self.bin_op(Self::factor, &[TokenKind::Star, TokenKind::Slash])
    }

    fn expr(&mut self) -> Result<ast::Node> {
        self.bin_op(Self::term, &[TokenKind::Plus, TokenKind::Minus])
    }

    /// Left fold of `operand (op operand)*` where `op` is one of `operators`
    fn bin_op(
        &mut self,
        operand: fn(&mut Self) -> Result<ast::Node>,
        operators: &[TokenKind],
    ) -> Result<ast::Node> {
        let mut left = operand(self)?;
        loop {
            let op = self.current();
            if !operators.iter().any(|k| k.same_variant(&op.kind)) {
                break;
            }
            self.bump_token();
            let right = operand(self)?;
            log::trace!("binary {} at {}", op, op.start().offset);
            left = ast::Node::binary(left, op, right);
        }
        Ok(left)
    }
}

impl Parser {
    fn current(&self) -> Token {
        self.tokens[self.idx]
    }

    /// Move to the next token. The final `Eof` is never moved past.
    fn bump_token(&mut self) {
        if self.idx + 1 < self.tokens.len() {
            self.idx += 1;
        }
    }
}
