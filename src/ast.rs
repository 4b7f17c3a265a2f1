use std::fmt;

use crate::input::Pos;
use crate::lex::{Number, Span, Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Number literal, holding an `Int` or `Float` token
    Number(Token),
    UnaryOp(UnaryOp),
    BinaryOp(BinaryOp),
}

/// Sign applied to an operand. The operator is a `Plus` or `Minus` token.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub operator: Token,
    pub operand: Box<Node>,
}

/// The operator is one of the `Plus`, `Minus`, `Star` or `Slash` tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Box<Node>,
    pub operator: Token,
    pub right: Box<Node>,
}

impl Node {
    pub fn number(token: Token) -> Self {
        Node::Number(token)
    }

    pub fn unary(operator: Token, operand: Node) -> Self {
        Node::UnaryOp(UnaryOp {
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn binary(left: Node, operator: Token, right: Node) -> Self {
        Node::BinaryOp(BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Span covering the whole sub-expression.
    /// Parentheses are not part of the tree, so they are not covered either.
    pub fn span(&self) -> Span {
        (self.start(), self.end())
    }

    fn start(&self) -> Pos {
        let mut node = self;
        loop {
            match node {
                Node::Number(token) => return token.start(),
                Node::UnaryOp(unary) => return unary.operator.start(),
                Node::BinaryOp(binary) => node = binary.left.as_ref(),
            }
        }
    }

    fn end(&self) -> Pos {
        let mut node = self;
        loop {
            match node {
                Node::Number(token) => return token.end(),
                Node::UnaryOp(unary) => node = unary.operand.as_ref(),
                Node::BinaryOp(binary) => node = binary.right.as_ref(),
            }
        }
    }

    /// The literal value if this node is a number
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Node::Number(token) => token.value(),
            _ => None,
        }
    }
}

/// Children are unlinked onto a heap stack, so that dropping a deep tree
/// does not recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.take_children(&mut stack);
        }
    }
}

impl Node {
    fn take_children(&mut self, stack: &mut Vec<Node>) {
        let mut take = |child: &mut Box<Node>| {
            if !matches!(**child, Node::Number(_)) {
                stack.push(std::mem::replace(&mut **child, Node::placeholder()));
            }
        };
        match self {
            Node::Number(_) => (),
            Node::UnaryOp(unary) => take(&mut unary.operand),
            Node::BinaryOp(binary) => {
                take(&mut binary.left);
                take(&mut binary.right);
            }
        }
    }

    fn placeholder() -> Node {
        Node::Number(Token::new(TokenKind::Eof, (Pos::default(), Pos::default())))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(token) => write!(f, "{}", token),
            Node::UnaryOp(UnaryOp { operator, operand }) => {
                write!(f, "({} --> {})", operator, operand)
            }
            Node::BinaryOp(BinaryOp {
                left,
                operator,
                right,
            }) => write!(f, "({} --> {} --> {})", left, operator, right),
        }
    }
}
