use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

use super::ast::{Expr, Identifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Equals => Some(BinaryOperator::Equal),
            TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEqual),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::LessEquals => Some(BinaryOperator::LessEqual),
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            _ => None,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl UnaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Dash => Some(UnaryOperator::Neg),
            TokenKind::Not => Some(UnaryOperator::Not),
            _ => None,
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Neg => write!(f, "-"),
            UnaryOperator::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Identifier,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetAttrExpr {
    pub object: Box<Expr>,
    pub name: Identifier,
    pub value: Box<Expr>,
}

/// Operands of `and` / `or`. Short-circuiting is left to the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetAttrExpr {
    pub object: Box<Expr>,
    pub name: Identifier,
}

/// `super.name`
#[derive(Debug, Clone, PartialEq)]
pub struct SuperGetAttrExpr {
    pub name: Identifier,
}
