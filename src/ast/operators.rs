//! Operator tokens of the source dialect.

use serde::{Deserialize, Serialize};

/// Binary operator tokens as produced by the upstream SQL++ parser.
///
/// Operator expressions carry a flat chain of these: `n + 1` operands and
/// `n` operators. Not every token has an encoding verb; see
/// [`crate::encoder::tables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `=`
    Eq,
    /// `!=`
    Neq,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `LIKE`
    Like,
    /// `/`
    Div,
    /// `*`
    Mul,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `IN`
    In,
    /// `BETWEEN`
    Between,
    /// `NOT BETWEEN`
    NotBetween,
    /// `||`
    Concat,
}

impl OperatorKind {
    /// The upstream token name, used in error messages.
    pub fn token(&self) -> &'static str {
        match self {
            OperatorKind::Gt => "GT",
            OperatorKind::Ge => "GE",
            OperatorKind::Lt => "LT",
            OperatorKind::Le => "LE",
            OperatorKind::Eq => "EQ",
            OperatorKind::Neq => "NEQ",
            OperatorKind::And => "AND",
            OperatorKind::Or => "OR",
            OperatorKind::Like => "LIKE",
            OperatorKind::Div => "DIV",
            OperatorKind::Mul => "MUL",
            OperatorKind::Plus => "PLUS",
            OperatorKind::Minus => "MINUS",
            OperatorKind::In => "IN",
            OperatorKind::Between => "BETWEEN",
            OperatorKind::NotBetween => "NOT_BETWEEN",
            OperatorKind::Concat => "CONCAT",
        }
    }
}

/// Unary operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryKind {
    Exists,
    NotExists,
    Positive,
    Negative,
}

impl UnaryKind {
    /// The upstream token name, used in error messages.
    pub fn token(&self) -> &'static str {
        match self {
            UnaryKind::Exists => "EXISTS",
            UnaryKind::NotExists => "NOT_EXISTS",
            UnaryKind::Positive => "POSITIVE",
            UnaryKind::Negative => "NEGATIVE",
        }
    }
}
