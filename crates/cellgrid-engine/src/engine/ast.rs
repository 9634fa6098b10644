//! Formula abstract syntax tree.

use num_bigint::BigInt;

use super::CellRef;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal
    Integer(BigInt),
    /// Boolean literal
    Boolean(bool),
    /// Cell reference, already canonicalized
    CellRef(CellRef),
    /// Well-formed reference to an address no cell can live at (`A0`,
    /// `A01`, or a row or column past the addressable range)
    DanglingRef(String),
    /// Parenthesized sub-expression
    Group(Box<Expr>),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Function call; the name is kept as written
    Function { name: String, args: Vec<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    LessThan,
    GreaterThan,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equal => "=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal | BinaryOperator::LessThan | BinaryOperator::GreaterThan
        )
    }
}
