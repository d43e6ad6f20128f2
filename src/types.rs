//! Type definitions for the expression parser and evaluator.
//!
//! This module contains the token kinds produced by the lexer, the fixed operator
//! and function tables, and the arena-allocated expression tree the parser builds.

use crate::Real;
use crate::constants;

/// Classification of a lexical unit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A decimal literal such as `3`, `2.5`, `.5`.
    Number,
    /// A named constant: `pi` or `e`.
    Constant,
    /// One of `+ - * / % ^`.
    Operator,
    /// A known function name, e.g. `sin`.
    Function,
    /// `(`
    Open,
    /// `)`
    Close,
}

/// Associativity of a binary operator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary operators, with their precedence and associativity.
///
/// | Operator      | Precedence | Associativity |
/// |---------------|------------|---------------|
/// | `+` `-`       | 1          | Left          |
/// | `*` `/` `%`   | 2          | Left          |
/// | `^`           | 3          | Right         |
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Floating-point remainder, sign of the dividend.
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "%" => Some(BinaryOp::Rem),
            "^" => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Rem => '%',
            BinaryOp::Pow => '^',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 2,
            BinaryOp::Pow => 3,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            BinaryOp::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// Prefix operators. Unary `+` is accepted by the parser but leaves no node.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Neg,
}

/// The built-in single-argument functions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Sqrt,
    /// Factorial of a non-negative integer.
    Fact,
}

impl Function {
    pub const ALL: [Function; 10] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Log,
        Function::Ln,
        Function::Sqrt,
        Function::Fact,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Fact => "fact",
        }
    }
}

/// Named constants recognized by the tokenizer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn value(self) -> Real {
        match self {
            Constant::Pi => constants::PI,
            Constant::E => constants::E,
        }
    }
}

/// Expression tree node.
///
/// Nodes are allocated in a `bumpalo::Bump` owned by the caller and borrow their
/// children from the same arena, so a whole tree is released at once when the
/// arena is reset or dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum AstExpr<'arena> {
    /// A literal numerical value. Constants are folded into this variant.
    ///
    /// Examples: `3.14`, `42`, `pi`
    Number(Real),

    /// A prefix operator applied to one operand.
    ///
    /// Example: `-x`
    Unary {
        op: UnaryOp,
        operand: &'arena AstExpr<'arena>,
    },

    /// A binary operator applied to two operands.
    ///
    /// Examples: `2 + 3`, `2 ^ 10`
    Binary {
        op: BinaryOp,
        left: &'arena AstExpr<'arena>,
        right: &'arena AstExpr<'arena>,
    },

    /// A function applied to its single argument.
    ///
    /// Examples: `sin(x)`, `fact(5)`
    Function {
        func: Function,
        arg: &'arena AstExpr<'arena>,
    },
}

impl AstExpr<'_> {
    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            AstExpr::Number(_) => 1,
            AstExpr::Unary { operand, .. } => 1 + operand.node_count(),
            AstExpr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            AstExpr::Function { arg, .. } => 1 + arg.node_count(),
        }
    }
}
