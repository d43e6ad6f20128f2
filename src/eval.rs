//! Expression tree evaluation.
//!
//! Evaluation is a post-order walk: children are reduced before their parent
//! applies its operator or function. The first failing node aborts the walk;
//! nothing is cached between calls.

use crate::Real;
use crate::error::Result;
use crate::functions::{apply_binary, apply_function, neg};
use crate::types::{AstExpr, UnaryOp};

/// Reduce a parsed expression tree to a single finite number.
pub fn eval_ast(ast: &AstExpr<'_>) -> Result<Real> {
    match ast {
        AstExpr::Number(value) => Ok(*value),
        AstExpr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => Ok(neg(eval_ast(operand)?)),
        AstExpr::Binary { op, left, right } => {
            let a = eval_ast(left)?;
            let b = eval_ast(right)?;
            apply_binary(*op, a, b)
        }
        AstExpr::Function { func, arg } => apply_function(*func, eval_ast(arg)?),
    }
}
