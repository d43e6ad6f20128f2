use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use bumpalo::Bump;
use log::trace;

use crate::Real;
use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::eval::eval_ast;
use crate::lexer::{Lexer, Token};
use crate::normalize::normalize;
use crate::types::{Associativity, AstExpr, BinaryOp, Function, TokenKind, UnaryOp};

/// Binding power of prefix `-` and `+`.
///
/// Tighter than `*` `/` `%` (right power 4) and looser than `^` (left power 7),
/// so `-2^2` parses as `-(2^2)` while `-2*3` parses as `(-2)*3`.
const PREFIX_BINDING_POWER: u8 = 5;

/// Token binding powers for the Pratt parser
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    // For left-associative operators, right binding power is left + 1
    const fn left_assoc(power: u8) -> Self {
        Self::new(power, power + 1)
    }

    // For right-associative operators, right binding power is below left
    const fn right_assoc(power: u8) -> Self {
        Self::new(power + 1, power)
    }

    /// Left-associative precedence `p` maps to `(2p - 1, 2p)`, right-associative to `(2p + 1, 2p)`.
    fn infix(op: BinaryOp) -> Self {
        let power = op.precedence() * 2;
        match op.associativity() {
            Associativity::Left => Self::left_assoc(power - 1),
            Associativity::Right => Self::right_assoc(power),
        }
    }
}

/// A parsed node together with the height of the tree below it.
///
/// Operator chains such as `1+1+…+1` are built in a loop, so the parser's own
/// call depth says nothing about how deep the resulting tree is. The height is
/// carried alongside each node instead, and bounded like the call depth.
#[derive(Clone, Copy)]
struct Subtree<'arena> {
    node: &'arena AstExpr<'arena>,
    depth: usize,
}

/// Pratt parser over an already tokenized expression.
struct PrattParser<'src, 'arena> {
    tokens: Vec<Token<'src>>,
    cursor: usize,
    arena: &'arena Bump,
    recursion_depth: usize,
    max_recursion_depth: usize,
}

impl<'src, 'arena> PrattParser<'src, 'arena> {
    fn new(tokens: Vec<Token<'src>>, arena: &'arena Bump, max_recursion_depth: usize) -> Self {
        Self {
            tokens,
            cursor: 0,
            arena,
            recursion_depth: 0,
            max_recursion_depth,
        }
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<Token<'src>> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn leaf(&self, value: Real) -> Subtree<'arena> {
        Subtree {
            node: self.arena.alloc(AstExpr::Number(value)),
            depth: 1,
        }
    }

    // Allocate an interior node whose deepest child has height `child_depth`
    fn join(&self, node: AstExpr<'arena>, child_depth: usize) -> Result<Subtree<'arena>> {
        let depth = child_depth + 1;
        if depth > self.max_recursion_depth {
            return Err(CalcError::RecursionLimit(format!(
                "Expression too complex: more than {} nested operations",
                self.max_recursion_depth
            )));
        }
        Ok(Subtree {
            node: self.arena.alloc(node),
            depth,
        })
    }

    // Consume the ')' that closes a group opened at `open_position`
    fn expect_close(&mut self, open_position: usize) -> Result<()> {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Close => {
                self.next();
                Ok(())
            }
            Some(tok) => Err(CalcError::Syntax(format!(
                "Expected closing parenthesis ')' but found '{}' at position {} (opening at position {})",
                tok.text, tok.position, open_position
            ))),
            None => Err(CalcError::UnmatchedParenthesis {
                position: open_position,
                found: '(',
            }),
        }
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Subtree<'arena>> {
        // Check recursion depth to prevent stack overflow
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_recursion_depth {
            return Err(CalcError::RecursionLimit(format!(
                "Expression too complex: exceeded maximum nesting depth of {}",
                self.max_recursion_depth
            )));
        }

        let lhs = self.parse_prefix_or_primary()?;
        let lhs = self.parse_infix_operators(lhs, min_bp)?;

        self.recursion_depth -= 1;
        Ok(lhs)
    }

    fn parse_prefix_or_primary(&mut self) -> Result<Subtree<'arena>> {
        let Some(tok) = self.peek() else {
            return Err(CalcError::Syntax("Unexpected end of input".to_string()));
        };
        if tok.kind != TokenKind::Operator {
            return self.parse_primary();
        }

        let op_text = tok.text;
        let op_position = tok.position;
        match op_text {
            "-" | "+" => {
                self.next();
                if self.peek().is_none() {
                    return Err(CalcError::Syntax(format!(
                        "Expected expression after '{}' at position {}",
                        op_text, op_position
                    )));
                }
                let operand = self.parse_expr_bp(PREFIX_BINDING_POWER)?;
                if op_text == "-" {
                    self.join(
                        AstExpr::Unary {
                            op: UnaryOp::Neg,
                            operand: operand.node,
                        },
                        operand.depth,
                    )
                } else {
                    // Unary + is a no-op
                    Ok(operand)
                }
            }
            _ => Err(CalcError::Syntax(format!(
                "Operator '{}' at position {} is missing its left operand",
                op_text, op_position
            ))),
        }
    }

    fn parse_infix_operators(
        &mut self,
        mut lhs: Subtree<'arena>,
        min_bp: u8,
    ) -> Result<Subtree<'arena>> {
        loop {
            let Some(tok) = self.peek() else {
                break;
            };
            match tok.kind {
                TokenKind::Operator => {}
                TokenKind::Close => break,
                _ => {
                    return Err(CalcError::Syntax(format!(
                        "Expected an operator before '{}' at position {} (implicit multiplication is not supported)",
                        tok.text, tok.position
                    )));
                }
            }

            let Some(op) = BinaryOp::from_symbol(tok.text) else {
                return Err(CalcError::Syntax(format!(
                    "Unknown operator '{}' at position {}",
                    tok.text, tok.position
                )));
            };
            let bp = BindingPower::infix(op);

            // If the operator's left binding power is less than the minimum, we're done
            if bp.left < min_bp {
                break;
            }

            let op_position = tok.position;
            self.next();
            if self.peek().is_none() {
                return Err(CalcError::Syntax(format!(
                    "Expected expression after '{}' at position {}",
                    op.symbol(),
                    op_position
                )));
            }

            let rhs = self.parse_expr_bp(bp.right)?;
            lhs = self.join(
                AstExpr::Binary {
                    op,
                    left: lhs.node,
                    right: rhs.node,
                },
                lhs.depth.max(rhs.depth),
            )?;
        }
        Ok(lhs)
    }

    // Parse a primary expression (number, constant, function call, parenthesized expression)
    fn parse_primary(&mut self) -> Result<Subtree<'arena>> {
        let Some(tok) = self.next() else {
            return Err(CalcError::Syntax("Unexpected end of input".to_string()));
        };

        match tok.kind {
            TokenKind::Number | TokenKind::Constant => {
                let value: Real = tok.value.ok_or_else(|| {
                    CalcError::Syntax(format!("Literal without a value at position {}", tok.position))
                })?;
                Ok(self.leaf(value))
            }
            TokenKind::Function => self.parse_function_call(&tok),
            TokenKind::Open => {
                if self.peek().is_some_and(|t| t.kind == TokenKind::Close) {
                    return Err(CalcError::Syntax(format!(
                        "Empty parentheses at position {}",
                        tok.position
                    )));
                }
                // Grouping adds no node, so the height is the inner expression's
                let expr = self.parse_expr_bp(0)?;
                self.expect_close(tok.position)?;
                Ok(expr)
            }
            TokenKind::Close => Err(CalcError::UnmatchedParenthesis {
                position: tok.position,
                found: ')',
            }),
            TokenKind::Operator => Err(CalcError::Syntax(format!(
                "Unexpected operator '{}' at position {}",
                tok.text, tok.position
            ))),
        }
    }

    fn parse_function_call(&mut self, name_tok: &Token<'src>) -> Result<Subtree<'arena>> {
        let func = Function::from_name(name_tok.text).ok_or_else(|| {
            CalcError::Syntax(format!(
                "Unknown function '{}' at position {}",
                name_tok.text, name_tok.position
            ))
        })?;

        let open_position = match self.peek() {
            Some(tok) if tok.kind == TokenKind::Open => tok.position,
            Some(tok) => {
                return Err(CalcError::Syntax(format!(
                    "Function '{}' must be followed by '(' but found '{}' at position {}",
                    func.name(),
                    tok.text,
                    tok.position
                )));
            }
            None => {
                return Err(CalcError::Syntax(format!(
                    "Function '{}' must be followed by '(' but found end of input",
                    func.name()
                )));
            }
        };
        self.next(); // consume '('

        if self.peek().is_some_and(|t| t.kind == TokenKind::Close) {
            return Err(CalcError::Syntax(format!(
                "Function '{}' called without an argument at position {}",
                func.name(),
                open_position
            )));
        }

        let arg = self.parse_expr_bp(0)?;
        self.expect_close(open_position)?;
        self.join(
            AstExpr::Function {
                func,
                arg: arg.node,
            },
            arg.depth,
        )
    }

    // Parse a complete expression
    fn parse(&mut self) -> Result<&'arena AstExpr<'arena>> {
        if self.tokens.is_empty() {
            return Err(CalcError::Syntax("Empty expression".to_string()));
        }

        self.recursion_depth = 0;
        let expr = self.parse_expr_bp(0)?;

        // Check for unexpected trailing tokens
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Close {
                return Err(CalcError::UnmatchedParenthesis {
                    position: tok.position,
                    found: ')',
                });
            }
            return Err(CalcError::Syntax(format!(
                "Unexpected token at position {}: '{}'",
                tok.position, tok.text
            )));
        }

        trace!("built a tree of height {}", expr.depth);
        Ok(expr.node)
    }
}

/// Parse a normalized expression string into a tree allocated in `arena`,
/// using the default limits.
pub fn parse_expression<'arena>(
    input: &str,
    arena: &'arena Bump,
) -> Result<&'arena AstExpr<'arena>> {
    parse_expression_with_config(input, arena, &CalcConfig::default())
}

/// Parse with explicit length and nesting limits.
pub fn parse_expression_with_config<'arena>(
    input: &str,
    arena: &'arena Bump,
    config: &CalcConfig,
) -> Result<&'arena AstExpr<'arena>> {
    if input.len() > config.max_expression_length {
        return Err(CalcError::Syntax(format!(
            "Expression too long: {} characters (maximum is {})",
            input.len(),
            config.max_expression_length
        )));
    }

    let tokens = Lexer::new(input).collect::<Result<Vec<Token<'_>>>>()?;
    trace!("tokenized {:?} into {} tokens", input, tokens.len());

    let mut parser = PrattParser::new(tokens, arena, config.max_recursion_depth);
    let ast = parser.parse()?;
    trace!("parsed {:?} into {} nodes", input, ast.node_count());
    Ok(ast)
}

/// Normalize, parse and evaluate a raw keypad expression in one call.
///
/// Uses a throwaway arena; see [`Evaluator`](crate::evaluator::Evaluator) to
/// reuse one across calls.
pub fn interp(expression: &str) -> Result<Real> {
    let arena = Bump::new();
    let normalized = normalize(expression);
    let ast = parse_expression(&normalized, &arena)?;
    eval_ast(ast)
}
