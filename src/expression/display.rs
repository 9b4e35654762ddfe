use std::fmt;

use crate::expression::ast::{BinaryOp, Expression, UnaryOp};

fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => 1,
        Expression::Binary(BinaryOp::Mul | BinaryOp::Div, _, _) => 2,
        Expression::Unary(_, _) => 3,
        Expression::Binary(BinaryOp::Pow, _, _) => 4,
        Expression::Number(_) => 5,
    }
}

fn write_with_parens(f: &mut fmt::Formatter, expr: &Expression, need_parens: bool) -> fmt::Result {
    if need_parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Renders with the fewest parentheses that reparse to the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Unary(op, operand) => {
                let sign = match op {
                    UnaryOp::Plus => "+",
                    UnaryOp::Minus => "-",
                };
                write!(f, "{}", sign)?;
                write_with_parens(f, operand, precedence(operand) < 3)
            }
            Expression::Binary(op, l, r) => {
                let own = precedence(self);
                let (need_l, need_r) = if *op == BinaryOp::Pow {
                    // right associative: only the base needs guarding
                    (precedence(l) <= own, precedence(r) < 3)
                } else {
                    (precedence(l) < own, precedence(r) <= own)
                };
                write_with_parens(f, l, need_l)?;
                write!(f, " {} ", op.symbol())?;
                write_with_parens(f, r, need_r)
            }
        }
    }
}
