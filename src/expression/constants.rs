use crate::expression::ast::Expression;

impl Expression {
    /// Literal operands in left-to-right order
    pub fn constants(&self) -> Vec<f64> {
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}

fn collect(expr: &Expression, out: &mut Vec<f64>) {
    match expr {
        Expression::Number(n) => out.push(*n),
        Expression::Unary(_, operand) => collect(operand, out),
        Expression::Binary(_, l, r) => {
            collect(l, out);
            collect(r, out);
        }
    }
}
