/// Unary sign applied to a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Parsed arithmetic expression built from a player's formula
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn number(value: f64) -> Self {
        Expression::Number(value)
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary(op, Box::new(left), Box::new(right))
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expression::Number(_) => 1,
            Expression::Unary(_, operand) => 1 + operand.node_count(),
            Expression::Binary(_, l, r) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Longest root-to-leaf path measured in edges; a lone literal has depth 0
    pub fn depth(&self) -> usize {
        match self {
            Expression::Number(_) => 0,
            Expression::Unary(_, operand) => 1 + operand.depth(),
            Expression::Binary(_, l, r) => 1 + l.depth().max(r.depth()),
        }
    }
}
