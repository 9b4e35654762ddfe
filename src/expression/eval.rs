use log::debug;

use crate::expression::ast::{BinaryOp, Expression, UnaryOp};
use crate::expression::errors::EvalError;

/// Tolerance under which an exponent counts as an integer
pub const INTEGER_TOLERANCE: f64 = 1e-12;

/// Half-decade slack allowed on the estimated order of magnitude of a power
const POWER_LOG_MARGIN: f64 = 0.5;

/// Running budgets enforced while evaluating an untrusted tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalBudget {
    /// Maximum number of visited nodes
    pub max_ops: usize,
    /// Absolute bound on every intermediate and final value
    pub max_magnitude: f64,
    /// Largest allowed integer exponent magnitude
    pub max_exponent: u32,
    /// Bases above this magnitude may not be raised to an exponent of 3 or more
    pub large_base_threshold: f64,
}

impl Default for EvalBudget {
    fn default() -> Self {
        Self {
            max_ops: 200,
            max_magnitude: 1e9,
            max_exponent: 5,
            large_base_threshold: 100.0,
        }
    }
}

#[inline]
fn is_integer(value: f64) -> bool {
    (value - value.round()).abs() < INTEGER_TOLERANCE
}

struct Sandbox<'a> {
    budget: &'a EvalBudget,
    ops: usize,
}

impl Sandbox<'_> {
    fn tick(&mut self) -> Result<(), EvalError> {
        self.ops += 1;
        if self.ops > self.budget.max_ops {
            debug!("Operation budget of {} exhausted", self.budget.max_ops);
            return Err(EvalError::ComplexityExceeded);
        }
        Ok(())
    }

    fn bounded(&self, value: f64) -> Result<f64, EvalError> {
        if !value.is_finite() || value.abs() > self.budget.max_magnitude {
            debug!("Value {} outside magnitude bound", value);
            return Err(EvalError::MagnitudeExceeded);
        }
        Ok(value)
    }

    fn eval(&mut self, expr: &Expression) -> Result<f64, EvalError> {
        self.tick()?;
        match expr {
            Expression::Number(n) => self.bounded(*n),
            Expression::Unary(op, operand) => {
                let value = self.eval(operand)?;
                let result = match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => -value,
                };
                self.bounded(result)
            }
            Expression::Binary(op, l, r) => {
                let left = self.eval(l)?;
                let right = self.eval(r)?;
                let result = match op {
                    BinaryOp::Add => left + right,
                    BinaryOp::Sub => left - right,
                    BinaryOp::Mul => left * right,
                    BinaryOp::Div => {
                        if right == 0.0 {
                            debug!("Division by zero attempted");
                            return Err(EvalError::ZeroDivision);
                        }
                        left / right
                    }
                    BinaryOp::Pow => self.power(left, right)?,
                };
                self.bounded(result)
            }
        }
    }

    /// Guards are checked in order before any power is computed.
    fn power(&self, base: f64, exponent: f64) -> Result<f64, EvalError> {
        if !is_integer(exponent) {
            debug!("Non-integer exponent {}", exponent);
            return Err(EvalError::NonIntegerExponent);
        }
        let n = exponent.round();
        if n.abs() > f64::from(self.budget.max_exponent) {
            debug!("Exponent {} above cap {}", n, self.budget.max_exponent);
            return Err(EvalError::ExponentTooLarge);
        }
        if n.abs() >= 3.0 && base.abs() > self.budget.large_base_threshold {
            debug!("Base {} too large for exponent {}", base, n);
            return Err(EvalError::PowerTooLarge);
        }
        if base != 0.0 {
            let estimated_log10 = n.abs() * base.abs().log10();
            if estimated_log10 > self.budget.max_magnitude.log10() + POWER_LOG_MARGIN {
                debug!("Power {}^{} estimated at 1e{:.1}", base, n, estimated_log10);
                return Err(EvalError::PowerTooLarge);
            }
        } else if n < 0.0 {
            debug!("Zero raised to negative power {}", n);
            return Err(EvalError::ZeroDivision);
        }
        // n is bounded by max_exponent above
        Ok(base.powi(n as i32))
    }
}

impl Expression {
    /// Evaluate the tree under `budget`.
    ///
    /// Every call yields exactly one outcome: a finite value within the
    /// magnitude bound or one typed failure.
    ///
    /// # Errors
    ///
    /// - [`EvalError::ComplexityExceeded`] when more nodes are visited than allowed
    /// - [`EvalError::MagnitudeExceeded`] for non-finite or oversized values
    /// - [`EvalError::NonIntegerExponent`], [`EvalError::ExponentTooLarge`] and
    ///   [`EvalError::PowerTooLarge`] from the exponentiation guards
    /// - [`EvalError::ZeroDivision`] when dividing by zero
    pub fn evaluate(&self, budget: &EvalBudget) -> Result<f64, EvalError> {
        let mut sandbox = Sandbox { budget, ops: 0 };
        let result = sandbox.eval(self);

        match &result {
            Ok(value) => debug!("Expression {} evaluated to {} in {} ops", self, value, sandbox.ops),
            Err(e) => debug!("Expression {} failed: {}", self, e),
        }

        result
    }
}
