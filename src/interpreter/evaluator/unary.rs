use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a unary operation.
    ///
    /// `+` and `-` require a numeric operand, `non` requires a boolean.
    pub(in crate::interpreter::evaluator) fn eval_unary_op(&mut self,
                                                           op: UnaryOperator,
                                                           expr: &Expr,
                                                           line: usize)
                                                           -> EvalResult<Value> {
        let value = self.eval(expr)?;

        match op {
            UnaryOperator::Plus => match value {
                Value::Integer(_) | Value::Real(_) => Ok(value),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
            UnaryOperator::Minus => match value {
                Value::Integer(n) => {
                    n.checked_neg()
                     .map(Value::Integer)
                     .ok_or(RuntimeError::Overflow { line })
                },
                Value::Real(r) => Ok(Value::Real(-r)),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
            UnaryOperator::Not => match value {
                Value::Boolean(b) => Ok(Value::Boolean(!b)),
                _ => Err(RuntimeError::ExpectedBoolean { line }),
            },
        }
    }
}
