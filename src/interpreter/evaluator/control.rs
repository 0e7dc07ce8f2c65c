use crate::{
    ast::{Expr, Statement, Variable},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
    util::num::f64_to_i64_checked,
};

impl Interpreter<'_> {
    /// Executes a `si` statement: the main branch when the condition is
    /// truthy, the `sinon` branch otherwise. A missing `sinon` branch is
    /// an empty list and a no-op.
    pub(in crate::interpreter::evaluator) fn execute_if(&mut self,
                                                        condition: &Expr,
                                                        main: &[Statement],
                                                        alternative: &[Statement])
                                                        -> EvalResult<Flow> {
        if self.eval(condition)?.truthy() {
            self.execute_statements(main)
        } else {
            self.execute_statements(alternative)
        }
    }

    /// Executes a `tant que` loop.
    ///
    /// There is no iteration cap: a condition that never becomes false
    /// loops until the process is killed.
    pub(in crate::interpreter::evaluator) fn execute_while(&mut self,
                                                           condition: &Expr,
                                                           body: &[Statement])
                                                           -> EvalResult<Flow> {
        while self.eval(condition)?.truthy() {
            match self.execute_statements(body)? {
                Flow::Normal => {},
                returned => return Ok(returned),
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a `répéter … tant que` loop; the body always runs at
    /// least once.
    pub(in crate::interpreter::evaluator) fn execute_do_while(&mut self,
                                                              body: &[Statement],
                                                              condition: &Expr)
                                                              -> EvalResult<Flow> {
        loop {
            match self.execute_statements(body)? {
                Flow::Normal => {},
                returned => return Ok(returned),
            }

            if !self.eval(condition)?.truthy() {
                break;
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a `pour` loop.
    ///
    /// The step defaults to 1 and must not be zero; a negative step with
    /// ascending bounds can never terminate and both cases fail before
    /// the first iteration. The counter is re-set before *every* body
    /// statement so the body cannot derail the iteration by reassigning
    /// it, and is advanced by the step once the body completes. The loop
    /// runs while `i <= end` for a positive step, `i >= end` for a
    /// negative one.
    pub(in crate::interpreter::evaluator) fn execute_for(&mut self,
                                                         counter: &Variable,
                                                         start: &Expr,
                                                         end: &Expr,
                                                         step: Option<&Expr>,
                                                         body: &[Statement],
                                                         line: usize)
                                                         -> EvalResult<Flow> {
        let start_value = self.loop_value(start)?;
        let end_value = self.loop_value(end)?;
        let step_value = match step {
            Some(expr) => self.loop_value(expr)?,
            None => 1,
        };

        if step_value == 0 {
            return Err(RuntimeError::ZeroStep { line });
        }
        if step_value < 0 && start_value < end_value {
            return Err(RuntimeError::NegativeStepAscending { line });
        }

        let mut i = start_value;
        loop {
            let in_range = if step_value > 0 { i <= end_value } else { i >= end_value };
            if !in_range {
                break;
            }

            for statement in body {
                self.call_stack.set(&counter.name, Value::Integer(i));
                match self.execute_statement(statement)? {
                    Flow::Normal => {},
                    returned => return Ok(returned),
                }
            }

            i = i.checked_add(step_value)
                 .ok_or(RuntimeError::Overflow { line })?;
            self.call_stack.set(&counter.name, Value::Integer(i));
        }

        Ok(Flow::Normal)
    }

    /// Evaluates a `pour` bound or step down to an integer.
    fn loop_value(&mut self, expr: &Expr) -> EvalResult<i64> {
        let line = expr.line_number();
        match self.eval(expr)? {
            Value::Integer(n) => Ok(n),
            Value::Real(r) => f64_to_i64_checked(r, RuntimeError::NonIntegerLoopValue { line }),
            _ => Err(RuntimeError::NonIntegerLoopValue { line }),
        }
    }
}
