use crate::{
    ast::{Call, Expr, PassingMode},
    error::RuntimeError,
    interpreter::{
        builtins::{self, EvaluatedArgument},
        evaluator::core::{EvalResult, Flow, Interpreter},
        stack::{ActivationRecord, RecordKind},
        value::Value,
    },
};

impl Interpreter<'_> {
    /// Executes a procedure call statement.
    ///
    /// The two intrinsics are recognized by name and run against the
    /// *current* activation record, without a frame of their own. Every
    /// other call enters the callee normally; a `retourne` escaping a
    /// procedure body propagates through here untouched.
    pub(in crate::interpreter::evaluator) fn execute_procedure_call(&mut self,
                                                                    call: &Call)
                                                                    -> EvalResult<Flow> {
        if builtins::is_builtin_procedure(&call.name) {
            return self.execute_intrinsic(call);
        }
        self.enter_call(call)
    }

    /// Evaluates a function call inside an expression.
    ///
    /// This is the only boundary that consumes a [`Flow::Returned`]: its
    /// payload becomes the call's value. A function body that completes
    /// without `retourne` has no value to produce and fails.
    pub(in crate::interpreter::evaluator) fn eval_function_call(&mut self,
                                                                call: &Call)
                                                                -> EvalResult<Value> {
        match self.enter_call(call)? {
            Flow::Returned { value, .. } => Ok(value),
            Flow::Normal => Err(RuntimeError::MissingReturnValue { name: call.name.clone(),
                                                                   line: call.line, }),
        }
    }

    /// Pushes a fresh activation record for the callee, binds its formal
    /// arguments, runs the stored body and pops the record.
    ///
    /// Copy-mode formals receive the evaluated actual argument. A
    /// reference-mode formal receives a handle to the caller's variable
    /// instead; the variable is not read at call time, so an unassigned
    /// variable can be passed by reference as a pure out-parameter.
    fn enter_call(&mut self, call: &Call) -> EvalResult<Flow> {
        let Some(symbol) = call.symbol.clone() else {
            return Err(RuntimeError::UnresolvedSymbol { name: call.name.clone(),
                                                        line: call.line, });
        };
        let Some(body) = symbol.body().cloned() else {
            return Err(RuntimeError::UnresolvedSymbol { name: call.name.clone(),
                                                        line: call.line, });
        };

        let caller = self.call_stack.current_index();
        let mut record = ActivationRecord::new(symbol.name.clone(), RecordKind::Call);

        for (formal, actual) in symbol.args.iter().zip(&call.args) {
            if formal.mode == PassingMode::Reference
               && let Expr::Variable(variable) = actual
            {
                let reference = self.call_stack.resolve_reference(caller, &variable.name);
                record.define_reference(formal.variable.name.clone(), reference);
            } else {
                let value = self.eval(actual)?;
                record.insert(formal.variable.name.clone(), value);
            }
        }

        self.call_stack.push(record);
        let flow = self.execute_compound(&body)?;
        self.call_stack.pop();

        Ok(flow)
    }

    /// Dispatches a call to one of the two intrinsics.
    ///
    /// `afficher` gets `{node, value}` pairs for every argument; `saisir`
    /// gets the raw argument node, because its variable is a write target
    /// and must not be read before the input arrives.
    fn execute_intrinsic(&mut self, call: &Call) -> EvalResult<Flow> {
        match call.name.as_str() {
            builtins::OUTPUT => {
                let mut args = Vec::with_capacity(call.args.len());
                for arg in &call.args {
                    let value = self.eval(arg)?;
                    args.push(EvaluatedArgument { node: arg, value });
                }
                builtins::afficher::afficher(&mut *self.console, &args);
                Ok(Flow::Normal)
            },
            builtins::INPUT => {
                builtins::saisir::saisir(&mut *self.console,
                                         &mut self.call_stack,
                                         &call.args,
                                         call.line)?;
                Ok(Flow::Normal)
            },
            _ => Err(RuntimeError::InvalidIntrinsicCall { name: call.name.clone(),
                                                          line: call.line, }),
        }
    }
}
