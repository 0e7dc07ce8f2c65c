use crate::{
    ast::{Compound, Expr, GlobalScope, Statement, Variable},
    error::RuntimeError,
    interpreter::{
        builtins::Console,
        stack::{ActivationRecord, CallStack, RecordKind},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing a statement.
///
/// `retourne` does not unwind the host stack; it travels up the statement
/// chain as a plain value until a function-call boundary captures it.
/// Anything that is not a function boundary propagates it untouched, so a
/// `retourne` reaching the top of [`Interpreter::interpret`] is the fatal
/// "outside a function" error.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement completed; execution continues with the next one.
    Normal,
    /// A `retourne` fired and is looking for its function boundary.
    Returned {
        /// The evaluated return value.
        value: Value,
        /// The source line of the `retourne`, for the fatal top-level
        /// error.
        line:  usize,
    },
}

/// Walks the analyzed tree and executes it.
///
/// Holds the call stack and the console the intrinsics talk to. The
/// evaluator assumes every variable and call node carries its resolved
/// symbol; the public pipeline guarantees this by always running semantic
/// analysis first.
pub struct Interpreter<'io> {
    pub(in crate::interpreter::evaluator) call_stack: CallStack,
    pub(in crate::interpreter::evaluator) console:    &'io mut dyn Console,
}

impl<'io> Interpreter<'io> {
    /// An interpreter with an empty call stack, writing and reading
    /// through the given console.
    pub fn new(console: &'io mut dyn Console) -> Self {
        Self { call_stack: CallStack::new(),
               console }
    }

    /// Executes a fully analyzed tree.
    ///
    /// Procedure and function declarations have no runtime effect of
    /// their own (their bodies were bound to symbols during analysis), so
    /// this pushes the program's activation record, runs the program body
    /// and pops the record.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised; execution aborts
    /// immediately, with no retries or partial-result reporting.
    pub fn interpret(&mut self, tree: &GlobalScope) -> EvalResult<()> {
        self.call_stack
            .push(ActivationRecord::new(tree.program.name.clone(), RecordKind::Program));
        let flow = self.execute_compound(&tree.program.body)?;
        self.call_stack.pop();

        match flow {
            Flow::Normal => Ok(()),
            Flow::Returned { line, .. } => Err(RuntimeError::ReturnOutsideFunction { line }),
        }
    }

    /// Executes a `début … fin` block.
    ///
    /// Declarations only pre-validate names during analysis; the value
    /// slots of an activation record come into existence on first
    /// assignment.
    pub(in crate::interpreter::evaluator) fn execute_compound(&mut self,
                                                              compound: &Compound)
                                                              -> EvalResult<Flow> {
        self.execute_statements(&compound.statements)
    }

    /// Executes statements in order, stopping early when one of them
    /// produces a `retourne`.
    pub(in crate::interpreter::evaluator) fn execute_statements(&mut self,
                                                                statements: &[Statement])
                                                                -> EvalResult<Flow> {
        for statement in statements {
            match self.execute_statement(statement)? {
                Flow::Normal => {},
                returned => return Ok(returned),
            }
        }
        Ok(Flow::Normal)
    }

    pub(in crate::interpreter::evaluator) fn execute_statement(&mut self,
                                                               statement: &Statement)
                                                               -> EvalResult<Flow> {
        match statement {
            Statement::Assign { target, value, .. } => {
                let value = self.eval(value)?;
                self.call_stack.set(&target.name, value);
                Ok(Flow::Normal)
            },
            Statement::ProcedureCall(call) => self.execute_procedure_call(call),
            Statement::If { condition,
                            main,
                            alternative,
                            .. } => self.execute_if(condition, main, alternative),
            Statement::While { condition, body, .. } => self.execute_while(condition, body),
            Statement::DoWhile { body, condition, .. } => self.execute_do_while(body, condition),
            Statement::For { counter,
                             start,
                             end,
                             step,
                             body,
                             line, } => {
                self.execute_for(counter, start, end, step.as_ref(), body, *line)
            },
            Statement::Return { expr, line } => {
                let value = self.eval(expr)?;
                Ok(Flow::Returned { value, line: *line })
            },
            Statement::Empty => Ok(Flow::Normal),
        }
    }

    /// Evaluates an expression to a value.
    pub(in crate::interpreter::evaluator) fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
            Expr::RealLiteral { value, .. } => Ok(Value::Real(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::Text(value.clone())),
            Expr::CharLiteral { value, .. } => Ok(Value::Char(*value)),
            Expr::BooleanLiteral { value, .. } => Ok(Value::Boolean(*value)),
            Expr::Variable(variable) => self.eval_variable(variable),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::BinaryOp { left, op, right, line } => {
                self.eval_binary_op(left, *op, right, *line)
            },
            Expr::FunctionCall(call) => self.eval_function_call(call),
        }
    }

    /// Reads a variable from the current activation record.
    fn eval_variable(&mut self, variable: &Variable) -> EvalResult<Value> {
        self.call_stack
            .get(&variable.name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnassignedVariable { name: variable.name.clone(),
                                                              line: variable.line, })
    }
}
