use std::rc::Rc;

use crate::{
    ast::{
        BinaryOperator, Call, Compound, Expr, FormalArgument, Function, GlobalScope, PassingMode,
        Procedure, Program, Statement, Variable, VariableDeclaration,
    },
    error::SemanticError,
    interpreter::{
        builtins,
        semantics::{
            symbol::{ArgumentSymbol, BuiltinType, CallableKind, CallableSymbol, VariableSymbol},
            table::{GlobalTable, ScopedSymbolTable},
        },
    },
};

/// Result type used by the analysis pass.
pub type AnalysisResult<T> = Result<T, SemanticError>;

/// The static analysis pass that runs between parsing and execution.
///
/// Walks the tree exactly once: every callable is first registered in the
/// global table so any callable can reference any other regardless of
/// textual order, then the procedure bodies, the function bodies and
/// finally the program body are analyzed. Each analyzed body is attached
/// to its callable symbol afterwards, which is what makes recursive
/// self-calls resolve while keeping the attachment a single operation.
///
/// Analysis stops at the first violation; a program that fails this pass
/// never begins evaluation.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    global: GlobalTable,
}

impl SemanticAnalyzer {
    /// A fresh analyzer with an empty global table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes the whole tree, filling the resolved-symbol slot of every
    /// variable and call node.
    ///
    /// # Errors
    /// Returns the first [`SemanticError`] encountered.
    pub fn analyze(&mut self, tree: &mut GlobalScope) -> AnalysisResult<()> {
        for procedure in &tree.procedures {
            self.declare_callable(&procedure.name,
                                  CallableKind::Procedure,
                                  &procedure.args,
                                  procedure.line)?;
        }
        for function in &tree.functions {
            self.declare_callable(&function.name,
                                  CallableKind::Function,
                                  &function.args,
                                  function.line)?;
        }

        for procedure in &mut tree.procedures {
            self.analyze_procedure(procedure)?;
        }
        for function in &mut tree.functions {
            self.analyze_function(function)?;
        }

        self.analyze_program(&mut tree.program)
    }

    /// Registers a callable in the global table before any body is
    /// analyzed.
    fn declare_callable(&mut self,
                        name: &str,
                        kind: CallableKind,
                        formals: &[FormalArgument],
                        line: usize)
                        -> AnalysisResult<()> {
        let mut args = Vec::with_capacity(formals.len());
        for formal in formals {
            let ty = self.resolve_type(&formal.type_spec.name, formal.type_spec.line)?;
            args.push(ArgumentSymbol { variable: VariableSymbol { name: formal.variable
                                                                            .name
                                                                            .clone(),
                                                                 ty },
                                       mode:     formal.mode, });
        }

        let symbol = Rc::new(CallableSymbol::new(name.to_string(), kind, args));
        if self.global.define_callable(symbol).is_some() {
            return Err(SemanticError::DuplicateCallable { name: name.to_string(),
                                                          line });
        }
        Ok(())
    }

    fn resolve_type(&self, name: &str, line: usize) -> AnalysisResult<BuiltinType> {
        self.global
            .resolve_type(name)
            .ok_or_else(|| SemanticError::UnknownType { name: name.to_string(),
                                                        line })
    }

    fn analyze_procedure(&mut self, node: &mut Procedure) -> AnalysisResult<()> {
        let mut scope = self.open_callable_scope(&node.name, &mut node.args)?;
        self.analyze_compound(&mut node.body, &mut scope)?;
        self.attach_body(&node.name, &node.body);
        Ok(())
    }

    fn analyze_function(&mut self, node: &mut Function) -> AnalysisResult<()> {
        let mut scope = self.open_callable_scope(&node.name, &mut node.args)?;
        self.analyze_compound(&mut node.body, &mut scope)?;
        self.attach_body(&node.name, &node.body);
        Ok(())
    }

    fn analyze_program(&mut self, node: &mut Program) -> AnalysisResult<()> {
        let mut scope = ScopedSymbolTable::new(node.name.clone());
        self.analyze_compound(&mut node.body, &mut scope)
    }

    /// Opens a fresh scope for a callable and registers its formal
    /// arguments in it.
    fn open_callable_scope(&self,
                           name: &str,
                           formals: &mut [FormalArgument])
                           -> AnalysisResult<ScopedSymbolTable> {
        let mut scope = ScopedSymbolTable::new(name.to_string());
        for formal in formals {
            let ty = self.resolve_type(&formal.type_spec.name, formal.type_spec.line)?;
            let symbol = VariableSymbol { name: formal.variable.name.clone(),
                                          ty };
            formal.variable.symbol = Some(symbol.clone());
            scope.define(symbol);
        }
        Ok(scope)
    }

    /// Attaches the analyzed body of a callable to its symbol.
    fn attach_body(&self, name: &str, body: &Compound) {
        if let Some(symbol) = self.global.lookup_callable(name) {
            symbol.attach_body(Rc::new(body.clone()));
        }
    }

    fn analyze_compound(&mut self,
                        node: &mut Compound,
                        scope: &mut ScopedSymbolTable)
                        -> AnalysisResult<()> {
        for declaration in &mut node.declarations {
            self.analyze_declaration(declaration, scope)?;
        }
        for statement in &mut node.statements {
            self.analyze_statement(statement, scope)?;
        }
        Ok(())
    }

    fn analyze_declaration(&mut self,
                           node: &mut VariableDeclaration,
                           scope: &mut ScopedSymbolTable)
                           -> AnalysisResult<()> {
        let ty = self.resolve_type(&node.type_spec.name, node.type_spec.line)?;

        if scope.lookup(&node.variable.name).is_some() {
            return Err(SemanticError::VariableRedeclared { name: node.variable.name.clone(),
                                                           line: node.variable.line, });
        }

        let symbol = VariableSymbol { name: node.variable.name.clone(),
                                      ty };
        node.variable.symbol = Some(symbol.clone());
        scope.define(symbol);
        Ok(())
    }

    fn analyze_statement(&mut self,
                         node: &mut Statement,
                         scope: &mut ScopedSymbolTable)
                         -> AnalysisResult<()> {
        match node {
            Statement::Assign { target, value, .. } => {
                // The target must already be declared; assignment never
                // declares implicitly.
                self.resolve_variable(target, scope)?;
                self.analyze_expr(value, scope)
            },
            Statement::ProcedureCall(call) => self.analyze_call(call, scope, true),
            Statement::If { condition,
                            main,
                            alternative,
                            .. } => {
                self.analyze_expr(condition, scope)?;
                for statement in main {
                    self.analyze_statement(statement, scope)?;
                }
                for statement in alternative {
                    self.analyze_statement(statement, scope)?;
                }
                Ok(())
            },
            Statement::While { condition, body, .. }
            | Statement::DoWhile { condition, body, .. } => {
                self.analyze_expr(condition, scope)?;
                for statement in body {
                    self.analyze_statement(statement, scope)?;
                }
                Ok(())
            },
            Statement::For { counter,
                             start,
                             end,
                             step,
                             body,
                             line, } => {
                let symbol = self.resolve_variable(counter, scope)?;
                if symbol.ty != BuiltinType::Integer {
                    return Err(SemanticError::LoopCounterNotInteger { name: counter.name
                                                                                  .clone(),
                                                                      line: *line, });
                }

                self.analyze_expr(start, scope)?;
                self.analyze_expr(end, scope)?;
                if let Some(step) = step {
                    self.analyze_expr(step, scope)?;
                }
                for statement in body {
                    self.analyze_statement(statement, scope)?;
                }
                Ok(())
            },
            Statement::Return { expr, .. } => self.analyze_expr(expr, scope),
            Statement::Empty => Ok(()),
        }
    }

    /// Resolves a call site.
    ///
    /// The two intrinsics bypass the global table entirely; they are only
    /// legal in statement position. Everything else is looked up in the
    /// global table, checked for arity, and checked for the bare-variable
    /// requirement on reference-mode arguments.
    fn analyze_call(&mut self,
                    call: &mut Call,
                    scope: &mut ScopedSymbolTable,
                    intrinsic_allowed: bool)
                    -> AnalysisResult<()> {
        for arg in &mut call.args {
            self.analyze_expr(arg, scope)?;
        }

        if intrinsic_allowed && builtins::is_builtin_procedure(&call.name) {
            if call.name == builtins::INPUT {
                if call.args.len() != 1 {
                    return Err(SemanticError::InputArity { found: call.args.len(),
                                                           line:  call.line, });
                }
                if !matches!(call.args[0], Expr::Variable(_)) {
                    return Err(SemanticError::InputTargetNotVariable { line: call.line });
                }
            }
            return Ok(());
        }

        let symbol = self.global
                         .lookup_callable(&call.name)
                         .cloned()
                         .ok_or_else(|| SemanticError::UnknownCallable { name: call.name
                                                                                   .clone(),
                                                                         line: call.line, })?;

        if symbol.args.len() != call.args.len() {
            return Err(SemanticError::ArgumentCountMismatch { name:     call.name.clone(),
                                                              expected: symbol.args.len(),
                                                              found:    call.args.len(),
                                                              line:     call.line, });
        }

        for (formal, actual) in symbol.args.iter().zip(&call.args) {
            if formal.mode == PassingMode::Reference && !matches!(actual, Expr::Variable(_)) {
                return Err(SemanticError::ReferenceArgumentNotVariable {
                    callable: call.name.clone(),
                    argument: formal.variable.name.clone(),
                    line: actual.line_number(),
                });
            }
        }

        call.symbol = Some(symbol);
        Ok(())
    }

    fn analyze_expr(&mut self,
                    node: &mut Expr,
                    scope: &mut ScopedSymbolTable)
                    -> AnalysisResult<()> {
        match node {
            Expr::IntegerLiteral { .. }
            | Expr::RealLiteral { .. }
            | Expr::StringLiteral { .. }
            | Expr::CharLiteral { .. }
            | Expr::BooleanLiteral { .. } => Ok(()),
            Expr::Variable(variable) => {
                self.resolve_variable(variable, scope)?;
                Ok(())
            },
            Expr::UnaryOp { expr, .. } => self.analyze_expr(expr, scope),
            Expr::BinaryOp { left, op, right, .. } => {
                // `*`, `/`, `mod` and `-` only work on numbers; strings are
                // rejected here, booleans are deferred to runtime.
                if matches!(op,
                            BinaryOperator::Mul
                            | BinaryOperator::Div
                            | BinaryOperator::Mod
                            | BinaryOperator::Sub)
                {
                    self.check_numeric_operand(left, *op, scope)?;
                    self.check_numeric_operand(right, *op, scope)?;
                }

                self.analyze_expr(left, scope)?;
                self.analyze_expr(right, scope)
            },
            Expr::FunctionCall(call) => self.analyze_call(call, scope, false),
        }
    }

    /// Rejects string operands of the numbers-only operators.
    fn check_numeric_operand(&mut self,
                             operand: &mut Expr,
                             op: BinaryOperator,
                             scope: &mut ScopedSymbolTable)
                             -> AnalysisResult<()> {
        match operand {
            Expr::StringLiteral { line, .. } => {
                Err(SemanticError::StringOperand { operation: op.to_string(),
                                                   line:      *line, })
            },
            Expr::Variable(variable) => {
                let symbol = self.resolve_variable(variable, scope)?;
                if symbol.ty == BuiltinType::Text {
                    return Err(SemanticError::StringVariableOperand { operation: op.to_string(),
                                                                      name:      variable.name
                                                                                         .clone(),
                                                                      line:      variable.line, });
                }
                Ok(())
            },
            _ => Ok(()),
        }
    }

    /// Resolves a variable reference in the current scope only and fills
    /// its symbol slot.
    fn resolve_variable(&self,
                        node: &mut Variable,
                        scope: &ScopedSymbolTable)
                        -> AnalysisResult<VariableSymbol> {
        let symbol = scope.lookup(&node.name)
                          .ok_or_else(|| SemanticError::UndeclaredVariable { name: node.name
                                                                                       .clone(),
                                                                             line: node.line, })?;

        node.symbol = Some(symbol.clone());
        Ok(symbol.clone())
    }
}
