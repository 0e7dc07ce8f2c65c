#[derive(Debug)]
/// Represents the errors detected by static analysis, before execution.
pub enum SemanticError {
    /// A declaration names a type that does not exist.
    UnknownType {
        /// The unknown type name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A variable was used without being declared in the enclosing scope.
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name was declared twice in the same scope.
    VariableRedeclared {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Two procedures or functions share the same name.
    DuplicateCallable {
        /// The name of the callable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call site names a procedure or function that does not exist.
    UnknownCallable {
        /// The name of the callable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call site passes the wrong number of arguments.
    ArgumentCountMismatch {
        /// The name of the callable.
        name:     String,
        /// How many arguments the callable declares.
        expected: usize,
        /// How many arguments the call site passes.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operation that only accepts numbers was applied to a string
    /// literal.
    StringOperand {
        /// The operator, e.g. `*`.
        operation: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// An operation that only accepts numbers was applied to a string-typed
    /// variable.
    StringVariableOperand {
        /// The operator, e.g. `*`.
        operation: String,
        /// The name of the offending variable.
        name:      String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The counter of a `pour` loop is not declared as `entier`.
    LoopCounterNotInteger {
        /// The name of the counter variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A reference-mode formal argument received something other than a bare
    /// variable.
    ReferenceArgumentNotVariable {
        /// The name of the callable.
        callable: String,
        /// The name of the reference-mode formal argument.
        argument: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `saisir` was called with a number of arguments other than one.
    InputArity {
        /// How many arguments the call site passes.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `saisir` received an expression instead of a bare variable.
    InputTargetNotVariable {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType { name, line } => {
                write!(f, "Error on line {line}: unknown type '{name}'.")
            },
            Self::UndeclaredVariable { name, line } => write!(f,
                                                              "Error on line {line}: the variable '{name}' was not declared in the 'avec' block."),

            Self::VariableRedeclared { name, line } => write!(f,
                                                              "Error on line {line}: the variable '{name}' is already declared in this scope."),

            Self::DuplicateCallable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is already defined.")
            },
            Self::UnknownCallable { name, line } => {
                write!(f, "Error on line {line}: unknown procedure or function '{name}'.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => {
                write!(f,
                       "Error on line {line}: '{name}' takes {expected} argument(s) but {found} were supplied.")
            },
            Self::StringOperand { operation, line } => write!(f,
                                                              "Error on line {line}: illegal operation ('{operation}') on a string."),

            Self::StringVariableOperand { operation, name, line } => {
                write!(f,
                       "Error on line {line}: illegal operation ('{operation}') on the string variable '{name}'.")
            },
            Self::LoopCounterNotInteger { name, line } => write!(f,
                                                                 "Error on line {line}: the counter '{name}' of a 'pour' loop must be an 'entier'."),

            Self::ReferenceArgumentNotVariable { callable,
                                                 argument,
                                                 line, } => {
                write!(f,
                       "Error on line {line}: the reference argument '{argument}' of '{callable}' requires a bare variable, not an expression.")
            },
            Self::InputArity { found, line } => write!(f,
                                                       "Error on line {line}: 'saisir' takes exactly one argument but {found} were supplied."),

            Self::InputTargetNotVariable { line } => write!(f,
                                                            "Error on line {line}: 'saisir' takes a bare variable as argument."),
        }
    }
}

impl std::error::Error for SemanticError {}
