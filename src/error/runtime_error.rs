#[derive(Debug)]
/// Represents all errors that can be raised while the program is executing.
pub enum RuntimeError {
    /// A `retourne` was executed outside of any function body.
    ReturnOutsideFunction {
        /// The source line of the `retourne`.
        line: usize,
    },
    /// A function body finished without executing `retourne`.
    MissingReturnValue {
        /// The name of the function.
        name: String,
        /// The source line of the call.
        line: usize,
    },
    /// A `pour` loop was given a step of zero.
    ZeroStep {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `pour` loop was given a negative step with ascending bounds.
    NegativeStepAscending {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `pour` bound or step did not evaluate to an integral number.
    NonIntegerLoopValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An arithmetic operator received a boolean operand.
    BooleanOperand {
        /// The operator, e.g. `+`.
        operation: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A numbers-only operator received a textual operand.
    TextOperand {
        /// The operator, e.g. `-`.
        operation: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A declared variable was read before any value was assigned to it.
    UnassignedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer was too large to take part in mixed real arithmetic.
    NumberTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Character arithmetic produced a code outside the valid range.
    InvalidCharacterCode {
        /// The offending code point value.
        code: i64,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Interactive input did not match the declared type of the variable.
    InputMismatch {
        /// The French name of the expected type.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Interactive input could not be read from the console.
    InputUnavailable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An intrinsic procedure was invoked with arguments the analyzer should
    /// have rejected.
    InvalidIntrinsicCall {
        /// The name of the intrinsic.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A node reached evaluation without a resolved symbol.
    UnresolvedSymbol {
        /// The name carried by the node.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReturnOutsideFunction { line } => write!(f,
                                                           "Error on line {line}: a 'retourne' was used outside of a function."),

            Self::MissingReturnValue { name, line } => write!(f,
                                                              "Error on line {line}: the function '{name}' finished without executing 'retourne'."),

            Self::ZeroStep { line } => write!(f,
                                              "Error on line {line}: the 'pas' of a 'pour' loop cannot be zero, the loop would never finish."),

            Self::NegativeStepAscending { line } => write!(f,
                                                           "Error on line {line}: a negative 'pas' requires the start bound to be greater than the end bound."),

            Self::NonIntegerLoopValue { line } => write!(f,
                                                         "Error on line {line}: 'pour' bounds and step must be integral numbers."),

            Self::BooleanOperand { operation, line } => write!(f,
                                                               "Error on line {line}: illegal operation ('{operation}') on a boolean."),

            Self::TextOperand { operation, line } => write!(f,
                                                            "Error on line {line}: illegal operation ('{operation}') on a string."),

            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: expected a number."),
            Self::ExpectedBoolean { line } => write!(f, "Error on line {line}: expected a boolean."),
            Self::UnassignedVariable { name, line } => write!(f,
                                                              "Error on line {line}: the variable '{name}' is used before a value is assigned to it."),

            Self::DivisionByZero { line } => write!(f, "Error on line {line}: division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: integer overflow while trying to compute result."),

            Self::NumberTooLarge { line } => {
                write!(f, "Error on line {line}: number is too large.")
            },
            Self::InvalidCharacterCode { code, line } => write!(f,
                                                                "Error on line {line}: {code} is not a valid character code."),

            Self::InputMismatch { expected, line } => {
                write!(f, "Error on line {line}: you must enter a value of type '{expected}'.")
            },
            Self::InputUnavailable { line } => {
                write!(f, "Error on line {line}: no input is available to read.")
            },
            Self::InvalidIntrinsicCall { name, line } => {
                write!(f, "Error on line {line}: invalid call to '{name}'.")
            },
            Self::UnresolvedSymbol { name, line } => write!(f,
                                                            "Error on line {line}: '{name}' was never resolved by the analyzer."),
        }
    }
}

impl std::error::Error for RuntimeError {}
