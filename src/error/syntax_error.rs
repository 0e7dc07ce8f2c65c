#[derive(Debug)]
/// Represents all errors that can occur while parsing the token stream.
pub enum SyntaxError {
    /// Found a token that does not fit the grammar rule being parsed.
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token actually encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The file contains no `programme` block.
    MissingProgram,
    /// The file contains more than one `programme` block.
    DuplicateProgram {
        /// The source line of the second `programme`.
        line: usize,
    },
    /// The name after `fin` does not match the opening name of the block.
    ClosingLabelMismatch {
        /// `programme`, `fonction` or `procédure`.
        kind:     &'static str,
        /// The name the block was opened with.
        expected: String,
        /// The name found after `fin`.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A type name was expected in a declaration or formal argument.
    ExpectedType {
        /// The token actually encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `pour` loop bound was written as a boolean literal.
    BooleanLoopBound {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `pour` loop bound was written as a string literal.
    StringLoopBound {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found, line } => {
                write!(f, "Error on line {line}: expected {expected}, found {found}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: unexpected end of input.")
            },

            Self::MissingProgram => {
                write!(f, "Error: the file contains no main 'programme' block.")
            },

            Self::DuplicateProgram { line } => write!(f,
                                                      "Error on line {line}: there can only be one main 'programme' block."),

            Self::ClosingLabelMismatch { kind,
                                         expected,
                                         found,
                                         line, } => {
                write!(f,
                       "Error on line {line}: the {kind} '{expected}' must be closed by 'fin {expected}', found 'fin {found}'.")
            },

            Self::ExpectedType { found, line } => {
                write!(f, "Error on line {line}: expected a type name, found {found}.")
            },

            Self::BooleanLoopBound { line } => write!(f,
                                                      "Error on line {line}: booleans are not allowed as 'pour' loop bounds."),

            Self::StringLoopBound { line } => write!(f,
                                                     "Error on line {line}: strings are not allowed as 'pour' loop bounds."),
        }
    }
}

impl std::error::Error for SyntaxError {}
