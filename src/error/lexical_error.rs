#[derive(Debug)]
/// Represents the errors that can occur while scanning source text.
pub enum LexicalError {
    /// The scanner hit a character sequence that belongs to no token.
    InvalidCharacter {
        /// The rejected source slice.
        slice:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { slice, line, column } => {
                write!(f, "Error on line {line}, column {column}: invalid character '{slice}'.")
            },
        }
    }
}

impl std::error::Error for LexicalError {}
