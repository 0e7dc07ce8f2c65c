/// Lexical errors.
///
/// Defines the errors that can occur while scanning raw source text into
/// tokens, before any grammar rule is applied.
pub mod lexical_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while the analyzed program is
/// executing: invalid loop steps, illegal operand types, input validation
/// failures, and misplaced `retourne` statements.
pub mod runtime_error;
/// Semantic errors.
///
/// Contains the errors detected by the static analysis pass that runs
/// between parsing and execution: undeclared or redeclared variables,
/// unknown callables, and type-incompatible operations.
pub mod semantic_error;
/// Syntax errors.
///
/// Defines all error types that can occur while parsing the token stream:
/// unexpected tokens, mismatched closing labels, and malformed declaration
/// or argument grammar.
pub mod syntax_error;

pub use lexical_error::LexicalError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
pub use syntax_error::SyntaxError;

/// Any failure the pipeline can surface to a caller.
///
/// Each stage keeps its own error enum; this type unifies them for the
/// public entry points so embedders can handle the whole pipeline with one
/// `?`. `Io` covers host failures (reading the script file) that are not
/// part of the language itself.
#[derive(Debug)]
pub enum Error {
    /// The scanner rejected the raw source text.
    Lexical(LexicalError),
    /// The parser rejected the token stream.
    Syntax(SyntaxError),
    /// The static analysis pass rejected the tree.
    Semantic(SemanticError),
    /// The program failed while executing.
    Runtime(RuntimeError),
    /// A host I/O failure outside the language pipeline.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(e) => write!(f, "{e}"),
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Semantic(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexical(e) => Some(e),
            Self::Syntax(e) => Some(e),
            Self::Semantic(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<LexicalError> for Error {
    fn from(e: LexicalError) -> Self {
        Self::Lexical(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<SemanticError> for Error {
    fn from(e: SemanticError) -> Self {
        Self::Semantic(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
