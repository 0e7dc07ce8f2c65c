/// The parser state and the file-level grammar: programs, procedures,
/// functions, declaration blocks and compounds.
pub mod core;
/// The expression grammar: factors, terms and full expressions.
pub mod expression;
/// The statement grammar: assignments, calls, control structures and
/// `retourne`.
pub mod statement;

pub use self::core::Parser;
