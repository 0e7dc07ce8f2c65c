/// Binary operations, including the character-promotion arithmetic.
pub mod binary;
/// Procedure and function calls, activation records and reference
/// bindings.
pub mod call;
/// The control statements: `si`, `tant que`, `répéter` and `pour`.
pub mod control;
/// The interpreter state, statement execution and expression dispatch.
pub mod core;
/// Unary operations.
pub mod unary;

pub use self::core::{EvalResult, Flow, Interpreter};
