//! # frr
//!
//! frr is an interpreter for a French-keyword pseudocode teaching
//! language. It parses, analyzes, and executes programs written the way
//! algorithmics courses write them: `programme`/`début`/`fin` blocks,
//! `avec` declarations, `<-` assignment, and the `afficher`/`saisir`
//! console intrinsics.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    interpreter::{evaluator::Interpreter, lexer::Lexer, parser::Parser, semantics::SemanticAnalyzer},
};

/// Defines the structure of parsed code.
///
/// This module declares the expression, statement and declaration types
/// that represent the syntactic structure of a source file as a tree. The
/// tree is built by the parser, annotated by the semantic analyzer, and
/// walked by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs, as closed enums with
///   exhaustive matching in every consumer.
/// - Attaches source lines to nodes for error reporting.
/// - Carries the resolved-symbol slots the analyzer fills in.
pub mod ast;
/// Provides unified error types for every stage of the pipeline.
///
/// This module defines all errors that can be raised while scanning,
/// parsing, analyzing, or executing code, one enum per stage, plus the
/// [`Error`](error::Error) type that unifies them for callers.
///
/// # Responsibilities
/// - Defines error enums for all failure modes of the four stages.
/// - Attaches source lines and offending names for context.
/// - Integrates with the standard error traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the lexer, the parser, the semantic
/// analyzer, the evaluator, the call stack, the runtime values and the
/// two console intrinsics.
///
/// # Responsibilities
/// - Coordinates all core components of the pipeline.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::builtins::{Console, StdConsole},
};

/// Runs a complete source text through the whole pipeline.
///
/// The text is scanned and parsed, the tree is semantically analyzed, and
/// only then does execution start — a program that fails analysis
/// produces no side effect at all. Console output and input go through
/// the provided [`Console`].
///
/// # Errors
/// Returns the first error of whichever stage fails; nothing is retried
/// or recovered.
///
/// # Examples
/// ```
/// use frr::{StdConsole, run_source};
///
/// let mut console = StdConsole::new();
///
/// // A minimal valid program: the name after `fin` repeats the
/// // program name.
/// let source = "programme essai\ndébut\nfin essai";
/// assert!(run_source(source, &mut console).is_ok());
///
/// // Using a variable that was never declared fails before execution.
/// let source = "programme essai\ndébut\nx <- 1\nfin essai";
/// assert!(run_source(source, &mut console).is_err());
/// ```
pub fn run_source(source: &str, console: &mut dyn Console) -> Result<(), Error> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer)?;
    let mut tree = parser.parse()?;

    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&mut tree)?;

    let mut interpreter = Interpreter::new(console);
    interpreter.interpret(&tree)?;

    Ok(())
}
