/// The two intrinsic procedures and the console they talk to.
///
/// `afficher` and `saisir` are the only side-effect boundary of the
/// pipeline. They operate on the current activation record through a narrow
/// `Console` trait, so tests can script input and capture output.
pub mod builtins;
/// Walks the analyzed tree and executes it.
///
/// The evaluator maintains the call stack, evaluates expressions with the
/// character-promotion arithmetic the language defines, and threads an
/// explicit control-flow result through statement execution so `retourne`
/// is a plain value check at function boundaries.
pub mod evaluator;
/// Scans raw source text into tokens.
///
/// The token set is a `logos` derive; a thin scanner wraps it to emit
/// tokens lazily with their source coordinates and to support the
/// checkpoint/restore used by the parser's speculative passes.
pub mod lexer;
/// Builds the syntax tree from the token stream.
///
/// Recursive descent with one token of lookahead; the declaration-block
/// grammar is parsed speculatively through lexer checkpoints, which is the
/// only backtracking recovery in the language.
pub mod parser;
/// Resolves names and rejects type-incompatible programs before execution.
///
/// One flat scope per program, procedure or function body plus a persistent
/// global table of callables; every variable reference and call site is
/// bound to a symbol here, and evaluation never starts on a tree that did
/// not survive this pass.
pub mod semantics;
/// The call stack and its activation records.
pub mod stack;
/// Runtime values and their conversions.
pub mod value;
