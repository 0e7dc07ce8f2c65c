/// The symbol and scope-resolution pass.
///
/// Walks the freshly parsed tree exactly once, before any execution,
/// binding every variable reference and call site to a resolved symbol and
/// rejecting statically-detectable type errors.
pub mod analyzer;
/// Symbol kinds produced by the analysis pass.
pub mod symbol;
/// The flat per-body scope table and the persistent global table.
pub mod table;

pub use analyzer::SemanticAnalyzer;
