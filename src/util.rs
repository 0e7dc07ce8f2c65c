/// Safe numeric conversions.
///
/// Conversion helpers between `i64` and `f64` that never lose data silently.
/// The evaluator uses them for mixed integer/real arithmetic and for turning
/// loop bounds and character codes back into integers.
pub mod num;
