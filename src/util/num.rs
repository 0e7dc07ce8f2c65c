/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_I64_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use frr::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!").unwrap(), 42.0);
///
/// let big = MAX_SAFE_I64_INT + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range,
/// and not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, out-of-range, or fractional values.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return if conversion would lose information.
///
/// ## Example
/// ```
/// use frr::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0, "not integral").unwrap(), 1000);
/// assert!(f64_to_i64_checked(1.5, "not integral").is_err());
/// assert!(f64_to_i64_checked(1e20, "not integral").is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() {
        return Err(error);
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(error);
    }
    if value.fract() != 0.0 {
        return Err(error);
    }
    Ok(value as i64)
}
