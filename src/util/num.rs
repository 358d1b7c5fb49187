/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Compares two floats with an absolute and a relative tolerance.
///
/// The values are close when their difference does not exceed the larger of
/// `abs_tol` and `rel_tol` times the larger magnitude.
///
/// ## Example
/// ```
/// use curvelang::util::num::is_close;
///
/// assert!(is_close(0.1 + 0.2, 0.3, 0.0, 1e-12));
/// assert!(!is_close(1.0, 1.1, 1e-3, 0.0));
/// ```
#[must_use]
pub fn is_close(left: f64, right: f64, abs_tol: f64, rel_tol: f64) -> bool {
    let difference = (left - right).abs();
    let max_norm = left.abs().max(right.abs());
    difference <= abs_tol.max(rel_tol * max_norm)
}

/// Returns `true` if `value` is a finite number without a fractional part.
///
/// ## Example
/// ```
/// use curvelang::util::num::is_integral;
///
/// assert!(is_integral(-3.0));
/// assert!(!is_integral(0.5));
/// assert!(!is_integral(f64::INFINITY));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts a count to `f64`, saturating at [`MAX_SAFE_U64_INT`].
///
/// Counts in this crate are bounded by the sampling limit, so the saturation
/// never changes a real value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    let value = u64::try_from(value).unwrap_or(u64::MAX).min(MAX_SAFE_U64_INT);
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_values_within_absolute_tolerance() {
        assert!(is_close(1.0, 1.0 + 1e-10, 1e-9, 0.0));
        assert!(!is_close(1.0, 1.0 + 1e-8, 1e-9, 0.0));
    }

    #[test]
    fn close_values_within_relative_tolerance() {
        assert!(is_close(1e12, 1e12 + 1.0, 0.0, 1e-9));
        assert!(!is_close(1e3, 1e3 + 1.0, 0.0, 1e-9));
    }

    #[test]
    fn converts_counts() {
        assert_eq!(usize_to_f64(0), 0.0);
        assert_eq!(usize_to_f64(10_000), 10_000.0);
    }
}
