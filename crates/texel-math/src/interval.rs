//! Monotonic interval search.
//!
//! Locates a value inside sorted or piecewise-tabulated data by bisecting on
//! a predicate that is `true` for a prefix of the indices and `false` for the
//! rest.

/// Returns the largest index `i` in `[0, size)` for which `pred(i)` holds,
/// clamped to `[0, size - 2]`.
///
/// The result is always usable as the lower end of a bracketing pair
/// `(i, i + 1)`. If no index satisfies the predicate the result is `0`; if
/// every index does, it is `size - 2`. For `size < 2` the result is `0`.
///
/// `pred` must be monotonic (a run of `true` followed by a run of `false`);
/// it is evaluated `O(log size)` times.
///
/// # Example
///
/// ```rust
/// use texel_math::find_interval;
///
/// let knots = [0.0f32, 0.25, 0.5, 1.0];
/// assert_eq!(find_interval(knots.len(), |i| knots[i] <= 0.3), 1);
/// assert_eq!(find_interval(knots.len(), |i| knots[i] <= -1.0), 0);
/// assert_eq!(find_interval(knots.len(), |i| knots[i] <= 2.0), 2);
/// ```
pub fn find_interval<P>(size: usize, pred: P) -> usize
where
    P: Fn(usize) -> bool,
{
    let mut first = 0usize;
    let mut len = size;
    while len > 0 {
        let half = len >> 1;
        let middle = first + half;
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    // `first` is the count of leading true indices; step back to the last one.
    let last_true = first as isize - 1;
    last_true.clamp(0, size.saturating_sub(2) as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_bracket(size: usize, split: usize) {
        let pred = |i: usize| i < split;
        let i = find_interval(size, pred);
        assert!(i <= size - 2);
        assert!(pred(i) || i == 0, "size={size} split={split} i={i}");
        assert!(!pred(i + 1) || i == size - 2, "size={size} split={split} i={i}");
    }

    #[test]
    fn test_all_splits() {
        for size in 2..40 {
            for split in 0..=size {
                check_bracket(size, split);
            }
        }
    }

    #[test]
    fn test_sorted_lookup() {
        let xs = [0.0f32, 1.0, 2.0, 3.0, 4.0];
        for (v, expected) in [(0.5, 0), (1.0, 1), (2.9, 2), (3.5, 3), (10.0, 3), (-1.0, 0)] {
            assert_eq!(find_interval(xs.len(), |i| xs[i] <= v), expected, "v={v}");
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(find_interval(0, |_| true), 0);
        assert_eq!(find_interval(1, |_| true), 0);
        assert_eq!(find_interval(1, |_| false), 0);
        assert_eq!(find_interval(2, |_| true), 0);
    }

    #[test]
    fn test_logarithmic_call_count() {
        let calls = std::cell::Cell::new(0usize);
        let _ = find_interval(1 << 16, |i| {
            calls.set(calls.get() + 1);
            i < 12345
        });
        assert!(calls.get() <= 17, "calls: {}", calls.get());
    }
}
