//! Exponential smoothing used by every hover/fade animation in the crate.

/// Move `value` one smoothing step toward `target`.
///
/// `rate` is the fraction of the remaining distance covered per call, so the
/// result converges exponentially without ever overshooting (for rate in
/// 0..=1). The step is intentionally not scaled by elapsed time: callers run
/// it once per animation frame and the configured rates assume a ~60Hz
/// cadence, matching the site's original tuning.
#[inline]
pub fn ease_toward(value: f32, target: f32, rate: f32) -> f32 {
    value + (target - value) * rate
}

/// Whether an eased value has settled at its target within `tolerance`.
///
/// Exponential smoothing never reaches the target exactly; animation code
/// that needs a "done" signal (or a test asserting convergence) uses this
/// predicate instead of comparing floats directly.
#[inline]
pub fn has_converged(value: f32, target: f32, tolerance: f32) -> bool {
    (target - value).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_monotonically() {
        let mut v = 0.1_f32;
        let mut last_gap = (1.0 - v).abs();
        for _ in 0..100 {
            v = ease_toward(v, 1.0, 0.1);
            let gap = (1.0 - v).abs();
            assert!(gap <= last_gap);
            assert!(v <= 1.0);
            last_gap = gap;
        }
        assert!(has_converged(v, 1.0, 1e-3));
    }

    #[test]
    fn test_never_overshoots() {
        let mut v = 1.0_f32;
        for _ in 0..200 {
            v = ease_toward(v, 0.1, 0.09);
            assert!(v >= 0.1);
        }
        assert!(has_converged(v, 0.1, 1e-4));
    }

    #[test]
    fn test_has_converged_tolerance() {
        assert!(has_converged(0.999, 1.0, 0.01));
        assert!(!has_converged(0.9, 1.0, 0.01));
    }
}
