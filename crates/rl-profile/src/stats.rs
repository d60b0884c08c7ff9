//! Descriptive-statistics kernel.
//!
//! Every function here is total over its input slice: degenerate inputs
//! (empty, too short, zero variance) return `None` instead of NaN, so the
//! rendering layer never has to special-case non-finite values.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile by linear interpolation over an ascending-sorted slice.
///
/// `q` must be in `[0, 1]`; the slice must be non-empty and sorted by the
/// caller.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Pearson correlation coefficient.
///
/// `None` when the slices differ in length, hold fewer than two pairs, or
/// either side has zero variance. The result is clamped to `[-1, 1]` to
/// absorb floating-point drift.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0]), Some(2.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_sample_std() {
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[1.0]), None);
        // Known value: std of [2, 4, 4, 4, 5, 5, 7, 9] with n-1 is ~2.138
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).expect("std");
        assert!((std - 2.138).abs() < 1e-3);
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, -0.1), None);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_pearson_known_values() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let perfect = pearson(&xs, &[2.0, 4.0, 6.0, 8.0]).expect("r");
        assert!((perfect - 1.0).abs() < 1e-12);

        let inverse = pearson(&xs, &[8.0, 6.0, 4.0, 2.0]).expect("r");
        assert!((inverse + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        assert_eq!(pearson(&[1.0], &[1.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]), None);
        // Zero variance on one side
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
    }

    proptest! {
        #[test]
        fn prop_mean_within_bounds(values in prop::collection::vec(-1e6f64..1e6, 1..100)) {
            let m = mean(&values).expect("non-empty");
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= min - 1e-6 && m <= max + 1e-6);
        }

        #[test]
        fn prop_pearson_in_range(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 2..50)
        ) {
            let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
            if let Some(r) = pearson(&xs, &ys) {
                prop_assert!((-1.0..=1.0).contains(&r));
            }
        }

        #[test]
        fn prop_pearson_self_is_one(values in prop::collection::vec(-1e3f64..1e3, 2..50)) {
            if let Some(r) = pearson(&values, &values) {
                prop_assert!((r - 1.0).abs() < 1e-9);
            }
        }
    }
}
