//! Sample statistics over per-batch rates

/// Summary of a set of batch rates (ops/sec)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleSummary {
    pub size: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample variance (n - 1)
    pub variance: f64,
    pub std_dev: f64,
    pub std_error: f64,
    pub margin_of_error: f64,
    /// Margin of error as a percentage of the mean
    pub rme_percent: f64,
}

impl SampleSummary {
    /// Summarize `rates` at the given confidence multiplier.
    ///
    /// With fewer than two rates the spread is undefined and reported as zero;
    /// callers judge that case from `size`.
    pub fn from_rates(rates: &[f64], confidence_multiplier: f64) -> Self {
        let size = rates.len();
        if size == 0 {
            return Self::default();
        }

        let n = size as f64;
        let mean = rates.iter().sum::<f64>() / n;
        let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
        let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let variance = if size > 1 {
            rates
                .iter()
                .map(|&r| {
                    let diff = r - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (n - 1.0)
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let std_error = std_dev / n.sqrt();
        let margin_of_error = std_error * confidence_multiplier;
        let rme_percent = if mean > 0.0 {
            margin_of_error / mean * 100.0
        } else {
            0.0
        };

        Self {
            size,
            mean,
            min,
            max,
            variance,
            std_dev,
            std_error,
            margin_of_error,
            rme_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        // mean 5, sample variance 32/7
        let rates = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = SampleSummary::from_rates(&rates, 1.96);

        assert_eq!(s.size, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.variance - 32.0 / 7.0).abs() < 1e-12);
        assert!((s.std_error - (32.0f64 / 7.0).sqrt() / 8f64.sqrt()).abs() < 1e-12);
        assert!((s.rme_percent - s.std_error * 1.96 / 5.0 * 100.0).abs() < 1e-9);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn test_single_sample_has_zero_spread() {
        let s = SampleSummary::from_rates(&[1234.0], 1.96);
        assert_eq!(s.size, 1);
        assert_eq!(s.mean, 1234.0);
        assert_eq!(s.rme_percent, 0.0);
    }

    #[test]
    fn test_empty_is_zeroed() {
        assert_eq!(SampleSummary::from_rates(&[], 1.96), SampleSummary::default());
    }

    proptest! {
        #[test]
        fn prop_rme_non_negative_and_mean_bounded(
            rates in prop::collection::vec(1.0f64..1e9, 1..64),
            multiplier in 0.5f64..4.0,
        ) {
            let s = SampleSummary::from_rates(&rates, multiplier);
            prop_assert!(s.rme_percent >= 0.0);
            prop_assert!(s.rme_percent.is_finite());
            prop_assert!(s.min <= s.mean * (1.0 + 1e-12));
            prop_assert!(s.mean <= s.max * (1.0 + 1e-12));
        }

        #[test]
        fn prop_identical_rates_have_zero_rme(rate in 1.0f64..1e9, n in 1usize..50) {
            let rates = vec![rate; n];
            let s = SampleSummary::from_rates(&rates, 1.96);
            prop_assert!(s.rme_percent.abs() < 1e-6);
        }

        #[test]
        fn prop_rme_scales_with_multiplier(
            rates in prop::collection::vec(1.0f64..1e6, 2..32),
        ) {
            let a = SampleSummary::from_rates(&rates, 1.0);
            let b = SampleSummary::from_rates(&rates, 2.0);
            prop_assert!((b.rme_percent - 2.0 * a.rme_percent).abs() <= 1e-9 * (1.0 + b.rme_percent));
        }
    }
}
