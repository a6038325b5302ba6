//! Seasonal Decomposition
//!
//! Splits a series into trend + seasonal + residual. The trend is a centered
//! moving average; the seasonal component is the phase-indexed mean of the
//! detrended values, re-centered so it sums to (approximately) zero over one
//! period. By construction `trend[i] + seasonal[i % period] + residual[i]`
//! reproduces the input exactly.

use serde::{Deserialize, Serialize};

/// Additive decomposition of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalDecomposition {
    /// Centered-moving-average trend, one entry per input sample
    pub trend: Vec<f64>,
    /// Repeating seasonal pattern, one entry per phase (length = period)
    pub seasonal: Vec<f64>,
    /// Leftover after removing trend and seasonal, one entry per input sample
    pub residual: Vec<f64>,
}

/// Decompose a series with the given period.
///
/// Requires at least two full cycles (`values.len() >= 2 * period`) and a
/// period of at least 2; returns `None` otherwise.
///
/// The moving-average window is the largest odd number not exceeding the
/// period, `2·floor(period/2)+1` samples wide. Near the boundaries the
/// window is clamped to the available neighbors, so edge trend values are
/// asymmetric averages.
pub fn seasonal_decompose(values: &[f64], period: usize) -> Option<SeasonalDecomposition> {
    if period < 2 || values.len() < 2 * period {
        return None;
    }

    let n = values.len();
    let half = period / 2;

    let trend: Vec<f64> = (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            let window = &values[lo..=hi];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect();

    // Phase-indexed average of detrended values
    let mut phase_sums = vec![0.0; period];
    let mut phase_counts = vec![0usize; period];
    for i in 0..n {
        phase_sums[i % period] += values[i] - trend[i];
        phase_counts[i % period] += 1;
    }
    let mut seasonal: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(sum, &count)| sum / count as f64)
        .collect();

    // Re-center so the seasonal component sums to zero across one period
    let seasonal_mean = seasonal.iter().sum::<f64>() / period as f64;
    for s in &mut seasonal {
        *s -= seasonal_mean;
    }

    let residual: Vec<f64> = (0..n)
        .map(|i| values[i] - trend[i] - seasonal[i % period])
        .collect();

    Some(SeasonalDecomposition {
        trend,
        seasonal,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly_series(weeks: usize) -> Vec<f64> {
        // Rising trend with a clear weekly shape on top
        (0..weeks * 7)
            .map(|i| {
                let weekday = i % 7;
                let weekend_bump = if weekday >= 5 { 10.0 } else { 0.0 };
                100.0 + i as f64 * 0.5 + weekend_bump
            })
            .collect()
    }

    #[test]
    fn test_requires_two_full_cycles() {
        let values: Vec<f64> = (0..13).map(|i| i as f64).collect();
        assert!(seasonal_decompose(&values, 7).is_none());
        let values: Vec<f64> = (0..14).map(|i| i as f64).collect();
        assert!(seasonal_decompose(&values, 7).is_some());
    }

    #[test]
    fn test_degenerate_period() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert!(seasonal_decompose(&values, 0).is_none());
        assert!(seasonal_decompose(&values, 1).is_none());
    }

    #[test]
    fn test_component_lengths() {
        let values = weekly_series(4);
        let result = seasonal_decompose(&values, 7).unwrap();

        assert_eq!(result.trend.len(), values.len());
        assert_eq!(result.seasonal.len(), 7);
        assert_eq!(result.residual.len(), values.len());
    }

    #[test]
    fn test_round_trip() {
        let values = weekly_series(4);
        let result = seasonal_decompose(&values, 7).unwrap();

        for i in 0..values.len() {
            let reconstructed = result.trend[i] + result.seasonal[i % 7] + result.residual[i];
            assert!(
                (reconstructed - values[i]).abs() < 1e-9,
                "index {i}: {reconstructed} != {}",
                values[i]
            );
        }
    }

    #[test]
    fn test_seasonal_sums_to_zero() {
        let values = weekly_series(6);
        let result = seasonal_decompose(&values, 7).unwrap();
        let sum: f64 = result.seasonal.iter().sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn test_weekend_bump_shows_in_seasonal() {
        let values = weekly_series(6);
        let result = seasonal_decompose(&values, 7).unwrap();

        // Weekend phases carry the bump, so they sit above the weekday phases
        let weekday_max = result.seasonal[..5]
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(result.seasonal[5] > weekday_max);
        assert!(result.seasonal[6] > weekday_max);
    }

    #[test]
    fn test_even_period_window_is_odd() {
        // period 4 → window 2*2+1 = 5; interior trend of a linear series is exact
        let values: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let result = seasonal_decompose(&values, 4).unwrap();
        for i in 2..14 {
            assert!((result.trend[i] - i as f64).abs() < 1e-9);
        }
    }
}
