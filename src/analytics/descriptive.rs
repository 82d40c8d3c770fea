//! Descriptive statistics over a numeric series
//!
//! All moments use the population form (divisor `n`). Statistics that divide
//! by the standard deviation are `None` for a zero-variance series instead of
//! NaN.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::error::{AnalysisError, StatsResult};

/// Population mean and standard deviation of a series
///
/// Shared by the aggregator, the outlier detector and [`describe`] so that
/// z-scores and outlier flags agree exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl Moments {
    /// `None` for an empty series
    pub fn of(xs: &[f64]) -> Option<Self> {
        if xs.is_empty() {
            return None;
        }

        // Running mean is exact for constant series
        let mean = Statistics::mean(xs.iter());
        let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;

        Some(Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    /// Whether moment-based statistics can divide by the spread
    pub fn has_spread(&self) -> bool {
        self.std_dev > 0.0
    }

    /// Standard score of `x`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::DegenerateDistribution`] when the series has no spread.
    pub fn standard_score(&self, x: f64) -> StatsResult<f64> {
        if !self.has_spread() {
            return Err(AnalysisError::degenerate("z-score"));
        }
        Ok((x - self.mean) / self.std_dev)
    }

    /// Standard score of `x`, `None` when the series has no spread
    pub fn z_score(&self, x: f64) -> Option<f64> {
        self.standard_score(x).ok()
    }

    /// Standardized central moment `Σ((x−mean)/std)^k / n`
    fn standardized(&self, xs: &[f64], k: i32, what: &str) -> StatsResult<f64> {
        if !self.has_spread() {
            return Err(AnalysisError::degenerate(what));
        }
        let sum: f64 = xs
            .iter()
            .map(|x| ((x - self.mean) / self.std_dev).powi(k))
            .sum();
        Ok(sum / xs.len() as f64)
    }
}

/// Summary of a count series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    /// Element at sorted index `n / 2` (upper-middle for even `n`)
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// `None` when `std_dev` is zero
    pub skewness: Option<f64>,
    /// Excess kurtosis, `None` when `std_dev` is zero
    pub kurtosis: Option<f64>,
}

/// Element at index `n / 2` of the ascending-sorted series
///
/// For even `n` this is the upper of the two middle values, not their mean.
pub fn upper_median(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[sorted.len() / 2])
}

/// Compute descriptive statistics for `xs`
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] for an empty series.
pub fn describe(xs: &[f64]) -> StatsResult<DescriptiveStats> {
    let moments = Moments::of(xs).ok_or(AnalysisError::EmptyInput)?;
    let median = upper_median(xs).ok_or(AnalysisError::EmptyInput)?;

    let skewness = moments.standardized(xs, 3, "skewness");
    let kurtosis = moments.standardized(xs, 4, "kurtosis").map(|m4| m4 - 3.0);

    if let Err(e) = &skewness {
        if xs.len() > 1 {
            tracing::warn!(
                count = xs.len(),
                value = moments.mean,
                error = %e,
                "Zero-variance series: skewness and kurtosis not computable"
            );
        }
    }

    Ok(DescriptiveStats {
        count: xs.len(),
        total: xs.iter().sum(),
        mean: moments.mean,
        median,
        min: Statistics::min(xs.iter()),
        max: Statistics::max(xs.iter()),
        variance: moments.variance,
        std_dev: moments.std_dev,
        skewness: skewness.ok(),
        kurtosis: kurtosis.ok(),
    })
}
