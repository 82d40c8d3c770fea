//! Ordinary least squares of count by rank, and Pearson correlation

use super::error::{AnalysisError, StatsResult};
use crate::models::Regression;

/// Running sums over paired observations
#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    n: f64,
    x: f64,
    y: f64,
    xy: f64,
    xx: f64,
    yy: f64,
}

impl Sums {
    fn of(x: &[f64], y: &[f64]) -> Self {
        x.iter().zip(y).fold(Self::default(), |acc, (&xi, &yi)| Self {
            n: acc.n + 1.0,
            x: acc.x + xi,
            y: acc.y + yi,
            xy: acc.xy + xi * yi,
            xx: acc.xx + xi * xi,
            yy: acc.yy + yi * yi,
        })
    }

    /// `n·Σx² − (Σx)²`
    fn x_spread(&self) -> f64 {
        self.n * self.xx - self.x * self.x
    }

    /// `n·Σy² − (Σy)²`
    fn y_spread(&self) -> f64 {
        self.n * self.yy - self.y * self.y
    }

    /// `n·Σxy − Σx·Σy`
    fn co_spread(&self) -> f64 {
        self.n * self.xy - self.x * self.y
    }
}

/// Ranks `1..=n` as the regressor series
pub fn ranks(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64).collect()
}

/// Pearson correlation coefficient of `x` and `y`
///
/// Returns 0 when the denominator vanishes (no shared points or zero
/// variance on either axis). Pairs beyond the shorter series are ignored.
/// The result is clamped to `[-1, 1]` against rounding.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let sums = Sums::of(x, y);
    let spread = sums.x_spread() * sums.y_spread();

    if sums.n == 0.0 || spread.is_nan() || spread <= 0.0 {
        return 0.0;
    }

    let r = sums.co_spread() / spread.sqrt();
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Fit `y = slope·x + intercept` by ordinary least squares
///
/// # Errors
///
/// [`AnalysisError::InsufficientData`] with fewer than two points or when
/// every `x` is equal.
pub fn linear_regression(x: &[f64], y: &[f64]) -> StatsResult<Regression> {
    let n = x.len().min(y.len());
    if n < 2 {
        return Err(AnalysisError::insufficient(2, n));
    }

    let (x, y) = (&x[..n], &y[..n]);
    let sums = Sums::of(x, y);
    let denominator = sums.x_spread();
    if denominator == 0.0 {
        return Err(AnalysisError::insufficient(2, 1));
    }

    let slope = sums.co_spread() / denominator;
    let intercept = (sums.y - slope * sums.x) / sums.n;

    let y_mean = sums.y / sums.n;
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum();

    let r_squared = if ss_tot == 0.0 {
        tracing::debug!(n, "Flat series: r² not computable");
        None
    } else {
        Some(1.0 - ss_res / ss_tot)
    };

    Ok(Regression {
        slope,
        intercept,
        r_squared,
        equation: format!("y = {slope:.2}x + {intercept:.2}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_collinear_fit() {
        let x = ranks(5);
        let y: Vec<f64> = x.iter().map(|xi| 3.0 * xi + 2.0).collect();

        let fit = linear_regression(&x, &y).unwrap();
        assert!(approx(fit.slope, 3.0));
        assert!(approx(fit.intercept, 2.0));
        assert!(approx(fit.r_squared.unwrap(), 1.0));
        assert_eq!(fit.equation, "y = 3.00x + 2.00");
        assert!(approx(correlation(&x, &y), 1.0));
    }

    #[test]
    fn test_decreasing_fit() {
        let x = ranks(4);
        let y = vec![40.0, 30.0, 20.0, 10.0];

        let fit = linear_regression(&x, &y).unwrap();
        assert!(approx(fit.slope, -10.0));
        assert!(approx(fit.intercept, 50.0));
        assert_eq!(fit.equation, "y = -10.00x + 50.00");
        assert!(approx(correlation(&x, &y), -1.0));
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let err = linear_regression(&[1.0], &[5.0]).unwrap_err();
        assert_eq!(err, AnalysisError::insufficient(2, 1));
        assert!(linear_regression(&[], &[]).is_err());
    }

    #[test]
    fn test_degenerate_x_is_insufficient() {
        let err = linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn test_flat_series() {
        let x = ranks(4);
        let y = vec![5.0; 4];

        let fit = linear_regression(&x, &y).unwrap();
        assert!(approx(fit.slope, 0.0));
        assert!(approx(fit.intercept, 5.0));
        assert_eq!(fit.r_squared, None);
        assert_eq!(correlation(&x, &y), 0.0);
    }

    #[test]
    fn test_correlation_without_points() {
        assert_eq!(correlation(&[], &[]), 0.0);
        assert_eq!(correlation(&[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_correlation_symmetric() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 1.0, 4.0, 3.0, 7.0];
        assert!(approx(correlation(&x, &y), correlation(&y, &x)));
    }
}
