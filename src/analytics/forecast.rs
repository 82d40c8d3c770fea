//! Short-range extrapolation of the count-by-rank regression line

use crate::models::{Forecast, ForecastTrend, Regression};

/// Label the fitted slope against a literal counts-per-rank cutoff
#[must_use]
pub fn classify_slope(slope: f64, threshold: f64) -> ForecastTrend {
    if slope > threshold {
        ForecastTrend::Growing
    } else if slope < -threshold {
        ForecastTrend::Declining
    } else {
        ForecastTrend::Stable
    }
}

/// Round to a non-negative count; never yields `-0.0`
fn clamp_count(value: f64) -> f64 {
    if value > 0.0 {
        value.round()
    } else {
        0.0
    }
}

/// Extrapolate three ranks past the last observed rank `n`
///
/// Each point is `slope·rank + intercept`, clamped at zero and rounded half
/// away from zero. Confidence is `|r²| × 100`, absent when r² is.
pub fn forecast(regression: &Regression, n: usize, slope_threshold: f64) -> Forecast {
    let last = n as f64;
    let next = [1.0, 2.0, 3.0].map(|step| clamp_count(regression.predict(last + step)));

    Forecast {
        next,
        confidence_percent: regression.r_squared.map(|r2| r2.abs() * 100.0),
        trend: classify_slope(regression.slope, slope_threshold),
    }
}
