//! Outlier flags by distance from the mean

use crate::models::DerivedRecord;

use super::descriptive::Moments;

/// Hubs whose absolute count lies more than `sigma` standard deviations from
/// the mean, in input order
///
/// A zero-variance or empty set has no outliers.
pub fn detect_outliers(records: &[DerivedRecord], sigma: f64) -> Vec<String> {
    let counts: Vec<f64> = records.iter().map(DerivedRecord::absolute_count).collect();
    let Some(moments) = Moments::of(&counts) else {
        return Vec::new();
    };

    let limit = sigma * moments.std_dev;
    let outliers: Vec<String> = records
        .iter()
        .filter(|r| (r.absolute_count() - moments.mean).abs() > limit)
        .map(|r| r.hub().to_string())
        .collect();

    tracing::debug!(
        mean = moments.mean,
        std_dev = moments.std_dev,
        outliers = outliers.len(),
        "Outliers detected"
    );

    outliers
}
