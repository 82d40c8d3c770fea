//! Period-over-period aggregation
//!
//! Joins every record of the latest period to its comparison-period
//! counterpart by hub name, then derives growth, trend and z-score.

use crate::models::{DerivedRecord, Record, Trend};

use super::descriptive::Moments;

/// Percentage change from `previous` to `current`
///
/// `None` when `previous` is zero.
pub fn growth_percent(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Latest period present in `records`
pub fn latest_period(records: &[Record]) -> Option<i32> {
    records.iter().map(|r| r.period).max()
}

/// Derive one record per entry of the latest period, in input order
///
/// # Arguments
/// * `records` - Filtered records, possibly spanning several periods
/// * `comparison_period` - Period to compare against; `None` compares nothing
/// * `trend_threshold` - Growth percentage beyond which a hub trends up or down
///
/// Hubs without a comparison match get growth `0` and a stable trend. When
/// the latest period has zero variance every z-score is `None`.
pub fn derive_records(
    records: &[Record],
    comparison_period: Option<i32>,
    trend_threshold: f64,
) -> Vec<DerivedRecord> {
    let Some(current_period) = latest_period(records) else {
        return Vec::new();
    };

    let current: Vec<&Record> = records
        .iter()
        .filter(|r| r.period == current_period)
        .collect();
    let comparison: Vec<&Record> = match comparison_period {
        Some(period) => records.iter().filter(|r| r.period == period).collect(),
        None => Vec::new(),
    };

    let counts: Vec<f64> = current.iter().map(|r| r.absolute_count).collect();
    let moments = Moments::of(&counts);
    if moments.is_some_and(|m| !m.has_spread()) {
        tracing::warn!(
            period = current_period,
            records = current.len(),
            "Zero-variance period: z-scores not computable"
        );
    }

    let derived: Vec<DerivedRecord> = current
        .into_iter()
        .map(|record| {
            let previous = comparison.iter().find(|p| p.hub == record.hub);

            let (growth, trend) = match previous {
                Some(previous) => match growth_percent(previous.absolute_count, record.absolute_count) {
                    Some(growth) => (Some(growth), Trend::from_growth(growth, trend_threshold)),
                    None => {
                        tracing::debug!(hub = %record.hub, "Zero prior count: growth not computable");
                        (None, Trend::Stable)
                    }
                },
                None => (Some(0.0), Trend::Stable),
            };

            DerivedRecord {
                record: record.clone(),
                growth_percent: growth,
                trend,
                z_score: moments.and_then(|m| m.z_score(record.absolute_count)),
                predicted: None,
                residual: None,
            }
        })
        .collect();

    tracing::debug!(
        current_period,
        comparison_period = ?comparison_period,
        compared = comparison.len(),
        derived = derived.len(),
        "Records aggregated"
    );

    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hub: &str, count: f64, period: i32) -> Record {
        Record::new(0, hub, count, 0.0, period, Some("Norte".to_string()))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_growth_and_trend() {
        let records = vec![
            record("A", 150.0, 2024),
            record("B", 94.0, 2024),
            record("C", 98.0, 2024),
            record("A", 100.0, 2023),
            record("B", 100.0, 2023),
            record("C", 100.0, 2023),
        ];

        let derived = derive_records(&records, Some(2023), 5.0);
        assert_eq!(derived.len(), 3);

        assert!(approx(derived[0].growth_percent.unwrap(), 50.0));
        assert_eq!(derived[0].trend, Trend::Up);
        assert!(approx(derived[1].growth_percent.unwrap(), -6.0));
        assert_eq!(derived[1].trend, Trend::Down);
        assert!(approx(derived[2].growth_percent.unwrap(), -2.0));
        assert_eq!(derived[2].trend, Trend::Stable);
    }

    #[test]
    fn test_unmatched_hub_is_stable_zero() {
        let records = vec![record("A", 150.0, 2024), record("Z", 100.0, 2023)];
        let derived = derive_records(&records, Some(2023), 5.0);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].growth_percent, Some(0.0));
        assert_eq!(derived[0].trend, Trend::Stable);
    }

    #[test]
    fn test_no_comparison_period() {
        let records = vec![record("A", 150.0, 2024), record("A", 100.0, 2023)];
        let derived = derive_records(&records, None, 5.0);
        assert_eq!(derived[0].growth_percent, Some(0.0));
    }

    #[test]
    fn test_zero_prior_count() {
        let records = vec![record("A", 10.0, 2024), record("A", 0.0, 2023)];
        let derived = derive_records(&records, Some(2023), 5.0);
        assert_eq!(derived[0].growth_percent, None);
        assert_eq!(derived[0].trend, Trend::Stable);
    }

    #[test]
    fn test_first_duplicate_match_wins() {
        let records = vec![
            record("A", 120.0, 2024),
            record("A", 100.0, 2023),
            record("A", 200.0, 2023),
        ];
        let derived = derive_records(&records, Some(2023), 5.0);
        assert!(approx(derived[0].growth_percent.unwrap(), 20.0));
    }

    #[test]
    fn test_z_scores() {
        let records = vec![record("A", 10.0, 2024), record("B", 30.0, 2024)];
        let derived = derive_records(&records, None, 5.0);
        assert!(approx(derived[0].z_score.unwrap(), -1.0));
        assert!(approx(derived[1].z_score.unwrap(), 1.0));
    }

    #[test]
    fn test_constant_period_has_no_z_scores() {
        let records = vec![record("A", 10.0, 2024), record("B", 10.0, 2024)];
        let derived = derive_records(&records, None, 5.0);
        assert!(derived.iter().all(|d| d.z_score.is_none()));
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_records(&[], Some(2023), 5.0).is_empty());
    }
}
