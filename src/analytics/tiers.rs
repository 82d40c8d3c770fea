//! Performance tiers by rank quantile
//!
//! Records are ranked by absolute count and cut at fixed record-count
//! quantiles. Tier membership depends on rank position only, never on gaps
//! between values.

use crate::models::{DerivedRecord, Tiers};

/// Split `records` into High/Medium/Low tiers
///
/// After a stable descending sort by count, High takes ranks
/// `[0, ⌊high·N⌋)`, Medium `[⌊high·N⌋, ⌊low·N⌋)` and Low the rest.
pub fn assign_tiers(records: &[DerivedRecord], high_quantile: f64, low_quantile: f64) -> Tiers {
    let mut ranked: Vec<&DerivedRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.absolute_count().total_cmp(&a.absolute_count()));

    let total = ranked.len();
    let high_end = ((total as f64 * high_quantile).floor() as usize).min(total);
    let medium_end = ((total as f64 * low_quantile).floor() as usize).clamp(high_end, total);

    let names = |slice: &[&DerivedRecord]| -> Vec<String> {
        slice.iter().map(|r| r.hub().to_string()).collect()
    };

    Tiers {
        high: names(&ranked[..high_end]),
        medium: names(&ranked[high_end..medium_end]),
        low: names(&ranked[medium_end..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, Trend};

    fn derived(hub: &str, count: f64) -> DerivedRecord {
        DerivedRecord {
            record: Record::new(0, hub, count, 0.0, 2024, None),
            growth_percent: Some(0.0),
            trend: Trend::Stable,
            z_score: None,
            predicted: None,
            residual: None,
        }
    }

    #[test]
    fn test_fifty_records() {
        let records: Vec<_> = (0..50).map(|i| derived(&format!("H{i}"), i as f64)).collect();
        let tiers = assign_tiers(&records, 0.2, 0.8);

        assert_eq!(tiers.high.len(), 10);
        assert_eq!(tiers.medium.len(), 30);
        assert_eq!(tiers.low.len(), 10);
        assert_eq!(tiers.high[0], "H49");
        assert_eq!(tiers.low[9], "H0");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            derived("A", 5.0),
            derived("B", 9.0),
            derived("C", 5.0),
            derived("D", 5.0),
            derived("E", 1.0),
        ];
        let tiers = assign_tiers(&records, 0.2, 0.8);

        assert_eq!(tiers.high, vec!["B"]);
        assert_eq!(tiers.medium, vec!["A", "C", "D"]);
        assert_eq!(tiers.low, vec!["E"]);
    }

    #[test]
    fn test_small_sets_fall_to_low() {
        let records = vec![derived("A", 5.0), derived("B", 9.0)];
        let tiers = assign_tiers(&records, 0.2, 0.8);

        // floor(0.4) = 0, floor(1.6) = 1
        assert!(tiers.high.is_empty());
        assert_eq!(tiers.medium, vec!["B"]);
        assert_eq!(tiers.low, vec!["A"]);
    }

    #[test]
    fn test_rank_not_value_based() {
        // A huge gap after the first value does not widen the High tier
        let mut records = vec![derived("BIG", 10_000.0)];
        records.extend((0..9).map(|i| derived(&format!("H{i}"), 10.0 - i as f64)));
        let tiers = assign_tiers(&records, 0.2, 0.8);

        assert_eq!(tiers.high, vec!["BIG", "H0"]);
        assert_eq!(tiers.medium.len(), 6);
        assert_eq!(tiers.low.len(), 2);
    }
}
