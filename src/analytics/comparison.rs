//! Period comparison highlights
//!
//! Ranks hubs by growth and averages growth per region over the records the
//! caller is looking at.

use std::collections::HashMap;

use crate::models::{ComparisonSummary, DerivedRecord, RegionGrowth, Trend};

/// Build growth leaders, decline leaders, stable performers and regional
/// averages, each limited to `limit` entries
pub fn summarize(records: &[DerivedRecord], limit: usize) -> ComparisonSummary {
    let mut growth_leaders: Vec<DerivedRecord> = records
        .iter()
        .filter(|r| r.growth_percent.is_some_and(|g| g > 0.0))
        .cloned()
        .collect();
    growth_leaders.sort_by(|a, b| b.growth_or_zero().total_cmp(&a.growth_or_zero()));
    growth_leaders.truncate(limit);

    let mut decline_leaders: Vec<DerivedRecord> = records
        .iter()
        .filter(|r| r.growth_percent.is_some_and(|g| g < 0.0))
        .cloned()
        .collect();
    decline_leaders.sort_by(|a, b| a.growth_or_zero().total_cmp(&b.growth_or_zero()));
    decline_leaders.truncate(limit);

    let stable_performers: Vec<DerivedRecord> = records
        .iter()
        .filter(|r| r.trend == Trend::Stable)
        .take(limit)
        .cloned()
        .collect();

    ComparisonSummary {
        growth_leaders,
        decline_leaders,
        stable_performers,
        regional_growth: regional_growth(records, limit),
    }
}

/// Mean growth of the first `limit` regions, in order of first appearance
///
/// Records without region are skipped; missing growth counts as zero.
pub fn regional_growth(records: &[DerivedRecord], limit: usize) -> Vec<RegionGrowth> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in records {
        let Some(region) = record.record.region.as_deref().filter(|r| !r.is_empty()) else {
            continue;
        };
        let entry = totals.entry(region).or_insert_with(|| {
            order.push(region);
            (0.0, 0)
        });
        entry.0 += record.growth_or_zero();
        entry.1 += 1;
    }

    order
        .into_iter()
        .take(limit)
        .filter_map(|region| {
            let &(sum, hubs) = totals.get(region)?;
            Some(RegionGrowth {
                region: region.to_string(),
                average_growth: sum / hubs as f64,
                hubs,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn derived(hub: &str, region: &str, growth: Option<f64>) -> DerivedRecord {
        let trend = Trend::from_growth(growth.unwrap_or(0.0), 5.0);
        DerivedRecord {
            record: Record::new(0, hub, 100.0, 0.0, 2024, Some(region.to_string())),
            growth_percent: growth,
            trend,
            z_score: None,
            predicted: None,
            residual: None,
        }
    }

    fn hubs(records: &[DerivedRecord]) -> Vec<&str> {
        records.iter().map(DerivedRecord::hub).collect()
    }

    #[test]
    fn test_leaders() {
        let records = vec![
            derived("A", "Norte", Some(12.0)),
            derived("B", "Norte", Some(-20.0)),
            derived("C", "Cariri", Some(30.0)),
            derived("D", "Cariri", Some(-2.0)),
            derived("E", "Cariri", Some(0.0)),
            derived("F", "Norte", None),
        ];

        let summary = summarize(&records, 5);
        assert_eq!(hubs(&summary.growth_leaders), vec!["C", "A"]);
        assert_eq!(hubs(&summary.decline_leaders), vec!["B", "D"]);
        assert_eq!(hubs(&summary.stable_performers), vec!["D", "E", "F"]);
    }

    #[test]
    fn test_limit() {
        let records: Vec<_> = (0..8)
            .map(|i| derived(&format!("H{i}"), "Norte", Some(10.0 + i as f64)))
            .collect();
        let summary = summarize(&records, 5);
        assert_eq!(summary.growth_leaders.len(), 5);
        assert_eq!(summary.growth_leaders[0].hub(), "H7");
    }

    #[test]
    fn test_regional_growth() {
        let records = vec![
            derived("A", "Norte", Some(10.0)),
            derived("B", "Cariri", Some(-4.0)),
            derived("C", "Norte", None),
            derived("D", "Norte", Some(20.0)),
        ];

        let regions = regional_growth(&records, 5);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].region, "Norte");
        assert_eq!(regions[0].hubs, 3);
        assert!((regions[0].average_growth - 10.0).abs() < 1e-9);
        assert_eq!(regions[1].region, "Cariri");
        assert!((regions[1].average_growth + 4.0).abs() < 1e-9);
    }
}
