//! Common test utilities

use polo_analytics::dataset::{canonical_rows, ConstantFactor, RecordStore};
use polo_analytics::models::{DerivedRecord, Record, Trend};

#[allow(dead_code)]
pub const CURRENT: i32 = 2024;
#[allow(dead_code)]
pub const PRIOR: i32 = 2023;

/// Canonical 2024 table without history
#[allow(dead_code)]
pub fn canonical_store() -> RecordStore {
    RecordStore::from_raw(&canonical_rows(), CURRENT)
}

/// Canonical table with one prior year at a fixed `factor` of the counts
#[allow(dead_code)]
pub fn store_with_prior(factor: f64) -> RecordStore {
    RecordStore::with_history(
        &canonical_rows(),
        CURRENT,
        &[PRIOR],
        &mut ConstantFactor(factor),
    )
}

/// Create a derived record with default values
#[allow(dead_code)]
pub fn derived(hub: &str, count: f64) -> DerivedRecord {
    DerivedRecord {
        record: Record::new(0, hub, count, 0.0, CURRENT, Some("Norte".to_string())),
        growth_percent: Some(0.0),
        trend: Trend::Stable,
        z_score: None,
        predicted: None,
        residual: None,
    }
}

#[allow(dead_code)]
pub fn approx(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}
