//! Record selection, ordering and truncation
//!
//! Filtering is a pure, order-preserving predicate over records. Sorting
//! and top-N truncation apply to derived records after aggregation.

use std::cmp::Ordering;

use crate::models::{DerivedRecord, FilterCriteria, Record, SortKey, SortOrder};

/// Check a single record against the criteria
///
/// A record without region is matched as region `""`.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    let period_ok = criteria.periods.is_empty() || criteria.periods.contains(&record.period);
    let region_ok =
        criteria.regions.is_empty() || criteria.regions.contains(record.region_or_empty());
    let count_ok = record.absolute_count >= criteria.min_count
        && record.absolute_count <= criteria.max_count;
    let search_ok = record
        .hub
        .to_lowercase()
        .contains(&criteria.search_term.to_lowercase());

    period_ok && region_ok && count_ok && search_ok
}

/// Select the records passing `criteria`, preserving input order
pub fn filter_records(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    let selected: Vec<Record> = records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect();

    tracing::debug!(
        input = records.len(),
        selected = selected.len(),
        search = %criteria.search_term,
        "Records filtered"
    );

    selected
}

fn compare(a: &DerivedRecord, b: &DerivedRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Hub => a.record.hub.cmp(&b.record.hub),
        SortKey::AbsoluteCount => a.record.absolute_count.total_cmp(&b.record.absolute_count),
        SortKey::RelativePercent => a
            .record
            .relative_percent
            .total_cmp(&b.record.relative_percent),
        SortKey::Growth => a.growth_or_zero().total_cmp(&b.growth_or_zero()),
    }
}

/// Stable sort of derived records; ties keep their prior relative order
pub fn sort_records(records: &mut [DerivedRecord], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => records.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Desc => records.sort_by(|a, b| compare(b, a, key)),
    }
}

/// Keep the first `top_n` records; `None` keeps everything
pub fn truncate(records: &mut Vec<DerivedRecord>, top_n: Option<usize>) {
    if let Some(n) = top_n {
        records.truncate(n);
    }
}
