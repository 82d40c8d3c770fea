//! Recomputation entry point and its memoizing wrapper
//!
//! [`analyze`] runs the whole pipeline as a pure function:
//!
//! ```text
//! filter -> aggregate -> sort -> top-N -> { descriptive, regression -> forecast,
//!                                           outliers, tiers, comparison }
//! ```
//!
//! [`Analyzer`] owns a record store and memoizes results keyed by the
//! request parameters that affect computation.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use super::aggregate::derive_records;
use super::comparison::summarize;
use super::descriptive::describe;
use super::error::{AnalysisError, StatsResult};
use super::forecast::forecast;
use super::outliers::detect_outliers;
use super::regression::{correlation, linear_regression, ranks};
use super::tiers::assign_tiers;
use crate::config::{AnalysisConfig, Config};
use crate::dataset::RecordStore;
use crate::filter::{filter_records, sort_records, truncate};
use crate::metrics;
use crate::models::{
    Analysis, AnalysisRequest, AnalysisResult, FilterCriteria, Record, SortKey, SortOrder,
};

/// Run the full analysis with the default thresholds
///
/// # Arguments
/// * `records` - All available records, any periods
/// * `filters` - Selection and ordering criteria
/// * `comparison_period` - Period the latest one is compared against
/// * `top_n` - Keep only the first `top_n` records after sorting
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] when no current-period record survives
/// filtering and truncation.
pub fn analyze(
    records: &[Record],
    filters: &FilterCriteria,
    comparison_period: Option<i32>,
    top_n: Option<usize>,
) -> StatsResult<Analysis> {
    analyze_with_config(
        records,
        filters,
        comparison_period,
        top_n,
        &AnalysisConfig::default(),
    )
}

/// Run the full analysis with explicit thresholds
pub fn analyze_with_config(
    records: &[Record],
    filters: &FilterCriteria,
    comparison_period: Option<i32>,
    top_n: Option<usize>,
    config: &AnalysisConfig,
) -> StatsResult<Analysis> {
    let start = Instant::now();

    let result = run_pipeline(records, filters, comparison_period, top_n, config);
    match &result {
        Ok(analysis) => {
            metrics::record_analysis(start.elapsed().as_secs_f64());
            tracing::debug!(
                records = analysis.records.len(),
                outliers = analysis.result.outlier_hubs.len(),
                correlation = analysis.result.correlation,
                elapsed_us = start.elapsed().as_micros() as u64,
                "Analysis computed"
            );
        }
        Err(e) => {
            metrics::record_failure(failure_kind(e));
            tracing::warn!(error = %e, "Analysis not computable");
        }
    }

    result
}

fn failure_kind(err: &AnalysisError) -> &'static str {
    match err {
        AnalysisError::EmptyInput => "empty_input",
        AnalysisError::DegenerateDistribution { .. } => "degenerate_distribution",
        AnalysisError::InsufficientData { .. } => "insufficient_data",
    }
}

fn run_pipeline(
    records: &[Record],
    filters: &FilterCriteria,
    comparison_period: Option<i32>,
    top_n: Option<usize>,
    config: &AnalysisConfig,
) -> StatsResult<Analysis> {
    let filtered = filter_records(records, filters);

    let mut derived = derive_records(&filtered, comparison_period, config.trend_threshold_percent);
    sort_records(&mut derived, filters.sort_key, filters.sort_order);
    truncate(&mut derived, top_n);

    if derived.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let counts: Vec<f64> = derived.iter().map(|r| r.absolute_count()).collect();
    let statistics = describe(&counts)?;

    let x = ranks(counts.len());
    let correlation = correlation(&x, &counts);

    let regression = match linear_regression(&x, &counts) {
        Ok(regression) => Some(regression),
        Err(e) => {
            tracing::debug!(error = %e, "Regression skipped");
            None
        }
    };

    let forecast = regression
        .as_ref()
        .map(|r| forecast(r, counts.len(), config.forecast_slope_threshold));

    if let Some(regression) = &regression {
        for (record, rank) in derived.iter_mut().zip(&x) {
            let predicted = regression.predict(*rank);
            record.predicted = Some(predicted);
            record.residual = Some(record.absolute_count() - predicted);
        }
    }

    let outlier_hubs = detect_outliers(&derived, config.outlier_sigma);
    let tiers = assign_tiers(&derived, config.high_tier_quantile, config.low_tier_quantile);
    let comparison = summarize(&derived, config.comparison_list_size);

    Ok(Analysis {
        records: derived,
        statistics,
        result: AnalysisResult {
            correlation,
            regression,
            forecast,
            outlier_hubs,
            tiers,
        },
        comparison,
    })
}

/// Parameters that change the computed analysis
///
/// Count bounds are keyed by bit pattern: JSON writes every non-finite
/// float as `null`. `chart_kind` is presentation-only and not part of the
/// key.
#[derive(Serialize)]
struct CacheKey<'a> {
    periods: &'a BTreeSet<i32>,
    regions: &'a BTreeSet<String>,
    min_count_bits: u64,
    max_count_bits: u64,
    search_term: &'a str,
    sort_key: SortKey,
    sort_order: SortOrder,
    comparison_period: Option<i32>,
    top_n: Option<usize>,
}

impl<'a> CacheKey<'a> {
    fn of(request: &'a AnalysisRequest) -> Self {
        let filters = &request.filters;
        Self {
            periods: &filters.periods,
            regions: &filters.regions,
            min_count_bits: filters.min_count.to_bits(),
            max_count_bits: filters.max_count.to_bits(),
            search_term: &filters.search_term,
            sort_key: filters.sort_key,
            sort_order: filters.sort_order,
            comparison_period: request.comparison_period,
            top_n: request.top_n,
        }
    }
}

/// Memoization statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that triggered a recomputation
    pub misses: u64,
    /// Entries dropped to respect the capacity
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Memoizing analysis front-end over a fixed record store
///
/// Results are recomputed only when the request parameters change; the
/// oldest entry is evicted once `capacity` is reached.
#[derive(Debug)]
pub struct Analyzer {
    store: RecordStore,
    config: AnalysisConfig,
    capacity: usize,
    entries: HashMap<String, Arc<Analysis>>,
    insertion_order: VecDeque<String>,
    stats: CacheStats,
}

impl Analyzer {
    /// Create an analyzer over `store`
    pub fn new(store: RecordStore, config: &Config) -> Self {
        Self {
            store,
            config: config.analysis.clone(),
            capacity: config.cache.capacity.max(1),
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    /// Create an analyzer over the canonical dataset with history generated
    /// as configured
    pub fn from_config(config: &Config) -> Self {
        Self::new(RecordStore::canonical(&config.dataset), config)
    }

    /// Hex SHA-256 of the request parameters that affect computation
    pub fn cache_key(request: &AnalysisRequest) -> crate::error::Result<String> {
        let bytes = serde_json::to_vec(&CacheKey::of(request))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Analysis for `request`, recomputed only on a cache miss
    ///
    /// # Errors
    ///
    /// Analysis conditions from [`analyze_with_config`]; failures are not
    /// cached.
    pub fn analyze(&mut self, request: &AnalysisRequest) -> crate::error::Result<Arc<Analysis>> {
        let key = Self::cache_key(request)?;

        if let Some(cached) = self.entries.get(&key) {
            self.stats.hits += 1;
            metrics::record_cache_lookup(true);
            tracing::trace!(key = %key, "Analysis cache hit");
            return Ok(Arc::clone(cached));
        }

        self.stats.misses += 1;
        metrics::record_cache_lookup(false);
        tracing::info!(
            key = %key,
            comparison_period = ?request.comparison_period,
            top_n = ?request.top_n,
            chart_kind = ?request.chart_kind,
            "Recomputing analysis"
        );

        let analysis = Arc::new(analyze_with_config(
            self.store.records(),
            &request.filters,
            request.comparison_period,
            request.top_n,
            &self.config,
        )?);

        self.insert(key, Arc::clone(&analysis));
        Ok(analysis)
    }

    fn insert(&mut self, key: String, analysis: Arc<Analysis>) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, analysis);
    }

    /// Drop every memoized result
    pub fn clear_cache(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.stats
    }

    pub fn cached_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}
