//! polo-analytics - Statistical engine for polo enrollment charts
//!
//! Turns per-hub enrollment counts into descriptive statistics, period
//! comparisons, a rank regression with a three-step forecast, outliers and
//! performance tiers.
//!
//! # Architecture
//!
//! - [`models`] - Core data structures and types
//! - [`dataset`] - Canonical records and synthetic history generation
//! - [`filter`] - Record selection, ordering and top-N truncation
//! - [`analytics`] - Statistics, regression, tiers and the analysis engine
//! - [`config`] - Configuration management and settings
//! - [`error`] - Unified error handling
//! - [`logging`] - Tracing subscriber setup
//! - [`metrics`] - Prometheus metrics
//! - [`i18n`] - Localized labels
//!
//! # Example
//!
//! ```no_run
//! use polo_analytics::prelude::*;
//!
//! fn main() -> polo_analytics::error::Result<()> {
//!     let config = Config::default();
//!     let mut analyzer = Analyzer::from_config(&config);
//!     let analysis = analyzer.analyze(&AnalysisRequest::default())?;
//!     println!("{} outliers", analysis.result.outlier_hubs.len());
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod logging;
pub mod metrics;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{analyze, AnalysisError, Analyzer, CacheStats, DescriptiveStats};
    pub use crate::config::Config;
    pub use crate::dataset::RecordStore;
    pub use crate::error::{Error, ErrorCategory, PoloErrorTrait, Result};
    pub use crate::models::{
        Analysis, AnalysisRequest, ChartKind, DerivedRecord, FilterCriteria, Record, SortKey,
        SortOrder, Tier, Trend,
    };
}

// Direct re-exports for convenience
pub use analytics::{analyze, Analyzer};
pub use models::{Analysis, AnalysisRequest, DerivedRecord, FilterCriteria, Record};
