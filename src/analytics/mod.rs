//! Statistical analysis of hub enrollment counts
//!
//! Each submodule is a pure computation over derived records; [`engine`]
//! chains them into one [`Analysis`](crate::models::Analysis).

pub mod aggregate;
pub mod comparison;
pub mod descriptive;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod outliers;
pub mod regression;
pub mod tiers;

pub use aggregate::{derive_records, growth_percent, latest_period};
pub use comparison::{regional_growth, summarize};
pub use descriptive::{describe, upper_median, DescriptiveStats, Moments};
pub use engine::{analyze, analyze_with_config, Analyzer, CacheStats};
pub use error::{AnalysisError, StatsResult};
pub use forecast::{classify_slope, forecast};
pub use outliers::detect_outliers;
pub use regression::{correlation, linear_regression, ranks};
pub use tiers::assign_tiers;
