//! Error types for the analytics module

use thiserror::Error;

/// Result type for analysis operations
pub type StatsResult<T> = Result<T, AnalysisError>;

/// Local-data conditions under which a statistic cannot be computed
///
/// None of these are transient: retrying with the same input yields the
/// same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No records survived filtering
    #[error("No records to analyze")]
    EmptyInput,

    /// Zero variance where a moment-based statistic needs a spread
    ///
    /// Returned by the strict accessors in
    /// [`descriptive`](super::descriptive); the engine records it as a
    /// `None` field rather than failing the analysis.
    #[error("Degenerate distribution: {what} requires a non-zero standard deviation")]
    DegenerateDistribution { what: String },

    /// Not enough distinct rank points for a regression fit
    #[error("Insufficient data for regression: need at least {needed} distinct points, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

impl AnalysisError {
    /// Create a degenerate distribution error
    pub fn degenerate(what: impl Into<String>) -> Self {
        Self::DegenerateDistribution { what: what.into() }
    }

    /// Create an insufficient data error
    pub fn insufficient(needed: usize, got: usize) -> Self {
        Self::InsufficientData { needed, got }
    }

    /// Localized description for user-facing messages
    pub fn localized_desc(&self) -> String {
        match self {
            Self::EmptyInput => crate::i18n::t!("errors.analysis.empty").to_string(),
            Self::DegenerateDistribution { what } => {
                format!("{}: {what}", crate::i18n::t!("errors.analysis.degenerate"))
            }
            Self::InsufficientData { needed, got } => format!(
                "{} ({got}/{needed})",
                crate::i18n::t!("errors.analysis.insufficient")
            ),
        }
    }

    /// Analysis conditions depend only on the input data
    pub fn is_recoverable(&self) -> bool {
        false
    }
}
