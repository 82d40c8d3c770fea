//! Unified error handling for the polo-analytics crate
//!
//! Domain-specific errors are consolidated into a single [`Error`] enum while
//! remaining usable on their own.
//!
//! - [`PoloErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use polo_analytics::error::{Error, PoloErrorTrait};
//!
//! fn report(err: Error) {
//!     eprintln!("[{:?}] {}", err.category(), err.localized_desc());
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::analytics::error::AnalysisError;

/// Common trait for all polo-analytics error types
pub trait PoloErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input data cannot support the requested statistic
    Analysis,
    /// Configuration and validation errors
    Config,
    /// File and I/O errors
    Storage,
    /// Serialization errors
    Parsing,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Analysis => crate::i18n::t!("errors.category.analysis").to_string(),
            Self::Config => crate::i18n::t!("errors.category.config").to_string(),
            Self::Storage => crate::i18n::t!("errors.category.storage").to_string(),
            Self::Parsing => crate::i18n::t!("errors.category.parsing").to_string(),
            Self::Other => crate::i18n::t!("errors.category.other").to_string(),
        }
    }
}

/// Unified error type for the polo-analytics crate
#[derive(Error, Debug)]
pub enum Error {
    /// Statistical analysis conditions
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PoloErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Analysis(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) | Self::Toml(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Analysis(e) => e.localized_desc(),
            Self::Io(e) => format!("{}: {e}", crate::i18n::t!("errors.io.error")),
            Self::Json(e) => format!("{}: {e}", crate::i18n::t!("errors.json.error")),
            Self::Toml(e) => format!("{}: {e}", crate::i18n::t!("errors.toml.error")),
            Self::Config(msg) => format!("{}: {msg}", crate::i18n::t!("errors.config.error")),
            Self::Other { context, .. } => context.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Analysis(_) => ErrorCategory::Analysis,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) | Self::Toml(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration loading reports through anyhow
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: format!("{err:#}"),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
