//! Configuration management for the analysis engine
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Defaults reproduce the widget's literal
//! thresholds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Statistical thresholds
    pub analysis: AnalysisConfig,

    /// Historical data generation
    pub dataset: DatasetConfig,

    /// Memoization cache
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Thresholds used by the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Growth percentage beyond which a hub trends up or down
    pub trend_threshold_percent: f64,

    /// Slope (counts per rank step) beyond which the forecast grows or declines
    pub forecast_slope_threshold: f64,

    /// Number of standard deviations flagging an outlier
    pub outlier_sigma: f64,

    /// Fraction of ranks in the High tier
    pub high_tier_quantile: f64,

    /// Fraction of ranks above the Low tier
    pub low_tier_quantile: f64,

    /// Entries per comparison highlight list
    pub comparison_list_size: usize,
}

/// Historical extension of the canonical dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Period of the canonical records
    pub current_period: i32,

    /// Prior periods to synthesize
    pub history_periods: Vec<i32>,

    /// Lower bound of the uniform variation factor
    pub variation_min: f64,

    /// Upper bound (exclusive) of the uniform variation factor
    pub variation_max: f64,

    /// Seed for reproducible history; `None` draws from OS entropy
    pub seed: Option<u64>,
}

/// Memoization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum memoized analyses kept
    pub capacity: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,

    /// Language for labels and error descriptions (en, pt)
    pub locale: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_threshold_percent: 5.0,
            forecast_slope_threshold: 5.0,
            outlier_sigma: 2.0,
            high_tier_quantile: 0.2,
            low_tier_quantile: 0.8,
            comparison_list_size: 5,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            current_period: 2024,
            history_periods: vec![2023, 2022, 2021],
            variation_min: 0.7,
            variation_max: 1.3,
            seed: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 32 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
            locale: String::from("en"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            dataset: DatasetConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables keep their default value.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let seed = env_parse::<u64>("POLO_SEED");

        let capacity = env_parse::<usize>("POLO_CACHE_CAPACITY").unwrap_or(defaults.cache.capacity);

        let current_period =
            env_parse::<i32>("POLO_CURRENT_PERIOD").unwrap_or(defaults.dataset.current_period);

        let history_periods = match std::env::var("POLO_HISTORY_PERIODS") {
            Ok(raw) => raw
                .split(',')
                .map(|p| {
                    p.trim()
                        .parse::<i32>()
                        .with_context(|| format!("Invalid period in POLO_HISTORY_PERIODS: {p}"))
                })
                .collect::<Result<Vec<_>>>()?,
            Err(_) => defaults.dataset.history_periods.clone(),
        };

        let level = std::env::var("POLO_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = std::env::var("POLO_LOG_FORMAT").unwrap_or(defaults.logging.format);
        let locale = std::env::var("POLO_LANG").unwrap_or(defaults.logging.locale);

        Ok(Self {
            analysis: defaults.analysis,
            dataset: DatasetConfig {
                current_period,
                history_periods,
                seed,
                ..defaults.dataset
            },
            cache: CacheConfig { capacity },
            logging: LoggingConfig {
                level,
                format,
                locale,
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;

        if analysis.trend_threshold_percent < 0.0 {
            anyhow::bail!("trend_threshold_percent must not be negative");
        }

        if analysis.forecast_slope_threshold < 0.0 {
            anyhow::bail!("forecast_slope_threshold must not be negative");
        }

        if analysis.outlier_sigma <= 0.0 {
            anyhow::bail!("outlier_sigma must be positive");
        }

        if !(0.0..=1.0).contains(&analysis.high_tier_quantile)
            || !(0.0..=1.0).contains(&analysis.low_tier_quantile)
            || analysis.high_tier_quantile > analysis.low_tier_quantile
        {
            anyhow::bail!("tier quantiles must satisfy 0 <= high <= low <= 1");
        }

        let dataset = &self.dataset;
        if dataset.variation_min < 0.0 || dataset.variation_min >= dataset.variation_max {
            anyhow::bail!("variation range must satisfy 0 <= min < max");
        }

        if dataset.history_periods.contains(&dataset.current_period) {
            anyhow::bail!(
                "history_periods must not contain the current period {}",
                dataset.current_period
            );
        }

        if self.cache.capacity == 0 {
            anyhow::bail!("cache capacity must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_thresholds() {
        let analysis = AnalysisConfig::default();
        assert_eq!(analysis.trend_threshold_percent, 5.0);
        assert_eq!(analysis.forecast_slope_threshold, 5.0);
        assert_eq!(analysis.outlier_sigma, 2.0);
        assert_eq!(analysis.comparison_list_size, 5);
    }

    #[test]
    fn test_invalid_quantiles() {
        let mut config = Config::default();
        config.analysis.high_tier_quantile = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_variation_range() {
        let mut config = Config::default();
        config.dataset.variation_min = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_history_overlapping_current_period() {
        let mut config = Config::default();
        config.dataset.history_periods.push(2024);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [dataset]
            seed = 7

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset.seed, Some(7));
        assert_eq!(config.dataset.current_period, 2024);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.cache.capacity, 32);
    }
}
