//! Tests for config loading

use polo_analytics::config::Config;
use serial_test::serial;
use std::io::Write;

const ENV_KEYS: &[&str] = &[
    "POLO_SEED",
    "POLO_CACHE_CAPACITY",
    "POLO_CURRENT_PERIOD",
    "POLO_HISTORY_PERIODS",
    "POLO_LOG_LEVEL",
    "POLO_LOG_FORMAT",
    "POLO_LANG",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
fn test_sample_config_matches_defaults() {
    let config = Config::from_file(std::path::Path::new("config.toml"))
        .expect("config.toml should exist in project root");
    assert_eq!(config, Config::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[analysis]
outlier_sigma = 3.0

[dataset]
seed = 99
history_periods = [2023]

[cache]
capacity = 4
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.analysis.outlier_sigma, 3.0);
    assert_eq!(config.analysis.trend_threshold_percent, 5.0);
    assert_eq!(config.dataset.seed, Some(99));
    assert_eq!(config.dataset.history_periods, vec![2023]);
    assert_eq!(config.cache.capacity, 4);
}

#[test]
fn test_from_file_errors() {
    let missing = Config::from_file(std::path::Path::new("/nonexistent/polo.toml"));
    assert!(missing.is_err());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[analysis\noutlier_sigma = ").unwrap();
    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("POLO_SEED", "1234");
    std::env::set_var("POLO_CACHE_CAPACITY", "8");
    std::env::set_var("POLO_HISTORY_PERIODS", "2023, 2022");
    std::env::set_var("POLO_LOG_FORMAT", "json");
    std::env::set_var("POLO_LANG", "pt-BR");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.dataset.seed, Some(1234));
    assert_eq!(config.cache.capacity, 8);
    assert_eq!(config.dataset.history_periods, vec![2023, 2022]);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.locale, "pt-BR");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_rejects_bad_history() {
    clear_env();
    std::env::set_var("POLO_HISTORY_PERIODS", "2023,last-year");

    let result = Config::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("POLO_HISTORY_PERIODS"));
}

#[test]
#[serial]
fn test_unparseable_env_keeps_default() {
    clear_env();
    std::env::set_var("POLO_CACHE_CAPACITY", "many");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.cache.capacity, 32);
}
