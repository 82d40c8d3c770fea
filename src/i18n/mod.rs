//! Internationalization (i18n) support
//!
//! Tier names, trend labels and error descriptions are translated through
//! `rust-i18n`. Supported languages: English (en), Portuguese (pt).
//!
//! # Environment Variables
//!
//! - `POLO_LANG`: Set the preferred language (en, pt). Defaults to English.
//!
//! # Usage
//!
//! ```rust,ignore
//! use polo_analytics::i18n::{set_locale, t};
//!
//! set_locale("pt-BR");
//! let label = t!("tier.high"); // "Alto Desempenho"
//! ```

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

/// Set the current locale for translations
///
/// # Arguments
///
/// * `locale` - Language code (en, pt, pt-BR, ...)
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale);
    rust_i18n::set_locale(&normalized);
}

/// Locale translations are currently resolved in
pub fn current_locale() -> String {
    (*rust_i18n::locale()).to_string()
}

/// Initialize i18n from the `POLO_LANG` environment variable
///
/// Falls back to English if not set or unsupported.
pub fn init_from_env() {
    let locale = std::env::var("POLO_LANG").unwrap_or_else(|_| "en".to_string());
    set_locale(&locale);
}

/// Normalize locale code to a supported language
///
/// - pt-BR, pt_BR, portuguese -> pt
/// - anything else -> en
pub(crate) fn normalize_locale(locale: &str) -> String {
    let lower = locale.to_lowercase();

    if lower.starts_with("pt") || lower == "portuguese" {
        "pt".to_string()
    } else {
        "en".to_string()
    }
}

/// Translate a key with optional parameters
///
/// This is a re-export of rust_i18n::t! for convenience.
#[doc(inline)]
pub use rust_i18n::t;
