//! Environment-driven resolver configuration.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LUXCAL_L10N_REFERENCE` | Reference (fallback) locale | `en` |
//! | `LUXCAL_L10N_LOCALES` | Comma-separated allow-list of locales | all |
//! | `LUXCAL_L10N_RESOURCE_DIR` | Directory of `*.json` bundles | embedded set |
//!
//! Invalid values are collected as [`ConfigError`] diagnostics and the
//! default for that field is kept.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::bundle::validate_locale_code;
use crate::resolver::DEFAULT_REFERENCE;

const ENV_REFERENCE: &str = "LUXCAL_L10N_REFERENCE";
const ENV_LOCALES: &str = "LUXCAL_L10N_LOCALES";
const ENV_RESOURCE_DIR: &str = "LUXCAL_L10N_RESOURCE_DIR";

/// Where bundles come from and which ones are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Reference locale used for fallback.
    pub reference: String,
    /// Locales to load; `None` loads every available bundle. The reference
    /// locale is always loaded.
    pub locales: Option<Vec<String>>,
    /// Load bundles from this directory instead of the embedded set.
    pub resource_dir: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            reference: DEFAULT_REFERENCE.to_owned(),
            locales: None,
            resource_dir: None,
        }
    }
}

/// Configuration parse diagnostics.
#[derive(Debug, Clone)]
pub struct ResolverConfigParse {
    pub config: ResolverConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ResolverConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> ResolverConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Read the configuration and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ResolverConfigParse {
        let parse = from_env_with(|key| env::var(key).ok());
        for error in &parse.errors {
            tracing::warn!(%error, "ignoring invalid l10n setting");
        }
        parse
    }

    /// Whether `locale` passes the allow-list.
    #[must_use]
    pub fn allows(&self, locale: &str) -> bool {
        locale == self.reference
            || self
                .locales
                .as_ref()
                .is_none_or(|list| list.iter().any(|l| l == locale))
    }
}

fn from_env_with<F>(mut get: F) -> ResolverConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = ResolverConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_REFERENCE) {
        let trimmed = value.trim();
        match validate_locale_code(trimmed) {
            Ok(()) => config.reference = trimmed.to_owned(),
            Err(_) => errors.push(ConfigError::new(
                "reference",
                value,
                "expected a locale code like en or pt-BR",
            )),
        }
    }

    if let Some(value) = get(ENV_LOCALES) {
        match parse_locale_list(&value) {
            Some(list) => config.locales = Some(list),
            None => errors.push(ConfigError::new(
                "locales",
                value,
                "expected comma-separated locale codes",
            )),
        }
    }

    if let Some(value) = get(ENV_RESOURCE_DIR) {
        if value.trim().is_empty() {
            errors.push(ConfigError::new(
                "resource_dir",
                value,
                "expected a directory path",
            ));
        } else {
            config.resource_dir = Some(PathBuf::from(value));
        }
    }

    ResolverConfigParse { config, errors }
}

fn parse_locale_list(value: &str) -> Option<Vec<String>> {
    let list: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    let valid = !list.is_empty() && list.iter().all(|l| validate_locale_code(l).is_ok());
    valid.then_some(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> ResolverConfigParse {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let parse = parse(&[]);
        assert!(parse.errors.is_empty());
        assert_eq!(parse.config, ResolverConfig::default());
        assert_eq!(parse.config.reference, "en");
    }

    #[test]
    fn reads_all_variables() {
        let parse = parse(&[
            (ENV_REFERENCE, "de"),
            (ENV_LOCALES, "de, bg ,sl"),
            (ENV_RESOURCE_DIR, "/srv/luxcal/lang"),
        ]);
        assert!(parse.errors.is_empty());
        assert_eq!(parse.config.reference, "de");
        assert_eq!(
            parse.config.locales,
            Some(vec!["de".into(), "bg".into(), "sl".into()])
        );
        assert_eq!(
            parse.config.resource_dir,
            Some(PathBuf::from("/srv/luxcal/lang"))
        );
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let parse = parse(&[(ENV_REFERENCE, "e n"), (ENV_LOCALES, ", ,")]);
        assert_eq!(parse.config, ResolverConfig::default());
        let fields: Vec<&str> = parse.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["reference", "locales"]);
    }

    #[test]
    fn allow_list_always_admits_reference() {
        let config = ResolverConfig {
            locales: Some(vec!["de".into()]),
            ..ResolverConfig::default()
        };
        assert!(config.allows("en"));
        assert!(config.allows("de"));
        assert!(!config.allows("bg"));
        assert!(ResolverConfig::default().allows("bg"));
    }

    #[test]
    fn error_display() {
        let err = ConfigError::new("locales", "x/y", "expected comma-separated locale codes");
        assert_eq!(
            err.to_string(),
            "locales=x/y (expected comma-separated locale codes)"
        );
    }
}
