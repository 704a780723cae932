use csv_preprocess_core::storage_keys::{DEFAULT_PROCESSED_PREFIX, DEFAULT_RAW_PREFIX};
use thiserror::Error;

pub const PROCESSED_BUCKET_ENV: &str = "PROCESSED_BUCKET";
pub const PROCESSED_CONTAINER_ENV: &str = "PROCESSED_CONTAINER";
pub const RAW_PREFIX_ENV: &str = "RAW_PREFIX";
pub const PROCESSED_PREFIX_ENV: &str = "PROCESSED_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    pub processed_bucket: String,
    pub raw_prefix: String,
    pub processed_prefix: String,
}

impl PreprocessConfig {
    pub fn new(processed_bucket: impl Into<String>) -> Self {
        Self {
            processed_bucket: processed_bucket.into(),
            raw_prefix: DEFAULT_RAW_PREFIX.to_string(),
            processed_prefix: DEFAULT_PROCESSED_PREFIX.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// `PROCESSED_BUCKET` wins over `PROCESSED_CONTAINER`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let processed_bucket = non_blank(PROCESSED_BUCKET_ENV)
            .or_else(|| non_blank(PROCESSED_CONTAINER_ENV))
            .ok_or(ConfigError::Missing(PROCESSED_BUCKET_ENV))?;

        Ok(Self {
            processed_bucket: processed_bucket.trim().to_string(),
            raw_prefix: non_blank(RAW_PREFIX_ENV)
                .unwrap_or_else(|| DEFAULT_RAW_PREFIX.to_string()),
            processed_prefix: non_blank(PROCESSED_PREFIX_ENV)
                .unwrap_or_else(|| DEFAULT_PROCESSED_PREFIX.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_processed_bucket_with_default_prefixes() {
        let config = PreprocessConfig::from_lookup(lookup(&[("PROCESSED_BUCKET", "clean-data")]))
            .expect("config should load");
        assert_eq!(config, PreprocessConfig::new("clean-data"));
        assert_eq!(config.raw_prefix, "raw/");
        assert_eq!(config.processed_prefix, "processed/");
    }

    #[test]
    fn falls_back_to_container_variable() {
        let config =
            PreprocessConfig::from_lookup(lookup(&[("PROCESSED_CONTAINER", "container-a")]))
                .expect("config should load");
        assert_eq!(config.processed_bucket, "container-a");
    }

    #[test]
    fn bucket_variable_takes_precedence() {
        let config = PreprocessConfig::from_lookup(lookup(&[
            ("PROCESSED_BUCKET", "bucket-a"),
            ("PROCESSED_CONTAINER", "container-a"),
        ]))
        .expect("config should load");
        assert_eq!(config.processed_bucket, "bucket-a");
    }

    #[test]
    fn missing_bucket_fails_fast() {
        let error = PreprocessConfig::from_lookup(lookup(&[])).expect_err("missing bucket");
        assert_eq!(error, ConfigError::Missing("PROCESSED_BUCKET"));
        assert_eq!(error.to_string(), "PROCESSED_BUCKET must be configured");
    }

    #[test]
    fn blank_bucket_counts_as_missing() {
        let error = PreprocessConfig::from_lookup(lookup(&[("PROCESSED_BUCKET", "  ")]))
            .expect_err("blank bucket");
        assert_eq!(error, ConfigError::Missing("PROCESSED_BUCKET"));
    }

    #[test]
    fn reads_prefix_overrides() {
        let config = PreprocessConfig::from_lookup(lookup(&[
            ("PROCESSED_BUCKET", "clean-data"),
            ("RAW_PREFIX", "incoming/"),
            ("PROCESSED_PREFIX", "clean/"),
        ]))
        .expect("config should load");
        assert_eq!(config.raw_prefix, "incoming/");
        assert_eq!(config.processed_prefix, "clean/");
    }
}
