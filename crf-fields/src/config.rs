//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;
use crate::formats::DateFormat;

/// Tunables for normalization and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Format used when a date field declares none or an unknown one.
    #[serde(default)]
    pub default_date_format: DateFormat,
    /// File size limit in megabytes when a file field declares none.
    #[serde(default = "default_max_size_mb")]
    pub default_max_size_mb: f64,
    /// Floating-point tolerance for step alignment.
    #[serde(default = "default_step_tolerance")]
    pub step_tolerance: f64,
    /// Maximum number of compiled schemas a validator retains; 0 disables
    /// caching.
    #[serde(default = "default_schema_cache_capacity")]
    pub schema_cache_capacity: usize,
}

const fn default_max_size_mb() -> f64 {
    100.0
}

const fn default_step_tolerance() -> f64 {
    1e-9
}

const fn default_schema_cache_capacity() -> usize {
    1024
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_date_format: DateFormat::default(),
            default_max_size_mb: default_max_size_mb(),
            step_tolerance: default_step_tolerance(),
            schema_cache_capacity: default_schema_cache_capacity(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default date format.
    #[must_use]
    pub const fn with_default_date_format(mut self, format: DateFormat) -> Self {
        self.default_date_format = format;
        self
    }

    /// Sets the default file size limit.
    #[must_use]
    pub const fn with_default_max_size_mb(mut self, megabytes: f64) -> Self {
        self.default_max_size_mb = megabytes;
        self
    }

    /// Sets the step alignment tolerance.
    #[must_use]
    pub const fn with_step_tolerance(mut self, tolerance: f64) -> Self {
        self.step_tolerance = tolerance;
        self
    }

    /// Sets the schema cache capacity.
    #[must_use]
    pub const fn with_schema_cache_capacity(mut self, capacity: usize) -> Self {
        self.schema_cache_capacity = capacity;
        self
    }

    /// Parses and validates a JSON configuration document. Missing keys take
    /// their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_max_size_mb.is_finite() || self.default_max_size_mb <= 0.0 {
            return Err(ConfigError::invalid(
                "default_max_size_mb",
                "must be a finite number greater than zero",
            ));
        }
        if !self.step_tolerance.is_finite() || self.step_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "step_tolerance",
                "must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}
