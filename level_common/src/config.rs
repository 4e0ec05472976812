//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! across the tilt pipeline applications.
//!
//! # Usage
//!
//! ```rust,no_run
//! use level_common::config::{ConfigLoader, PipelineConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = PipelineConfig::load(Path::new("pipeline.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

/// Broker behavior when the inbound mailbox has nothing new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForwardPolicy {
    /// Do not touch the outbound mailbox on a stale cycle.
    #[default]
    SkipWhenStale,
    /// Re-publish the last forwarded payload as a heartbeat.
    RepeatLast,
}

/// Common configuration fields shared across pipeline applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Full pipeline configuration: cadences and lock policy for all three
/// stages plus the broker forwarding policy.
///
/// # TOML Example
///
/// ```toml
/// sample_period_us = 1000
/// broker_period_us = 1000
/// consumer_period_us = 20000
/// lock_wait_us = 1000
/// contention_bound = 8
/// forward_policy = "repeat_last"
///
/// [shared]
/// log_level = "debug"
/// service_name = "bubble-level-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Shared fields (logging, service identity).
    pub shared: SharedConfig,

    /// Sensor sampling period in microseconds.
    #[serde(default = "defaults::sample_period_us")]
    pub sample_period_us: u64,

    /// Broker forwarding period in microseconds.
    #[serde(default = "defaults::broker_period_us")]
    pub broker_period_us: u64,

    /// Consumer poll period in microseconds.
    #[serde(default = "defaults::consumer_period_us")]
    pub consumer_period_us: u64,

    /// Bound on a single lock acquisition wait, in microseconds.
    #[serde(default = "defaults::lock_wait_us")]
    pub lock_wait_us: u64,

    /// Consecutive contended acquires tolerated before a hop is declared
    /// faulted.
    #[serde(default = "defaults::contention_bound")]
    pub contention_bound: u32,

    /// Broker behavior on stale cycles.
    #[serde(default)]
    pub forward_policy: ForwardPolicy,
}

mod defaults {
    use crate::consts;

    pub fn sample_period_us() -> u64 {
        consts::DEFAULT_SAMPLE_PERIOD.as_micros() as u64
    }
    pub fn broker_period_us() -> u64 {
        consts::DEFAULT_BROKER_PERIOD.as_micros() as u64
    }
    pub fn consumer_period_us() -> u64 {
        consts::DEFAULT_CONSUMER_PERIOD.as_micros() as u64
    }
    pub fn lock_wait_us() -> u64 {
        consts::DEFAULT_LOCK_WAIT.as_micros() as u64
    }
    pub fn contention_bound() -> u32 {
        consts::DEFAULT_CONTENTION_BOUND
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig {
                log_level: LogLevel::default(),
                service_name: "tilt-pipeline".to_string(),
            },
            sample_period_us: defaults::sample_period_us(),
            broker_period_us: defaults::broker_period_us(),
            consumer_period_us: defaults::consumer_period_us(),
            lock_wait_us: defaults::lock_wait_us(),
            contention_bound: defaults::contention_bound(),
            forward_policy: ForwardPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Sensor sampling period as a `Duration`.
    pub fn sample_period(&self) -> Duration {
        Duration::from_micros(self.sample_period_us)
    }

    /// Broker forwarding period as a `Duration`.
    pub fn broker_period(&self) -> Duration {
        Duration::from_micros(self.broker_period_us)
    }

    /// Consumer poll period as a `Duration`.
    pub fn consumer_period(&self) -> Duration {
        Duration::from_micros(self.consumer_period_us)
    }

    /// Lock acquisition bound as a `Duration`.
    pub fn lock_wait(&self) -> Duration {
        Duration::from_micros(self.lock_wait_us)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - any cadence or the lock wait bound is zero
    /// - `contention_bound` is zero
    /// - the shared block fails validation
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        for (name, value) in [
            ("sample_period_us", self.sample_period_us),
            ("broker_period_us", self.broker_period_us),
            ("consumer_period_us", self.consumer_period_us),
            ("lock_wait_us", self.lock_wait_us),
        ] {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be non-zero"
                )));
            }
        }

        if self.contention_bound == 0 {
            return Err(ConfigError::ValidationError(
                "contention_bound must be non-zero".to_string(),
            ));
        }

        if self.consumer_period_us < self.sample_period_us {
            tracing::warn!(
                consumer_us = self.consumer_period_us,
                sample_us = self.sample_period_us,
                "consumer polls faster than the sensor samples; most polls will be stale"
            );
        }

        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
/// - Returns `ConfigError::ValidationError` if semantic validation fails
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_forward_policy_deserialization() {
        #[derive(Debug, Deserialize)]
        struct TestWrapper {
            policy: ForwardPolicy,
        }

        assert_eq!(
            toml::from_str::<TestWrapper>("policy = \"skip_when_stale\"")
                .unwrap()
                .policy,
            ForwardPolicy::SkipWhenStale
        );
        assert_eq!(
            toml::from_str::<TestWrapper>("policy = \"repeat_last\"")
                .unwrap()
                .policy,
            ForwardPolicy::RepeatLast
        );
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_period(), consts::DEFAULT_SAMPLE_PERIOD);
        assert_eq!(config.consumer_period(), consts::DEFAULT_CONSUMER_PERIOD);
        assert_eq!(config.lock_wait(), consts::DEFAULT_LOCK_WAIT);
        assert_eq!(config.forward_policy, ForwardPolicy::SkipWhenStale);
    }

    #[test]
    fn test_pipeline_config_rejects_zero_cadence() {
        let mut config = PipelineConfig::default();
        config.sample_period_us = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = PipelineConfig::default();
        config.contention_bound = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_loader_file_not_found() {
        let result = PipelineConfig::load(Path::new("/nonexistent/path/pipeline.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = PipelineConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_loader_success() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"consumer_period_us = 10000
forward_policy = "repeat_last"

[shared]
log_level = "debug"
service_name = "bubble-level-01"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.shared.log_level, LogLevel::Debug);
        assert_eq!(config.shared.service_name, "bubble-level-01");
        assert_eq!(config.consumer_period_us, 10_000);
        assert_eq!(config.forward_policy, ForwardPolicy::RepeatLast);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.sample_period(), consts::DEFAULT_SAMPLE_PERIOD);
    }
}
