//! Prelude module for common re-exports.
//!
//! Consumers can do `use level_common::prelude::*;` and get the most
//! important types without listing individual paths.

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, ForwardPolicy, PipelineConfig, SharedConfig};

// ─── Pipeline constants ─────────────────────────────────────────────
pub use crate::consts::{
    DEFAULT_CONSUMER_PERIOD, DEFAULT_CONTENTION_BOUND, DEFAULT_LOCK_WAIT, DEFAULT_SAMPLE_PERIOD,
    HOP_BROKER_TO_CONSOLE, HOP_SENSOR_TO_BROKER,
};

// ─── Payload ────────────────────────────────────────────────────────
pub use crate::tilt::TiltReading;
