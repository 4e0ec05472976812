//! Tilt Pipeline Common Library
//!
//! This crate provides the shared payload type, system constants and
//! configuration loading utilities for the tilt pipeline workspace.
//!
//! # Module Structure
//!
//! - [`tilt`] - The `TiltReading` payload exchanged between pipeline stages
//! - [`consts`] - Hop names, cadences and lock policy constants
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! level = { package = "level_common", path = "../level_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use level_common::consts::*;
//! use level_common::config::{ConfigLoader, PipelineConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod tilt;
