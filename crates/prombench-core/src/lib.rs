//! prombench-core — shared types for the Prombench replica scaler.
//!
//! Holds the scale command handed to the oscillator, the Go-style duration
//! parser used for `interval`, and the optional `scaler.toml` file.

pub mod config;
pub mod duration;
pub mod error;
pub mod types;

pub use config::ScalerConfig;
pub use duration::parse_duration;
pub use error::{ConfigError, ConfigResult};
pub use types::*;
