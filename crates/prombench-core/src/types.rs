//! Scale command types shared by the CLI and the oscillator.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Shape of the replica count over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Alternate between max and min.
    #[default]
    Burst,
    /// Ramp from min to max in fixed increments, then hold at max.
    Step,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Burst => "burst",
            Pattern::Step => "step",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "burst" => Ok(Pattern::Burst),
            "step" => Ok(Pattern::Step),
            other => Err(ConfigError::InvalidPattern(other.to_string())),
        }
    }
}

/// A validated scaling request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleCommand {
    pub pattern: Pattern,
    pub min: i32,
    pub max: i32,
    pub interval: Duration,
    /// Step height; only read by [`Pattern::Step`].
    pub step_factor: Option<i32>,
}

impl ScaleCommand {
    /// Build a command, rejecting replica bounds the cluster could never
    /// satisfy.
    pub fn new(
        pattern: Pattern,
        max: i32,
        min: i32,
        interval: Duration,
        step_factor: Option<i32>,
    ) -> ConfigResult<Self> {
        let command = Self {
            pattern,
            min,
            max,
            interval,
            step_factor,
        };
        command.validate()?;
        Ok(command)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min < 0 {
            return Err(ConfigError::NegativeMin(self.min));
        }
        if self.max < self.min {
            return Err(ConfigError::MaxBelowMin {
                max: self.max,
                min: self.min,
            });
        }
        Ok(())
    }
}

/// Split a `KEY=VALUE` substitution argument. `KEY:VALUE` is accepted when
/// the argument has no `=`.
pub fn parse_var(arg: &str) -> ConfigResult<(String, String)> {
    let split = arg.split_once('=').or_else(|| arg.split_once(':'));
    match split {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::InvalidVar(arg.to_string())),
    }
}
