//! Go-style duration strings: `15m`, `1h30m`, `1.5s`, `250ms`.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

const NANOS_PER_UNIT: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3600e9),
];

/// Parse a duration made of one or more `<number><unit>` segments.
///
/// A bare `0` is accepted; every other value must carry a unit.
pub fn parse_duration(s: &str) -> ConfigResult<Duration> {
    let input = s.trim();
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.is_empty() {
        return Err(ConfigError::InvalidDuration(s.to_string()));
    }

    let mut rest = input;
    let mut nanos = 0f64;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(ConfigError::InvalidDuration(s.to_string()));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| ConfigError::InvalidDuration(s.to_string()))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        let factor = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| ConfigError::InvalidDuration(s.to_string()))?;
        rest = &rest[unit_len..];

        nanos += value * factor;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(ConfigError::InvalidDuration(s.to_string()));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}
