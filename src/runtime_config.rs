//! # Runtime Configuration Module
//!
//! Environment-driven settings for the dispatcher.
//!
//! ## Environment Variables
//!
//! ### `FITROUTE_SLOW_MATCH_US`
//!
//! Route selection slower than this many microseconds is logged at `WARN`
//! instead of `INFO`. Accepts decimal (`1000`) or hexadecimal (`0x3e8`).
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use fitroute::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow match threshold: {:?}", config.slow_match_threshold);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Selection time above which a route match is reported as slow.
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let slow_match_us = lookup("FITROUTE_SLOW_MATCH_US")
            .and_then(|val| parse_number(&val))
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            slow_match_threshold: Duration::from_micros(slow_match_us),
        }
    }
}

fn parse_number(val: &str) -> Option<u64> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
