//! # Config - store settings
//!
//! Runtime configuration for the `dataaccess` integer store. Every
//! setting can be overridden with an environment variable:
//!
//! ```text
//! DATAACCESS_PATH           backing file path            (default: "dataaccess.bin")
//! DATAACCESS_BYTE_HINT      initial capacity in bytes    (default: 4096)
//! DATAACCESS_GROWTH_FACTOR  growth ratio, 1.0 to 16.0    (default: 1.5)
//! DATAACCESS_SYNC           fsync after every flush      (default: "true")
//! ```
//!
//! Values that fail to parse fall back to the default and log a warning.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

/// Default backing file path.
pub const DEFAULT_PATH: &str = "dataaccess.bin";
/// Default capacity hint in bytes (1024 integers).
pub const DEFAULT_BYTE_HINT: u64 = 4096;
/// Default growth ratio applied when the buffer must grow.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;
/// Largest accepted growth ratio. Larger ratios overflow the slot count
/// long before memory runs out.
pub const MAX_GROWTH_FACTOR: f64 = 16.0;

/// Settings for opening and persisting an integer store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Backing file location.
    pub path: PathBuf,
    /// Capacity in bytes requested when no existing file could be loaded.
    pub byte_hint: u64,
    /// Ratio applied to the requested size when an allocated buffer grows.
    pub growth_factor: f64,
    /// Call `sync_all()` after every flush.
    pub sync_on_flush: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            byte_hint: DEFAULT_BYTE_HINT,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            sync_on_flush: true,
        }
    }
}

impl StoreConfig {
    /// Builds a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map so they
    /// never touch the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let path = lookup("DATAACCESS_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.path);
        let byte_hint = parse_or(&lookup, "DATAACCESS_BYTE_HINT", defaults.byte_hint);
        let sync_on_flush = parse_or(&lookup, "DATAACCESS_SYNC", defaults.sync_on_flush);

        let mut growth_factor =
            parse_or(&lookup, "DATAACCESS_GROWTH_FACTOR", defaults.growth_factor);
        if !(1.0..=MAX_GROWTH_FACTOR).contains(&growth_factor) {
            warn!(
                value = growth_factor,
                max = MAX_GROWTH_FACTOR,
                "DATAACCESS_GROWTH_FACTOR out of range, using default"
            );
            growth_factor = defaults.growth_factor;
        }

        Self {
            path,
            byte_hint,
            growth_factor,
            sync_on_flush,
        }
    }
}

/// Reads `key` through `lookup` and parses it, falling back to `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(key, value = %raw, "unparsable setting, using default");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests;
