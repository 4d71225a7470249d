use serde::Deserialize;
use std::fs;
use std::io::{Error, ErrorKind};

/// Startup tunables for the worker pool and menu loop
///
/// Loaded from an optional JSON config file; fields left out of the file
/// keep their defaults. Command-line flags may override `workers` and
/// `interval_ms` after loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of worker threads in the pool (JSON field: workers)
    pub workers: usize,
    /// Initial reporting interval in milliseconds (JSON field: interval_ms)
    pub interval_ms: u64,
    /// Minimum permitted reporting interval (JSON field: min_interval_ms)
    pub min_interval_ms: u64,
    /// Poll period for idle workers and sub-interval sleep steps
    /// (JSON field: idle_poll_ms)
    pub idle_poll_ms: u64,
    /// Poll period while the menu owns the console (JSON field: pause_poll_ms)
    pub pause_poll_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            workers: 3,
            interval_ms: 500,
            min_interval_ms: 100,
            idle_poll_ms: 100,
            pause_poll_ms: 50,
        }
    }
}

/// Parses the settings file
///
/// # Arguments
/// * `filename` - Path to a JSON file holding a single settings object
///
/// # Returns
/// * `Result<Settings, Error>` - Parsed settings or error
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON format
/// - Zero worker count or zero poll/floor periods
///
/// A requested `interval_ms` below `min_interval_ms` is not an error;
/// it is clamped up to the floor here, the same way the menu command
/// clamps at runtime.
pub fn parse_settings(filename: &str) -> Result<Settings, Error> {
    let text = fs::read_to_string(filename)?;

    let mut settings: Settings = serde_json::from_str(&text).map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("invalid JSON in {}: {}", filename, e),
        )
    })?;

    if settings.workers == 0 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "worker count must be at least 1",
        ));
    }
    if settings.min_interval_ms == 0 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "minimum interval must be at least 1 ms",
        ));
    }
    if settings.idle_poll_ms == 0 || settings.pause_poll_ms == 0 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "poll periods must be at least 1 ms",
        ));
    }

    if settings.interval_ms < settings.min_interval_ms {
        settings.interval_ms = settings.min_interval_ms;
    }

    Ok(settings)
}
