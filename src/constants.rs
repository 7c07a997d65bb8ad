//! Application constants and default values for sundial.
//!
//! This module contains the first-run configuration defaults, validation
//! limits, and operational constants used throughout the application.

// ═══ Location Configuration Defaults ═══
// Installed on first run when no persisted settings blob exists

pub const DEFAULT_LATITUDE: f64 = 40.0;
pub const DEFAULT_LONGITUDE: f64 = -73.0;
pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_TIMEZONE_OFFSET_SECONDS: i32 = -18000; // UTC-5
pub const DEFAULT_AUTOMATIC_OFFSET: bool = false;

// ═══ Validation Limits ═══
// Coordinate ranges accepted when parsing a settings blob

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

// ═══ Persistence ═══

/// Fixed key under which the settings blob is stored.
pub const CONFIG_KEY: &str = "settings/sunrise_sunset.json";

/// Directory name under the platform config dir used by the default store.
pub const CONFIG_DIR_NAME: &str = "sundial";

// ═══ Remote Time Service ═══

pub const REMOTE_ENDPOINT: &str = "https://api.sunrise-sunset.org/json";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Consecutive remote failures after which resolution switches to the
/// on-device calculation.
pub const MAX_REMOTE_FAILURES: u32 = 3;

// ═══ Clock Formats ═══

/// Format of the `last_updated` stamp on resolved times.
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format of the UTC offset string consumed in automatic offset mode.
pub const UTC_OFFSET_FORMAT: &str = "%z";

// ═══ Binary Defaults ═══

/// Seconds between refreshes when running as a daemon.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 3600;

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1;
