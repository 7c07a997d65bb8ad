//! Location configuration: the persisted settings blob.
//!
//! The blob is UTF-8 JSON with the schema
//!
//! ```json
//! { "lat": 40.0, "lng": -73.0, "timezone_string": "America/New_York",
//!   "timezone_offset_seconds": -18000, "automatic_timezone_offset": false }
//! ```
//!
//! Parsing goes through a temporary struct and is validated before anything
//! is committed, so a malformed blob never leaves the active configuration
//! half-updated. Serialization writes the four location fields only:
//! `automatic_timezone_offset` is accepted on input but never written back.
//! That omission is part of the external settings contract and downstream
//! tooling relies on it; do not "fix" it here.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::constants::*;

/// Geographic location and timezone settings for time resolution.
///
/// An empty `timezone_string` signals that no remote source is available
/// and resolution must use the on-device calculation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationConfig {
    /// Geographic latitude in degrees (-90 to +90).
    pub lat: f64,
    /// Geographic longitude in degrees (-180 to +180).
    pub lng: f64,
    /// IANA timezone name forwarded to the remote service, or "" for none.
    pub timezone_string: String,
    /// Offset of the timezone from UTC in seconds, used in manual mode.
    pub timezone_offset_seconds: i32,
    /// Use the system clock's current UTC offset instead of
    /// `timezone_offset_seconds`. Absent in serialized blobs.
    #[serde(default)]
    pub automatic_timezone_offset: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LATITUDE,
            lng: DEFAULT_LONGITUDE,
            timezone_string: DEFAULT_TIMEZONE.to_string(),
            timezone_offset_seconds: DEFAULT_TIMEZONE_OFFSET_SECONDS,
            automatic_timezone_offset: DEFAULT_AUTOMATIC_OFFSET,
        }
    }
}

impl LocationConfig {
    /// Parse and validate a settings blob.
    ///
    /// # Returns
    /// - `Ok(config)` if the blob parsed and all fields are in range
    /// - `Err` describing the first parse or validation failure
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LocationConfig =
            serde_json::from_str(text).context("failed to parse location settings")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the four location fields as a JSON object.
    ///
    /// `automatic_timezone_offset` is intentionally not included; see the
    /// module docs.
    pub fn to_json(&self) -> String {
        json!({
            "lat": self.lat,
            "lng": self.lng,
            "timezone_string": self.timezone_string,
            "timezone_offset_seconds": self.timezone_offset_seconds,
        })
        .to_string()
    }

    /// Validate coordinate ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&self.lat) {
            anyhow::bail!(
                "latitude must be between {} and {} degrees (got {})",
                MINIMUM_LATITUDE,
                MAXIMUM_LATITUDE,
                self.lat
            );
        }
        if !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&self.lng) {
            anyhow::bail!(
                "longitude must be between {} and {} degrees (got {})",
                MINIMUM_LONGITUDE,
                MAXIMUM_LONGITUDE,
                self.lng
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_blob() {
        let text = r#"{
            "lat": 51.5074,
            "lng": -0.1278,
            "timezone_string": "Europe/London",
            "timezone_offset_seconds": 0,
            "automatic_timezone_offset": true
        }"#;

        let config = LocationConfig::from_json(text).unwrap();
        assert_eq!(config.lat, 51.5074);
        assert_eq!(config.lng, -0.1278);
        assert_eq!(config.timezone_string, "Europe/London");
        assert_eq!(config.timezone_offset_seconds, 0);
        assert!(config.automatic_timezone_offset);
    }

    #[test]
    fn test_parse_without_automatic_flag_defaults_false() {
        // Serialized blobs never carry the flag, so parsing must tolerate
        // its absence.
        let text = r#"{"lat": 40.0, "lng": -73.0, "timezone_string": "America/New_York", "timezone_offset_seconds": -18000}"#;

        let config = LocationConfig::from_json(text).unwrap();
        assert!(!config.automatic_timezone_offset);
    }

    #[test]
    fn test_parse_malformed_blob() {
        assert!(LocationConfig::from_json("not json at all").is_err());
        assert!(LocationConfig::from_json(r#"{"lat": "forty"}"#).is_err());
        assert!(LocationConfig::from_json("").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_coordinates() {
        let text = r#"{"lat": 95.0, "lng": 0.0, "timezone_string": "", "timezone_offset_seconds": 0}"#;
        assert!(LocationConfig::from_json(text).is_err());

        let text = r#"{"lat": 0.0, "lng": -200.0, "timezone_string": "", "timezone_offset_seconds": 0}"#;
        assert!(LocationConfig::from_json(text).is_err());
    }

    #[test]
    fn test_serialization_omits_automatic_flag() {
        let config = LocationConfig {
            automatic_timezone_offset: true,
            ..Default::default()
        };

        let text = config.to_json();
        assert!(!text.contains("automatic_timezone_offset"));
        assert!(text.contains("timezone_offset_seconds"));
    }

    #[test]
    fn test_round_trip_preserves_location_fields() {
        let config = LocationConfig {
            lat: -33.8688,
            lng: 151.2093,
            timezone_string: "Australia/Sydney".to_string(),
            timezone_offset_seconds: 36000,
            automatic_timezone_offset: true,
        };

        let parsed = LocationConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed.lat, config.lat);
        assert_eq!(parsed.lng, config.lng);
        assert_eq!(parsed.timezone_string, config.timezone_string);
        assert_eq!(parsed.timezone_offset_seconds, config.timezone_offset_seconds);
        // The flag does not survive the trip; it was never written.
        assert!(!parsed.automatic_timezone_offset);
    }

    #[test]
    fn test_default_matches_first_run_settings() {
        let config = LocationConfig::default();
        assert_eq!(config.lat, 40.0);
        assert_eq!(config.lng, -73.0);
        assert_eq!(config.timezone_string, "America/New_York");
        assert_eq!(config.timezone_offset_seconds, -18000);
        assert!(!config.automatic_timezone_offset);
    }
}
