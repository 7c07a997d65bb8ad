//! On-device solar position calculation.
//!
//! The local side of the dual-source policy is a pure function of location,
//! timezone offset, and date. This module wraps the `sunrise` crate behind
//! the [`SolarCalculator`] trait, converting its UTC event times into raw
//! fractional minutes past local midnight. The raw values keep their
//! fractional part: splitting into hour/minute (with its rounding rules)
//! is the resolver's job.

use anyhow::Result;
use chrono::NaiveDate;
use sunrise::{Coordinates, SolarDay, SolarEvent};

/// Raw sunrise/sunset values in fractional minutes past local midnight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarMinutes {
    pub sunrise: f64,
    pub sunset: f64,
}

/// Pure astronomical calculation of sunrise/sunset minutes.
pub trait SolarCalculator {
    /// Compute raw sunrise/sunset minutes for a location on a date.
    ///
    /// # Arguments
    /// * `lat` / `lng` - Geographic coordinates in degrees
    /// * `offset_hours` - Signed offset from UTC applied to the event times
    /// * `date` - Local calendar date to compute for
    fn solar_minutes(
        &self,
        lat: f64,
        lng: f64,
        offset_hours: f64,
        date: NaiveDate,
    ) -> Result<SolarMinutes>;
}

/// Production calculator backed by the `sunrise` crate.
pub struct AstroCalculator;

impl SolarCalculator for AstroCalculator {
    fn solar_minutes(
        &self,
        lat: f64,
        lng: f64,
        offset_hours: f64,
        date: NaiveDate,
    ) -> Result<SolarMinutes> {
        let coord = Coordinates::new(lat, lng)
            .ok_or_else(|| anyhow::anyhow!("invalid coordinates ({}, {})", lat, lng))?;
        let solar_day = SolarDay::new(coord, date);

        let sunrise_utc = solar_day.event_time(SolarEvent::Sunrise);
        let sunset_utc = solar_day.event_time(SolarEvent::Sunset);

        Ok(SolarMinutes {
            sunrise: minutes_of_day(sunrise_utc.timestamp(), offset_hours),
            sunset: minutes_of_day(sunset_utc.timestamp(), offset_hours),
        })
    }
}

/// Convert a UTC epoch timestamp to fractional minutes past local midnight.
fn minutes_of_day(epoch_seconds: i64, offset_hours: f64) -> f64 {
    let local_seconds = epoch_seconds as f64 + offset_hours * 3600.0;
    local_seconds.rem_euclid(86_400.0) / 60.0
}
