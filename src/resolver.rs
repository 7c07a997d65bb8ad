//! The dual-source sunrise/sunset resolution policy.
//!
//! [`SolarTimeResolver`] owns the location configuration and the most
//! recent resolved times, and decides per refresh whether to query the
//! remote time service or compute on-device:
//!
//! - A non-empty timezone name selects the remote service. The response is
//!   an envelope whose `code` must be 200 and whose `response` field is a
//!   JSON-encoded string that must carry `status == "OK"`.
//! - The local calculation runs when no timezone name is configured, or
//!   once three consecutive remote attempts have failed. It also runs (and
//!   wins) when the failure threshold was reached but the remote attempt
//!   happened to succeed on the same refresh.
//! - A refresh that produces no result increments the failure counter and
//!   leaves the previous times untouched; a successful refresh resets the
//!   counter and stamps `last_updated`.
//!
//! All collaborators are injected trait objects, so the policy is fully
//! deterministic under test: storage, transport, solar math, wall clock,
//! and the diagnostic sink.

use serde::Deserialize;

use crate::clock::Clock;
use crate::config::LocationConfig;
use crate::constants::{CONFIG_KEY, MAX_REMOTE_FAILURES};
use crate::error::ResolverError;
use crate::logger::{DiagnosticSink, LogLevel};
use crate::remote::RemoteTimeSource;
use crate::solar::SolarCalculator;
use crate::store::ConfigStore;

/// The single most-recent authoritative sunrise/sunset result.
///
/// Mutated only by [`SolarTimeResolver::resolve_times`]; a failed refresh
/// leaves the previous values in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTimes {
    pub sunrise_hour: u32,
    pub sunrise_minute: u32,
    pub sunset_hour: u32,
    pub sunset_minute: u32,
    /// When the times were last refreshed, as `YYYY-MM-DDTHH:MM:SS`.
    pub last_updated: String,
}

/// Outer wrapper returned by the remote transport.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    response: String,
}

/// Decoded content of the envelope's `response` field.
#[derive(Debug, Deserialize)]
struct Payload {
    status: String,
    results: PayloadResults,
}

#[derive(Debug, Deserialize)]
struct PayloadResults {
    sunrise: String,
    sunset: String,
}

/// Resolves and caches the daily sunrise/sunset times for one location.
pub struct SolarTimeResolver {
    store: Box<dyn ConfigStore>,
    remote: Box<dyn RemoteTimeSource>,
    calculator: Box<dyn SolarCalculator>,
    clock: Box<dyn Clock>,
    sink: Box<dyn DiagnosticSink>,
    config_key: String,
    config: LocationConfig,
    times: ResolvedTimes,
    offset_hours: f64,
    remote_failures: u32,
}

impl SolarTimeResolver {
    /// Create a resolver over the given collaborators.
    ///
    /// The configuration starts at the first-run defaults; call
    /// [`initialize`](Self::initialize) to load or install the persisted
    /// settings before resolving.
    pub fn new(
        store: Box<dyn ConfigStore>,
        remote: Box<dyn RemoteTimeSource>,
        calculator: Box<dyn SolarCalculator>,
        clock: Box<dyn Clock>,
        sink: Box<dyn DiagnosticSink>,
    ) -> Self {
        let config = LocationConfig::default();
        let offset_hours = f64::from(config.timezone_offset_seconds) / 3600.0;
        Self {
            store,
            remote,
            calculator,
            clock,
            sink,
            config_key: CONFIG_KEY.to_string(),
            config,
            times: ResolvedTimes::default(),
            offset_hours,
            remote_failures: 0,
        }
    }

    /// Override the storage key for the settings blob.
    pub fn with_config_key(mut self, key: &str) -> Self {
        self.config_key = key.to_string();
        self
    }

    /// Load the persisted settings, or install and persist the defaults on
    /// first run.
    ///
    /// # Returns
    /// True once a configuration has been applied.
    pub fn initialize(&mut self) -> bool {
        if self.store.exists(&self.config_key) {
            let text = match self.store.read(&self.config_key) {
                Ok(text) => text,
                Err(err) => {
                    self.sink.emit(
                        LogLevel::Err,
                        &format!("Failed to load persisted settings: {err:#}"),
                    );
                    return false;
                }
            };
            self.apply_config(&text, false)
        } else {
            self.config = LocationConfig::default();
            let blob = self.config_json();
            self.apply_config(&blob, true)
        }
    }

    /// Parse and apply a settings blob, optionally persisting it.
    ///
    /// The blob is parsed and validated into a temporary value first; on
    /// failure nothing is committed and the active configuration (and the
    /// calculator offset derived from it) stays as it was. When `save` is
    /// set, the raw incoming text is persisted as-is and a write failure
    /// makes the whole call fail.
    pub fn apply_config(&mut self, json: &str, save: bool) -> bool {
        let parsed = match LocationConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                self.diagnose(&ResolverError::ConfigParse(format!("{err:#}")));
                return false;
            }
        };

        self.config = parsed;
        self.offset_hours = self.effective_offset_hours();

        if save {
            if let Err(err) = self.store.write(&self.config_key, json) {
                self.diagnose(&ResolverError::ConfigPersist(err));
                return false;
            }
        }
        true
    }

    /// Serialize the active configuration as a settings blob.
    pub fn config_json(&self) -> String {
        self.config.to_json()
    }

    /// Refresh the cached sunrise/sunset times.
    ///
    /// Applies the dual-source policy described in the module docs.
    ///
    /// # Returns
    /// True when a new result was committed; false when the refresh failed
    /// and the previous times remain active.
    pub fn resolve_times(&mut self) -> bool {
        let mut success = false;
        let mut candidate = self.times.clone();

        if !self.config.timezone_string.is_empty() {
            self.sink
                .emit(LogLevel::Log, "Fetching sunrise/sunset from remote service");
            match self.query_remote() {
                Ok(((sunrise_hour, sunrise_minute), (sunset_hour, sunset_minute))) => {
                    candidate.sunrise_hour = sunrise_hour;
                    candidate.sunrise_minute = sunrise_minute;
                    candidate.sunset_hour = sunset_hour;
                    candidate.sunset_minute = sunset_minute;
                    success = true;
                }
                Err(err) => self.sink.emit(LogLevel::Err, &err.to_string()),
            }
        }

        if self.remote_failures >= MAX_REMOTE_FAILURES || self.config.timezone_string.is_empty() {
            self.sink
                .emit(LogLevel::Log, "Calculating sunrise/sunset locally");
            match self.compute_local(&mut candidate) {
                Ok(()) => success = true,
                Err(err) => self.sink.emit(LogLevel::Err, &err.to_string()),
            }
        }

        if success {
            self.remote_failures = 0;
            candidate.last_updated = self.clock.timestamp();
            self.times = candidate;
            return true;
        }

        self.remote_failures += 1;
        false
    }

    /// The current resolved times.
    pub fn times(&self) -> &ResolvedTimes {
        &self.times
    }

    /// The active location configuration.
    pub fn config(&self) -> &LocationConfig {
        &self.config
    }

    /// The effective UTC offset in hours currently used for local
    /// calculation.
    pub fn offset_hours(&self) -> f64 {
        self.offset_hours
    }

    /// Consecutive remote failures since the last successful refresh.
    pub fn failure_count(&self) -> u32 {
        self.remote_failures
    }

    /// Query the remote service and extract `((sunrise_h, sunrise_m),
    /// (sunset_h, sunset_m))` from its payload.
    fn query_remote(&self) -> Result<((u32, u32), (u32, u32)), ResolverError> {
        let params = [
            ("lat", self.config.lat.to_string()),
            ("lng", self.config.lng.to_string()),
            ("formatted", "0".to_string()),
            ("tzid", self.config.timezone_string.clone()),
        ];

        let raw = self
            .remote
            .request(&params)
            .map_err(|err| ResolverError::RemoteEnvelope(format!("{err:#}")))?;

        let envelope: Envelope = serde_json::from_str(&raw)
            .map_err(|err| ResolverError::RemoteEnvelope(err.to_string()))?;
        if envelope.code != 200 {
            return Err(ResolverError::RemoteEnvelope(format!(
                "service answered with code {}",
                envelope.code
            )));
        }

        let payload: Payload = serde_json::from_str(&envelope.response)
            .map_err(|err| ResolverError::RemoteStatus(err.to_string()))?;
        if payload.status != "OK" {
            return Err(ResolverError::RemoteStatus(format!(
                "service status was \"{}\"",
                payload.status
            )));
        }

        let sunrise = split_clock_time(&payload.results.sunrise)?;
        let sunset = split_clock_time(&payload.results.sunset)?;
        Ok((sunrise, sunset))
    }

    /// Compute sunrise/sunset on-device and write the clock fields into
    /// `candidate`.
    ///
    /// Refreshes the effective offset first so a clock-side offset change
    /// (automatic mode) is picked up without re-applying the configuration.
    fn compute_local(&mut self, candidate: &mut ResolvedTimes) -> Result<(), ResolverError> {
        self.offset_hours = self.effective_offset_hours();
        let date = self.clock.today();

        let raw = self
            .calculator
            .solar_minutes(self.config.lat, self.config.lng, self.offset_hours, date)
            .map_err(ResolverError::Calculation)?;

        candidate.sunset_hour = (raw.sunset / 60.0).floor() as u32;
        candidate.sunset_minute = (raw.sunset % 60.0).floor() as u32;
        candidate.sunrise_hour = (raw.sunrise / 60.0).floor() as u32;
        // Sunrise minutes round up, sunset minutes round down. Downstream
        // schedules depend on this asymmetry; keep it.
        candidate.sunrise_minute = (raw.sunrise % 60.0).ceil() as u32;
        Ok(())
    }

    /// Derive the offset-hours pushed to the calculator from the active
    /// configuration.
    fn effective_offset_hours(&self) -> f64 {
        if self.config.automatic_timezone_offset {
            // A "%z" string like "-0500" is read as one integer; dividing
            // by 100 keeps the hour digits and drops the minute digits.
            let raw: i32 = self.clock.utc_offset().trim().parse().unwrap_or(0);
            f64::from(raw / 100)
        } else {
            f64::from(self.config.timezone_offset_seconds) / 3600.0
        }
    }

    fn diagnose(&self, err: &ResolverError) {
        self.sink.emit(LogLevel::Err, &err.to_string());
    }
}

/// Extract hour and minute from an ISO-8601-like time string.
///
/// The two characters after the literal `T` are the hour, the two at
/// offset +3..+5 the minute.
fn split_clock_time(value: &str) -> Result<(u32, u32), ResolverError> {
    let t = value.find('T').ok_or_else(|| {
        ResolverError::RemoteStatus(format!("no time separator in \"{value}\""))
    })?;

    let hour = value.get(t + 1..t + 3).and_then(|s| s.parse().ok());
    let minute = value.get(t + 4..t + 6).and_then(|s| s.parse().ok());
    match (hour, minute) {
        (Some(hour), Some(minute)) => Ok((hour, minute)),
        _ => Err(ResolverError::RemoteStatus(format!(
            "unparsable clock field \"{value}\""
        ))),
    }
}
