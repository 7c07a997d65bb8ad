//! # Sundial
//!
//! A dual-source sunrise/sunset resolver for lighting automation.
//!
//! Sundial computes and caches the daily sunrise/sunset times for a fixed
//! geographic location. It fetches them from a remote time service when one
//! is configured and reachable, and falls back to an on-device astronomical
//! calculation when the service is absent or keeps failing.
//!
//! ## Architecture
//!
//! - **resolver**: The dual-source resolution policy and cached result
//! - **config**: The persisted location settings blob (parse/serialize/validate)
//! - **store**: Key-value blob storage for settings (filesystem-backed)
//! - **remote**: Blocking HTTP transport producing the service envelope
//! - **solar**: On-device solar calculation behind a pure trait
//! - **clock**: Wall-clock access (date, UTC offset, timestamps)
//! - **logger**: Structured logging and the injectable diagnostic sink
//! - **constants**: Application-wide constants and defaults
//! - **args**: Command-line argument handling for the binary

pub mod args;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod remote;
pub mod resolver;
pub mod solar;
pub mod store;

// Re-export important types for easier access
pub use clock::{Clock, SystemClock};
pub use config::LocationConfig;
pub use error::ResolverError;
pub use logger::{ConsoleSink, DiagnosticSink, Log, LogLevel, NullSink};
pub use remote::{HttpTimeSource, RemoteTimeSource};
pub use resolver::{ResolvedTimes, SolarTimeResolver};
pub use solar::{AstroCalculator, SolarCalculator, SolarMinutes};
pub use store::{ConfigStore, FileStore};
