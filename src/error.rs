//! Error kinds for the resolution pipeline.
//!
//! These variants cover the failure modes of the dual-source policy, from a
//! malformed settings blob to a rejected remote payload. None of them is
//! fatal: the resolver logs the error through its diagnostic sink and
//! reports a boolean failure to the caller. Remote variants additionally
//! feed the in-memory failure counter that drives the source switch.

use thiserror::Error;

/// Errors that can occur while applying configuration or resolving times.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The settings blob was not valid JSON or violated a field invariant.
    #[error("malformed location settings: {0}")]
    ConfigParse(String),

    /// The settings blob could not be written back to the store.
    #[error("failed to persist location settings: {0}")]
    ConfigPersist(#[source] anyhow::Error),

    /// The transport failed, the outer envelope was unparsable, or its
    /// status code was not 200.
    #[error("remote envelope rejected: {0}")]
    RemoteEnvelope(String),

    /// The inner payload was unparsable, its status was not "OK", or a
    /// result field was missing or too short to split.
    #[error("remote payload rejected: {0}")]
    RemoteStatus(String),

    /// The on-device calculator could not produce a result.
    #[error("solar calculation failed: {0}")]
    Calculation(#[source] anyhow::Error),
}
