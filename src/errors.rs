// src/errors.rs

//! Crate-wide error types.
//!
//! [`ProbeError`] is the classified failure type for a single probe run:
//! one variant per distinct fatal condition, instead of a single
//! message-string failure. `anyhow` is re-exported for the outer layers
//! (CLI wiring, logging setup) that don't need the classification.

pub use anyhow::{Error, Result};
use thiserror::Error as ThisError;

/// Fatal conditions that prevent a probe run from producing a report.
///
/// A run that starts and is later cut short (timeout, mid-run fatal
/// marker) is *not* an error: it still yields a partial
/// [`DiagnosticReport`](crate::report::DiagnosticReport).
#[derive(Debug, ThisError)]
pub enum ProbeError {
    /// The utility binary was not found on spawn (ENOENT).
    #[error("trace utility failed to start: {0} not found or not installed")]
    UtilityNotFound(String),

    /// The spawn failed for some other reason; carries the OS error text.
    #[error("trace utility failed to start, spawning threw an error: {0}")]
    Launch(String),

    /// The utility reported it lacks privileges for the requested probe
    /// method (typically TCP or ICMP without root).
    #[error("trace utility failed to start, not enough privileges")]
    InsufficientPrivileges,

    /// Name resolution for the target host failed.
    #[error("trace utility failed to start, name or service not known: {url}")]
    ResolutionFailure { url: String },

    /// The process ran but its startup banner never appeared.
    #[error("trace utility failed to start")]
    NeverStarted,
}
