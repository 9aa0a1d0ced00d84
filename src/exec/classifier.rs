// src/exec/classifier.rs

//! Line classification for streamed trace-utility output.
//!
//! The utility's diagnostics are untrusted free text, so detection is by
//! case-insensitive substring markers:
//!
//! | marker               | effect                                   |
//! |----------------------|------------------------------------------|
//! | `traceroute to`      | startup banner: the run has started      |
//! | `enough privileges`  | fatal: method needs root, not running as root |
//! | `service not known`  | fatal: name resolution for the target failed |
//!
//! Classification itself is pure; the supervisor applies the effects
//! (flag updates, kill-switch) when it consumes the verdict.

/// Unrecoverable condition reported mid-stream by the utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalMarker {
    /// Needs elevated privileges, usually for TCP or ICMP probes.
    InsufficientPrivileges,
    /// The target host did not resolve.
    ResolutionFailure,
}

/// What one output line means for the run's lifecycle.
///
/// Both fields can be set for the same line; unrecognized lines set
/// neither and simply accumulate in the transcript for later parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineVerdict {
    pub started: bool,
    pub fatal: Option<FatalMarker>,
}

/// Classify a single output line.
pub fn classify_line(line: &str) -> LineVerdict {
    let line = line.to_lowercase();
    let mut verdict = LineVerdict::default();

    if line.contains("traceroute to") {
        verdict.started = true;
    }
    if line.contains("enough privileges") {
        verdict.fatal = Some(FatalMarker::InsufficientPrivileges);
    }
    if line.contains("service not known") {
        verdict.fatal = Some(FatalMarker::ResolutionFailure);
    }

    verdict
}
