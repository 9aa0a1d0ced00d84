// src/report/mod.rs

//! The Diagnostic Report: the sole data artifact a probe run returns.
//!
//! Field names and shapes here are the stable boundary that downstream
//! collaborators (e.g. an upload/sync component) depend on.

pub mod parser;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::ProbeError;
use crate::exec::classifier::FatalMarker;
use crate::exec::supervisor::RunSummary;
use crate::invocation::InvocationSpec;
use crate::report::parser::parse_transcript;

/// One hop along the probed path, keyed externally by its hop number.
///
/// Serializes untagged, so a well-formed hop exposes
/// `domain_name`/`ip`/`rtt1`..`rtt3` and a raw hop exposes only `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HopRecord {
    /// The utility's default 9-token layout. RTT fields are raw tokens
    /// and may be the literal `*` ("no reply"); that ambiguity is left
    /// for downstream analysis.
    WellFormed {
        domain_name: String,
        ip: String,
        rtt1: String,
        rtt2: String,
        rtt3: String,
    },
    /// A line that starts with a parseable hop number but doesn't match
    /// the well-formed shape, e.g. `2 * * *`.
    Raw { raw: String },
}

/// Structured result of one probe run. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub url: String,
    pub method: String,
    /// Lines recognized as belonging to some hop, well-formed or raw.
    pub total_hops: u32,
    /// Well-formed hops only.
    pub meaningful_hops: u32,
    /// Hop numbers come from the utility's own hop index; they are not
    /// required to be contiguous or to start at 1.
    pub hops: BTreeMap<u32, HopRecord>,
    /// 1-based transcript line number → verbatim text, so noise is
    /// never silently dropped.
    pub unparseable_lines: BTreeMap<usize, String>,
    /// The run was cut short by the timeout budget; results are partial.
    pub forcefully_terminated: bool,
    /// Wall-clock seconds, rounded up.
    pub time_elapsed: u64,
}

/// Build the report from a completed run, or classify why it never started.
///
/// A report is only returned for a process that actually started. A run
/// that passes the start check and hits a fatal marker *afterwards*
/// still yields a normal (partial) report; the failure path is taken
/// only when the startup banner was never observed.
pub fn assemble(
    spec: &InvocationSpec,
    summary: &RunSummary,
) -> Result<DiagnosticReport, ProbeError> {
    if !summary.started {
        return Err(match summary.fatal {
            Some(FatalMarker::InsufficientPrivileges) => ProbeError::InsufficientPrivileges,
            Some(FatalMarker::ResolutionFailure) => ProbeError::ResolutionFailure {
                url: spec.url.clone(),
            },
            None => ProbeError::NeverStarted,
        });
    }

    let parsed = parse_transcript(&summary.transcript);

    Ok(DiagnosticReport {
        url: spec.url.clone(),
        method: spec.method.as_str().to_string(),
        total_hops: parsed.total_hops,
        meaningful_hops: parsed.meaningful_hops,
        hops: parsed.hops,
        unparseable_lines: parsed.unparseable_lines,
        forcefully_terminated: summary.forcefully_terminated,
        time_elapsed: summary.time_elapsed,
    })
}
