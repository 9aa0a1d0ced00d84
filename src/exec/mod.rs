// src/exec/mod.rs

//! Process supervision layer.
//!
//! This module owns the subprocess side of a probe run, using
//! `tokio::process::Command`:
//!
//! - [`supervisor`] launches the trace utility, streams its output
//!   line-by-line over a channel, enforces the wall-clock budget, and
//!   exposes the kill-switch.
//! - [`classifier`] inspects each line for the startup banner and the
//!   fatal markers that must terminate the run early.

pub mod classifier;
pub mod supervisor;

pub use classifier::{classify_line, FatalMarker, LineVerdict};
pub use supervisor::{RunSummary, Supervisor, DEFAULT_TIMEOUT};
