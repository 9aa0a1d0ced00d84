// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

use crate::exec::DEFAULT_TIMEOUT;

/// Command-line arguments for `pathprobe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pathprobe",
    version,
    about = "Trace the network path to a host by supervising the system traceroute utility.",
    long_about = None
)]
pub struct CliArgs {
    /// Target host to trace.
    pub url: String,

    /// Probe method: tcp, udp, or icmp.
    ///
    /// Any other value is passed through without a method flag, so only
    /// caller-supplied extra arguments decide the probe type.
    #[arg(long, value_name = "METHOD", default_value = "udp")]
    pub method: String,

    /// Name or path of the trace utility to invoke.
    #[arg(long, value_name = "PATH", default_value = "traceroute")]
    pub utility: String,

    /// Wall-clock budget in seconds before the run is forcefully terminated.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PATHPROBE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Extra arguments passed through to the utility, e.g. `-- -m 15 -q 1`.
    ///
    /// The method flag is appended after these, so it always wins over a
    /// stale conflicting flag in this list.
    #[arg(last = true, value_name = "ARGS")]
    pub cmd_arguments: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
