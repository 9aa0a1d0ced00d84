// src/lib.rs

pub mod cli;
pub mod errors;
pub mod exec;
pub mod invocation;
pub mod logging;
pub mod report;

use std::time::Duration;

use tracing::info;

use crate::cli::CliArgs;
use crate::errors::ProbeError;
use crate::exec::Supervisor;
use crate::invocation::{InvocationSpec, ProbeMethod};
use crate::report::DiagnosticReport;

/// Run one probe end to end: launch the utility, supervise it to
/// completion or timeout, then parse the transcript into a report.
///
/// This is the library entry point for callers that already hold an
/// [`InvocationSpec`] (e.g. an experiment runner feeding it from
/// configuration). `utility` is the name or path of the trace utility;
/// choosing/validating it is the caller's concern.
pub async fn run_probe(
    spec: &InvocationSpec,
    utility: &str,
    budget: Duration,
) -> Result<DiagnosticReport, ProbeError> {
    let argv = spec.argv(utility);
    let supervisor = Supervisor::launch(&argv)?;
    let summary = supervisor.supervise(budget).await;
    report::assemble(spec, &summary)
}

/// High-level entry point used by `main.rs`.
///
/// Runs a single probe from CLI arguments and prints the report as JSON
/// on stdout.
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let spec = InvocationSpec {
        url: args.url,
        method: ProbeMethod::from(args.method.as_str()),
        cmd_arguments: args.cmd_arguments,
    };

    info!(
        url = %spec.url,
        method = %spec.method,
        timeout_secs = args.timeout,
        "starting probe"
    );

    let report = run_probe(&spec, &args.utility, Duration::from_secs(args.timeout)).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
