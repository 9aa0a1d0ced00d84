#![cfg(unix)]

use std::error::Error;
use std::time::{Duration, Instant};

use pathprobe::errors::ProbeError;
use pathprobe::exec::Supervisor;
use pathprobe::invocation::{InvocationSpec, ProbeMethod};
use pathprobe::run_probe;

type TestResult = Result<(), Box<dyn Error>>;

/// Write an executable shell script standing in for the trace utility.
///
/// The script ignores its arguments, so tests control the output
/// transcript exactly. `exec` is used for anything long-running so the
/// kill-switch hits the process that actually holds the output pipes.
fn fake_utility(body: &str) -> Result<(tempfile::TempDir, String), Box<dyn Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fake-traceroute");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;

    let mut perms = std::fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms)?;

    Ok((dir, path.to_string_lossy().into_owned()))
}

fn spec() -> InvocationSpec {
    InvocationSpec::new("example.com", ProbeMethod::Udp)
}

#[tokio::test]
async fn completed_run_produces_a_full_report() -> TestResult {
    let (_dir, utility) = fake_utility(
        r#"echo "traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets"
echo "1  gw.local (10.0.0.1)  0.301 ms  0.412 ms  0.523 ms"
echo "2 * * *""#,
    )?;

    let report = run_probe(&spec(), &utility, Duration::from_secs(30)).await?;

    assert_eq!(report.url, "example.com");
    assert_eq!(report.total_hops, 2);
    assert_eq!(report.meaningful_hops, 1);
    assert!(!report.forcefully_terminated);
    // Partial seconds round up, so even an instant run reports one second.
    assert!(report.time_elapsed >= 1);

    Ok(())
}

#[tokio::test]
async fn timeout_forces_termination_but_returns_a_report() -> TestResult {
    let (_dir, utility) = fake_utility(
        r#"echo "traceroute to example.com (93.184.216.34), 30 hops max"
echo "1  gw.local (10.0.0.1)  0.301 ms  0.412 ms  0.523 ms"
exec sleep 30"#,
    )?;

    let begin = Instant::now();
    let report = run_probe(&spec(), &utility, Duration::from_secs(1)).await?;

    assert!(report.forcefully_terminated);
    assert!(report.time_elapsed >= 1);
    assert_eq!(report.total_hops, 1);
    // Well under the 30 s the script would otherwise run.
    assert!(begin.elapsed() < Duration::from_secs(10));

    Ok(())
}

#[tokio::test]
async fn privilege_marker_kills_the_run_early() -> TestResult {
    let (_dir, utility) = fake_utility(
        r#"echo "You do not have enough privileges to use this program"
exec sleep 30"#,
    )?;

    let begin = Instant::now();
    let result = run_probe(&spec(), &utility, Duration::from_secs(30)).await;

    match result {
        Err(ProbeError::InsufficientPrivileges) => {}
        other => panic!("expected InsufficientPrivileges, got {other:?}"),
    }
    assert!(begin.elapsed() < Duration::from_secs(10));

    Ok(())
}

#[tokio::test]
async fn resolution_marker_on_stderr_is_observed() -> TestResult {
    let (_dir, utility) = fake_utility(
        r#"echo "nosuchhost.invalid: Name or service not known" 1>&2
exit 2"#,
    )?;

    let result = run_probe(&spec(), &utility, Duration::from_secs(30)).await;

    match result {
        Err(ProbeError::ResolutionFailure { url }) => assert_eq!(url, "example.com"),
        other => panic!("expected ResolutionFailure, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn missing_utility_is_reported_as_not_installed() -> TestResult {
    let result = run_probe(
        &spec(),
        "/definitely/not/a/real/trace-utility",
        Duration::from_secs(5),
    )
    .await;

    match result {
        Err(ProbeError::UtilityNotFound(utility)) => {
            assert_eq!(utility, "/definitely/not/a/real/trace-utility");
        }
        other => panic!("expected UtilityNotFound, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn run_without_banner_never_started() -> TestResult {
    let (_dir, utility) = fake_utility(r#"echo "hello world""#)?;

    let result = run_probe(&spec(), &utility, Duration::from_secs(5)).await;

    match result {
        Err(ProbeError::NeverStarted) => Ok(()),
        other => panic!("expected NeverStarted, got {other:?}"),
    }
}

#[tokio::test]
async fn stop_is_idempotent_and_ends_the_run() -> TestResult {
    let argv: Vec<String> = ["/bin/sh", "-c", "exec sleep 30"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut supervisor = Supervisor::launch(&argv)?;
    assert!(supervisor.is_running());

    supervisor.stop();
    supervisor.stop();

    let begin = Instant::now();
    let summary = supervisor.supervise(Duration::from_secs(30)).await;

    assert!(summary.stopped);
    assert!(!summary.started);
    assert!(!summary.forcefully_terminated);
    assert!(begin.elapsed() < Duration::from_secs(10));

    Ok(())
}

#[tokio::test]
async fn late_fatal_marker_still_yields_a_partial_report() -> TestResult {
    // The start check passed, so a later fatal marker stops the process
    // but the caller still gets a (partial) report rather than an error.
    let (_dir, utility) = fake_utility(
        r#"echo "traceroute to example.com (93.184.216.34), 30 hops max"
echo "1  gw.local (10.0.0.1)  0.301 ms  0.412 ms  0.523 ms"
echo "setsockopt: not enough privileges"
exec sleep 30"#,
    )?;

    let begin = Instant::now();
    let report = run_probe(&spec(), &utility, Duration::from_secs(30)).await?;

    assert_eq!(report.meaningful_hops, 1);
    assert!(!report.forcefully_terminated);
    assert!(begin.elapsed() < Duration::from_secs(10));

    Ok(())
}
