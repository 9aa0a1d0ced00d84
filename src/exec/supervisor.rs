// src/exec/supervisor.rs

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::ProbeError;
use crate::exec::classifier::{classify_line, FatalMarker};

/// Default wall-clock budget for one probe run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Terminal state of one supervised run, handed to the report assembler
/// once the subprocess has fully exited.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The startup banner was observed.
    pub started: bool,
    /// The kill-switch fired (fatal marker or timeout).
    pub stopped: bool,
    /// A fatal marker was observed in the output.
    pub error: bool,
    /// Which fatal marker, if any.
    pub fatal: Option<FatalMarker>,
    /// Complete ordered output of the run, stdout and stderr interleaved.
    pub transcript: Vec<String>,
    /// The run was cut short by the timeout budget.
    pub forcefully_terminated: bool,
    /// Wall-clock seconds from launch to exit, rounded up.
    pub time_elapsed: u64,
}

/// One supervised subprocess run of the trace utility.
///
/// `launch` spawns the process and attaches background readers that
/// forward every stdout/stderr line over a channel; [`Supervisor::supervise`]
/// consumes that channel, classifies lines as they arrive, and enforces
/// the wall-clock budget. The output parser must only see the transcript
/// from the returned [`RunSummary`], i.e. after the process has exited.
pub struct Supervisor {
    child: Child,
    lines_rx: mpsc::Receiver<String>,
    launched_at: tokio::time::Instant,
    stopped: bool,
}

impl Supervisor {
    /// Spawn the utility with the given argument vector.
    ///
    /// `argv[0]` is the utility name/path. A spawn failure never feeds
    /// the line channel: `NotFound` maps to [`ProbeError::UtilityNotFound`],
    /// anything else to [`ProbeError::Launch`] with the OS error text.
    pub fn launch(argv: &[String]) -> Result<Self, ProbeError> {
        let (utility, args) = argv
            .split_first()
            .ok_or_else(|| ProbeError::Launch("empty argument vector".to_string()))?;

        info!(utility = %utility, args = ?args, "launching trace utility");

        let mut child = Command::new(utility)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::UtilityNotFound(utility.clone())
                } else {
                    ProbeError::Launch(err.to_string())
                }
            })?;

        // Both pipes feed one channel; the channel closes once both
        // readers hit EOF, which is how `supervise` learns the process
        // is done producing output.
        let (tx, rx) = mpsc::channel::<String>(64);
        if let Some(stdout) = child.stdout.take() {
            spawn_line_reader(stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_line_reader(stderr, tx);
        }

        Ok(Self {
            child,
            lines_rx: rx,
            launched_at: tokio::time::Instant::now(),
            stopped: false,
        })
    }

    /// Whether the subprocess is still running.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kill-switch: forcefully terminate the subprocess.
    ///
    /// Idempotent and safe after the process has already exited; there
    /// is no graceful shutdown handshake with the utility.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        if let Err(err) = self.child.start_kill() {
            debug!(error = %err, "kill-switch on an already-exited process");
        }
        self.stopped = true;
    }

    /// Drive the run to completion under the given wall-clock budget.
    ///
    /// Line events are raced against the deadline. On expiry the
    /// kill-switch fires once and the loop keeps draining lines until
    /// the pipes close, so the transcript stays complete. Every line is
    /// appended to the transcript *before* its classification effects
    /// are applied.
    pub async fn supervise(mut self, budget: Duration) -> RunSummary {
        let deadline = self.launched_at + budget;

        let mut started = false;
        let mut error = false;
        let mut fatal: Option<FatalMarker> = None;
        let mut transcript: Vec<String> = Vec::new();
        let mut forcefully_terminated = false;

        loop {
            tokio::select! {
                maybe_line = self.lines_rx.recv() => match maybe_line {
                    Some(line) => {
                        debug!("output: {}", line);
                        let verdict = classify_line(&line);
                        transcript.push(line);

                        if verdict.started {
                            started = true;
                        }
                        if let Some(marker) = verdict.fatal {
                            warn!(?marker, "fatal marker in trace output; terminating run");
                            error = true;
                            self.stop();
                            fatal.get_or_insert(marker);
                        }
                    }
                    // Both pipes closed: no more output will ever arrive.
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline), if !forcefully_terminated => {
                    warn!(
                        budget_secs = budget.as_secs(),
                        "timeout budget exceeded; terminating trace utility"
                    );
                    self.stop();
                    forcefully_terminated = true;
                }
            }
        }

        if let Err(err) = self.child.wait().await {
            warn!(error = %err, "failed to reap trace utility process");
        }

        // Partial seconds count as a full second: elapsed time is a
        // ceiling on wait cost for downstream consumers.
        let elapsed = self.launched_at.elapsed();
        let time_elapsed = elapsed.as_secs() + u64::from(elapsed.subsec_nanos() > 0);

        info!(
            started,
            forcefully_terminated,
            time_elapsed,
            lines = transcript.len(),
            "trace utility run finished"
        );

        RunSummary {
            started,
            stopped: self.stopped,
            error,
            fatal,
            transcript,
            forcefully_terminated,
            time_elapsed,
        }
    }
}

/// Forward lines from one pipe into the shared channel until EOF.
fn spawn_line_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    tx: mpsc::Sender<String>,
) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });
}
