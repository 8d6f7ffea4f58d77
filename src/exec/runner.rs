// runner.rs - Running delegated engines and capturing their outcome

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use super::command::CommandSpec;
use crate::diagnostics::Diagnostics;
use crate::error::{AttotreeError, Result};

/// Poll interval while waiting for a child process
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Exit code of a process killed by SIGPIPE behind a shell; treated as success
pub const SIGPIPE_EXIT: i32 = 141;

/// What a finished process left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    /// Captured standard error
    pub diagnostics: String,
}

impl ProcessOutcome {
    pub fn exited(code: i32) -> Self {
        Self {
            status: Some(code),
            diagnostics: String::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Into<String>) -> Self {
        self.diagnostics = diagnostics.into();
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(0) | Some(SIGPIPE_EXIT))
    }

    /// Turn a failing outcome into `ExternalToolFailure`
    pub fn ensure_success(self, spec: &CommandSpec) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(AttotreeError::ExternalToolFailure {
                command: spec.render(true),
                status: self.status,
                diagnostics: self.diagnostics,
            })
        }
    }
}

/// Executes a command with its standard output redirected into a file.
///
/// Blocks until the process terminates.
pub trait ProcessRunner {
    fn run(&self, spec: &CommandSpec, stdout: &Path) -> Result<ProcessOutcome>;
}

/// Runs commands as real OS processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, stdout: &Path) -> Result<ProcessOutcome> {
        let out_file = File::create(stdout).map_err(|e| {
            AttotreeError::io(format!("Failed to create '{}'", stdout.display()), e)
        })?;

        let mut child = Command::new(spec.program())
            .args(spec.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::from(out_file))
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AttotreeError::io(format!("Failed to start '{}'", spec.program()), e))?;

        // Drain stderr concurrently so the child never blocks on a full pipe
        let stderr = child.stderr.take();
        let drain = thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(mut pipe) = stderr {
                let _ = pipe.read_to_end(&mut buf);
            }
            buf
        });

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AttotreeError::io(
                        format!("Failed to wait for '{}'", spec.program()),
                        e,
                    ));
                }
            }
        };

        let captured = drain.join().unwrap_or_default();
        Ok(ProcessOutcome {
            status: status.code(),
            diagnostics: String::from_utf8_lossy(&captured).into_owned(),
        })
    }
}

/// Run `spec`, reporting start and completion on the diagnostic sink
pub fn run_checked(
    runner: &dyn ProcessRunner,
    spec: &CommandSpec,
    stdout: &Path,
    diag: &Diagnostics,
) -> Result<()> {
    let shown = diag.command(spec);
    diag.message(&format!("Shell command: {}", shown));

    let outcome = runner.run(spec, stdout)?;
    if outcome.is_success() {
        diag.message(&format!("Finished: {}", shown));
        Ok(())
    } else {
        let status = match outcome.status {
            Some(code) => format!("exit code {}", code),
            None => "killed by signal".to_string(),
        };
        diag.message(&format!("Unfinished, an error occurred ({}): {}", status, shown));
        outcome.ensure_success(spec)
    }
}
