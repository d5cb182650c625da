//! Delivery command execution logic

use crate::{DeliveryError, NotifyConfig, ReminderPayload, Result};
use dayplan_core::ReminderId;
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::Duration;

/// Seam between the scheduler and whatever actually fires notifications.
pub trait ReminderDelivery {
    /// Register a reminder and return its opaque handle.
    ///
    /// # Errors
    ///
    /// Returns an error when delivery is unavailable or the scheduling
    /// attempt fails.
    fn schedule(&self, payload: &ReminderPayload) -> Result<ReminderId>;

    /// Revoke a previously scheduled reminder.
    ///
    /// # Errors
    ///
    /// Returns an error when the reminder cannot be cancelled, including
    /// when it already fired or is unknown to the delivery side.
    fn cancel(&self, id: &ReminderId) -> Result<()>;
}

/// Delivery that shells out to a configured command.
///
/// Protocol: `<command> [args..] schedule` receives the JSON payload on
/// stdin and must print the reminder handle on stdout;
/// `<command> [args..] cancel <handle>` revokes a reminder. A non-zero exit
/// code, an empty handle or a timeout all count as failure.
#[derive(Debug)]
pub struct CommandDelivery {
    config: NotifyConfig,
}

impl CommandDelivery {
    /// Create a delivery from its configuration.
    #[must_use]
    pub const fn new(config: NotifyConfig) -> Self {
        Self { config }
    }

    fn program(&self) -> Result<&Path> {
        if !self.config.enabled {
            return Err(DeliveryError::Unavailable);
        }
        self.config.command.as_deref().ok_or(DeliveryError::Unavailable)
    }

    /// Run one delivery invocation with the configured timeout.
    fn run(&self, subcommand: &str, extra: Option<&str>, input: Option<&str>) -> Result<Output> {
        let program = self.program()?;
        let mut command = Command::new(program);
        command.args(&self.config.args).arg(subcommand);
        if let Some(extra) = extra {
            command.arg(extra);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Write the payload and close stdin so the command sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            if let Some(input) = input {
                stdin.write_all(input.as_bytes())?;
            }
            drop(stdin);
        }

        let output = wait_with_timeout(&mut child, Duration::from_secs(self.config.timeout))?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(DeliveryError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

impl ReminderDelivery for CommandDelivery {
    fn schedule(&self, payload: &ReminderPayload) -> Result<ReminderId> {
        let input = serde_json::to_string(payload)?;
        let output = self.run("schedule", None, Some(&input))?;
        let handle = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        if handle.is_empty() {
            return Err(DeliveryError::NoHandle);
        }
        Ok(ReminderId::new(handle))
    }

    fn cancel(&self, id: &ReminderId) -> Result<()> {
        self.run("cancel", Some(id.as_str()), None).map(|_| ())
    }
}

/// Wait for a child process with timeout, killing it on expiry.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = child.stdout.take().map_or(Vec::new(), |mut stdout| {
                    let mut buf = Vec::new();
                    let _ = std::io::Read::read_to_end(&mut stdout, &mut buf);
                    buf
                });

                let stderr = child.stderr.take().map_or(Vec::new(), |mut stderr| {
                    let mut buf = Vec::new();
                    let _ = std::io::Read::read_to_end(&mut stderr, &mut buf);
                    buf
                });

                return Ok(Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    return Err(DeliveryError::Timeout(timeout.as_secs()));
                }
                std::thread::sleep(poll_interval);
            }
            Err(err) => return Err(DeliveryError::Io(err)),
        }
    }
}
