// src/handle.rs

//! Handle to a process started through a gateway.
//!
//! The handle is owned exclusively by whoever called `start`; the gateway
//! keeps no reference to it. Termination state is tracked by the OS and
//! surfaced through `tokio::process::Child`.

use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use tracing::debug;

use crate::errors::{GatewayError, Result};
use crate::result::{ProcessResult, exit_code_of};

#[derive(Debug)]
pub struct ProcessHandle {
    executable: String,
    pid: Option<u32>,
    child: Child,
}

impl ProcessHandle {
    pub(crate) fn new(executable: impl Into<String>, child: Child) -> Self {
        // `id()` goes to `None` once the child is reaped, so remember it now.
        let pid = child.id();
        Self {
            executable: executable.into(),
            pid,
            child,
        }
    }

    /// OS process id, as observed right after the spawn.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Wait for the process to exit and return its exit code.
    ///
    /// Stdin is closed before waiting. Piped stdout/stderr that nobody reads
    /// can fill up and stall the child; take and drain them, or use
    /// [`wait_with_output`](Self::wait_with_output).
    pub async fn wait(&mut self) -> Result<i32> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|e| GatewayError::wait(&self.executable, e))?;
        let code = exit_code_of(status);
        debug!(executable = %self.executable, pid = ?self.pid, exit_code = code, "process exited");
        Ok(code)
    }

    /// Wait for exit while collecting every stream that has not been taken.
    /// A stream that was taken earlier shows up as empty output.
    pub async fn wait_with_output(self) -> Result<ProcessResult> {
        let Self {
            executable,
            pid,
            child,
        } = self;
        let output = child
            .wait_with_output()
            .await
            .map_err(|e| GatewayError::wait(&executable, e))?;
        let result = ProcessResult::from_output(output);
        debug!(
            executable = %executable,
            pid = ?pid,
            exit_code = result.exit_code(),
            stdout_bytes = result.stdout().len(),
            stderr_bytes = result.stderr().len(),
            "process exited"
        );
        Ok(result)
    }

    /// Ask the OS to kill the process without waiting for it to exit.
    pub fn start_kill(&mut self) -> Result<()> {
        self.child
            .start_kill()
            .map_err(|e| GatewayError::wait(&self.executable, e))
    }

    /// Kill the process and wait until it is gone.
    pub async fn kill(&mut self) -> Result<()> {
        debug!(executable = %self.executable, pid = ?self.pid, "killing process");
        self.child
            .kill()
            .await
            .map_err(|e| GatewayError::wait(&self.executable, e))
    }

    pub fn into_child(self) -> Child {
        self.child
    }
}
