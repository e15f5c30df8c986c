// src/gateway/default.rs

//! Platform-backed gateway.
//!
//! A thin pass-through to `tokio::process::Command`: no retries, no
//! timeouts, no output transformation and no interpretation of exit codes.
//! Platform failures reach the caller as [`GatewayError::Launch`] with the
//! original `io::Error` attached.

use std::io;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::{GatewayError, Result};
use crate::gateway::{BoxFuture, ProcessGateway, Shell};
use crate::handle::ProcessHandle;
use crate::result::ProcessResult;

#[derive(Debug, Clone, Default)]
pub struct DefaultProcessGateway {
    shell: Shell,
}

impl DefaultProcessGateway {
    pub fn new() -> Self {
        Self {
            shell: Shell::platform(),
        }
    }

    /// Use a different interpreter for `run_in_shell` launches.
    pub fn with_shell(shell: Shell) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    fn command(&self, executable: &str, arguments: &[String], run_in_shell: bool) -> Command {
        if !run_in_shell {
            let mut cmd = Command::new(executable);
            cmd.args(arguments);
            return cmd;
        }

        let line = self.shell.command_line(executable, arguments);
        let mut cmd = Command::new(self.shell.program());
        cmd.arg(self.shell.flag());

        // cmd.exe does its own parsing; std's Windows argument quoting would
        // change what it sees.
        #[cfg(windows)]
        cmd.raw_arg(line);
        #[cfg(not(windows))]
        cmd.arg(line);

        cmd
    }
}

fn ensure_executable(executable: &str) -> Result<()> {
    if executable.is_empty() {
        return Err(GatewayError::launch(
            executable,
            io::Error::new(io::ErrorKind::InvalidInput, "executable must not be empty"),
        ));
    }
    Ok(())
}

fn launch_failed(executable: &str, err: io::Error) -> GatewayError {
    warn!(executable, error = %err, "failed to launch process");
    GatewayError::launch(executable, err)
}

impl ProcessGateway for DefaultProcessGateway {
    fn start(
        &self,
        executable: &str,
        arguments: &[String],
        working_directory: Option<&Path>,
        run_in_shell: bool,
    ) -> Result<ProcessHandle> {
        ensure_executable(executable)?;

        let mut cmd = self.command(executable, arguments, run_in_shell);
        if let Some(dir) = working_directory {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(
            executable,
            args = arguments.len(),
            run_in_shell,
            working_directory = ?working_directory,
            "starting process"
        );

        let child = cmd.spawn().map_err(|e| launch_failed(executable, e))?;
        let handle = ProcessHandle::new(executable, child);
        debug!(executable, pid = ?handle.pid(), "process started");
        Ok(handle)
    }

    fn run<'a>(
        &'a self,
        executable: &'a str,
        arguments: &'a [String],
        run_in_shell: bool,
    ) -> BoxFuture<'a, Result<ProcessResult>> {
        Box::pin(async move {
            ensure_executable(executable)?;

            let mut cmd = self.command(executable, arguments, run_in_shell);
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());

            debug!(
                executable,
                args = arguments.len(),
                run_in_shell,
                "running process"
            );

            let child = cmd.spawn().map_err(|e| launch_failed(executable, e))?;
            ProcessHandle::new(executable, child).wait_with_output().await
        })
    }
}
