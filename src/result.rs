// src/result.rs

//! Outcome of a completed process.

use std::borrow::Cow;
use std::process::ExitStatus;

/// Exit code plus everything the process wrote to stdout and stderr.
///
/// Only ever built once the process has fully terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    exit_code: i32,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl ProcessResult {
    pub fn new(exit_code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub(crate) fn from_output(output: std::process::Output) -> Self {
        Self {
            exit_code: exit_code_of(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Stdout decoded as UTF-8, invalid sequences replaced.
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Stderr decoded as UTF-8, invalid sequences replaced.
    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// `(exit_code, stdout, stderr)`
    pub fn into_parts(self) -> (i32, Vec<u8>, Vec<u8>) {
        (self.exit_code, self.stdout, self.stderr)
    }
}

/// Map an [`ExitStatus`] to a plain integer code.
///
/// - normal exit: the process's own code
/// - killed by a signal (Unix): the negated signal number
/// - anything else: `-1`
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
