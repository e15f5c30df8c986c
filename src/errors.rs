// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! A non-zero exit code is never an error here: it is reported as data in
//! [`ProcessResult`](crate::result::ProcessResult). Errors only describe
//! failures to create a process or to observe it.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The OS refused to create the process (not found, not executable,
    /// invalid working directory, ...). The platform error is kept as-is.
    #[error("failed to launch '{executable}': {source}")]
    Launch {
        executable: String,
        #[source]
        source: io::Error,
    },

    /// The process was created but waiting on it or draining its output
    /// failed.
    #[error("failed while waiting on '{executable}': {source}")]
    Wait {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn launch(executable: impl Into<String>, source: io::Error) -> Self {
        GatewayError::Launch {
            executable: executable.into(),
            source,
        }
    }

    pub fn wait(executable: impl Into<String>, source: io::Error) -> Self {
        GatewayError::Wait {
            executable: executable.into(),
            source,
        }
    }

    pub fn is_launch(&self) -> bool {
        matches!(self, GatewayError::Launch { .. })
    }

    /// Platform error kind of a launch failure, `None` for other variants.
    pub fn launch_kind(&self) -> Option<io::ErrorKind> {
        match self {
            GatewayError::Launch { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
