// src/gateway/mod.rs

//! Process gateway abstraction.
//!
//! All process launches go through a [`ProcessGateway`]. Production code uses
//! [`DefaultProcessGateway`], which hands everything to `tokio::process`;
//! tests can provide their own implementation that never touches the OS.
//!
//! - [`default`] contains the platform-backed implementation.
//! - [`shell`] describes the command interpreter used when `run_in_shell`
//!   is set.
//!
//! Selection of the process-wide gateway lives in [`crate::registry`].

use std::fmt::Debug;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::errors::Result;
use crate::handle::ProcessHandle;
use crate::result::ProcessResult;

pub mod default;
pub mod shell;

pub use default::DefaultProcessGateway;
pub use shell::Shell;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Contract every process gateway implements.
///
/// Arguments are handed to the OS exactly as given: no quoting, escaping or
/// sanitising happens at this layer. With `run_in_shell = true` the command
/// is interpreted by the system shell, and reasoning about quoting and
/// injection is the caller's job.
pub trait ProcessGateway: Send + Sync + Debug {
    /// Launch `executable` and return as soon as the OS has created the
    /// process. Does not wait for it to finish.
    ///
    /// Must be called from within a Tokio runtime.
    fn start(
        &self,
        executable: &str,
        arguments: &[String],
        working_directory: Option<&Path>,
        run_in_shell: bool,
    ) -> Result<ProcessHandle>;

    /// Launch `executable`, wait for it to exit and capture all of its
    /// stdout and stderr in memory.
    ///
    /// A non-zero exit code is returned in the [`ProcessResult`], not as an
    /// error. There is no working directory here; use [`start`](Self::start)
    /// and wait on the handle for that.
    fn run<'a>(
        &'a self,
        executable: &'a str,
        arguments: &'a [String],
        run_in_shell: bool,
    ) -> BoxFuture<'a, Result<ProcessResult>>;
}
