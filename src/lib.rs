// src/lib.rs

//! Swappable gateway for launching OS processes.
//!
//! Code that needs to run an external program goes through a
//! [`ProcessGateway`] instead of calling `tokio::process` directly, so the
//! mechanism can be replaced (typically by a test double) without touching
//! the caller.
//!
//! ```no_run
//! # async fn demo() -> procgate::Result<()> {
//! let result = procgate::run("echo", &["Hello, World!".to_string()], true).await?;
//! assert_eq!(result.exit_code(), 0);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod errors;
pub mod gateway;
pub mod handle;
pub mod logging;
pub mod registry;
pub mod result;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};

pub use errors::{GatewayError, Result};
pub use gateway::{BoxFuture, DefaultProcessGateway, ProcessGateway, Shell};
pub use handle::ProcessHandle;
pub use registry::{GatewayOverride, current_gateway, override_gateway, set_gateway};
pub use result::ProcessResult;

/// Start a process through the currently installed gateway.
pub fn start(
    executable: &str,
    arguments: &[String],
    working_directory: Option<&Path>,
    run_in_shell: bool,
) -> Result<ProcessHandle> {
    current_gateway().start(executable, arguments, working_directory, run_in_shell)
}

/// Run a process to completion through the currently installed gateway.
///
/// The gateway is resolved once, before the process is launched; swapping
/// the global gateway while this is pending has no effect on it.
pub async fn run(executable: &str, arguments: &[String], run_in_shell: bool) -> Result<ProcessResult> {
    let gateway = current_gateway();
    gateway.run(executable, arguments, run_in_shell).await
}

/// High-level entry point used by `main.rs`.
///
/// Returns the exit code the binary should terminate with. The gateway is
/// passed in explicitly so tests can drive the CLI with a fake.
pub async fn execute(args: CliArgs, gateway: Arc<dyn ProcessGateway>) -> anyhow::Result<i32> {
    match args.command {
        Command::Run {
            shell,
            executable,
            args,
        } => {
            let result = gateway
                .run(&executable, &args, shell)
                .await
                .with_context(|| format!("running '{executable}'"))?;

            let mut stdout = tokio::io::stdout();
            stdout.write_all(result.stdout()).await?;
            stdout.flush().await?;

            let mut stderr = tokio::io::stderr();
            stderr.write_all(result.stderr()).await?;
            stderr.flush().await?;

            debug!(exit_code = result.exit_code(), "run finished");
            Ok(cli_exit_code(result.exit_code()))
        }

        Command::Start {
            shell,
            cwd,
            executable,
            args,
        } => {
            let mut handle = gateway
                .start(&executable, &args, cwd.as_deref(), shell)
                .with_context(|| format!("starting '{executable}'"))?;

            info!(executable = %executable, pid = ?handle.pid(), "process started");

            // Nothing to feed the child; closing stdin lets it see EOF.
            drop(handle.take_stdin());

            let out = tokio::spawn(forward(handle.take_stdout(), tokio::io::stdout()));
            let err = tokio::spawn(forward(handle.take_stderr(), tokio::io::stderr()));

            let code = handle.wait().await?;
            out.await??;
            err.await??;

            Ok(cli_exit_code(code))
        }
    }
}

async fn forward<R, W>(reader: Option<R>, mut writer: W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Some(mut reader) = reader {
        tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
    }
    Ok(())
}

/// Signal terminations come back as negative codes; the shell can't
/// represent those, so they collapse to a generic failure.
fn cli_exit_code(code: i32) -> i32 {
    if code < 0 { 1 } else { code }
}
