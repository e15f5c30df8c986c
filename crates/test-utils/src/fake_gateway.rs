use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use procgate::errors::{GatewayError, Result};
use procgate::{BoxFuture, DefaultProcessGateway, ProcessGateway, ProcessHandle, ProcessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Start,
    Run,
}

/// One call seen by a [`FakeProcessGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub executable: String,
    pub arguments: Vec<String>,
    pub working_directory: Option<PathBuf>,
    pub run_in_shell: bool,
}

/// A fake gateway that:
/// - records every `start` / `run` call
/// - answers every `run` with the same fixed `ProcessResult`, whatever the
///   arguments
/// - refuses `start` with an `Unsupported` launch error, unless built with
///   [`with_real_start`](Self::with_real_start)
#[derive(Debug)]
pub struct FakeProcessGateway {
    result: ProcessResult,
    real_start: Option<DefaultProcessGateway>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeProcessGateway {
    pub fn new(result: ProcessResult) -> Self {
        Self {
            result,
            real_start: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Exit code 0, stdout `"Mocked output"`, empty stderr.
    pub fn mocked_output() -> Self {
        Self::new(ProcessResult::new(0, "Mocked output", ""))
    }

    /// Hand `start` calls to the real platform gateway (still recorded).
    pub fn with_real_start(mut self) -> Self {
        self.real_start = Some(DefaultProcessGateway::new());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(
        &self,
        kind: CallKind,
        executable: &str,
        arguments: &[String],
        working_directory: Option<&Path>,
        run_in_shell: bool,
    ) {
        let mut guard = self.calls.lock().unwrap();
        guard.push(RecordedCall {
            kind,
            executable: executable.to_string(),
            arguments: arguments.to_vec(),
            working_directory: working_directory.map(Path::to_path_buf),
            run_in_shell,
        });
    }
}

impl ProcessGateway for FakeProcessGateway {
    fn start(
        &self,
        executable: &str,
        arguments: &[String],
        working_directory: Option<&Path>,
        run_in_shell: bool,
    ) -> Result<ProcessHandle> {
        self.record(CallKind::Start, executable, arguments, working_directory, run_in_shell);

        match &self.real_start {
            Some(real) => real.start(executable, arguments, working_directory, run_in_shell),
            None => Err(GatewayError::launch(
                executable,
                io::Error::new(io::ErrorKind::Unsupported, "fake gateway does not start processes"),
            )),
        }
    }

    fn run<'a>(
        &'a self,
        executable: &'a str,
        arguments: &'a [String],
        run_in_shell: bool,
    ) -> BoxFuture<'a, Result<ProcessResult>> {
        self.record(CallKind::Run, executable, arguments, None, run_in_shell);
        let result = self.result.clone();
        Box::pin(async move { Ok(result) })
    }
}
