// tests/cli_execute.rs

//! Driving the CLI entry point with an explicitly injected gateway.

mod common;
use crate::common::{args, init_tracing};

use std::error::Error;
use std::sync::Arc;

use clap::Parser;

use procgate::cli::CliArgs;
use procgate::{ProcessResult, execute};
use procgate_test_utils::{CallKind, FakeProcessGateway};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn run_subcommand_reports_the_child_exit_code() -> TestResult {
    init_tracing();

    let fake = Arc::new(FakeProcessGateway::new(ProcessResult::new(7, "", "failed\n")));
    let cli = CliArgs::try_parse_from(["procgate", "run", "--shell", "make", "-j4", "all"])?;

    let code = execute(cli, fake.clone()).await?;
    assert_eq!(code, 7);

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, CallKind::Run);
    assert_eq!(calls[0].executable, "make");
    assert_eq!(calls[0].arguments, args(&["-j4", "all"]));
    assert!(calls[0].run_in_shell);
    Ok(())
}

#[tokio::test]
async fn signal_exit_maps_to_generic_failure() -> TestResult {
    init_tracing();

    let fake = Arc::new(FakeProcessGateway::new(ProcessResult::new(-15, "", "")));
    let cli = CliArgs::try_parse_from(["procgate", "run", "server"])?;

    assert_eq!(execute(cli, fake).await?, 1);
    Ok(())
}

#[tokio::test]
async fn start_subcommand_surfaces_launch_failures() -> TestResult {
    init_tracing();

    let fake = Arc::new(FakeProcessGateway::mocked_output());
    let cli = CliArgs::try_parse_from(["procgate", "start", "--cwd", "/srv", "server"])?;

    let err = execute(cli, fake.clone()).await.unwrap_err();
    assert!(format!("{err:#}").contains("starting 'server'"));

    let calls = fake.calls();
    assert_eq!(calls[0].kind, CallKind::Start);
    assert_eq!(calls[0].working_directory.as_deref(), Some(std::path::Path::new("/srv")));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn start_subcommand_waits_for_the_real_process() -> TestResult {
    init_tracing();

    let fake = Arc::new(FakeProcessGateway::mocked_output().with_real_start());
    let cli = CliArgs::try_parse_from(["procgate", "start", "sh", "-c", "exit 5"])?;

    assert_eq!(execute(cli, fake.clone()).await?, 5);
    assert_eq!(fake.call_count(), 1);
    Ok(())
}
