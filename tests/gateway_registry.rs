// tests/gateway_registry.rs

//! Process-wide gateway selection: lazy default, replacement, scoped
//! overrides and substitution through the crate-level helpers.
//!
//! Every test here touches global state, so they all run `#[serial]`.

mod common;
use crate::common::{args, init_tracing};

use std::error::Error;
use std::io;
use std::path::Path;
use std::sync::{Arc, Barrier};

use serial_test::serial;
use tokio::sync::Notify;

use procgate::errors::Result as GatewayResult;
use procgate::{
    BoxFuture, ProcessGateway, ProcessHandle, ProcessResult, current_gateway, override_gateway,
    set_gateway,
};
use procgate_test_utils::{CallKind, FakeProcessGateway, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

/// Gateway whose `run` announces that it was entered, then parks until the
/// test releases it. Its result carries `label` on stdout.
#[derive(Debug)]
struct GatedGateway {
    label: &'static str,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl ProcessGateway for GatedGateway {
    fn start(
        &self,
        executable: &str,
        _arguments: &[String],
        _working_directory: Option<&Path>,
        _run_in_shell: bool,
    ) -> GatewayResult<ProcessHandle> {
        Err(procgate::GatewayError::launch(
            executable,
            io::Error::from(io::ErrorKind::Unsupported),
        ))
    }

    fn run<'a>(
        &'a self,
        _executable: &'a str,
        _arguments: &'a [String],
        _run_in_shell: bool,
    ) -> BoxFuture<'a, GatewayResult<ProcessResult>> {
        Box::pin(async move {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(ProcessResult::new(0, self.label, ""))
        })
    }
}

#[test]
#[serial]
fn default_gateway_is_resolved_once() {
    init_tracing();

    let first = current_gateway();
    let second = current_gateway();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(format!("{first:?}").contains("DefaultProcessGateway"));
}

#[test]
#[serial]
fn concurrent_first_access_agrees_on_one_instance() {
    init_tracing();

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                current_gateway()
            })
        })
        .collect();

    let seen: Vec<Arc<dyn ProcessGateway>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    for gateway in &seen[1..] {
        assert!(Arc::ptr_eq(&seen[0], gateway));
    }
}

#[test]
#[serial]
fn set_gateway_is_visible_to_every_reader() {
    init_tracing();

    let fake: Arc<dyn ProcessGateway> = Arc::new(FakeProcessGateway::mocked_output());
    let _restore = override_gateway(Arc::clone(&fake));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let expected = Arc::clone(&fake);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    assert!(Arc::ptr_eq(&current_gateway(), &expected));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
#[serial]
fn set_gateway_returns_the_previous_one() {
    init_tracing();

    let original = current_gateway();
    let fake: Arc<dyn ProcessGateway> = Arc::new(FakeProcessGateway::mocked_output());

    let previous = set_gateway(Arc::clone(&fake)).expect("default was installed above");
    assert!(Arc::ptr_eq(&previous, &original));
    assert!(Arc::ptr_eq(&current_gateway(), &fake));

    set_gateway(original);
}

#[test]
#[serial]
fn overrides_restore_in_reverse_order() {
    init_tracing();

    let before = current_gateway();
    let outer: Arc<dyn ProcessGateway> = Arc::new(FakeProcessGateway::mocked_output());
    let inner: Arc<dyn ProcessGateway> =
        Arc::new(FakeProcessGateway::new(ProcessResult::new(1, "", "")));

    {
        let _outer_guard = override_gateway(Arc::clone(&outer));
        assert!(Arc::ptr_eq(&current_gateway(), &outer));

        {
            let _inner_guard = override_gateway(Arc::clone(&inner));
            assert!(Arc::ptr_eq(&current_gateway(), &inner));
        }

        assert!(Arc::ptr_eq(&current_gateway(), &outer));
    }

    assert!(Arc::ptr_eq(&current_gateway(), &before));
}

#[tokio::test]
#[serial]
async fn substituted_gateway_answers_every_run() -> TestResult {
    init_tracing();

    let fake = Arc::new(FakeProcessGateway::mocked_output());
    let _restore = override_gateway(fake.clone());

    let cases = [
        ("echo", args(&["Hello, World!"]), true),
        ("rm", args(&["-rf", "/definitely/not"]), false),
        ("procgate-not-installed", vec![], false),
    ];

    for (exe, argv, shell) in &cases {
        let via_helper = procgate::run(exe, argv, *shell).await?;
        let via_current = current_gateway().run(exe, argv, *shell).await?;

        for result in [via_helper, via_current] {
            assert_eq!(result.exit_code(), 0);
            assert_eq!(result.stdout_lossy(), "Mocked output");
            assert!(result.stderr().is_empty());
        }
    }

    let calls = fake.calls();
    assert_eq!(calls.len(), cases.len() * 2);
    assert!(calls.iter().all(|c| c.kind == CallKind::Run));
    assert_eq!(calls[2].executable, "rm");
    assert_eq!(calls[2].arguments, args(&["-rf", "/definitely/not"]));
    Ok(())
}

#[tokio::test]
#[serial]
async fn substituted_gateway_intercepts_start() {
    init_tracing();

    let fake = Arc::new(FakeProcessGateway::mocked_output());
    let _restore = override_gateway(fake.clone());

    let err = procgate::start("sleep", &args(&["30"]), Some(Path::new("/tmp")), true).unwrap_err();
    assert_eq!(err.launch_kind(), Some(io::ErrorKind::Unsupported));

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, CallKind::Start);
    assert_eq!(calls[0].working_directory.as_deref(), Some(Path::new("/tmp")));
    assert!(calls[0].run_in_shell);
}

#[tokio::test]
#[serial]
async fn in_flight_run_keeps_its_gateway() -> TestResult {
    init_tracing();

    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let gated = Arc::new(GatedGateway {
        label: "first",
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    });
    let _first = override_gateway(gated);

    let pending = tokio::spawn(async { procgate::run("anything", &[], false).await });
    with_timeout(entered.notified()).await;

    // Swap while the first call is parked inside the old gateway.
    let replacement = Arc::new(FakeProcessGateway::new(ProcessResult::new(0, "second", "")));
    let _second = override_gateway(replacement);
    release.notify_one();

    let first_result = with_timeout(pending).await??;
    assert_eq!(first_result.stdout_lossy(), "first");

    let later = procgate::run("anything", &[], false).await?;
    assert_eq!(later.stdout_lossy(), "second");
    Ok(())
}
