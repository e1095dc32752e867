//! Tool process tests against generated mock tools.
#![cfg(unix)]

mod common;

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use common::Fixture;
use intune_wrapper::wrapper::builder::{render_command_for, tool_args};
use intune_wrapper::wrapper::{
    Classification, Error, HostPlatform, Interaction, LogEvent, NullObserver, StreamKind,
    ToolLocator, ValidationError, WrapOrchestrator, WrapRequest, render_command, wrap,
};

// Writing a script while another test thread forks can leave the file busy
// (ETXTBSY) at exec time. Tests in this binary create and launch one at a time.
static SPAWN_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

fn request(fx: &Fixture, verify: bool) -> WrapRequest {
    WrapRequest::builder()
        .input(&fx.input)
        .output(&fx.output)
        .profile(&fx.profile)
        .verify_after_wrap(verify)
        .build()
        .expect("fixture request is valid")
}

/// Records every prompt and answers with a fixed value.
struct Recorder {
    answer: bool,
    confirms: RefCell<Vec<String>>,
    notices: RefCell<Vec<(String, String)>>,
}

impl Recorder {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            confirms: RefCell::new(Vec::new()),
            notices: RefCell::new(Vec::new()),
        }
    }
}

impl Interaction for Recorder {
    fn confirm(&self, title: &str, _message: &str) -> bool {
        self.confirms.borrow_mut().push(title.to_string());
        self.answer
    }

    fn notify(&self, title: &str, message: &str) {
        self.notices
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
}

#[tokio::test]
async fn all_lines_from_both_streams_are_collected() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool(
        "IntuneMAMPackager",
        r#"for i in 1 2 3 4 5; do echo "out $i"; done
for i in 1 2 3; do echo "err $i" >&2; done
exit 0"#,
    );

    let outcome = wrap(&request(&fx, false), &tool, NullObserver)
        .await
        .expect("mock tool runs");

    assert_eq!(outcome.classification, Classification::Success);
    assert_eq!(outcome.exit_code, 0);

    let stdout: Vec<_> = outcome
        .lines_from(StreamKind::Stdout)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(stdout, ["out 1", "out 2", "out 3", "out 4", "out 5"]);

    let stderr: Vec<_> = outcome
        .lines_from(StreamKind::Stderr)
        .map(|l| l.display_text())
        .collect();
    assert_eq!(stderr, ["ERROR: err 1", "ERROR: err 2", "ERROR: err 3"]);
}

#[tokio::test]
async fn nonzero_exit_is_failure_and_verification_still_runs() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool(
        "IntuneMAMPackager",
        r#"head -c 500 /dev/zero > "$4"
echo "signing failed" >&2
exit 2"#,
    );

    let report = WrapOrchestrator::new(HostPlatform::MacOs)
        .with_tool(&tool)
        .run(&request(&fx, true), &Recorder::new(true), NullObserver)
        .await
        .expect("a nonzero exit is reported, not raised");

    assert_eq!(report.outcome.classification, Classification::Failure);
    assert_eq!(report.outcome.exit_code, 2);

    let verification = report.verification.expect("verification was requested");
    assert!(verification.artifact_present);
    assert!(verification.size_increased);
    assert_eq!(verification.produced_size, Some(500));
    assert_eq!(report.outcome.classification, Classification::Failure);
}

#[tokio::test]
async fn missing_output_after_success_does_not_fail_the_wrap() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool("IntuneMAMPackager", "exit 0");

    let report = WrapOrchestrator::new(HostPlatform::MacOs)
        .with_tool(&tool)
        .run(&request(&fx, true), &Recorder::new(true), NullObserver)
        .await
        .unwrap();

    assert!(report.outcome.is_success());
    assert!(!report.verification.unwrap().artifact_present);
    assert!(
        report
            .outcome
            .lines
            .iter()
            .any(|l| l.text.contains("Output file not found"))
    );
}

#[tokio::test]
async fn nonexistent_input_launches_nothing() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let marker = fx.path("launched");
    let tool = fx.mock_tool(
        "IntuneMAMPackager",
        &format!("touch '{}'", marker.display()),
    );

    let request = WrapRequest::builder()
        .input(fx.path("missing.ipa"))
        .output(&fx.output)
        .profile(&fx.profile)
        .build_unchecked();

    let err = wrap(&request, &tool, NullObserver).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InputNotFound(_))
    ));
    assert!(!marker.exists());
}

#[tokio::test]
async fn tool_receives_arguments_intact() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let recorded = fx.path("args.txt");
    let tool = fx.mock_tool(
        "IntuneMAMPackager",
        &format!(
            r#"for a in "$@"; do printf '%s\n' "$a"; done > '{}'"#,
            recorded.display()
        ),
    );

    let request = WrapRequest::builder()
        .input(&fx.input)
        .output(&fx.output)
        .profile(&fx.profile)
        .signing_identity("iPhone Distribution: Contoso Ltd (AB12CD34)")
        .build()
        .unwrap();

    let outcome = wrap(&request, &tool, NullObserver).await.unwrap();
    assert!(outcome.is_success());

    let received: Vec<String> = std::fs::read_to_string(&recorded)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(received, tool_args(&request));
}

#[tokio::test]
async fn logged_command_matches_preview() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool("IntuneMAMPackager", "exit 0");
    let request = request(&fx, false);

    let outcome = wrap(&request, &tool, NullObserver).await.unwrap();
    let executing = outcome
        .lines
        .iter()
        .find_map(|l| l.text.strip_prefix("Executing: "))
        .expect("command is logged");

    assert_eq!(executing, render_command_for(&tool, &request).unwrap());

    let preview = render_command(&request).unwrap();
    let preview_args = preview.strip_prefix("IntuneMAMPackager ").unwrap();
    assert!(executing.ends_with(preview_args));
}

#[tokio::test]
async fn status_milestones_are_reported_in_order() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool("IntuneMAMPackager", "echo wrapped");

    let fractions = Arc::new(Mutex::new(Vec::new()));
    let sink = fractions.clone();
    let observer = move |event: &LogEvent| {
        if let LogEvent::Status(status) = event {
            sink.lock().unwrap().push(status.fraction);
        }
    };

    wrap(&request(&fx, false), &tool, observer).await.unwrap();
    assert_eq!(*fractions.lock().unwrap(), vec![0.1, 0.3, 0.5, 0.8, 1.0]);
}

#[tokio::test]
async fn missing_tool_offers_the_prepared_command() {
    let fx = Fixture::new();
    let request = request(&fx, true);
    let interaction = Recorder::new(true);

    let err = WrapOrchestrator::new(HostPlatform::MacOs)
        .with_tool(fx.path("not-installed/IntuneMAMPackager"))
        .run(&request, &interaction, NullObserver)
        .await
        .unwrap_err();

    let command = match err {
        Error::ToolNotFound { command, .. } => command,
        other => panic!("expected ToolNotFound, got {other:?}"),
    };
    assert_eq!(command, render_command(&request).unwrap());
    assert_eq!(*interaction.confirms.borrow(), ["Wrapping Tool Not Found"]);

    let notices = interaction.notices.borrow();
    assert_eq!(notices[0].0, "Download Instructions");
    assert!(notices[1].1.contains(&command));
}

#[tokio::test]
async fn declining_on_incapable_host_aborts_before_lookup() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let marker = fx.path("launched");
    let tool = fx.mock_tool(
        "IntuneMAMPackager",
        &format!("touch '{}'", marker.display()),
    );
    let interaction = Recorder::new(false);

    let err = WrapOrchestrator::new(HostPlatform::Windows)
        .with_tool(&tool)
        .run(&request(&fx, true), &interaction, NullObserver)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::PlatformUnsupported {
            platform: HostPlatform::Windows
        }
    ));
    assert_eq!(*interaction.confirms.borrow(), ["Platform Limitation"]);
    assert!(!marker.exists());
}

#[tokio::test]
async fn continuing_on_incapable_host_runs_an_existing_tool() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool("IntuneMAMPackager", "echo ok");

    let report = WrapOrchestrator::new(HostPlatform::Other)
        .with_tool(&tool)
        .run(&request(&fx, false), &Recorder::new(true), NullObserver)
        .await
        .unwrap();

    assert!(report.outcome.is_success());
    assert!(report.verification.is_none());
}

#[tokio::test]
async fn non_utf8_output_keeps_the_exit_code() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool(
        "IntuneMAMPackager",
        r#"printf 'Signing caf\351.app\n'
echo done
exit 0"#,
    );

    let outcome = wrap(&request(&fx, false), &tool, NullObserver)
        .await
        .expect("undecodable bytes are not a stream fault");

    assert!(outcome.is_success());
    let stdout: Vec<_> = outcome
        .lines_from(StreamKind::Stdout)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(stdout, ["Signing caf\u{FFFD}.app", "done"]);
}

#[tokio::test]
async fn non_executable_tool_is_a_launch_error() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.path("IntuneMAMPackager");
    std::fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();

    let err = wrap(&request(&fx, false), &tool, NullObserver)
        .await
        .unwrap_err();

    match err {
        Error::Launch { command, source } => {
            assert!(command.contains("IntuneMAMPackager"));
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected Launch, got {other:?}"),
    }
}

#[tokio::test]
async fn orchestrator_uses_first_existing_locator_candidate() {
    let _guard = SPAWN_LOCK.lock().await;
    let fx = Fixture::new();
    let tool = fx.mock_tool("IntuneMAMPackager", "echo from-second-candidate");
    let locator = ToolLocator::with_candidates(
        HostPlatform::MacOs,
        vec![fx.path("Applications/IntuneMAMPackager"), tool.clone()],
    );

    let orchestrator = WrapOrchestrator::new(HostPlatform::MacOs).with_locator(locator);
    assert_eq!(orchestrator.resolve_tool().path(), tool.as_path());

    let report = orchestrator
        .run(&request(&fx, false), &Recorder::new(true), NullObserver)
        .await
        .unwrap();
    assert!(report.outcome.is_success());
    assert!(
        report
            .outcome
            .lines_from(StreamKind::Stdout)
            .any(|l| l.text == "from-second-candidate")
    );
}
