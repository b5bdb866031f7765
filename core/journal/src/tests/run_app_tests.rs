//! 配線 + Runner を通したコマンド実行

use super::support::{FakeServer, FixedConfirmation, RecordingNotifier, RecordingView, TestEnv, BASE};
use crate::cli::{parse_args_from, Cli, ParseOutcome};
use crate::domain::{JournalCommand, RemoteReflection};
use crate::ports::inbound::UseCaseRunner;
use crate::ports::outbound::{Decision, HardwareStatus};
use crate::wiring::{wire_with, Platform, SERVER_ENV};
use common::adapter::{FixedClock, StdFileSystem};
use common::error::Error;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

struct AlwaysOnline;

impl HardwareStatus for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

fn platform(root: &Path, server: Arc<FakeServer>) -> Platform {
    let mut env = TestEnv::new(root);
    env.vars.insert(SERVER_ENV.to_string(), BASE.to_string());
    Platform {
        env: Arc::new(env),
        fs: Arc::new(StdFileSystem),
        clock: Arc::new(FixedClock(1_700_000_000_000)),
        network: server,
        notifier: Arc::new(RecordingNotifier::default()),
        view: Arc::new(RecordingView::default()),
        hardware: Some(Arc::new(AlwaysOnline)),
        confirmation: Some(Arc::new(FixedConfirmation::new(Decision::Confirmed))),
    }
}

fn run_app(root: &Path, server: Arc<FakeServer>, args: &[&str]) -> Result<i32, Error> {
    let cli = match parse_args_from(args)? {
        ParseOutcome::Command(cli) => cli,
        other => panic!("expected command, got {:?}", other),
    };
    let app = wire_with(&cli, platform(root, server))?;
    let runner = crate::Runner { app };
    runner.run(cli)
}

#[test]
fn test_add_then_list_uses_home_dirs() {
    let dir = tempdir().unwrap();
    let server = Arc::new(FakeServer::new());
    server.fail_posts_with(500);

    let code = run_app(dir.path(), server.clone(), &["journal", "add", "-t", "T", "-c", "C"]).unwrap();
    assert_eq!(code, 0);
    assert!(dir.path().join("data/store/learningJournalEntries.json").exists());
    assert_eq!(run_app(dir.path(), server, &["journal", "list", "--json"]).unwrap(), 0);

    let log = std::fs::read_to_string(dir.path().join("state/logs/journal.jsonl")).unwrap();
    assert!(log.contains("\"command started\""));
    assert!(log.contains("\"command\":\"add\""));
}

#[test]
fn test_validation_error_is_usage_exit_code() {
    let dir = tempdir().unwrap();
    let err = run_app(dir.path(), Arc::new(FakeServer::new()), &["journal", "add", "-t", " ", "-c", "C"])
        .unwrap_err();
    assert_eq!(err.exit_code(), 64);
}

#[test]
fn test_show_missing_entry_fails() {
    let dir = tempdir().unwrap();
    let err = run_app(dir.path(), Arc::new(FakeServer::new()), &["journal", "show", "1"]).unwrap_err();
    assert!(err.to_string().contains("not found"));

    let log = std::fs::read_to_string(dir.path().join("state/logs/journal.jsonl")).unwrap();
    let finished: serde_json::Value = log
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|record| record["message"] == "command finished")
        .unwrap();
    assert_eq!(finished["fields"]["command"], "show");
    assert_eq!(finished["fields"]["exit_code"], err.exit_code());
}

#[test]
fn test_reflections_go_through_offline_cache() {
    let dir = tempdir().unwrap();
    let server = Arc::new(FakeServer::with_reflections(vec![RemoteReflection::new(
        "2024-01-01T00:00:00Z",
        "hello",
    )]));

    run_app(dir.path(), server.clone(), &["journal", "list"]).unwrap();
    assert!(dir.path().join("cache/journal-pwa-v19.json").exists());

    server.set_online(false);
    let cli = Cli::new(JournalCommand::List { json: false });
    let app = wire_with(&cli, platform(dir.path(), server)).unwrap();
    assert_eq!(app.journal.load().server_count, 1);
}

#[test]
fn test_offline_cache_can_be_disabled() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/config.json"), r#"{"offline_cache":false}"#).unwrap();
    let server = Arc::new(FakeServer::with_reflections(vec![RemoteReflection::new(
        "2024-01-01T00:00:00Z",
        "hello",
    )]));

    run_app(dir.path(), server, &["journal", "list"]).unwrap();
    assert!(!dir.path().join("cache/journal-pwa-v19.json").exists());
}

#[test]
fn test_malformed_config_is_usage_error() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(dir.path().join("config/config.json"), "{").unwrap();
    let err = run_app(dir.path(), Arc::new(FakeServer::new()), &["journal"]).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn test_server_url_without_host_is_usage_error() {
    let dir = tempdir().unwrap();
    let err = run_app(dir.path(), Arc::new(FakeServer::new()), &["journal", "--server", "http://", "list"])
        .unwrap_err();
    assert!(err.is_usage());
    assert!(err.to_string().contains("server_url"));
}

#[test]
fn test_export_defaults_to_current_dir() {
    let dir = tempdir().unwrap();
    let code = run_app(dir.path(), Arc::new(FakeServer::new()), &["journal", "export"]).unwrap();
    assert_eq!(code, 0);
    assert!(dir.path().join("cwd/journal-export-2023-11-14.json").exists());
}

#[test]
fn test_status_reports_online() {
    let dir = tempdir().unwrap();
    let server = Arc::new(FakeServer::new());
    assert_eq!(run_app(dir.path(), server.clone(), &["journal", "status"]).unwrap(), 0);
    server.set_online(false);
    assert_eq!(run_app(dir.path(), server, &["journal", "status"]).unwrap(), 1);
}

#[test]
fn test_cache_install_and_activate_commands() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("cache")).unwrap();
    std::fs::write(dir.path().join("cache/journal-pwa-v18.json"), r#"{"entries":{}}"#).unwrap();
    let server = Arc::new(FakeServer::new());

    assert_eq!(run_app(dir.path(), server.clone(), &["journal", "cache", "install"]).unwrap(), 0);
    assert_eq!(run_app(dir.path(), server.clone(), &["journal", "cache", "activate"]).unwrap(), 0);

    assert!(!dir.path().join("cache/journal-pwa-v18.json").exists());
    assert!(dir.path().join("cache/journal-pwa-v19.json").exists());
    assert_eq!(run_app(dir.path(), server, &["journal", "cache", "list"]).unwrap(), 0);
}

#[test]
fn test_delete_remote_through_runner() {
    let dir = tempdir().unwrap();
    let server = Arc::new(FakeServer::with_reflections(vec![RemoteReflection::new(
        "2024-01-01T00:00:00Z",
        "hello",
    )]));
    run_app(dir.path(), server.clone(), &["journal", "delete-remote", "0", "--yes"]).unwrap();
    assert!(server.reflections.lock().unwrap().is_empty());
}
