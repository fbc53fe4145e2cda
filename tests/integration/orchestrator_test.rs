//! Integration tests for the weekly orchestration loop
#![cfg(unix)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use mass_backtester::engine::{BacktestEngine, EngineError, EngineReport};
use mass_backtester::orchestrator::{BacktestOrchestrator, RunResult, RunSettings};
use mass_backtester::project::StrategyParameter;
use mass_backtester::storage::WeekDataStager;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

use std::os::unix::process::ExitStatusExt;

const VALID: &str =
    "03.01.2022 10:00:00;1,1301;1,1305;1,1299;1,1303;1,1303;1,1307;1,1301;1,1305;14;15";

/// Records every invocation's job descriptor; optionally fails one call
struct FakeEngine {
    projects: Mutex<Vec<String>>,
    fail_on_call: Option<usize>,
}

impl FakeEngine {
    fn new(fail_on_call: Option<usize>) -> Self {
        Self {
            projects: Mutex::new(Vec::new()),
            fail_on_call,
        }
    }

    fn seen(&self) -> Vec<String> {
        self.projects.lock().unwrap().clone()
    }
}

#[async_trait]
impl BacktestEngine for FakeEngine {
    async fn run(
        &self,
        project: &Path,
        _output: &Path,
        _stats: &Path,
    ) -> Result<EngineReport, EngineError> {
        let descriptor = fs::read_to_string(project).expect("descriptor exists at invocation");
        let mut projects = self.projects.lock().unwrap();
        projects.push(descriptor);
        if self.fail_on_call == Some(projects.len()) {
            return Err(EngineError::Wait(std::io::Error::other("engine crashed")));
        }
        Ok(EngineReport {
            status: std::process::ExitStatus::from_raw(0),
        })
    }
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn settings() -> RunSettings {
    RunSettings {
        symbol: "EUR/USD".to_string(),
        strategy: "/opt/strategies/ma_cross.lua".to_string(),
        account_currency: "USD".to_string(),
        initial_amount: 50_000.0,
        default_period: "m1".to_string(),
        account_lot_size: 1000,
        strategy_params: vec![StrategyParameter {
            id: "FastMA".to_string(),
            value: "10".to_string(),
        }],
        start: start(),
    }
}

/// History store with metadata and sources for the given week numbers
fn seed_history(history: &Path, weeks: &[u32]) {
    let dir = history.join("EURUSD");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("info.json"),
        r#"{"Name": "EUR/USD", "PipSize": 0.0001, "Precision": 5, "MMR": 0.02}"#,
    )
    .unwrap();
    for week in weeks {
        fs::write(dir.join(format!("2022-{week}.csv")), format!("{VALID}\n")).unwrap();
    }
}

fn orchestrator(
    history: &TempDir,
    staging: &TempDir,
    engine: FakeEngine,
) -> BacktestOrchestrator<FakeEngine> {
    let stager = WeekDataStager::new(
        history.path().to_path_buf(),
        staging.path().to_path_buf(),
        "orchrun".to_string(),
    );
    BacktestOrchestrator::new(stager, engine, settings(), "orchrun".to_string())
}

/// `now` chosen so exactly three windows end before it
fn now_after_three_weeks() -> NaiveDateTime {
    start() + Duration::days(22)
}

#[tokio::test]
async fn completes_every_week_with_data() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    seed_history(history.path(), &[1, 2, 3]);

    let orch = orchestrator(&history, &staging, FakeEngine::new(None));
    let result = orch.run(now_after_three_weeks()).await.unwrap();

    assert_eq!(
        result,
        RunResult {
            total_weeks: 3,
            completed_weeks: 3
        }
    );
}

#[tokio::test]
async fn staging_failure_does_not_block_the_invocation() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    // Week 2 has no source file; the engine must still be invoked and the
    // week still counts as completed.
    seed_history(history.path(), &[1, 3]);

    let engine = FakeEngine::new(None);
    let orch = orchestrator(&history, &staging, engine);
    let result = orch.run(now_after_three_weeks()).await.unwrap();

    assert_eq!(
        result,
        RunResult {
            total_weeks: 3,
            completed_weeks: 3
        }
    );
}

#[tokio::test]
async fn week_without_data_runs_without_filename_attribute() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    seed_history(history.path(), &[1, 3]);

    let orch = orchestrator(&history, &staging, FakeEngine::new(None));
    orch.run(now_after_three_weeks()).await.unwrap();

    let seen = orch.engine().seen();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].contains("filename="));
    assert!(!seen[1].contains("filename="));
    assert!(seen[2].contains("filename="));
    // Settings flow into every descriptor
    assert!(seen[0].contains("<strategy value=\"/opt/strategies/ma_cross.lua\"/>"));
    assert!(seen[0].contains("<date-from value=\"2022-01-01 00:00:00\"/>"));
    assert!(seen[0].contains("<strategy-param id=\"FastMA\" value=\"10\"/>"));
}

#[tokio::test]
async fn engine_failure_skips_the_week_but_not_the_run() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    seed_history(history.path(), &[1, 2, 3]);

    let orch = orchestrator(&history, &staging, FakeEngine::new(Some(2)));
    let result = orch.run(now_after_three_weeks()).await.unwrap();

    assert_eq!(
        result,
        RunResult {
            total_weeks: 3,
            completed_weeks: 2
        }
    );
}

#[tokio::test]
async fn per_week_artifacts_are_deleted() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    seed_history(history.path(), &[1, 2, 3]);

    let orch = orchestrator(&history, &staging, FakeEngine::new(Some(2)));
    orch.run(now_after_three_weeks()).await.unwrap();

    // Staged files and descriptors are gone for failed weeks too
    assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unknown_symbol_aborts_before_the_loop() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();

    let orch = orchestrator(&history, &staging, FakeEngine::new(None));
    let err = orch.run(now_after_three_weeks()).await.unwrap_err();
    assert!(err.to_string().contains("EUR/USD"));
    assert!(orch.engine().seen().is_empty());
}

#[tokio::test]
async fn no_elapsed_weeks_means_empty_run() {
    let history = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    seed_history(history.path(), &[1]);

    let orch = orchestrator(&history, &staging, FakeEngine::new(None));
    // The first window ends exactly at `now`, so nothing runs
    let result = orch.run(start() + Duration::days(7)).await.unwrap();
    assert_eq!(result, RunResult::default());
}
