//! Weekly backtest orchestration
//!
//! Drives one strategy/symbol pair across the whole history: one window is
//! fully staged, run and cleaned up before the next begins. A failed week
//! is logged and skipped past; only a missing symbol aborts the run.

use crate::calendar::{WeekStepper, WeekWindow};
use crate::engine::BacktestEngine;
use crate::project::{write_project, BacktestProject, InstrumentSpec, StrategyParameter};
use crate::storage::{StageOutcome, SymbolMetadata, WeekDataStager};
use crate::telemetry::{increment, RunCounter};
use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Per-run parameters that do not change between weeks
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub symbol: String,
    pub strategy: String,
    pub account_currency: String,
    pub initial_amount: f64,
    pub default_period: String,
    pub account_lot_size: i64,
    pub strategy_params: Vec<StrategyParameter>,
    /// First week start; the storage epoch unless overridden
    pub start: NaiveDateTime,
}

/// Final accounting of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Week windows visited
    pub total_weeks: u32,
    /// Week windows that ran without any error
    pub completed_weeks: u32,
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "completed {} of {} weeks",
            self.completed_weeks, self.total_weeks
        )
    }
}

/// Runs the weekly stage/invoke/cleanup loop
pub struct BacktestOrchestrator<E> {
    stager: WeekDataStager,
    engine: E,
    settings: RunSettings,
    run_id: String,
}

impl<E: BacktestEngine> BacktestOrchestrator<E> {
    pub fn new(stager: WeekDataStager, engine: E, settings: RunSettings, run_id: String) -> Self {
        Self {
            stager,
            engine,
            settings,
            run_id,
        }
    }

    /// The engine this orchestrator invokes
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run every week window whose end lies before `now`
    ///
    /// `now` is captured once by the caller and never re-sampled, so the
    /// set of windows is fixed when the loop starts. Symbol metadata is
    /// resolved once up front; a symbol the store does not know is fatal.
    pub async fn run(&self, now: NaiveDateTime) -> anyhow::Result<RunResult> {
        let metadata = self
            .stager
            .resolve_metadata(&self.settings.symbol)
            .with_context(|| format!("resolving metadata for {}", self.settings.symbol))?
            .ok_or_else(|| anyhow!("no metadata for symbol {}", self.settings.symbol))?;

        info!(
            symbol = %self.settings.symbol,
            strategy = %self.settings.strategy,
            run_id = %self.run_id,
            "starting weekly backtest run"
        );

        let mut stepper = WeekStepper::starting_at(self.settings.start);
        let mut result = RunResult::default();
        loop {
            let window = WeekWindow::starting(stepper.current());
            if window.end >= now {
                break;
            }
            result.total_weeks += 1;
            increment(RunCounter::WeeksTotal);

            match self.run_week(&metadata, window).await {
                Ok(()) => {
                    result.completed_weeks += 1;
                    increment(RunCounter::WeeksCompleted);
                }
                Err(e) => {
                    increment(RunCounter::WeeksFailed);
                    warn!(
                        source = %self.stager.source_path(&self.settings.symbol, window).display(),
                        error = %format!("{e:#}"),
                        "week failed, continuing with next window"
                    );
                }
            }
            stepper.advance();
        }

        info!(
            total = result.total_weeks,
            completed = result.completed_weeks,
            "weekly backtest run finished"
        );
        Ok(result)
    }

    /// Stage, describe, invoke and clean up one window
    async fn run_week(&self, metadata: &SymbolMetadata, window: WeekWindow) -> anyhow::Result<()> {
        // Staging that produces nothing is a documented fallback, not a
        // failed week: the engine is still invoked without a rates file.
        let staged = match self
            .stager
            .stage_week(&self.settings.symbol, window, metadata.pip_size)
        {
            Ok(StageOutcome::Staged(path)) => Some(path),
            Ok(StageOutcome::NotFound) => {
                info!(
                    source = %self.stager.source_path(&self.settings.symbol, window).display(),
                    "no source data for week, running without staged rates"
                );
                None
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "staging failed, running without staged rates"
                );
                None
            }
        };

        let tag = format!("{}-{}-{}", window.year(), window.week(), self.run_id);
        let staging_dir = self.stager.staging_dir();
        let project_path = staging_dir.join(format!("project-{tag}.xml"));
        let output_path = staging_dir.join(format!("result-{tag}.xml"));
        let stats_path = staging_dir.join(format!("stats-{tag}.xml"));

        let outcome = self
            .describe_and_invoke(metadata, window, staged.clone(), &project_path, &output_path, &stats_path)
            .await;

        // Best-effort cleanup happens whatever the invocation did
        let mut artifacts = vec![project_path, output_path, stats_path];
        artifacts.extend(staged);
        cleanup(&artifacts);

        outcome
    }

    async fn describe_and_invoke(
        &self,
        metadata: &SymbolMetadata,
        window: WeekWindow,
        staged: Option<PathBuf>,
        project_path: &Path,
        output_path: &Path,
        stats_path: &Path,
    ) -> anyhow::Result<()> {
        let project = self.build_project(metadata, window, staged);
        write_project(&project, project_path)
            .with_context(|| format!("writing job descriptor {}", project_path.display()))?;

        let report = self
            .engine
            .run(project_path, output_path, stats_path)
            .await?;
        if !report.status.success() {
            // Exit status does not decide week success, but it is worth
            // counting separately from clean exits.
            increment(RunCounter::EngineNonzeroExits);
        }
        Ok(())
    }

    fn build_project(
        &self,
        metadata: &SymbolMetadata,
        window: WeekWindow,
        staged: Option<PathBuf>,
    ) -> BacktestProject {
        BacktestProject {
            strategy: self.settings.strategy.clone(),
            window,
            account_currency: self.settings.account_currency.clone(),
            initial_amount: self.settings.initial_amount,
            default_period: self.settings.default_period.clone(),
            account_lot_size: self.settings.account_lot_size,
            instruments: vec![InstrumentSpec {
                metadata: metadata.clone(),
                prices_file: staged,
            }],
            strategy_params: self.settings.strategy_params.clone(),
        }
    }
}

/// Delete per-week artifacts; a failed delete is logged, never escalated
fn cleanup(paths: &[PathBuf]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "failed to delete artifact"),
        }
    }
}
