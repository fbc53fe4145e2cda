//! Run command implementation

use crate::calendar::WeekStepper;
use crate::config::Config;
use crate::engine::ConsoleEngine;
use crate::orchestrator::{BacktestOrchestrator, RunSettings};
use crate::project::StrategyParameter;
use crate::storage::WeekDataStager;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Root of the rate-history storage (one directory per symbol)
    #[arg(long)]
    pub history: PathBuf,

    /// Path to the backtesting engine executable
    #[arg(long)]
    pub engine: PathBuf,

    /// Symbol to replay, e.g. EUR/USD
    #[arg(long)]
    pub symbol: String,

    /// Strategy identifier handed to the engine
    #[arg(long)]
    pub strategy: String,

    /// Directory containing the strategy sources
    #[arg(long)]
    pub sources: PathBuf,

    /// Extra strategy parameter as id=value; repeatable
    #[arg(long = "param", value_name = "ID=VALUE")]
    pub params: Vec<String>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let run_id = Uuid::new_v4().simple().to_string();
        let staging_dir = config.staging.resolve();

        let stager = WeekDataStager::new(self.history.clone(), staging_dir, run_id.clone());
        let engine = ConsoleEngine::new(
            self.engine.clone(),
            Duration::from_secs(config.engine.timeout_secs),
        );

        let settings = RunSettings {
            symbol: self.symbol.clone(),
            strategy: self.strategy_value(),
            account_currency: config.account.currency.clone(),
            initial_amount: config.account.initial_amount,
            default_period: config.account.default_period.clone(),
            account_lot_size: config.account.lot_size,
            strategy_params: self.strategy_params(config)?,
            start: WeekStepper::new().current(),
        };

        let orchestrator = BacktestOrchestrator::new(stager, engine, settings, run_id);
        let now = chrono::Utc::now().naive_utc();
        let result = orchestrator.run(now).await?;

        println!("{result}");
        Ok(())
    }

    /// The engine loads the strategy from the sources directory
    fn strategy_value(&self) -> String {
        self.sources.join(&self.strategy).display().to_string()
    }

    /// Config-file parameters first, `--param` overrides on top
    fn strategy_params(&self, config: &Config) -> anyhow::Result<Vec<StrategyParameter>> {
        let mut merged = config.strategy.params.clone();
        for raw in &self.params {
            let (id, value) = raw
                .split_once('=')
                .with_context(|| format!("--param {raw:?} is not of the form id=value"))?;
            merged.insert(id.to_string(), value.to_string());
        }
        Ok(merged
            .into_iter()
            .map(|(id, value)| StrategyParameter { id, value })
            .collect())
    }
}
