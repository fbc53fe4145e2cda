//! External engine invocation
//!
//! The backtesting engine is a black-box executable. It receives the job
//! descriptor path plus `/o` and `/so` flags for its output and statistics
//! files, always passed as an explicit argument vector, never through a
//! shell.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// What a finished engine process reported
#[derive(Debug, Clone, Copy)]
pub struct EngineReport {
    pub status: ExitStatus,
}

/// Failure to run the engine process to completion
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to spawn engine {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for engine: {0}")]
    Wait(#[source] io::Error),
    #[error("engine did not finish within {0:?} and was terminated")]
    TimedOut(Duration),
}

/// One backtest execution against a job descriptor
///
/// Implemented by the real console engine and by scripted fakes in tests.
#[async_trait]
pub trait BacktestEngine: Send + Sync {
    async fn run(
        &self,
        project: &Path,
        output: &Path,
        stats: &Path,
    ) -> Result<EngineReport, EngineError>;
}

/// The real console engine executable
#[derive(Debug, Clone)]
pub struct ConsoleEngine {
    executable: PathBuf,
    timeout: Duration,
}

impl ConsoleEngine {
    /// Engine at `executable`, forcibly terminated after `timeout`
    pub fn new(executable: PathBuf, timeout: Duration) -> Self {
        Self {
            executable,
            timeout,
        }
    }
}

#[async_trait]
impl BacktestEngine for ConsoleEngine {
    async fn run(
        &self,
        project: &Path,
        output: &Path,
        stats: &Path,
    ) -> Result<EngineReport, EngineError> {
        let mut child = tokio::process::Command::new(&self.executable)
            .arg(project)
            .arg("/o")
            .arg(output)
            .arg("/so")
            .arg(stats)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EngineError::Spawn {
                executable: self.executable.clone(),
                source: e,
            })?;

        debug!(
            engine = %self.executable.display(),
            project = %project.display(),
            "engine started"
        );

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(result) => result.map_err(EngineError::Wait)?,
            Err(_) => {
                // The process is hung; kill it rather than stalling the
                // whole run.
                let _ = child.kill().await;
                return Err(EngineError::TimedOut(self.timeout));
            }
        };

        if !status.success() {
            warn!(code = ?status.code(), "engine exited with failure status");
        }
        Ok(EngineReport { status })
    }
}
