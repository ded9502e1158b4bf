//! Background execution of one generation.
//!
//! The orchestrator runs on its own Tokio task. While it is outstanding the
//! task republishes the elapsed time once per second on a `watch` channel,
//! then publishes the final outcome. There is no cancellation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::orchestrator::{GenerationOutcome, GenerationRequest, SummaryOrchestrator};

/// Cadence of elapsed-time updates.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Observable state of a background generation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationStatus {
    Running { elapsed_secs: u64 },
    Completed(GenerationOutcome),
    Failed { kind: &'static str, message: String },
}

impl GenerationStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GenerationStatus::Running { .. })
    }
}

/// Handle on a generation running in the background.
pub struct GenerationHandle {
    status: watch::Receiver<GenerationStatus>,
    task: JoinHandle<()>,
}

impl GenerationHandle {
    /// Start `request` on a new task and return immediately.
    pub fn spawn(orchestrator: Arc<SummaryOrchestrator>, request: GenerationRequest) -> Self {
        let (tx, rx) = watch::channel(GenerationStatus::Running { elapsed_secs: 0 });

        let task = tokio::spawn(async move {
            let started = Instant::now();
            let run = orchestrator.run(request);
            tokio::pin!(run);

            let mut ticker = tokio::time::interval(TICK_INTERVAL);
            // The first tick completes immediately.
            ticker.tick().await;

            let result = loop {
                tokio::select! {
                    result = &mut run => break result,
                    _ = ticker.tick() => {
                        tx.send_replace(GenerationStatus::Running {
                            elapsed_secs: started.elapsed().as_secs(),
                        });
                    }
                }
            };

            let status = match result {
                Ok(outcome) => GenerationStatus::Completed(outcome),
                Err(e) => GenerationStatus::Failed {
                    kind: e.code(),
                    message: e.to_string(),
                },
            };
            tx.send_replace(status);
        });

        Self { status: rx, task }
    }

    /// Latest published status.
    ///
    /// A task that died without publishing a result reports `Failed`.
    pub fn status(&self) -> GenerationStatus {
        let current = self.status.borrow().clone();
        if current.is_running() && self.task.is_finished() {
            return GenerationStatus::Failed {
                kind: "INTERNAL_ERROR",
                message: "Generation task stopped unexpectedly".to_string(),
            };
        }
        current
    }

    pub fn is_finished(&self) -> bool {
        !self.status().is_running()
    }

    /// A receiver that observes every subsequent status change.
    pub fn subscribe(&self) -> watch::Receiver<GenerationStatus> {
        self.status.clone()
    }

    /// Wait for the final status.
    pub async fn wait(mut self) -> GenerationStatus {
        loop {
            if !self.status.borrow_and_update().is_running() {
                break;
            }
            if self.status.changed().await.is_err() {
                break;
            }
        }
        self.status()
    }
}
