use std::time::Duration;

use tokio::{
    task::JoinSet,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

/// Name of a finished task and how it ended
pub type TaskOutcome = (&'static str, anyhow::Result<()>);

/// Runs named background tasks at fixed intervals until shut down
pub struct Scheduler {
    cancel_token: CancellationToken,
    tasks: JoinSet<TaskOutcome>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a background task, running it immediately and then every `interval_s` seconds.
    ///
    /// A task returning an error is not rescheduled.
    pub fn spawn_task<P, F, Fut>(
        &mut self,
        interval_s: u64,
        name: &'static str,
        params: P,
        mut task: F,
    ) where
        P: Clone + Send + Sync + 'static,
        F: FnMut(P) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let cancel = self.cancel_token.clone();
        let period = Duration::from_secs(interval_s.max(1));

        self.tasks.spawn(async move {
            let mut interval = time::interval(period);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if let Err(e) = task(params.clone()).await {
                            tracing::error!(error = %e, "Task {name} failed");
                            return (name, Err(e));
                        }
                    }
                }
            }

            (name, Ok(()))
        });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Cancels all tasks and waits up to `timeout_s` seconds for them to finish.
    ///
    /// Tasks still running at the timeout are aborted.
    pub async fn shutdown(mut self, timeout_s: u64) {
        self.cancel_token.cancel();

        let deadline = Instant::now() + Duration::from_secs(timeout_s);

        while !self.tasks.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::error!(
                    remaining = self.tasks.len(),
                    "Scheduler timed out when shutting down"
                );
                break;
            }

            match time::timeout(remaining, self.tasks.join_next()).await {
                Ok(Some(Ok((name, Ok(()))))) => {
                    tracing::info!("Task {name} finished successfully");
                }
                Ok(Some(Ok((name, Err(e))))) => {
                    tracing::error!(error = %e, "Task {name} error");
                }
                Ok(Some(Err(e))) => {
                    tracing::error!(error = %e, "Task join error");
                }
                Ok(None) => break,
                Err(_) => continue,
            }
        }

        self.tasks.abort_all();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            tasks: JoinSet::new(),
        }
    }
}
