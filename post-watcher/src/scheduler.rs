use crate::pipeline::{CycleReport, Watcher};
use crate::types::{Result, ScheduleConfig, WatchRest};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Fetching,
    Idle,
}

/// Drives the watcher forever: fetch, then rest.
pub struct Scheduler {
    config: ScheduleConfig,
    state: WatchState,
}

impl Scheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            state: WatchState::Idle,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// How long to stay idle after a cycle. Failed cycles add the error pause
    /// so a broken upstream is not hammered.
    pub fn rest_after(&self, outcome: &Result<CycleReport>) -> WatchRest {
        let mut rest = self.config.interval;
        if outcome.is_err() {
            rest += self.config.error_pause;
        }
        WatchRest {
            wait_at_least_ms: rest.as_millis() as u64,
        }
    }

    /// Run a single cycle, logging a failure instead of returning it.
    pub async fn tick(&mut self, watcher: &mut Watcher) -> WatchRest {
        self.state = WatchState::Fetching;
        let outcome = watcher.run_cycle().await;
        if let Err(e) = &outcome {
            error!("Error in watch cycle: {}", e);
        }
        self.state = WatchState::Idle;
        self.rest_after(&outcome)
    }

    /// Loop until the process is asked to stop.
    pub async fn run(&mut self, watcher: &mut Watcher) {
        self.run_until(watcher, shutdown_signal()).await;
    }

    /// Loop until `shutdown` resolves. The same future is polled for the whole
    /// run, so a request that lands while a cycle is in flight stops the loop
    /// once that cycle has finished.
    pub async fn run_until<F>(&mut self, watcher: &mut Watcher, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Watcher started, polling every {}s",
            self.config.interval.as_secs()
        );
        tokio::pin!(shutdown);

        loop {
            let rest = self.tick(watcher).await;
            debug!("Idle for {}ms", rest.wait_at_least_ms);

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(rest.wait_at_least_ms)) => {}
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping watcher");
                    return;
                }
            }
        }
    }
}

/// Ctrl-C, or SIGTERM where the platform has it. The handlers are installed
/// when this is called, not when the future is first polled.
pub fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let sigterm = {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(sigterm) => Some(sigterm),
            Err(e) => {
                warn!("Could not register SIGTERM handler: {}", e);
                None
            }
        }
    };

    async move {
        #[cfg(unix)]
        if let Some(mut sigterm) = sigterm {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = tokio::signal::ctrl_c() => {}
            }
            return;
        }
        let _ = tokio::signal::ctrl_c().await;
    }
}
