//! Self-rescheduling periodic driver.
//!
//! Each scheduler owns exactly one background loop for one task. A tick runs
//! the task to completion before the next timer is honored: a task slower
//! than the interval pushes the next tick out by its overrun, so spacing
//! accumulates drift instead of catching up or overlapping.

use async_trait::async_trait;
use feed_core::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// A unit of periodic work.
#[async_trait]
pub trait TickTask: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// One tick. Non-fatal errors are logged and the next tick retries from
    /// scratch; a fatal error terminates the scheduler.
    async fn tick(&self) -> Result<()>;
}

struct Running {
    shutdown: watch::Sender<bool>,
    done: watch::Receiver<bool>,
    handle: JoinHandle<()>,
}

/// Owned periodic scheduler with explicit start/stop.
///
/// At most one armed timer exists at any instant: `start` while the loop is
/// alive is a no-op. `stop` cancels the armed timer only; a tick already
/// executing runs to completion. Dropping the scheduler also stops it.
pub struct RepeatingScheduler {
    interval: Duration,
    running: Mutex<Option<Running>>,
}

impl RepeatingScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Mutex::new(None),
        }
    }

    /// Begins invoking `task` every interval. The first tick fires one full
    /// interval after this call.
    pub fn start(&self, task: Arc<dyn TickTask>) {
        let mut slot = self.running.lock();
        if let Some(running) = slot.as_ref() {
            if !running.handle.is_finished() {
                debug!(task = task.name(), "Scheduler already armed, start is a no-op");
                return;
            }
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (done_tx, done_rx) = watch::channel(false);
        let handle = tokio::spawn(tick_loop(self.interval, task, shutdown_rx, done_tx));
        *slot = Some(Running {
            shutdown: shutdown_tx,
            done: done_rx,
            handle,
        });
    }

    /// Halts future invocations. Returns the loop handle so callers can wait
    /// for an in-flight tick to finish.
    pub fn stop(&self) -> Option<JoinHandle<()>> {
        let mut slot = self.running.lock();
        slot.take().map(|running| {
            let _ = running.shutdown.send(true);
            running.handle
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .as_ref()
            .map_or(false, |running| !running.handle.is_finished())
    }

    /// Completes when the loop has exited, whether stopped or terminated by
    /// a fatal tick error. Returns immediately if the scheduler never ran.
    pub async fn terminated(&self) {
        let done = self.running.lock().as_ref().map(|r| r.done.clone());
        if let Some(mut done) = done {
            while !*done.borrow() {
                if done.changed().await.is_err() {
                    break;
                }
            }
        }
    }
}

impl Drop for RepeatingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn tick_loop(
    period: Duration,
    task: Arc<dyn TickTask>,
    mut shutdown: watch::Receiver<bool>,
    done: watch::Sender<bool>,
) {
    info!(
        task = task.name(),
        period_ms = %period.as_millis(),
        "Scheduler started"
    );

    loop {
        // The next timer is armed only after the previous tick has fully
        // completed: a slow task pushes every later tick out by its overrun.
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = sleep(period) => {}
        }

        if let Err(e) = task.tick().await {
            if e.is_fatal() {
                error!(task = task.name(), error = %e, "Fatal tick error, scheduler terminating");
                break;
            }
            warn!(task = task.name(), error = %e, "Tick failed, next tick will retry");
        }

        if *shutdown.borrow() {
            break;
        }
    }

    let _ = done.send(true);
    info!(task = task.name(), "Scheduler stopped");
}
