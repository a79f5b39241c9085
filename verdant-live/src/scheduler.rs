// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Single-task scheduler for a mounted live view.
//!
//! One tokio task per view walks the [`Timetable`]: it sleeps until the
//! earliest due task, runs it under the state write lock, reschedules
//! it, and repeats until the view is unmounted.

use crate::error::Result;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};
use verdant::{LiveSnapshot, LiveState, TaskSchedule, Timetable};

/// A live view whose timers run exactly while it is mounted.
#[derive(Debug)]
pub struct LiveView {
    state: Arc<RwLock<LiveState>>,
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl LiveView {
    /// Start the scheduler for `state`. Must be called within a tokio runtime.
    pub fn mount(state: LiveState) -> Self {
        let schedule = state.config().schedule.clone();
        let state = Arc::new(RwLock::new(state));
        let (tx, rx) = watch::channel(false);
        let start = Instant::now();

        let handle = tokio::spawn(run(Arc::clone(&state), schedule, start, rx));
        info!("live view mounted");

        Self {
            state,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Shared handle to the view state.
    pub fn state(&self) -> Arc<RwLock<LiveState>> {
        Arc::clone(&self.state)
    }

    pub async fn snapshot(&self) -> LiveSnapshot {
        self.state.read().await.snapshot()
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the scheduler and wait for it to exit.
    pub async fn unmount(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            // The task may already be gone; nothing to signal then
            let _ = tx.send(true);
        }
        if let Some(handle) = self.handle.take() {
            handle.await?;
        }
        info!("live view unmounted");
        Ok(())
    }
}

impl Drop for LiveView {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("live view dropped while mounted, scheduler aborted");
        }
    }
}

async fn run(
    state: Arc<RwLock<LiveState>>,
    schedule: TaskSchedule,
    start: Instant,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut table = Timetable::new(&schedule);

    while let Some((task, due)) = table.next_due() {
        tokio::select! {
            _ = sleep_until(start + due) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        let changed = state.write().await.apply(task);
        debug!(task = task.as_str(), changed, offset_ms = due.as_millis() as u64, "task ran");
        table.advance(task);
    }

    info!("live view scheduler stopped");
}
