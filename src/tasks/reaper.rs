//! Cache Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheShared;

// == Reaper Handle ==
/// Owner of a running reaper task.
///
/// Dropping the handle drops the stop sender, which also ends the loop.
#[derive(Debug)]
pub struct ReaperHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            // Receiver already gone means the task has exited
            let _ = stop.send(());
        }
        if let Err(err) = (&mut self.task).await {
            warn!("Reaper task ended abnormally: {}", err);
        }
    }

    /// Returns true once the reaper loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns the reaper for `cache` on the current tokio runtime.
///
/// The task sleeps for the cache interval, then takes the write lock and
/// drops every entry older than that interval. It loops until the stop
/// signal fires or the sender is dropped.
pub(crate) fn spawn_reaper(cache: Arc<CacheShared>) -> ReaperHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let interval = cache.interval();

    let task = tokio::spawn(async move {
        debug!("Starting cache reaper with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = cache.reap_expired().await;

            if removed > 0 {
                info!("Cache reaper: removed {} expired entries", removed);
            } else {
                debug!("Cache reaper: no expired entries found");
            }
        }

        debug!("Cache reaper stopped");
    });

    ReaperHandle {
        stop: Some(stop_tx),
        task,
    }
}
