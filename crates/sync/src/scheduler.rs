//! Interval scheduler for sync passes.

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use {
    tokio::{
        sync::{Mutex, Notify, RwLock},
        task::JoinHandle,
        time::MissedTickBehavior,
    },
    tracing::{debug, info},
};

use crate::{report::PassSummary, service::SyncService};

/// Callback that runs one pass. Indirection keeps the scheduler testable
/// with a counting stub instead of a full service.
pub type PassFn =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = PassSummary> + Send>> + Send + Sync>;

/// Owns the ticking loop that drives recurring sync passes.
///
/// Ticks fire on a fixed wall-clock interval measured from [`start`], not
/// from the end of the previous pass; each pass runs on its own task, so a
/// slow pass overlaps the next tick instead of delaying it. There is
/// deliberately no mutual exclusion between passes — [`trigger`] may run
/// concurrently with the timer — because the store's atomic upsert makes
/// overlapping passes redundant work, never corruption.
///
/// [`start`]: SyncScheduler::start
/// [`trigger`]: SyncScheduler::trigger
pub struct SyncScheduler {
    run_pass: PassFn,
    interval: Duration,
    run_on_start: bool,
    timer_handle: Mutex<Option<JoinHandle<()>>>,
    /// Shutdown signal for the active run. Replaced on every [`start`] so a
    /// permit left by a previous [`stop`] cannot cancel the new loop.
    ///
    /// [`start`]: SyncScheduler::start
    /// [`stop`]: SyncScheduler::stop
    shutdown: Mutex<Arc<Notify>>,
    running: RwLock<bool>,
}

impl SyncScheduler {
    /// Scheduler driving the given service.
    pub fn new(service: Arc<SyncService>, interval: Duration, run_on_start: bool) -> Arc<Self> {
        let run_pass: PassFn = Arc::new(move || {
            let service = Arc::clone(&service);
            Box::pin(async move { service.run_pass().await })
        });
        Self::with_pass_fn(run_pass, interval, run_on_start)
    }

    /// Scheduler driving an arbitrary pass callback (tests).
    pub fn with_pass_fn(run_pass: PassFn, interval: Duration, run_on_start: bool) -> Arc<Self> {
        Arc::new(Self {
            run_pass,
            interval,
            run_on_start,
            timer_handle: Mutex::new(None),
            shutdown: Mutex::new(Arc::new(Notify::new())),
            running: RwLock::new(false),
        })
    }

    /// Start the ticking loop. Fires a cold-start pass first when
    /// configured. Idempotent: a second call while running does nothing.
    pub async fn start(self: &Arc<Self>) {
        let mut running = self.running.write().await;
        if *running {
            debug!("scheduler already running");
            return;
        }
        *running = true;
        drop(running);

        info!(interval_secs = self.interval.as_secs(), "sync scheduler started");

        // Fresh signal per run: if stop() aborted the previous loop before
        // its notified() fired, the old Notify still holds a permit that
        // would kill this run's first select.
        let shutdown = Arc::new(Notify::new());
        *self.shutdown.lock().await = Arc::clone(&shutdown);

        let scheduler = Arc::clone(self);
        let handle = tokio::spawn(async move {
            scheduler.timer_loop(shutdown).await;
        });
        *self.timer_handle.lock().await = Some(handle);
    }

    /// Halt the ticking loop. Passes already in flight are not interrupted.
    pub async fn stop(&self) {
        *self.running.write().await = false;
        self.shutdown.lock().await.notify_one();

        let mut handle = self.timer_handle.lock().await;
        if let Some(h) = handle.take() {
            h.abort();
        }
        info!("sync scheduler stopped");
    }

    /// Run a pass immediately on the caller's task, concurrent with any
    /// timer-driven pass. Works whether or not the scheduler is started.
    pub async fn trigger(&self) -> PassSummary {
        info!("manual sync pass triggered");
        (self.run_pass)().await
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    async fn timer_loop(self: &Arc<Self>, shutdown: Arc<Notify>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the loop
        // below only sees real interval boundaries.
        ticker.tick().await;

        if self.run_on_start {
            self.spawn_pass("cold-start");
        }

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !*self.running.read().await {
                        break;
                    }
                    self.spawn_pass("interval");
                },
                () = shutdown.notified() => {
                    debug!("timer loop shutting down");
                    break;
                },
            }
        }
    }

    fn spawn_pass(&self, trigger: &'static str) {
        let run_pass = Arc::clone(&self.run_pass);
        tokio::spawn(async move {
            let summary = run_pass().await;
            info!(
                trigger,
                merged = summary.merged_total(),
                skipped_channels = summary.skipped_channels(),
                "scheduled sync pass finished"
            );
        });
    }
}
