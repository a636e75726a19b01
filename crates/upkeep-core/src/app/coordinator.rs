//! Single-flight coordinator for the maintenance run.
//!
//! Handles concurrency to make sure only one maintenance run (db migration,
//! then service restart, then route recreation) executes at a time, while any
//! number of callers may trigger it and poll its status concurrently.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use futures::FutureExt;

use crate::domain::{MaintenanceError, MigrationPhase};
use crate::ports::{Clock, Executor, MaintenanceSteps, SystemClock, TokioExecutor};

use super::status::StatusSnapshot;

/// The observable state of the coordinator.
///
/// Kept together under one lock so readers always see phase, start time and
/// error from the same run. Mutated only by the thread executing the active
/// run; readers never mutate it.
#[derive(Debug, Default)]
struct StatusRecord {
    phase: MigrationPhase,
    started_at: Option<DateTime<Utc>>,
    last_error: Option<MaintenanceError>,
}

/// MaintenanceCoordinator は single-flight の入場判定と実行シーケンスを担当
///
/// `request_start` is fire-and-forget: it either admits exactly one new run
/// and returns immediately, or returns as a no-op because a run is already
/// in flight (or another caller is mid-admission). Failures are discoverable
/// only through [`Self::phase`] / [`Self::last_error`] polling.
pub struct MaintenanceCoordinator {
    steps: Arc<dyn MaintenanceSteps>,
    executor: Arc<dyn Executor>,
    clock: Arc<dyn Clock>,

    /// Admission gate: engaged by the caller that wins admission, disengaged
    /// by the run itself after its status has been finalized.
    running: Arc<AtomicBool>,

    /// Guards the admission decision from concurrent `request_start` calls.
    /// Always acquired with `try_lock`; a caller never waits here.
    admission: Mutex<()>,

    status: Arc<RwLock<StatusRecord>>,
}

impl MaintenanceCoordinator {
    pub fn new(
        steps: Arc<dyn MaintenanceSteps>,
        executor: Arc<dyn Executor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            steps,
            executor,
            clock,
            running: Arc::new(AtomicBool::new(false)),
            admission: Mutex::new(()),
            status: Arc::new(RwLock::new(StatusRecord::default())),
        }
    }

    /// Production wiring: detached tokio tasks and the system clock.
    pub fn with_tokio(steps: Arc<dyn MaintenanceSteps>) -> Self {
        Self::new(steps, Arc::new(TokioExecutor), Arc::new(SystemClock))
    }

    /// Request a new maintenance run.
    ///
    /// Admits at most one run across any number of concurrent callers and
    /// never blocks: callers that lose the race (or arrive while a run is in
    /// flight) return immediately with the status unchanged.
    pub fn request_start(&self) {
        // Fast path: a run is already admitted or executing.
        if self.running.load(Ordering::Acquire) {
            log::trace!("maintenance run already in flight, ignoring start request");
            return;
        }

        // Never wait for another caller's admission to finish.
        let Ok(_guard) = self.admission.try_lock() else {
            log::trace!("another caller is admitting a maintenance run, ignoring start request");
            return;
        };

        // Re-check under the lock: the fast path and the try_lock are not
        // atomic together, so another caller may have won in between.
        if self.running.load(Ordering::Acquire) {
            return;
        }
        self.running.store(true, Ordering::Release);

        let steps = Arc::clone(&self.steps);
        let clock = Arc::clone(&self.clock);
        let status = Arc::clone(&self.status);
        let running = Arc::clone(&self.running);
        self.executor.submit(Box::pin(async move {
            run_sequence(steps, clock, status, running).await;
        }));
    }

    /// Current phase. Never blocks on an in-flight run.
    pub fn phase(&self) -> MigrationPhase {
        self.status.read().expect("status lock poisoned").phase
    }

    /// Start time of the most recent run, or `None` if no run ever started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.status.read().expect("status lock poisoned").started_at
    }

    /// Error of the most recent failed run, or `None` if the last run
    /// succeeded or none has completed. Cleared only when a new run starts.
    pub fn last_error(&self) -> Option<MaintenanceError> {
        self.status
            .read()
            .expect("status lock poisoned")
            .last_error
            .clone()
    }

    /// A consistent snapshot of phase, start time and error.
    pub fn status(&self) -> StatusSnapshot {
        let record = self.status.read().expect("status lock poisoned");
        StatusSnapshot {
            phase: record.phase,
            started_at: record.started_at,
            last_error: record.last_error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// The detached run sequence.
///
/// Status transitions happen-before the steps they bracket, and the gate is
/// disengaged strictly last, so no observer can see the gate free while the
/// status still belongs to a previous run.
async fn run_sequence(
    steps: Arc<dyn MaintenanceSteps>,
    clock: Arc<dyn Clock>,
    status: Arc<RwLock<StatusRecord>>,
    running: Arc<AtomicBool>,
) {
    let started_at = clock.now();
    {
        let mut record = status.write().expect("status lock poisoned");
        record.phase = MigrationPhase::Running;
        record.started_at = Some(started_at);
        record.last_error = None;
    }
    log::info!("starting maintenance run at {started_at}");

    // A panicking step must not escape to the executor; it ends the run via
    // the failed branch like any step error.
    let result = AssertUnwindSafe(run_steps(steps.as_ref()))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(MaintenanceError::Unexpected(panic_message(panic.as_ref()))));

    {
        let mut record = status.write().expect("status lock poisoned");
        match result {
            Ok(()) => {
                record.phase = MigrationPhase::Succeeded;
                log::info!("maintenance run started at {started_at} succeeded");
            }
            Err(err) => {
                log::error!("maintenance run started at {started_at} failed: {err}");
                record.phase = MigrationPhase::Failed;
                record.last_error = Some(err);
            }
        }
    }

    // ゲート解除は必ず最後（status 確定後）
    running.store(false, Ordering::Release);
}

async fn run_steps(steps: &dyn MaintenanceSteps) -> Result<(), MaintenanceError> {
    log::info!("running db migration");
    steps.run_migration().await?;
    log::info!("db migration finished, restarting services");
    steps.restart_services().await?;
    log::info!("services restarted, recreating routes");
    steps.recreate_routes().await?;
    log::info!("routes recreated");
    Ok(())
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
