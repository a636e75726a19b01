use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::time::{Duration, sleep};

use upkeep_core::app::MaintenanceCoordinator;
use upkeep_core::domain::MaintenanceError;
use upkeep_core::ports::MaintenanceSteps;

/// Demo steps: pretend to migrate, restart and rebuild routes, failing the
/// migration `n` times before letting it succeed.
struct DemoSteps {
    remaining_failures: AtomicU32,
}

impl DemoSteps {
    fn new(n: u32) -> Self {
        Self {
            remaining_failures: AtomicU32::new(n),
        }
    }
}

#[async_trait]
impl MaintenanceSteps for DemoSteps {
    async fn run_migration(&self) -> Result<(), MaintenanceError> {
        sleep(Duration::from_millis(500)).await;
        let left = self.remaining_failures.load(Ordering::Relaxed);
        if left > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(MaintenanceError::Migration(format!(
                "intentional failure (left={left})"
            )));
        }
        Ok(())
    }

    async fn restart_services(&self) -> Result<(), MaintenanceError> {
        sleep(Duration::from_millis(200)).await;
        Ok(())
    }

    async fn recreate_routes(&self) -> Result<(), MaintenanceError> {
        sleep(Duration::from_millis(100)).await;
        Ok(())
    }
}

async fn wait_for_terminal(coord: &MaintenanceCoordinator) {
    while !coord.phase().is_terminal() {
        sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    // (A) Coordinator と demo steps を用意（1回目の migration は失敗する）
    let coord = Arc::new(MaintenanceCoordinator::with_tokio(Arc::new(
        DemoSteps::new(1),
    )));

    // (B) 別タスクからステータスを polling（web 層の代わり）
    let poller = {
        let coord = Arc::clone(&coord);
        tokio::spawn(async move {
            loop {
                let snapshot = coord.status();
                let json = serde_json::to_string(&snapshot)
                    .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
                println!("status: {json}");
                sleep(Duration::from_millis(300)).await;
            }
        })
    };

    // (C) トリガー（余分な request は single-flight で no-op になる）
    coord.request_start();
    coord.request_start();
    coord.request_start();
    wait_for_terminal(&coord).await;
    log::info!("first run finished: {:?}", coord.phase());

    // (D) 失敗したら明示的にもう一度トリガー（自動リトライはしない）
    // The gate is released just after the status turns FAILED, so keep
    // requesting until the new run is actually admitted.
    if coord.last_error().is_some() {
        while coord.phase() == upkeep_core::domain::MigrationPhase::Failed {
            coord.request_start();
            sleep(Duration::from_millis(20)).await;
        }
        wait_for_terminal(&coord).await;
        log::info!("second run finished: {:?}", coord.phase());
    }

    poller.abort();
    let snapshot = coord.status();
    println!(
        "final: {}",
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
    );
}
