//! MaintenanceSteps port - 実際のメンテナンス処理の抽象化
//!
//! The concrete migration SQL, the service restart mechanics and the route
//! rebuild live behind this trait; the coordinator only sequences them and
//! observes success or failure.

use async_trait::async_trait;

use crate::domain::MaintenanceError;

/// The three collaborator operations of a maintenance run, invoked strictly
/// in order with short-circuit on the first error.
///
/// Each call may block (await) for as long as it needs; the coordinator runs
/// the whole sequence detached from the triggering caller.
#[async_trait]
pub trait MaintenanceSteps: Send + Sync {
    /// Apply the pending schema migration.
    async fn run_migration(&self) -> Result<(), MaintenanceError>;

    /// Restart the services that depend on the migrated schema.
    async fn restart_services(&self) -> Result<(), MaintenanceError>;

    /// Rebuild the route table against the restarted services.
    async fn recreate_routes(&self) -> Result<(), MaintenanceError>;
}
