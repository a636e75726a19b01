use thiserror::Error;

/// MaintenanceError is what a maintenance run can fail with.
///
/// The first error raised by a step ends the run; later steps are never
/// attempted. `Clone` so the coordinator can both store the error in its
/// status record and hand copies out to pollers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MaintenanceError {
    #[error("db migration failed: {0}")]
    Migration(String),

    #[error("service restart failed: {0}")]
    Restart(String),

    #[error("route recreation failed: {0}")]
    Routes(String),

    /// A step aborted with something other than a normal error (panic).
    #[error("maintenance run aborted unexpectedly: {0}")]
    Unexpected(String),
}
