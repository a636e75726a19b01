//! Domain model (phases, errors).

pub mod phase;
pub mod errors;

pub use self::phase::MigrationPhase;
pub use self::errors::MaintenanceError;
