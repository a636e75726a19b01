//! Status view for observability.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::MigrationPhase;

/// A consistent snapshot of the coordinator's status, taken under a single
/// read lock so phase and error can never come from different runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusSnapshot {
    pub phase: MigrationPhase,

    /// Start time of the most recent run, kept after completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// Error of the most recent failed run; `None` unless phase is FAILED.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
