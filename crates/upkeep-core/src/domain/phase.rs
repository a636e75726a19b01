//! Phase - メンテナンス実行の状態
//!
//! # 状態遷移
//! - none: まだ一度も実行されていない（初期値、再突入しない）
//! - running: 実行中
//! - succeeded: 成功
//! - failed: 失敗
//!
//! Terminal phases (succeeded/failed) only move again when a fresh run is
//! admitted; there is no cancelled phase and no way to abort a running run.

use serde::Serialize;

/// MigrationPhase は現在のメンテナンス実行の状態を表現
///
/// We intentionally serialize as SCREAMING_SNAKE_CASE so status views read
/// NONE / RUNNING / SUCCEEDED / FAILED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationPhase {
    /// No run has ever started.
    #[default]
    None,
    /// A run is currently executing.
    Running,
    /// The most recent run completed all steps.
    Succeeded,
    /// The most recent run stopped on its first error.
    Failed,
}

impl MigrationPhase {
    /// Returns true if the phase is terminal (succeeded or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns true if a run is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}
