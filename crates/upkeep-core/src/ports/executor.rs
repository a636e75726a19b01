//! Executor port - 切り離し実行の抽象化
//!
//! The coordinator hands the run sequence to an Executor so the caller that
//! triggered it returns immediately. Each submission runs exactly once
//! (barring process shutdown) and is never silently dropped.

use futures::future::BoxFuture;

/// Executor schedules a unit of work on a thread of control distinct from
/// the caller of `submit`, without waiting for it to finish.
///
/// No ordering is guaranteed between unrelated submissions.
pub trait Executor: Send + Sync {
    fn submit(&self, work: BoxFuture<'static, ()>);
}

/// TokioExecutor runs each submission as a detached tokio task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioExecutor;

impl Executor for TokioExecutor {
    fn submit(&self, work: BoxFuture<'static, ()>) {
        tokio::spawn(work);
    }
}
