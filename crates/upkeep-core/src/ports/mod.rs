//! Ports - 抽象化レイヤー
//!
//! 各 trait は外部システム（時刻、実行スレッド、実際のメンテナンス処理）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod clock;
pub mod executor;
pub mod steps;

pub use self::clock::{Clock, SystemClock, FixedClock};
pub use self::executor::{Executor, TokioExecutor};
pub use self::steps::MaintenanceSteps;
