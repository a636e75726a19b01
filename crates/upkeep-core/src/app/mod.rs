//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **MaintenanceCoordinator**: single-flight の入場判定と実行シーケンス
//! - **StatusSnapshot**: 外部から読む一貫したステータスビュー

pub mod coordinator;
pub mod status;

pub use self::coordinator::MaintenanceCoordinator;
pub use self::status::StatusSnapshot;
