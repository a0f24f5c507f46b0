// サービス層 - 機能別の周辺ロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{DefaultRoutingConfig, RouterConfig, RuleSpec};
pub use monitoring::{ConsoleRouteReporter, NoOpRouteReporter};
