// 設定管理機能
// ルーティング設定と設定ファイルの読み込み

pub mod file;
pub mod implementations;

// 公開API
pub use file::{RouterConfig, RuleSpec};
pub use implementations::DefaultRoutingConfig;
