// 進捗監視機能
// 振り分けの報告、エラー通知、完了通知

pub mod implementations;

// 公開API
pub use implementations::{ConsoleRouteReporter, NoOpRouteReporter};
