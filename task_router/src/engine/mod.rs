// エンジン層 - ファンアウト・ファンインのルーティング
// ルール層とタスク層を組み合わせてストリームを処理する

pub mod branch;
pub mod demux; // TaskRouter内部でのみ使用
pub mod router;

// 公開API - 主要エンジンクラス
pub use router::{RoutedStream, TaskRouter};
