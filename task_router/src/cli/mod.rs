// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとルーティング処理の橋渡し

pub mod args;
pub mod commands;

// 公開API
pub use args::*;
pub use commands::*;

use crate::core::RouterError;

/// エラー表示用の重要度ラベル
///
/// `RouterError` 以外（引数の検証など）は `ERROR` とする。
pub fn severity_label(error: &anyhow::Error) -> &'static str {
    error
        .downcast_ref::<RouterError>()
        .map(|e| e.severity().as_str())
        .unwrap_or("ERROR")
}
