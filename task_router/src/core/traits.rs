// タスクルーターのトレイト定義
// 外部から注入される抽象化インターフェースを定義

use super::types::{RouteSummary, SourceFile};
use async_trait::async_trait;
use futures::stream::BoxStream;
use mockall::automock;

/// タスクへ渡す入力ストリーム
pub type SourceStream = BoxStream<'static, SourceFile>;

/// タスクから返る出力ストリーム
pub type TaskStream = BoxStream<'static, anyhow::Result<SourceFile>>;

/// 外部から供給される変換タスク
///
/// 1回の実行につきタスク1つあたり最大1回だけ呼ばれ、そのタスクへ振り分けられた
/// 全ファイルをストリームとして受け取る。受け取ったファイルを書き換えて返すこと。
/// パスは変更できない（拡張子はルーターが変換後に書き換える）。
#[automock]
pub trait TaskTransform: Send + Sync {
    fn transform(&self, input: SourceStream) -> TaskStream;
}

/// ルーティング設定を抽象化するトレイト
#[automock]
pub trait RoutingConfig: Send + Sync {
    /// 各ブランチのチャンネルバッファサイズを取得
    fn channel_buffer_size(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait RouteReporter: Send + Sync {
    /// ルーティング開始時の報告
    async fn report_started(&self);

    /// パススルーとなったファイルの報告
    async fn report_passed_through(&self, path: &str);

    /// タスクへ送ったファイルの報告
    async fn report_dispatched(&self, path: &str, task: &str);

    /// タスクの初回起動の報告
    async fn report_task_started(&self, task: &str);

    /// エラー発生時の報告
    async fn report_error(&self, error: &str);

    /// 全ブランチ完了時の報告
    async fn report_completed(&self, summary: &RouteSummary);
}
