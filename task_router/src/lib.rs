pub mod cli;
pub mod core;
pub mod engine;
pub mod rules;
pub mod services;
pub mod storage;
pub mod tasks;

pub use crate::core::{
    RouteDecision, RouteReport, RouteReporter, RouteSummary, RouterError, RouterResult,
    RoutingConfig, SourceFile, SourceStream, TaskStream, TaskTransform,
};
pub use engine::{RoutedStream, TaskRouter};
pub use rules::{ExcludePattern, Rule, RuleTable};
pub use services::{ConsoleRouteReporter, DefaultRoutingConfig, NoOpRouteReporter, RouterConfig};
pub use tasks::{CommandSpec, CommandTask, FnTask, TaskTable};

use futures::{future, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

// ストレージとルーターをつなぐアプリケーション構造体
// 依存関係を直接所有し、必要に応じてArc<App>で共有する
pub struct App<S>
where
    S: storage::StorageBackend,
{
    pub storage: S,
}

impl<S> App<S>
where
    S: storage::StorageBackend,
{
    /// 新しいAppインスタンスを作成（コンストラクタインジェクション）
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// `src` 以下の全ファイルをルーティングし、結果を `dest` 以下へ書き出す
    ///
    /// 入力は一覧取得後に1ファイルずつ読みながら流し、出力は届いた順に書き出す。
    /// 最初のエラーで中断し、それまでに書き出したファイルは残る。
    pub async fn run<R>(
        &self,
        router: &TaskRouter<R>,
        src: &str,
        dest: &str,
    ) -> RouterResult<RouteSummary>
    where
        R: RouteReporter + 'static,
    {
        let items = self
            .storage
            .list_items(src)
            .await
            .map_err(|e| RouterError::storage(src, e))?;
        log::info!("routing {} file(s) from {src} to {dest}", items.len());

        let (input_tx, input_rx) = mpsc::channel(router.buffer_size());
        let mut routed = router.route(ReceiverStream::new(input_rx));

        let produce = async move {
            for item in items {
                let file = storage::read_file(&self.storage, src, &item.id).await?;
                if input_tx.send(file).await.is_err() {
                    // ルーターが入力を閉じた。原因のエラーは出力側に届く
                    break;
                }
            }
            Ok::<(), RouterError>(())
        };
        let consume = async {
            let mut written = 0usize;
            while let Some(item) = routed.next().await {
                storage::write_file(&self.storage, dest, &item?).await?;
                written += 1;
            }
            Ok::<usize, RouterError>(written)
        };

        let ((), written) = future::try_join(produce, consume).await?;
        log::debug!("wrote {written} file(s) to {dest}");

        let report = routed.into_report().await?;
        Ok(report.summary)
    }
}
