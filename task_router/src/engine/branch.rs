// Branch - ファンアウト先の各レーン
// タスクの出力を受け取り、拡張子を書き換えてマージ先へ流す

use crate::core::{RouterError, RouterResult, SourceFile, TaskTransform};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// ブランチ終了時の報告
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchReport {
    /// マージ先へ送ったファイル数
    pub emitted: usize,
    /// エラーをマージ先へ送って停止したか
    pub failed: bool,
    /// マージ先が閉じられて途中で停止したか
    pub interrupted: bool,
}

/// タスクから戻ったファイルを仕上げる
///
/// ルールは送り出す前に付けたタグから取り出す。拡張子から引き直すことはしない。
pub fn finish_task_output(task: &str, mut file: SourceFile) -> RouterResult<SourceFile> {
    let rule = file.take_route().ok_or_else(|| {
        RouterError::task_transform(
            task,
            anyhow::anyhow!("task emitted '{}' which was never routed to it", file.path()),
        )
    })?;

    if rule.task() != task {
        return Err(RouterError::task_transform(
            task,
            anyhow::anyhow!(
                "task emitted '{}' which was routed to task '{}'",
                file.path(),
                rule.task()
            ),
        ));
    }

    file.rewrite_extension(rule.output_ext());
    Ok(file)
}

/// タスクブランチ: タスクを1回だけ起動し、その出力を流し続ける
pub fn spawn_task_branch(
    name: String,
    task: Arc<dyn TaskTransform>,
    input_rx: mpsc::Receiver<SourceFile>,
    out_tx: mpsc::Sender<RouterResult<SourceFile>>,
) -> tokio::task::JoinHandle<BranchReport> {
    tokio::spawn(async move {
        let mut output = task.transform(ReceiverStream::new(input_rx).boxed());
        let mut report = BranchReport::default();

        while let Some(item) = output.next().await {
            let result = item
                .map_err(|e| RouterError::task_transform(&name, e))
                .and_then(|file| finish_task_output(&name, file));
            let failed = result.is_err();

            if out_tx.send(result).await.is_err() {
                // 出力側が閉じられた場合は終了
                log::debug!("task '{name}': output closed, stopping");
                report.interrupted = true;
                break;
            }
            if failed {
                log::warn!("task '{name}' failed after {} file(s)", report.emitted);
                report.failed = true;
                break;
            }
            report.emitted += 1;
        }

        report
    })
}

/// パススルーブランチ: 受け取ったファイルをそのまま流す
pub fn spawn_pass_through_branch(
    mut input_rx: mpsc::Receiver<SourceFile>,
    out_tx: mpsc::Sender<RouterResult<SourceFile>>,
) -> tokio::task::JoinHandle<BranchReport> {
    tokio::spawn(async move {
        let mut report = BranchReport::default();
        while let Some(file) = input_rx.recv().await {
            if out_tx.send(Ok(file)).await.is_err() {
                report.interrupted = true;
                break;
            }
            report.emitted += 1;
        }
        report
    })
}
