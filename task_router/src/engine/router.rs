// Task Router - Demux / タスク / パススルーを組み合わせたファンアウト・ファンイン
//
// 入力 ─► Demux ─┬─► パススルー ─────────────────┐
//                ├─► タスクA ─► 拡張子書き換え ─┼─► 出力
//                └─► タスクB ─► 拡張子書き換え ─┘
//
// 出力は全ブランチの完了後にのみ終了する。

use super::branch::{spawn_pass_through_branch, BranchReport};
use super::demux::{spawn_demux, DemuxContext, DemuxOutcome};
use crate::core::{
    RouteDecision, RouteReport, RouteReporter, RouteSummary, RouterError, RouterResult,
    RoutingConfig, SourceFile,
};
use crate::rules::RuleTable;
use crate::services::{DefaultRoutingConfig, NoOpRouteReporter};
use crate::tasks::TaskTable;
use futures::{stream, Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

/// ルール表とタスク表を束ねたルーター
///
/// 構築時に全ルールのタスクが解決できることを検証する。
pub struct TaskRouter<R> {
    rules: Arc<RuleTable>,
    tasks: Arc<TaskTable>,
    buffer_size: usize,
    reporter: Option<Arc<R>>,
}

impl TaskRouter<NoOpRouteReporter> {
    /// デフォルト設定・進捗報告なしのルーターを作成
    pub fn quiet(rules: RuleTable, tasks: TaskTable) -> RouterResult<Self> {
        Self::new(
            rules,
            tasks,
            &DefaultRoutingConfig::default().with_progress_reporting(false),
            NoOpRouteReporter::new(),
        )
    }
}

impl<R> TaskRouter<R>
where
    R: RouteReporter + 'static,
{
    /// 新しいルーターを作成
    pub fn new<C>(rules: RuleTable, tasks: TaskTable, config: &C, reporter: R) -> RouterResult<Self>
    where
        C: RoutingConfig,
    {
        tasks.validate(&rules)?;

        if config.channel_buffer_size() == 0 {
            return Err(RouterError::configuration(
                "channel buffer size must be greater than zero",
            ));
        }

        let reporter = config
            .enable_progress_reporting()
            .then(|| Arc::new(reporter));

        Ok(Self {
            rules: Arc::new(rules),
            tasks: Arc::new(tasks),
            buffer_size: config.channel_buffer_size(),
            reporter,
        })
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn tasks(&self) -> &TaskTable {
        &self.tasks
    }

    /// 各チャンネルのバッファサイズ
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// 単一ファイルの振り分け判定（ストリーム処理なし）
    pub fn decide(&self, file: &SourceFile) -> RouteDecision {
        self.rules.decide(file)
    }

    /// 入力ストリームをルーティングする
    ///
    /// tokioランタイム上で呼び出すこと。出力の順序はブランチ間で保証しないが、
    /// 同一タスク内ではタスクの出力順を保つ。
    pub fn route<S>(&self, input: S) -> RoutedStream
    where
        S: Stream<Item = SourceFile> + Send + 'static,
    {
        let (out_tx, out_rx) = mpsc::channel(self.buffer_size);
        let (pass_tx, pass_rx) = mpsc::channel(self.buffer_size);
        let (summary_tx, summary_rx) = oneshot::channel();

        let pass_handle = spawn_pass_through_branch(pass_rx, out_tx.clone());
        let demux_handle = spawn_demux(
            input,
            DemuxContext {
                rules: Arc::clone(&self.rules),
                tasks: Arc::clone(&self.tasks),
                buffer_size: self.buffer_size,
                reporter: self.reporter.clone(),
            },
            pass_tx,
            out_tx.clone(),
        );

        spawn_supervisor(
            demux_handle,
            pass_handle,
            out_tx,
            self.reporter.clone(),
            summary_tx,
        );

        RoutedStream {
            inner: ReceiverStream::new(out_rx),
            summary: summary_rx,
            failed: false,
        }
    }

    /// ファイル一覧をルーティングし、全出力とサマリーを集める
    pub async fn route_all(&self, files: Vec<SourceFile>) -> RouterResult<RouteReport> {
        self.route(stream::iter(files)).into_report().await
    }
}

/// マージ済みの出力ストリーム
///
/// 最初のエラーの後は何も流れない。
pub struct RoutedStream {
    inner: ReceiverStream<RouterResult<SourceFile>>,
    summary: oneshot::Receiver<RouteSummary>,
    failed: bool,
}

impl RoutedStream {
    /// 全出力を集め、完了サマリーと合わせて返す
    pub async fn into_report(mut self) -> RouterResult<RouteReport> {
        let mut files = Vec::new();
        while let Some(item) = self.next().await {
            files.push(item?);
        }

        let summary = self
            .summary
            .await
            .map_err(|_| RouterError::channel("routing finished without a summary"))?;

        Ok(RouteReport { files, summary })
    }
}

impl Stream for RoutedStream {
    type Item = RouterResult<SourceFile>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.failed {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(Err(error))) => {
                // 受信側を閉じて残りのブランチを止める
                self.failed = true;
                self.inner.close();
                Poll::Ready(Some(Err(error)))
            }
            other => other,
        }
    }
}

/// Supervisor: 全ブランチの完了を待ち、最後に出力を閉じる
fn spawn_supervisor<R>(
    demux: JoinHandle<DemuxOutcome>,
    pass_through: JoinHandle<BranchReport>,
    out_tx: mpsc::Sender<RouterResult<SourceFile>>,
    reporter: Option<Arc<R>>,
    summary_tx: oneshot::Sender<RouteSummary>,
) -> JoinHandle<()>
where
    R: RouteReporter + 'static,
{
    tokio::spawn(async move {
        let mut errors: Vec<RouterError> = Vec::new();
        let mut branch_failed = false;

        let summary = match demux.await {
            Ok(outcome) => {
                if let Err(error) = outcome.result {
                    errors.push(error);
                }

                let mut summary = outcome.summary;
                for (task, handle) in outcome.branches {
                    match handle.await {
                        Ok(report) => {
                            log::debug!("task '{task}' completed: {} file(s)", report.emitted);
                            branch_failed |= report.failed;
                            summary.transformed += report.emitted;

                            let routed = summary.per_task.get(&task).copied().unwrap_or(0);
                            if let Some(error) = check_task_output(&task, routed, &report) {
                                errors.push(error);
                            }
                        }
                        Err(join_error) => errors.push(RouterError::from(join_error)),
                    }
                }
                summary
            }
            Err(join_error) => {
                errors.push(RouterError::from(join_error));
                RouteSummary::default()
            }
        };

        match pass_through.await {
            Ok(report) => log::debug!("pass-through completed: {} file(s)", report.emitted),
            Err(join_error) => errors.push(RouterError::from(join_error)),
        }

        if branch_failed || !errors.is_empty() {
            // ブランチ側で送信済みのエラーがあれば、それに起因するチャンネルエラーは送らない
            let primary = if branch_failed {
                errors
                    .into_iter()
                    .find(|e| !matches!(e, RouterError::ChannelError { .. }))
            } else {
                select_primary(errors)
            };

            if let Some(error) = primary {
                log::error!("routing failed: {error}");
                if let Some(reporter) = &reporter {
                    reporter.report_error(&error.to_string()).await;
                }
                let _ = out_tx.send(Err(error)).await;
            }
            return;
        }

        if let Some(reporter) = &reporter {
            reporter.report_completed(&summary).await;
        }
        let _ = summary_tx.send(summary);
        // out_txのドロップで出力ストリームが終了する
    })
}

/// タスクの出力件数が入力件数と一致するか検証
///
/// 失敗済み・途中停止したブランチは対象外。
fn check_task_output(task: &str, routed: usize, report: &BranchReport) -> Option<RouterError> {
    if report.failed || report.interrupted || report.emitted == routed {
        return None;
    }

    let detail = if report.emitted < routed {
        anyhow::anyhow!(
            "task dropped {} of {routed} file(s) routed to it",
            routed - report.emitted
        )
    } else {
        anyhow::anyhow!(
            "task emitted {} file(s) for {routed} file(s) routed to it",
            report.emitted
        )
    };
    Some(RouterError::task_transform(task, detail))
}

/// 原因側のエラーを優先して1つ選ぶ
fn select_primary(mut errors: Vec<RouterError>) -> Option<RouterError> {
    let index = errors
        .iter()
        .position(|e| !matches!(e, RouterError::ChannelError { .. }))
        .unwrap_or(0);
    (index < errors.len()).then(|| errors.swap_remove(index))
}
