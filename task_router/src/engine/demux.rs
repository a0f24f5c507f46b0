// Demux - 入力ストリームをタスクごとのレーンへ振り分ける

use super::branch::{spawn_task_branch, BranchReport};
use crate::core::{
    RouteDecision, RouteReporter, RouteSummary, RouterError, RouterResult, SourceFile,
};
use crate::rules::RuleTable;
use crate::tasks::TaskTable;
use futures::{Stream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 振り分けに必要な共有状態
pub struct DemuxContext<R> {
    pub rules: Arc<RuleTable>,
    pub tasks: Arc<TaskTable>,
    pub buffer_size: usize,
    pub reporter: Option<Arc<R>>,
}

/// 振り分け終了時の結果
pub struct DemuxOutcome {
    /// 起動したタスクブランチ（起動順）
    pub branches: Vec<(String, JoinHandle<BranchReport>)>,
    /// 入力側で数えた件数（`transformed` は未集計）
    pub summary: RouteSummary,
    pub result: RouterResult<()>,
}

struct Demux<R> {
    ctx: DemuxContext<R>,
    out_tx: mpsc::Sender<RouterResult<SourceFile>>,
    pass_tx: mpsc::Sender<SourceFile>,
    lanes: HashMap<String, mpsc::Sender<SourceFile>>,
    branches: Vec<(String, JoinHandle<BranchReport>)>,
    summary: RouteSummary,
}

impl<R> Demux<R>
where
    R: RouteReporter + 'static,
{
    async fn run<S>(&mut self, input: S) -> RouterResult<()>
    where
        S: Stream<Item = SourceFile> + Send + 'static,
    {
        let mut input = Box::pin(input);

        if let Some(reporter) = &self.ctx.reporter {
            reporter.report_started().await;
        }

        while let Some(file) = input.next().await {
            self.summary.total_files += 1;
            let decision = self.ctx.rules.decide(&file);

            match decision {
                RouteDecision::PassThrough => {
                    log::debug!("pass-through: {}", file.path());
                    if let Some(reporter) = &self.ctx.reporter {
                        reporter.report_passed_through(file.path()).await;
                    }
                    self.summary.passed_through += 1;
                    self.pass_tx
                        .send(file)
                        .await
                        .map_err(|_| RouterError::channel("pass-through branch closed"))?;
                }
                RouteDecision::Matched(rule) => {
                    let task = rule.task().to_string();
                    log::debug!("{} -> task '{task}'", file.path());

                    let lane = self.lane(&task).await?;
                    if let Some(reporter) = &self.ctx.reporter {
                        reporter.report_dispatched(file.path(), &task).await;
                    }
                    *self.summary.per_task.entry(task.clone()).or_default() += 1;

                    let mut file = file;
                    file.tag_route(rule);
                    lane.send(file).await.map_err(|_| {
                        RouterError::channel(format!("task '{task}' closed its input early"))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// タスクのレーンを取得（初回はタスクを起動）
    async fn lane(&mut self, task: &str) -> RouterResult<mpsc::Sender<SourceFile>> {
        if let Some(lane) = self.lanes.get(task) {
            return Ok(lane.clone());
        }

        let transform = self.ctx.tasks.get(task).ok_or_else(|| {
            RouterError::configuration(format!("no task registered under the name '{task}'"))
        })?;

        let (lane_tx, lane_rx) = mpsc::channel(self.ctx.buffer_size);
        let handle = spawn_task_branch(task.to_string(), transform, lane_rx, self.out_tx.clone());
        self.branches.push((task.to_string(), handle));
        self.lanes.insert(task.to_string(), lane_tx.clone());

        log::debug!("started task '{task}'");
        if let Some(reporter) = &self.ctx.reporter {
            reporter.report_task_started(task).await;
        }

        Ok(lane_tx)
    }
}

/// Demux起動: 入力を使い切るとすべてのレーンを閉じて終了する
pub fn spawn_demux<S, R>(
    input: S,
    ctx: DemuxContext<R>,
    pass_tx: mpsc::Sender<SourceFile>,
    out_tx: mpsc::Sender<RouterResult<SourceFile>>,
) -> JoinHandle<DemuxOutcome>
where
    S: Stream<Item = SourceFile> + Send + 'static,
    R: RouteReporter + 'static,
{
    tokio::spawn(async move {
        let mut demux = Demux {
            ctx,
            out_tx,
            pass_tx,
            lanes: HashMap::new(),
            branches: Vec::new(),
            summary: RouteSummary::default(),
        };

        let result = demux.run(input).await;

        // レーンと送信側をドロップしてブランチに終了を通知
        let Demux {
            branches, summary, ..
        } = demux;

        DemuxOutcome {
            branches,
            summary,
            result,
        }
    })
}
