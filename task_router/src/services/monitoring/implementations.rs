// 進捗監視の具象実装

use crate::core::{RouteReporter, RouteSummary};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// コンソール出力による進捗報告実装
#[derive(Debug, Default)]
pub struct ConsoleRouteReporter {
    quiet: bool,
    verbose: bool,
    routed: AtomicUsize,
}

impl ConsoleRouteReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// ファイルごとの振り分けも表示する
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// これまでに振り分けたファイル数
    pub fn routed_count(&self) -> usize {
        self.routed.load(Ordering::Relaxed)
    }

    fn record(&self) -> usize {
        self.routed.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl RouteReporter for ConsoleRouteReporter {
    async fn report_started(&self) {
        if !self.quiet {
            println!("🚀 Routing files...");
        }
    }

    async fn report_passed_through(&self, path: &str) {
        let count = self.record();
        if !self.quiet && self.verbose {
            println!("   [{count}] {path} (pass-through)");
        }
    }

    async fn report_dispatched(&self, path: &str, task: &str) {
        let count = self.record();
        if !self.quiet && self.verbose {
            println!("   [{count}] {path} -> {task}");
        }
    }

    async fn report_task_started(&self, task: &str) {
        if !self.quiet {
            println!("⚙️  Task started: {task}");
        }
    }

    async fn report_error(&self, error: &str) {
        if !self.quiet {
            eprintln!("❌ Routing failed: {error}");
        }
    }

    async fn report_completed(&self, summary: &RouteSummary) {
        if !self.quiet {
            println!(
                "✅ Completed! Files: {}, Transformed: {}, Passed through: {}",
                summary.total_files, summary.transformed, summary.passed_through
            );
            for (task, count) in &summary.per_task {
                println!("   - {task}: {count}");
            }
        }
    }
}

/// 何もしない進捗報告実装（テスト・ライブラリ利用向け）
#[derive(Debug, Default, Clone)]
pub struct NoOpRouteReporter;

impl NoOpRouteReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RouteReporter for NoOpRouteReporter {
    async fn report_started(&self) {
        // 何もしない
    }

    async fn report_passed_through(&self, _path: &str) {
        // 何もしない
    }

    async fn report_dispatched(&self, _path: &str, _task: &str) {
        // 何もしない
    }

    async fn report_task_started(&self, _task: &str) {
        // 何もしない
    }

    async fn report_error(&self, _error: &str) {
        // 何もしない
    }

    async fn report_completed(&self, _summary: &RouteSummary) {
        // 何もしない
    }
}
