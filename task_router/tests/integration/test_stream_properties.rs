// ストリームとしての性質（件数保存・順序・タスクの呼び出し回数）
use crate::fixtures::{prefix_task, sample_files, RecordingTask};
use futures::{stream, StreamExt};
use std::collections::BTreeMap;
use task_router::{
    DefaultRoutingConfig, NoOpRouteReporter, Rule, RuleTable, SourceFile, TaskRouter, TaskTable,
};

fn many_files(count: usize) -> Vec<SourceFile> {
    (0..count)
        .map(|i| {
            let ext = match i % 4 {
                0 => "es6",
                1 => "scss",
                2 => "txt",
                _ => "md",
            };
            SourceFile::new(format!("dir{}/file{i:04}.{ext}", i % 3), format!("{i}"))
        })
        .collect()
}

fn small_buffer_router(tasks: TaskTable) -> TaskRouter<NoOpRouteReporter> {
    let rules = RuleTable::new()
        .with_rule(Rule::new("es6", "js", "js"))
        .unwrap()
        .with_rule(Rule::new("scss", "css", "css"))
        .unwrap()
        .with_rule(Rule::new("md", "doc", "html"))
        .unwrap();

    // バッファ1でもデッドロックしないこと
    let config = DefaultRoutingConfig::new()
        .with_buffer_size(1)
        .with_progress_reporting(false);
    TaskRouter::new(rules, tasks, &config, NoOpRouteReporter::new()).unwrap()
}

#[tokio::test]
async fn test_every_input_file_is_emitted_once() {
    let tasks = TaskTable::new()
        .with_task("js", prefix_task("js:"))
        .with_task("css", prefix_task("css:"))
        .with_task("doc", prefix_task("doc:"));
    let router = small_buffer_router(tasks);

    let report = router.route_all(many_files(200)).await.unwrap();

    assert_eq!(report.files.len(), 200);
    assert_eq!(report.summary.total_files, 200);
    assert_eq!(report.summary.passed_through, 50);
    assert_eq!(report.summary.transformed, 150);

    let mut stems: Vec<String> = report
        .files
        .iter()
        .map(|file| {
            let path = file.path();
            path[..path.rfind('.').unwrap()].to_string()
        })
        .collect();
    stems.sort();
    stems.dedup();
    assert_eq!(stems.len(), 200);
}

#[tokio::test]
async fn test_order_is_preserved_within_each_task() {
    let tasks = TaskTable::new()
        .with_task("js", prefix_task(""))
        .with_task("css", prefix_task(""))
        .with_task("doc", prefix_task(""));
    let router = small_buffer_router(tasks);

    let report = router.route_all(many_files(120)).await.unwrap();

    // 出力拡張子ごとに、入力順（連番）が保たれていること
    let mut by_ext: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for file in &report.files {
        let ext = file.extension().unwrap_or_default().to_string();
        let index: usize = file.contents_lossy().parse().unwrap();
        by_ext.entry(ext).or_default().push(index);
    }

    for (ext, indexes) in by_ext {
        let mut sorted = indexes.clone();
        sorted.sort();
        assert_eq!(indexes, sorted, "order changed for .{ext}");
    }
}

#[tokio::test]
async fn test_task_is_invoked_once_per_run() {
    let js = RecordingTask::new();
    let css = RecordingTask::new();
    let unused = RecordingTask::new();
    let tasks = TaskTable::new()
        .with_task("js", js.clone())
        .with_task("css", css.clone())
        .with_task("doc", unused.clone());
    let router = small_buffer_router(tasks);

    let files: Vec<_> = many_files(40)
        .into_iter()
        .filter(|file| file.extension() != Some("md"))
        .collect();
    let report = router.route_all(files).await.unwrap();

    assert_eq!(js.invocations(), 1);
    assert_eq!(css.invocations(), 1);
    assert_eq!(unused.invocations(), 0);
    assert_eq!(js.seen().len(), 10);
    assert_eq!(css.seen().len(), 10);
    assert_eq!(report.files.len(), 30);

    // 同じルーターで再実行すると再び1回ずつ呼ばれる
    router.route_all(many_files(4)).await.unwrap();
    assert_eq!(js.invocations(), 2);
    assert_eq!(unused.invocations(), 1);
}

#[tokio::test]
async fn test_incremental_consumption() {
    let tasks = TaskTable::new().with_task("js", prefix_task("es6: "));
    let rules = RuleTable::new()
        .with_rule(Rule::new("es6", "js", "js"))
        .unwrap();
    let router = TaskRouter::quiet(rules, tasks).unwrap();

    let mut routed = router.route(stream::iter(sample_files()));
    let mut paths = Vec::new();
    while let Some(item) = routed.next().await {
        paths.push(item.unwrap().path().to_string());
    }
    paths.sort();

    assert_eq!(
        paths,
        vec![
            "README",
            "styles/site.css",
            "test.js",
            "test.scss",
            "vendor/test.js",
        ]
    );
    // 全ブランチ完了後はストリームが終了したまま
    assert!(routed.next().await.is_none());
}

#[tokio::test]
async fn test_empty_input_completes() {
    let rules = RuleTable::new()
        .with_rule(Rule::new("es6", "js", "js"))
        .unwrap();
    let task = RecordingTask::new();
    let router = TaskRouter::quiet(rules, TaskTable::new().with_task("js", task.clone())).unwrap();

    let report = router.route_all(Vec::new()).await.unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.summary.total_files, 0);
    assert_eq!(task.invocations(), 0);
}
