// 拡張子によるタスク振り分けの基本シナリオ
use crate::fixtures::{contents_by_path, prefix_task, RecordingTask};
use task_router::core::traits::MockTaskTransform;
use task_router::{Rule, RuleTable, SourceFile, TaskRouter, TaskTable};

#[tokio::test]
async fn test_unmatched_file_passes_through_without_invoking_task() {
    let rules = RuleTable::new()
        .with_rule(Rule::new("js", "js", "js"))
        .unwrap();

    // 振り分けられるファイルが無いタスクは呼ばれてはならない
    let mut task = MockTaskTransform::new();
    task.expect_transform().times(0);
    let tasks = TaskTable::new().with_task("js", task);

    let router = TaskRouter::quiet(rules, tasks).unwrap();
    let report = router
        .route_all(vec![SourceFile::new("test.css", ".foo {}")])
        .await
        .unwrap();

    assert_eq!(report.files, vec![SourceFile::new("test.css", ".foo {}")]);
    assert_eq!(report.summary.passed_through, 1);
    assert!(report.summary.per_task.is_empty());
}

#[tokio::test]
async fn test_routes_each_extension_to_its_task() {
    let rules = RuleTable::new()
        .with_rule(Rule::new("es6", "js", "js"))
        .unwrap()
        .with_rule(Rule::new("scss", "css", "css"))
        .unwrap();
    let tasks = TaskTable::new()
        .with_task("js", prefix_task("es6: "))
        .with_task("css", prefix_task("scss: "));

    let router = TaskRouter::quiet(rules, tasks).unwrap();
    let report = router
        .route_all(vec![
            SourceFile::new("test.es6", "const test = \"es6\""),
            SourceFile::new("test.scss", ".foo {}"),
        ])
        .await
        .unwrap();

    let outputs = contents_by_path(&report);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs["test.js"], "es6: const test = \"es6\"");
    assert_eq!(outputs["test.css"], "scss: .foo {}");
}

#[tokio::test]
async fn test_excluded_paths_pass_through() {
    let rules = RuleTable::new()
        .with_rule(
            Rule::new("es6", "js", "js")
                .with_exclude("**/vendor/**")
                .unwrap(),
        )
        .unwrap();
    let tasks = TaskTable::new().with_task("js", prefix_task("es6: "));

    let router = TaskRouter::quiet(rules, tasks).unwrap();
    let report = router
        .route_all(vec![
            SourceFile::new("vendor/test.es6", "const test = \"es6\""),
            SourceFile::new("test.es6", "const test = \"es6\""),
        ])
        .await
        .unwrap();

    let outputs = contents_by_path(&report);
    assert_eq!(outputs["vendor/test.es6"], "const test = \"es6\"");
    assert_eq!(outputs["test.js"], "es6: const test = \"es6\"");
    assert!(!outputs.contains_key("vendor/test.js"));
}

#[tokio::test]
async fn test_task_sees_original_extension() {
    let rules = RuleTable::new()
        .with_rule(Rule::new("es6", "js", "js"))
        .unwrap();
    let task = RecordingTask::new();
    let tasks = TaskTable::new().with_task("js", task.clone());

    let router = TaskRouter::quiet(rules, tasks).unwrap();
    let report = router
        .route_all(vec![SourceFile::new("test.es6", "const test = \"es6\"")])
        .await
        .unwrap();

    // 拡張子の書き換えはタスクの出力後
    assert_eq!(task.seen(), vec!["test.es6".to_string()]);
    assert_eq!(report.files, vec![SourceFile::new("test.js", "const test = \"es6\"")]);
}

#[tokio::test]
async fn test_output_extension_independent_of_task_name() {
    let rules = RuleTable::new()
        .with_rule(Rule::new("ts", "compile", "mjs"))
        .unwrap()
        .with_rule(Rule::new("es6", "compile", "js"))
        .unwrap();
    let tasks = TaskTable::new().with_task("compile", prefix_task("// compiled\n"));

    let router = TaskRouter::quiet(rules, tasks).unwrap();
    let report = router
        .route_all(vec![
            SourceFile::new("a.ts", "a"),
            SourceFile::new("b.es6", "b"),
        ])
        .await
        .unwrap();

    let outputs = contents_by_path(&report);
    assert_eq!(outputs["a.mjs"], "// compiled\na");
    assert_eq!(outputs["b.js"], "// compiled\nb");
    assert_eq!(report.summary.per_task["compile"], 2);
}
