// ディレクトリ単位の実行（ストレージ + ルーター）の統合テスト
use crate::fixtures::prefix_task;
use std::fs;
use std::path::Path;
use task_router::cli::commands::check::execute_check;
use task_router::cli::commands::run::{execute_run, RunConfig};
use task_router::storage::local::LocalStorageBackend;
use task_router::{App, Rule, RuleTable, TaskRouter, TaskTable};
use tempfile::TempDir;

/// テスト環境をセットアップ：ネストしたソースディレクトリを作成
fn setup_source_tree(base_dir: &Path) {
    let vendor = base_dir.join("vendor");
    let styles = base_dir.join("styles");
    fs::create_dir_all(&vendor).unwrap();
    fs::create_dir_all(&styles).unwrap();

    fs::write(base_dir.join("test.es6"), "const test = \"es6\"").unwrap();
    fs::write(vendor.join("test.es6"), "const test = \"es6\"").unwrap();
    fs::write(styles.join("site.scss"), ".foo {}").unwrap();
    fs::write(base_dir.join("index.html"), "<html></html>").unwrap();
    fs::write(base_dir.join("LICENSE"), "MIT").unwrap();
}

#[tokio::test]
async fn test_app_routes_directory_tree() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    setup_source_tree(src.path());

    let rules = RuleTable::new()
        .with_rule(
            Rule::new("es6", "js", "js")
                .with_exclude("**/vendor/**")
                .unwrap(),
        )
        .unwrap()
        .with_rule(Rule::new("scss", "css", "css"))
        .unwrap();
    let tasks = TaskTable::new()
        .with_task("js", prefix_task("es6: "))
        .with_task("css", prefix_task("scss: "));
    let router = TaskRouter::quiet(rules, tasks).unwrap();

    let app = App::new(LocalStorageBackend::new());
    let summary = app
        .run(
            &router,
            src.path().to_str().unwrap(),
            dest.path().to_str().unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(summary.total_files, 5);
    assert_eq!(summary.transformed, 2);
    assert_eq!(summary.passed_through, 3);

    let out = dest.path();
    assert_eq!(
        fs::read_to_string(out.join("test.js")).unwrap(),
        "es6: const test = \"es6\""
    );
    assert_eq!(
        fs::read_to_string(out.join("vendor").join("test.es6")).unwrap(),
        "const test = \"es6\""
    );
    assert_eq!(
        fs::read_to_string(out.join("styles").join("site.css")).unwrap(),
        "scss: .foo {}"
    );
    assert_eq!(
        fs::read_to_string(out.join("index.html")).unwrap(),
        "<html></html>"
    );
    assert_eq!(fs::read_to_string(out.join("LICENSE")).unwrap(), "MIT");
    assert!(!out.join("test.es6").exists());
}

#[tokio::test]
async fn test_check_command_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("task_router.json");
    fs::write(
        &config,
        r#"{
            "rules": {
                "es6": {"task": "js", "outputExt": "js", "exclude": "**/vendor/**"},
                "scss": "css"
            }
        }"#,
    )
    .unwrap();

    let rules = execute_check(&config).await.unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get("scss").unwrap().output_ext(), "css");
}

#[tokio::test]
async fn test_run_command_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    fs::create_dir(&src).unwrap();
    let config = temp_dir.path().join("task_router.json");
    fs::write(&config, r#"{"rules": {"es6": {"task": "js", "exclude": "[oops"}}}"#).unwrap();

    let result = execute_run(RunConfig {
        config,
        src,
        dest: temp_dir.path().join("dist"),
        quiet: true,
        verbose: false,
    })
    .await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("dist").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_command_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dest = temp_dir.path().join("dist");
    setup_source_tree(&src);

    let config = temp_dir.path().join("task_router.json");
    fs::write(
        &config,
        r#"{
            "rules": {
                "es6": {"task": "js", "exclude": "**/vendor/**"},
                "scss": "css"
            },
            "tasks": {
                "js": {"command": "sh", "args": ["-c", "printf 'es6: '; cat"]},
                "css": {"command": "sh", "args": ["-c", "printf '/* %s */ ' \"$0\"; cat", "{path}"]}
            },
            "routing": {"channelBufferSize": 2}
        }"#,
    )
    .unwrap();

    let summary = execute_run(RunConfig {
        config,
        src,
        dest: dest.clone(),
        quiet: true,
        verbose: false,
    })
    .await
    .unwrap();

    assert_eq!(summary.total_files, 5);
    assert_eq!(summary.per_task.get("js"), Some(&1));
    assert_eq!(summary.per_task.get("css"), Some(&1));
    assert_eq!(
        fs::read_to_string(dest.join("test.js")).unwrap(),
        "es6: const test = \"es6\""
    );
    assert_eq!(
        fs::read_to_string(dest.join("styles").join("site.css")).unwrap(),
        "/* styles/site.scss */ .foo {}"
    );
}
