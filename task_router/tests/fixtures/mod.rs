// テストユーティリティとタスク実装
// 統合テスト共通のタスクとヘルパー


// 公開API
pub use tasks::*;

use std::collections::BTreeMap;
use task_router::{RouteReport, SourceFile};

/// パス -> 内容（UTF-8）のマップへ変換
pub fn contents_by_path(report: &RouteReport) -> BTreeMap<String, String> {
    report
        .files
        .iter()
        .map(|file| (file.path().to_string(), file.contents_lossy().into_owned()))
        .collect()
}

/// よく使う入力ファイル群
pub fn sample_files() -> Vec<SourceFile> {
    vec![
        SourceFile::new("test.es6", "const test = \"es6\""),
        SourceFile::new("test.scss", ".foo {}"),
        SourceFile::new("vendor/test.es6", "vendor"),
        SourceFile::new("README", "readme"),
        SourceFile::new("styles/site.css", "body {}"),
    ]
}
