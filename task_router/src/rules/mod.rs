// ルール層 - 拡張子からタスクへの対応表
// 設定から一度だけ構築され、実行中は変更されない

pub mod exclude;
pub mod matcher;

pub use exclude::ExcludePattern;
pub use matcher::decide;

use crate::core::extension::normalize_extension;
use crate::core::{RouteDecision, RouterError, RouterResult, SourceFile};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// 拡張子1つ分のルール
#[derive(Debug, Clone)]
pub struct Rule {
    source_ext: String,
    task: String,
    output_ext: String,
    exclude: Option<ExcludePattern>,
}

impl Rule {
    /// 新しいルールを作成（拡張子の先頭ドットは取り除く）
    pub fn new(
        source_ext: impl Into<String>,
        task: impl Into<String>,
        output_ext: impl Into<String>,
    ) -> Self {
        let source_ext = source_ext.into();
        let output_ext = output_ext.into();
        Self {
            source_ext: normalize_extension(&source_ext).to_string(),
            task: task.into(),
            output_ext: normalize_extension(&output_ext).to_string(),
            exclude: None,
        }
    }

    /// 除外パターンを設定
    pub fn with_exclude(mut self, pattern: &str) -> RouterResult<Self> {
        self.exclude = Some(ExcludePattern::new(pattern)?);
        Ok(self)
    }

    pub fn source_ext(&self) -> &str {
        &self.source_ext
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn output_ext(&self) -> &str {
        &self.output_ext
    }

    pub fn exclude(&self) -> Option<&ExcludePattern> {
        self.exclude.as_ref()
    }

    /// パスが除外パターンに一致するか
    pub fn excludes(&self, path: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|exclude| exclude.matches_path(path))
    }
}

/// 拡張子をキーとしたルール表
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, Arc<Rule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルールを追加
    ///
    /// 空の拡張子と重複した拡張子は設定エラー。
    pub fn insert(&mut self, rule: Rule) -> RouterResult<()> {
        if rule.source_ext().is_empty() {
            return Err(RouterError::configuration(format!(
                "rule for task '{}' has an empty extension",
                rule.task()
            )));
        }
        if rule.task().is_empty() {
            return Err(RouterError::configuration(format!(
                "rule for '.{}' has an empty task name",
                rule.source_ext()
            )));
        }
        if self.rules.contains_key(rule.source_ext()) {
            return Err(RouterError::configuration(format!(
                "duplicate rule for extension '.{}'",
                rule.source_ext()
            )));
        }

        self.rules
            .insert(rule.source_ext().to_string(), Arc::new(rule));
        Ok(())
    }

    /// ビルダー形式でルールを追加
    pub fn with_rule(mut self, rule: Rule) -> RouterResult<Self> {
        self.insert(rule)?;
        Ok(self)
    }

    /// 拡張子からルールを取得
    pub fn get(&self, ext: &str) -> Option<&Arc<Rule>> {
        self.rules.get(ext)
    }

    /// ファイルの振り分けを判定
    pub fn decide(&self, file: &SourceFile) -> RouteDecision {
        decide(self, file.path())
    }

    /// ルールが参照するタスク名（重複なし、ソート済み）
    pub fn task_names(&self) -> BTreeSet<&str> {
        self.rules.values().map(|rule| rule.task()).collect()
    }

    /// 拡張子順に並べたルール一覧
    pub fn sorted_rules(&self) -> Vec<&Arc<Rule>> {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by(|a, b| a.source_ext().cmp(b.source_ext()));
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
