// ルーティングに関連するデータ型定義

use super::extension::{extension_of, replace_extension};
use crate::rules::Rule;
use std::collections::BTreeMap;
use std::sync::Arc;

/// パイプラインを流れるファイル
///
/// パスの変更はルーターだけが行う。タスクは内容のみを書き換える。
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    contents: Vec<u8>,
    // タスクへ送り出した時点のルール。拡張子の書き換えに使う
    route: Option<Arc<Rule>>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            route: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 現在の拡張子（ドットなし）
    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.path)
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// 内容を文字列として取得（不正なUTF-8は置換）
    pub fn contents_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }

    pub fn set_contents(&mut self, contents: impl Into<Vec<u8>>) {
        self.contents = contents.into();
    }

    /// 内容を差し替えた同一ファイルを返す
    pub fn with_contents(mut self, contents: impl Into<Vec<u8>>) -> Self {
        self.set_contents(contents);
        self
    }

    pub(crate) fn tag_route(&mut self, rule: Arc<Rule>) {
        self.route = Some(rule);
    }

    pub(crate) fn take_route(&mut self) -> Option<Arc<Rule>> {
        self.route.take()
    }

    pub(crate) fn rewrite_extension(&mut self, ext: &str) {
        self.path = replace_extension(&self.path, ext);
    }
}

// ルーティングタグは比較対象外
impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.contents == other.contents
    }
}

impl Eq for SourceFile {}

/// ルールマッチングの判定結果
#[derive(Debug, Clone)]
pub enum RouteDecision {
    /// 変換せずにそのまま出力
    PassThrough,
    /// ルールに一致、対応するタスクへ送る
    Matched(Arc<Rule>),
}

impl RouteDecision {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }

    /// 一致したルールのタスク名
    pub fn task(&self) -> Option<&str> {
        match self {
            Self::PassThrough => None,
            Self::Matched(rule) => Some(rule.task()),
        }
    }
}

/// ルーティング全体のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub total_files: usize,
    pub passed_through: usize,
    pub transformed: usize,
    /// タスク名ごとの入力ファイル数
    pub per_task: BTreeMap<String, usize>,
}

/// `route_all` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteReport {
    pub files: Vec<SourceFile>,
    pub summary: RouteSummary,
}

impl RouteReport {
    /// パスでファイルを検索
    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.path() == path)
    }
}
