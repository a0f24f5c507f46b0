// 設定ファイル（JSON）の読み込み
//
// {
//   "rules": {
//     "js": "js",
//     "es6": { "task": "js", "outputExt": "js", "exclude": "**/vendor/**" }
//   },
//   "tasks": { "js": { "command": "babel", "args": ["--filename", "{path}"] } },
//   "routing": { "channelBufferSize": 100 }
// }

use super::implementations::DefaultRoutingConfig;
use crate::core::{RouterError, RouterResult};
use crate::rules::{Rule, RuleTable};
use crate::tasks::{CommandSpec, CommandTask, TaskTable};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// 1つの拡張子に対するルール定義
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// 短縮形: タスク名のみ（出力拡張子はタスク名と同じ）
    Task(String),
    /// 詳細形
    Detailed {
        task: String,
        #[serde(rename = "outputExt", alias = "output_ext", default)]
        output_ext: Option<String>,
        #[serde(default)]
        exclude: Option<String>,
    },
}

impl RuleSpec {
    pub fn task(&self) -> &str {
        match self {
            Self::Task(task) => task,
            Self::Detailed { task, .. } => task,
        }
    }

    /// 出力拡張子（省略時はタスク名）
    pub fn output_ext(&self) -> &str {
        match self {
            Self::Task(task) => task,
            Self::Detailed {
                task, output_ext, ..
            } => output_ext.as_deref().unwrap_or(task),
        }
    }

    /// 拡張子 `source_ext` のルールを構築
    pub fn to_rule(&self, source_ext: &str) -> RouterResult<Rule> {
        let rule = Rule::new(source_ext, self.task(), self.output_ext());
        match self {
            Self::Detailed {
                exclude: Some(pattern),
                ..
            } => rule.with_exclude(pattern),
            _ => Ok(rule),
        }
    }
}

/// 設定ファイル全体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterConfig {
    pub rules: BTreeMap<String, RuleSpec>,
    /// 外部コマンドで実装するタスク（CLI用）
    #[serde(default)]
    pub tasks: BTreeMap<String, CommandSpec>,
    #[serde(default)]
    pub routing: DefaultRoutingConfig,
}

impl RouterConfig {
    /// JSON文字列から読み込む
    pub fn from_json_str(json: &str) -> RouterResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RouterError::configuration(format!("Invalid configuration: {e}")))
    }

    /// JSONファイルから読み込む
    pub async fn load(path: &Path) -> RouterResult<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            RouterError::configuration(format!(
                "Failed to read configuration {}: {e}",
                path.display()
            ))
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!(
            "loaded {} rule(s) and {} task(s) from {}",
            config.rules.len(),
            config.tasks.len(),
            path.display()
        );
        Ok(config)
    }

    /// ルール表を構築
    pub fn rule_table(&self) -> RouterResult<RuleTable> {
        let mut table = RuleTable::new();
        for (ext, spec) in &self.rules {
            table.insert(spec.to_rule(ext)?)?;
        }
        Ok(table)
    }

    /// `tasks` セクションからコマンドタスク表を構築
    pub fn command_tasks(&self) -> TaskTable {
        let mut table = TaskTable::new();
        for (name, spec) in &self.tasks {
            table.register(name.clone(), CommandTask::new(spec.clone()));
        }
        table
    }
}
