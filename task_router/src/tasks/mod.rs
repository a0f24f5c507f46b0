// タスク層 - タスク名から変換実装への対応表と標準アダプター

pub mod command;
pub mod function;

pub use command::{CommandSpec, CommandTask};
pub use function::FnTask;

use crate::core::{RouterError, RouterResult, TaskTransform};
use crate::rules::RuleTable;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// タスク名をキーとした変換タスク表
///
/// 呼び出し側が構築して注入する。ルーターは読み取りのみ。
#[derive(Clone, Default)]
pub struct TaskTable {
    tasks: HashMap<String, Arc<dyn TaskTransform>>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// タスクを登録（同名のタスクは置き換える）
    pub fn register<T>(&mut self, name: impl Into<String>, task: T)
    where
        T: TaskTransform + 'static,
    {
        self.tasks.insert(name.into(), Arc::new(task));
    }

    /// ビルダー形式でタスクを登録
    pub fn with_task<T>(mut self, name: impl Into<String>, task: T) -> Self
    where
        T: TaskTransform + 'static,
    {
        self.register(name, task);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TaskTransform>> {
        self.tasks.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// 登録済みのタスク名（ソート済み）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// ルール表が参照する全タスクが登録済みか検証
    pub fn validate(&self, rules: &RuleTable) -> RouterResult<()> {
        let missing: Vec<_> = rules
            .task_names()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RouterError::configuration(format!(
                "rules reference unknown task(s): {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for TaskTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskTable")
            .field("tasks", &self.names())
            .finish()
    }
}
