// 外部コマンドをタスクとして使うアダプター
//
// ファイル内容を標準入力へ渡し、標準出力を新しい内容として受け取る。

use crate::core::{SourceFile, SourceStream, TaskStream, TaskTransform};
use anyhow::{Context, Result};
use futures::StreamExt;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// 引数内でファイルパスに置換されるプレースホルダー
pub const PATH_PLACEHOLDER: &str = "{path}";

/// 外部コマンドの定義（設定ファイルの `tasks` セクション）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// 作業ディレクトリ（省略時はカレントディレクトリ）
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// プレースホルダーを展開した引数
    fn expand_args(&self, path: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, path))
            .collect()
    }
}

/// ファイルごとに外部コマンドを実行するタスク
///
/// ファイルは1つずつ順番に処理するため、出力順序は入力順序と同じ。
#[derive(Debug, Clone)]
pub struct CommandTask {
    spec: Arc<CommandSpec>,
}

impl CommandTask {
    pub fn new(spec: CommandSpec) -> Self {
        Self {
            spec: Arc::new(spec),
        }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }
}

impl TaskTransform for CommandTask {
    fn transform(&self, input: SourceStream) -> TaskStream {
        let spec = Arc::clone(&self.spec);
        input
            .then(move |file| {
                let spec = Arc::clone(&spec);
                async move { run_command(&spec, file).await }
            })
            .boxed()
    }
}

/// 単一ファイルに対してコマンドを実行
async fn run_command(spec: &CommandSpec, file: SourceFile) -> Result<SourceFile> {
    let mut command = Command::new(&spec.command);
    command
        .args(spec.expand_args(file.path()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(cwd) = &spec.cwd {
        command.current_dir(cwd);
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to spawn '{}' for {}", spec.command, file.path()))?;
    let mut stdin = child
        .stdin
        .take()
        .context("Child process stdin is not available")?;

    let input = file.contents().to_vec();
    let write = async move {
        stdin.write_all(&input).await?;
        stdin.shutdown().await
    };

    // 書き込みと読み出しを並行させないとパイプが詰まる
    let (write_result, output) = tokio::join!(write, child.wait_with_output());
    let output =
        output.with_context(|| format!("Failed to wait for '{}'", spec.command))?;

    if !output.status.success() {
        anyhow::bail!(
            "'{}' failed for {} ({}): {}",
            spec.command,
            file.path(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    // 標準入力を読まないコマンドは正常終了していれば許容する
    if let Err(error) = write_result {
        if error.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(error)
                .with_context(|| format!("Failed to write {} to '{}'", file.path(), spec.command));
        }
    }

    log::debug!(
        "'{}' produced {} bytes for {}",
        spec.command,
        output.stdout.len(),
        file.path()
    );
    Ok(file.with_contents(output.stdout))
}
