// ルーティング処理専用のカスタムエラー型定義

use thiserror::Error;

/// タスクルーター固有のエラー型
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("タスク変換エラー: {task} - {source}")]
    TaskTransformError {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("チャンネルエラー: {message}")]
    ChannelError { message: String },

    #[error("タスク実行エラー: {source}")]
    TaskJoinError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("ストレージエラー: {path} - {source}")]
    StorageError {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RouterError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// タスク変換エラーの作成
    pub fn task_transform(task: impl Into<String>, source: anyhow::Error) -> Self {
        Self::TaskTransformError {
            task: task.into(),
            source,
        }
    }

    /// チャンネルエラーの作成
    pub fn channel(message: impl Into<String>) -> Self {
        Self::ChannelError {
            message: message.into(),
        }
    }

    /// ストレージエラーの作成
    pub fn storage(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::StorageError {
            path: path.into(),
            source,
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::Critical,
            Self::TaskTransformError { .. } | Self::TaskJoinError { .. } => ErrorSeverity::High,
            Self::ChannelError { .. } | Self::StorageError { .. } => ErrorSeverity::Medium,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - 実行中止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// ルーティング処理の結果型
pub type RouterResult<T> = std::result::Result<T, RouterError>;

impl From<tokio::task::JoinError> for RouterError {
    fn from(error: tokio::task::JoinError) -> Self {
        RouterError::TaskJoinError { source: error }
    }
}
