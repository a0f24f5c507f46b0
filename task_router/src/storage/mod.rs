use crate::core::{RouterError, RouterResult, SourceFile};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

pub mod local;

/// ストレージ内のファイルを表す構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageItem {
    /// ルートからの相対パス（区切り文字は `/`）
    pub id: String,
}

/// ストレージバックエンドのトレイト
#[automock]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// ルート以下の全ファイルを再帰的にリストする（ディレクトリは含まない）
    async fn list_items(&self, root: &str) -> Result<Vec<StorageItem>>;

    /// ファイルの内容を読み込む
    async fn read_item(&self, root: &str, id: &str) -> Result<Vec<u8>>;

    /// ファイルを書き込む（親ディレクトリは自動作成）
    async fn write_item(&self, root: &str, id: &str, contents: &[u8]) -> Result<()>;
}

// StorageBackend for Box<dyn StorageBackend>
#[async_trait]
impl StorageBackend for Box<dyn StorageBackend> {
    async fn list_items(&self, root: &str) -> Result<Vec<StorageItem>> {
        self.as_ref().list_items(root).await
    }

    async fn read_item(&self, root: &str, id: &str) -> Result<Vec<u8>> {
        self.as_ref().read_item(root, id).await
    }

    async fn write_item(&self, root: &str, id: &str, contents: &[u8]) -> Result<()> {
        self.as_ref().write_item(root, id, contents).await
    }
}

/// 1ファイルを `SourceFile` として読み込む
///
/// パスはルートからの相対パスになる。
pub async fn read_file<S>(backend: &S, root: &str, id: &str) -> RouterResult<SourceFile>
where
    S: StorageBackend + ?Sized,
{
    let contents = backend
        .read_item(root, id)
        .await
        .map_err(|e| RouterError::storage(id, e))?;
    Ok(SourceFile::new(id, contents))
}

/// `SourceFile` をルート以下へ書き出す
pub async fn write_file<S>(backend: &S, root: &str, file: &SourceFile) -> RouterResult<()>
where
    S: StorageBackend + ?Sized,
{
    backend
        .write_item(root, file.path(), file.contents())
        .await
        .map_err(|e| RouterError::storage(file.path(), e))
}
