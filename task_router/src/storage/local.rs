use super::{StorageBackend, StorageItem};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ローカルファイルシステム用のストレージバックエンド
#[derive(Debug, Clone, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    /// 相対パスをルート以下の実パスへ変換
    ///
    /// `..` や絶対パスでルートの外へ出ることは許さない。
    fn resolve(root: &str, id: &str) -> Result<PathBuf> {
        let relative = Path::new(id);
        let escapes = relative.components().any(|c| {
            !matches!(
                c,
                std::path::Component::Normal(_) | std::path::Component::CurDir
            )
        });
        if escapes || id.is_empty() {
            anyhow::bail!("Path escapes the storage root: {id}");
        }
        Ok(Path::new(root).join(relative))
    }

    /// ルート以下のファイルを同期的に走査
    fn scan(root: &Path) -> Result<Vec<StorageItem>> {
        let mut items = Vec::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry =
                entry.with_context(|| format!("Failed to scan directory: {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .with_context(|| format!("Unexpected path: {}", entry.path().display()))?;
            let id = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            items.push(StorageItem { id });
        }

        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}

#[async_trait]
impl StorageBackend for LocalStorageBackend {
    async fn list_items(&self, root: &str) -> Result<Vec<StorageItem>> {
        let root_path = PathBuf::from(root);
        if !root_path.is_dir() {
            anyhow::bail!("Not a directory: {root}");
        }

        // walkdirは同期APIのためブロッキングスレッドで実行
        tokio::task::spawn_blocking(move || Self::scan(&root_path))
            .await
            .context("Directory scan task failed")?
    }

    async fn read_item(&self, root: &str, id: &str) -> Result<Vec<u8>> {
        let path = Self::resolve(root, id)?;
        let data = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(data)
    }

    async fn write_item(&self, root: &str, id: &str, contents: &[u8]) -> Result<()> {
        let path = Self::resolve(root, id)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }
}
