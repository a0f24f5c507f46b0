// ファイル単位のクロージャをタスクとして使うアダプター

use crate::core::{SourceFile, SourceStream, TaskStream, TaskTransform};
use futures::StreamExt;
use std::sync::Arc;

/// 1ファイルずつ同期的に変換するタスク
///
/// 出力順序は入力順序と同じ。
pub struct FnTask<F> {
    f: Arc<F>,
}

impl<F> FnTask<F>
where
    F: Fn(SourceFile) -> anyhow::Result<SourceFile> + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f: Arc::new(f) }
    }
}

impl<F> TaskTransform for FnTask<F>
where
    F: Fn(SourceFile) -> anyhow::Result<SourceFile> + Send + Sync + 'static,
{
    fn transform(&self, input: SourceStream) -> TaskStream {
        let f = Arc::clone(&self.f);
        input.map(move |file| f(file)).boxed()
    }
}
