// 除外パターン - ルールの `exclude` グロブ
// パス全体に対して照合する。`\` は `/` として扱い、先頭の `./` は無視する

use crate::core::{RouterError, RouterResult};
use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// コンパイル済みの除外パターン
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    pattern: String,
    compiled: Pattern,
}

impl ExcludePattern {
    /// 不正なパターンは設定エラー
    pub fn new(pattern: &str) -> RouterResult<Self> {
        let compiled = Pattern::new(pattern).map_err(|e| {
            RouterError::configuration(format!("Invalid exclude pattern '{pattern}': {e}"))
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            compiled,
        })
    }

    /// パスが除外対象か
    pub fn matches_path(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        let target = normalized.strip_prefix("./").unwrap_or(&normalized);
        self.compiled.matches_with(target, MATCH_OPTIONS)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
