// Rule Matcher - ファイル単位の振り分け判定
// 副作用のない純粋関数。ストリーム処理とは独立してテスト可能

use super::RuleTable;
use crate::core::extension::extension_of;
use crate::core::RouteDecision;
use std::sync::Arc;

/// パスに対する振り分けを判定
pub fn decide(table: &RuleTable, path: &str) -> RouteDecision {
    let Some(ext) = extension_of(path) else {
        return RouteDecision::PassThrough;
    };

    match table.get(ext) {
        Some(rule) if !rule.excludes(path) => RouteDecision::Matched(Arc::clone(rule)),
        _ => RouteDecision::PassThrough,
    }
}
