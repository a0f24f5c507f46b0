use crate::rules::RuleTable;
use crate::services::RouterConfig;
use anyhow::Result;
use std::path::Path;

/// ルール表を表示用の行に整形
pub fn format_rule_table(rules: &RuleTable) -> Vec<String> {
    rules
        .sorted_rules()
        .into_iter()
        .map(|rule| {
            let mut line = format!(
                ".{} -> [{}] -> .{}",
                rule.source_ext(),
                rule.task(),
                rule.output_ext()
            );
            if let Some(exclude) = rule.exclude() {
                line.push_str(&format!(" (exclude: {})", exclude.pattern()));
            }
            line
        })
        .collect()
}

/// Execute check command
///
/// 設定ファイルを検証し、ルール表を返す。`tasks` セクションが
/// 存在する場合はルールが参照するタスクが揃っているかも検証する。
pub async fn execute_check(config: &Path) -> Result<RuleTable> {
    let router_config = RouterConfig::load(config).await?;
    let rules = router_config.rule_table()?;

    if !router_config.tasks.is_empty() {
        router_config.command_tasks().validate(&rules)?;
    }

    println!("🔍 設定ファイル: {}", config.display());
    for line in format_rule_table(&rules) {
        println!("   {line}");
    }
    println!("✅ {}個のルールを確認しました", rules.len());

    Ok(rules)
}
