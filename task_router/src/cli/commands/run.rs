use crate::core::RouteSummary;
use crate::engine::TaskRouter;
use crate::services::{ConsoleRouteReporter, RouterConfig};
use crate::storage::local::LocalStorageBackend;
use crate::App;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Configuration struct for run command to reduce argument count
pub struct RunConfig {
    pub config: PathBuf,
    pub src: PathBuf,
    pub dest: PathBuf,
    pub quiet: bool,
    pub verbose: bool,
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 path: {}", path.display()))
}

/// Execute run command
pub async fn execute_run(config: RunConfig) -> Result<RouteSummary> {
    // Validate source directory
    if !config.src.is_dir() {
        anyhow::bail!("Source directory does not exist: {}", config.src.display());
    }
    if config.dest.exists() && !config.dest.is_dir() {
        anyhow::bail!(
            "Destination path is not a directory: {}",
            config.dest.display()
        );
    }

    let router_config = RouterConfig::load(&config.config).await?;
    let rules = router_config.rule_table()?;
    let tasks = router_config.command_tasks();

    let reporter = if config.quiet {
        ConsoleRouteReporter::quiet()
    } else if config.verbose {
        ConsoleRouteReporter::verbose()
    } else {
        ConsoleRouteReporter::new()
    };
    let router = TaskRouter::new(rules, tasks, &router_config.routing, reporter)?;

    if !config.quiet {
        println!("📂 ソース: {}", config.src.display());
        println!("📁 出力先: {}", config.dest.display());
        println!("⚙️  ルール数: {}", router.rules().len());
    }

    let start_time = std::time::Instant::now();
    let app = App::new(LocalStorageBackend::new());
    let summary = app
        .run(&router, path_str(&config.src)?, path_str(&config.dest)?)
        .await
        .with_context(|| format!("Failed to route files in {}", config.src.display()))?;

    if !config.quiet {
        println!("✅ 完了! ({:.2}秒)", start_time.elapsed().as_secs_f64());
        for (task, count) in &summary.per_task {
            println!("   - {task}: {count}");
        }
    }

    Ok(summary)
}
