use clap::Parser;
use task_router::cli::{execute_check, execute_run, severity_label, Cli, Commands, RunConfig};

#[tokio::main]
async fn main() {
    // RUST_LOG未指定時は警告以上のみ出力
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            src,
            dest,
            quiet,
            verbose,
        } => execute_run(RunConfig {
            config,
            src,
            dest,
            quiet,
            verbose,
        })
        .await
        .map(|_| ()),
        Commands::Check { config } => execute_check(&config).await.map(|_| ()),
    };

    if let Err(error) = result {
        eprintln!("❌ エラー [{}]: {error:#}", severity_label(&error));
        std::process::exit(1);
    }
}
