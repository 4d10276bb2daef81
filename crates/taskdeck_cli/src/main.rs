//! CLI entry point for TaskDeck.

mod cli;
mod commands;
mod output;

use clap::Parser;

use crate::cli::Cli;

/// Load configuration from env files.
/// Order: 1) ~/.taskdeck/env  2) .taskdeck/env (walking up from cwd)  3) .env (project root)
fn load_taskdeck_config() {
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".taskdeck").join("env");
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd;
        for _ in 0..32 {
            let project_env = dir.join(".taskdeck").join("env");
            if project_env.exists() {
                let _ = dotenvy::from_path(&project_env);
                break;
            }
            if let Some(parent) = dir.parent() {
                dir = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd;
        for _ in 0..32 {
            let env_file = dir.join(".env");
            if env_file.exists() {
                let _ = dotenvy::from_path(&env_file);
                break;
            }
            if let Some(parent) = dir.parent() {
                dir = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    load_taskdeck_config();
    let cli = Cli::parse();
    output::init(cli.output);

    let log_level = if cli.verbose { Some("debug") } else { None };
    let mut observability = taskdeck_observability::ObservabilityConfig::from_env();
    if let Some(level) = log_level {
        observability = observability.with_log_level(level);
    }
    if let Err(e) = taskdeck_observability::init(observability) {
        output::warning(&format!("tracing init failed: {e}"));
    }

    if let Err(e) = commands::handle(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
