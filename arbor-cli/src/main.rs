mod cli;
mod commands;
mod config;
mod error;
mod paths;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::error::CliError;

fn load_config(cli: &Cli) -> Result<CliConfig, CliError> {
    match cli.config.clone().or_else(paths::config_file) {
        Some(path) => CliConfig::load(&path),
        None => Ok(CliConfig::default()),
    }
}

/// Starts logging to the cache directory. Logging is skipped if the
/// directory cannot be created.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(log_file) = File::create(&path) else { return };

    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli).and_then(|c| c.level_filter().map(|level| (c, level))) {
        Ok((config, level)) => {
            init_logging(level);
            config
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::debug!("Running {:?}", cli.command);
    match commands::run(cli, &config).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
