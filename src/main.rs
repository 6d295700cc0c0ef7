// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (layers) --> Logging --> Command Dispatch
//!   Hunt | List | Restore | Options | Configs | Version
//! ```

use std::process::ExitCode;

use modhunt::cli::global::GlobalOptions;
use modhunt::cli::{self, Command};
use modhunt::cmd::config::{run_configs_command, run_options_command};
use modhunt::cmd::hunt::run_hunt_command;
use modhunt::cmd::list::run_list_command;
use modhunt::cmd::restore::run_restore_command;
use modhunt::config::Config;
use modhunt::error::Result;
use modhunt::logging::init_logging;
use modhunt::logging::{LogConfig, LogGuard};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let (config, config_files) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &config_files).await
}

fn start_logging(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build();
    init_logging(&log_config)
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, config_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        None | Some(Command::Hunt) => match run_hunt_command(config).await {
            Ok(report) => return exit_code(report.exit_code()),
            Err(e) => Err(e),
        },
        Some(Command::List(args)) => run_list_command(args, config),
        Some(Command::Restore) => run_restore_command(config).map(|_| ()),
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Configs) => {
            run_configs_command(config_files);
            Ok(())
        }
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("modhunt {}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> Result<(Config, Vec<String>)> {
    let loader = global.config_loader()?;
    let files = loader.format_loaded_files();
    Ok((loader.build()?, files))
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
