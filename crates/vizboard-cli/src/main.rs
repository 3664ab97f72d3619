//! Vizboard command-line client.

use std::future::Future;
use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use vizboard_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    CliOpener, build_controller, load_settings, run_check, run_delete, run_deps,
    run_derive_category, run_export, run_fetch, run_list, run_save, run_share,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Check(args) => {
            let report = run_check(args)?;
            Ok(if report.readiness.is_ready() { 0 } else { 2 })
        }
        Command::Deps(args) => run_deps(args).map(|()| 0),
        Command::DeriveCategory(args) => {
            Ok(if run_derive_category(args)?.is_some() { 0 } else { 2 })
        }
        command => {
            let settings = load_settings(cli.config.as_deref(), cli.base_url.as_deref())?;
            let opener = match command {
                Command::Export(args) if args.no_open => CliOpener::PrintOnly,
                _ => CliOpener::System,
            };
            let mut controller = build_controller(&settings, opener)?;
            block_on(async {
                match command {
                    Command::List(args) => run_list(&mut controller, args).await,
                    Command::Fetch(args) => run_fetch(&mut controller, &args.id).await.map(drop),
                    Command::Save(args) => run_save(&mut controller, &args.visualisation).await,
                    Command::Delete(args) => run_delete(&mut controller, &args.id).await,
                    Command::Export(args) => run_export(&mut controller, args).await,
                    Command::Share(args) => run_share(&mut controller, &args.id).await,
                    Command::Check(_) | Command::Deps(_) | Command::DeriveCategory(_) => Ok(()),
                }
            })??;
            Ok(0)
        }
    }
}

/// Run a future on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
