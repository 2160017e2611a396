//! steam-ingest CLI
//!
//! Command-line interface for ingesting Steam storefront metadata into a
//! local SQLite game catalog.

mod cli_types;
mod commands;
mod error;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_ingest_store::{SettingOverrides, Settings, SettingSources};

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logger(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;
    let config_file = cli.config;

    let mut overrides = SettingOverrides {
        app_ids: None,
        db_path: cli.db,
        country: cli.country,
        language: cli.language,
    };
    if let Commands::Ingest { app_ids, .. } = &cli.command
        && !app_ids.is_empty()
    {
        overrides.app_ids = Some(app_ids.clone());
    }

    let load = |overrides: &SettingOverrides| -> Result<(Settings, SettingSources), CliError> {
        Settings::load(config_file.as_deref(), overrides)
            .map_err(|e| CliError::config(e.to_string()))
    };

    match cli.command {
        Commands::Ingest { dry_run, .. } => {
            let (settings, _) = load(&overrides)?;
            commands::ingest::run_ingest(&settings, dry_run, quiet)
        }
        Commands::Init => {
            let (settings, _) = load(&overrides)?;
            commands::catalog::run_init(&settings.db_path)
        }
        Commands::Show { game_id } => {
            let (settings, _) = load(&overrides)?;
            commands::catalog::run_show(&settings.db_path, game_id)
        }
        Commands::List { limit } => {
            let (settings, _) = load(&overrides)?;
            commands::catalog::run_list(&settings.db_path, limit)
        }
        Commands::Stats => {
            let (settings, _) = load(&overrides)?;
            commands::catalog::run_stats(&settings.db_path)
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path(config_file.as_deref());
                Ok(())
            }
            ConfigAction::Show => {
                let (settings, sources) = load(&overrides)?;
                commands::config::run_config_show(&settings, &sources, config_file.as_deref());
                Ok(())
            }
            ConfigAction::Init { force } => {
                // The target file may not exist yet, so it is not read here.
                let (settings, _) =
                    Settings::resolve(None, |key| std::env::var(key).ok(), &overrides)
                        .map_err(|e| CliError::config(e.to_string()))?;
                commands::config::run_config_init(&settings, config_file.as_deref(), force)
            }
        },
    }
}

/// Install the global logger.
///
/// Messages go to stdout: `info` by default, `warn` with `--quiet`, `debug`
/// with `--verbose`. `RUST_LOG` directives are applied on top. Other crates
/// only log warnings unless `RUST_LOG` says otherwise.
fn init_logger(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("steam_ingest", level)
        .parse_env("RUST_LOG")
        .format(move |buf, record| {
            if verbose {
                return writeln!(
                    buf,
                    "{} {:<5} {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.args()
                );
            }
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                _ => writeln!(buf, "{}", record.args()),
            }
        });

    match logfile {
        Some(path) => {
            let file = open_logfile(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(LogTee { file })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder.init();
    Ok(())
}

/// Create (or truncate) the log file.
fn open_logfile(path: &Path) -> Result<std::fs::File, CliError> {
    Ok(std::fs::File::create(path)?)
}

/// Copies log output to stdout and, with ANSI codes stripped, to a file.
struct LogTee {
    file: std::fs::File,
}

impl Write for LogTee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

/// Emit an empty log line.
pub(crate) fn log_blank() {
    log::info!("");
}
