use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_ingest_store::{SettingSource, SettingSources, Settings, SettingsFile};

use crate::CliError;

/// The config file in effect: the `--config` path or the default location.
fn effective_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(steam_ingest_store::config_path)
}

/// Show resolved settings and where each came from.
pub(crate) fn run_config_show(
    settings: &Settings,
    sources: &SettingSources,
    explicit: Option<&Path>,
) {
    log::info!(
        "{}",
        "steam-ingest Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match effective_config_path(explicit) {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let app_ids = settings
        .app_ids
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let fields: [(&str, String, &SettingSource); 6] = [
        ("app_ids", app_ids, &sources.app_ids),
        (
            "db_path",
            settings.db_path.display().to_string(),
            &sources.db_path,
        ),
        ("country", settings.store.country.clone(), &sources.country),
        ("language", settings.store.language.clone(), &sources.language),
        (
            "request_interval",
            format!("{} ms", settings.store.request_interval.as_millis()),
            &sources.request_interval,
        ),
        (
            "timeout",
            format!("{} s", settings.store.timeout.as_secs()),
            &sources.timeout,
        ),
    ];

    for (name, value, source) in &fields {
        let source_str = format!("({})", source);
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Print the config file path.
pub(crate) fn run_config_path(explicit: Option<&Path>) {
    match effective_config_path(explicit) {
        Some(path) => log::info!("{}", path.display()),
        None => log::warn!("Could not determine config directory"),
    }
}

/// Write the resolved settings as a starter config file.
pub(crate) fn run_config_init(
    settings: &Settings,
    explicit: Option<&Path>,
    force: bool,
) -> Result<(), CliError> {
    let path = effective_config_path(explicit)
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;

    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    steam_ingest_store::write_config(&path, &SettingsFile::from_settings(settings))
        .map_err(|e| CliError::config(e.to_string()))?;

    log::info!(
        "  {} Wrote {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
