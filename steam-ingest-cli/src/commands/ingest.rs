use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use steam_ingest_import::{
    AppOutcome, IngestOptions, IngestOutcome, IngestProgress, IngestReport, ingest_apps,
};
use steam_ingest_store::{Settings, SteamStoreClient};

use crate::CliError;

/// Ingest the configured AppIDs into the catalog database.
///
/// Only setup failures are errors; per-AppID failures are reported.
pub(crate) fn run_ingest(settings: &Settings, dry_run: bool, quiet: bool) -> Result<(), CliError> {
    let conn = steam_ingest_db::open_database(&settings.db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            settings.db_path.display(),
            e
        ))
    })?;

    let client = SteamStoreClient::new(settings.store.clone())
        .map_err(|e| CliError::store(format!("Failed to create store client: {}", e)))?;

    log::info!(
        "{}",
        format!(
            "Ingesting {} AppID(s) into {} (cc={}, l={})",
            settings.app_ids.len(),
            settings.db_path.display(),
            settings.store.country,
            settings.store.language,
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    if dry_run {
        log::info!(
            "  {}",
            "Dry run: every AppID will be rolled back".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    let progress = CliIngestProgress::new(quiet);
    ingest_apps(
        &conn,
        &client,
        &settings.app_ids,
        &IngestOptions { dry_run },
        Some(&progress),
    );

    Ok(())
}

/// CLI progress reporter: a spinner while fetching, one line per AppID.
struct CliIngestProgress {
    spinner: ProgressBar,
}

impl CliIngestProgress {
    fn new(quiet: bool) -> Self {
        let spinner = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        spinner.set_style(style);
        Self { spinner }
    }
}

impl IngestProgress for CliIngestProgress {
    fn on_app_start(&self, current: usize, total: usize, app_id: u32) {
        self.spinner.reset();
        self.spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner
            .set_message(format!("[{}/{}] Fetching AppID {}", current, total, app_id));
    }

    fn on_app_done(&self, current: usize, total: usize, outcome: &AppOutcome) {
        self.spinner.disable_steady_tick();
        self.spinner.finish_and_clear();

        let counter = format!("[{}/{}]", current, total);
        match &outcome.outcome {
            IngestOutcome::Stored {
                game_id,
                title,
                images,
                genres,
            } => log::info!(
                "  {} {} AppID {} {} (game_id {}, {} images, {} genres)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                counter.if_supports_color(Stdout, |t| t.dimmed()),
                outcome.app_id,
                title.if_supports_color(Stdout, |t| t.bold()),
                game_id,
                images,
                genres,
            ),
            IngestOutcome::Skipped => log::info!(
                "  {} {} AppID {} {}",
                "-".if_supports_color(Stdout, |t| t.yellow()),
                counter.if_supports_color(Stdout, |t| t.dimmed()),
                outcome.app_id,
                "skipped: no store data".if_supports_color(Stdout, |t| t.dimmed()),
            ),
            IngestOutcome::Failed { reason } => log::info!(
                "  {} {} AppID {} failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                counter.if_supports_color(Stdout, |t| t.dimmed()),
                outcome.app_id,
                reason,
            ),
        }
    }

    fn on_complete(&self, report: &IngestReport) {
        crate::log_blank();
        log::info!(
            "{}",
            "Ingest complete".if_supports_color(Stdout, |t| t.bold()),
        );
        log::info!(
            "  {} stored, {} skipped, {} failed",
            report.stored(),
            report.skipped(),
            report.failed(),
        );
    }
}
