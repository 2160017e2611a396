//! Batch driver: one transaction per AppID, failures reported and skipped.

use std::fmt;

use rusqlite::Connection;
use steam_ingest_store::AppDetailsSource;

use crate::error::IngestError;
use crate::fetch::fetch_and_store;
use crate::genres::record_genres;
use crate::images::record_images;
use crate::progress::IngestProgress;

/// Options for an ingest run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Run every stage but roll back each AppID's transaction.
    pub dry_run: bool,
}

/// What happened to one AppID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The game, its images and its genre links were written.
    Stored {
        game_id: i64,
        title: String,
        images: u64,
        genres: u64,
    },
    /// The store reported no data; nothing was written.
    Skipped,
    /// A stage failed; everything written for this AppID was rolled back.
    Failed { reason: String },
}

impl fmt::Display for IngestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestOutcome::Stored {
                game_id,
                title,
                images,
                genres,
            } => write!(
                f,
                "stored {} as game_id {} ({} images, {} genres)",
                title, game_id, images, genres
            ),
            IngestOutcome::Skipped => write!(f, "skipped"),
            IngestOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOutcome {
    pub app_id: u32,
    pub outcome: IngestOutcome,
}

/// Per-AppID outcomes of a run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub outcomes: Vec<AppOutcome>,
}

impl IngestReport {
    pub fn stored(&self) -> usize {
        self.count(|o| matches!(o, IngestOutcome::Stored { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, IngestOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, IngestOutcome::Failed { .. }))
    }

    /// Outcome recorded for `app_id`. With repeated AppIDs this is the first.
    pub fn outcome_for(&self, app_id: u32) -> Option<&IngestOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.app_id == app_id)
            .map(|o| &o.outcome)
    }

    fn count(&self, pred: impl Fn(&IngestOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }
}

/// Ingest a single AppID inside its own transaction.
///
/// Fetch-and-store runs first; images and genres run only when a game row
/// was created. Any error rolls back every row written for this AppID.
pub fn ingest_app(
    conn: &Connection,
    source: &dyn AppDetailsSource,
    app_id: u32,
    options: &IngestOptions,
) -> Result<IngestOutcome, IngestError> {
    let tx = conn.unchecked_transaction()?;

    let Some(stored) = fetch_and_store(&tx, source, app_id)? else {
        return Ok(IngestOutcome::Skipped);
    };
    let images = record_images(&tx, stored.game_id, &stored.data)?;
    let genres = record_genres(&tx, stored.game_id, &stored.data)?;

    if options.dry_run {
        tx.rollback()?;
        log::info!("AppID {} rolled back (dry run)", app_id);
    } else {
        tx.commit()?;
    }

    Ok(IngestOutcome::Stored {
        game_id: stored.game_id,
        title: stored.title,
        images: images.total(),
        genres: genres.links_created,
    })
}

/// Ingest every AppID in order, once each as given.
///
/// A failure for one AppID is logged and recorded in the report; the
/// remaining AppIDs are still processed.
pub fn ingest_apps(
    conn: &Connection,
    source: &dyn AppDetailsSource,
    app_ids: &[u32],
    options: &IngestOptions,
    progress: Option<&dyn IngestProgress>,
) -> IngestReport {
    let total = app_ids.len();
    let mut report = IngestReport::default();

    for (i, &app_id) in app_ids.iter().enumerate() {
        if let Some(p) = progress {
            p.on_app_start(i + 1, total, app_id);
        }

        let outcome = match ingest_app(conn, source, app_id, options) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("AppID {} failed: {}", app_id, e);
                IngestOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let entry = AppOutcome { app_id, outcome };
        if let Some(p) = progress {
            p.on_app_done(i + 1, total, &entry);
        }
        report.outcomes.push(entry);
    }

    if let Some(p) = progress {
        p.on_complete(&report);
    }
    report
}
