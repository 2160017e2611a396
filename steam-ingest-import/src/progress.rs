//! Ingest progress reporting.

use crate::driver::{AppOutcome, IngestReport};

/// Trait for receiving ingest progress updates.
pub trait IngestProgress {
    /// Called before an AppID is fetched. `current` is 1-based.
    fn on_app_start(&self, current: usize, total: usize, app_id: u32);

    /// Called after an AppID is committed, skipped, or rolled back.
    fn on_app_done(&self, current: usize, total: usize, outcome: &AppOutcome);

    /// Called once after the last AppID.
    fn on_complete(&self, report: &IngestReport);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl IngestProgress for SilentProgress {
    fn on_app_start(&self, _current: usize, _total: usize, _app_id: u32) {}
    fn on_app_done(&self, _current: usize, _total: usize, _outcome: &AppOutcome) {}
    fn on_complete(&self, _report: &IngestReport) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl IngestProgress for LogProgress {
    fn on_app_start(&self, current: usize, total: usize, app_id: u32) {
        log::debug!("  [{}/{}] AppID {}", current, total, app_id);
    }

    fn on_app_done(&self, current: usize, total: usize, outcome: &AppOutcome) {
        log::info!(
            "  [{}/{}] AppID {}: {}",
            current,
            total,
            outcome.app_id,
            outcome.outcome
        );
    }

    fn on_complete(&self, report: &IngestReport) {
        log::info!(
            "Ingest complete: {} stored, {} skipped, {} failed",
            report.stored(),
            report.skipped(),
            report.failed()
        );
    }
}
