mod common;

use std::cell::RefCell;

use common::*;
use serde_json::json;
use steam_ingest_db::*;
use steam_ingest_import::*;

#[test]
fn test_ingest_elden_ring_end_to_end() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean").with_app(1245620, elden_ring());

    let report = ingest_apps(&conn, &source, &[1245620], &IngestOptions::default(), None);
    assert_eq!(report.stored(), 1);

    let Some(IngestOutcome::Stored {
        game_id,
        title,
        images,
        genres,
    }) = report.outcome_for(1245620)
    else {
        panic!("expected stored outcome, got {:?}", report.outcomes);
    };
    assert_eq!(title, "ELDEN RING");
    assert_eq!(*images, 4);
    assert_eq!(*genres, 2);

    let detail = game_detail(&conn, *game_id).unwrap();
    assert_eq!(detail.game.developer, "FromSoftware, Inc.");
    assert_eq!(
        detail.game.release_date.map(|d| d.to_string()).as_deref(),
        Some("2022-02-25")
    );
    assert_eq!(
        detail.thumbnail().map(|i| i.image_url.as_str()),
        Some("https://cdn.example/1245620/header.jpg")
    );
    assert_eq!(detail.details().count(), 3);
    assert_eq!(detail.genres.len(), 2);

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(
        stats,
        CatalogStats {
            games: 1,
            genres: 2,
            genre_links: 2,
            thumbnails: 1,
            details: 3,
        }
    );
}

#[test]
fn test_ingest_skips_unsuccessful_app() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean")
        .with_unavailable(10)
        .with_app(1086940, baldurs_gate());

    let report = ingest_apps(&conn, &source, &[10, 1086940], &IngestOptions::default(), None);
    assert_eq!(report.outcome_for(10), Some(&IngestOutcome::Skipped));
    assert_eq!(report.stored(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(count(&conn, "Game"), 1);
}

#[test]
fn test_failed_stage_rolls_back_and_batch_continues() {
    let conn = open_memory().unwrap();
    let broken = json!({
        "name": "Broken Screenshots",
        "header_image": "https://cdn.example/7/header.jpg",
        "screenshots": [
            { "id": 0, "path_full": "https://cdn.example/7/ss_0.jpg" },
            { "id": 1 }
        ],
        "genres": [ { "id": "1", "description": "Action" } ]
    });
    let source = CannedSource::new("korean")
        .with_app(7, broken)
        .with_app(1245620, elden_ring());

    let report = ingest_apps(&conn, &source, &[7, 1245620], &IngestOptions::default(), None);

    match report.outcome_for(7) {
        Some(IngestOutcome::Failed { reason }) => {
            assert!(reason.contains("screenshots.path_full"), "reason: {reason}")
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(report.stored(), 1);
    assert_eq!(report.failed(), 1);

    // Nothing from AppID 7 survives, including its game row and first screenshot
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.games, 1);
    assert_eq!(stats.thumbnails, 1);
    assert_eq!(stats.details, 3);
    let titles: Vec<String> = list_games(&conn, 10)
        .unwrap()
        .into_iter()
        .map(|g| g.title)
        .collect();
    assert_eq!(titles, vec!["ELDEN RING"]);
}

#[test]
fn test_transport_failure_is_reported() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean").with_app(1245620, elden_ring());

    let report = ingest_apps(&conn, &source, &[999, 1245620], &IngestOptions::default(), None);
    assert!(matches!(
        report.outcome_for(999),
        Some(IngestOutcome::Failed { .. })
    ));
    assert_eq!(report.stored(), 1);
}

#[test]
fn test_malformed_body_is_reported() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean").with_raw(5, "<html>busy</html>");

    let report = ingest_apps(&conn, &source, &[5], &IngestOptions::default(), None);
    assert_eq!(report.failed(), 1);
    assert_eq!(count(&conn, "Game"), 0);
}

#[test]
fn test_each_app_fetched_once_in_order() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean")
        .with_app(1245620, elden_ring())
        .with_app(1086940, baldurs_gate())
        .with_unavailable(10);

    ingest_apps(
        &conn,
        &source,
        &[1086940, 10, 1245620],
        &IngestOptions::default(),
        None,
    );
    assert_eq!(*source.requests.borrow(), vec![1086940, 10, 1245620]);
}

#[test]
fn test_rerun_duplicates_games_but_not_genres() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean").with_app(1245620, elden_ring());

    ingest_apps(&conn, &source, &[1245620], &IngestOptions::default(), None);
    ingest_apps(&conn, &source, &[1245620], &IngestOptions::default(), None);

    assert_eq!(count(&conn, "Game"), 2);
    assert_eq!(count(&conn, "GameGenre"), 4);
    assert_eq!(count(&conn, "Genre"), 2);
    assert_eq!(count(&conn, "GameImage"), 8);
}

#[test]
fn test_dry_run_writes_nothing() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean")
        .with_app(1245620, elden_ring())
        .with_app(1086940, baldurs_gate());

    let report = ingest_apps(
        &conn,
        &source,
        &[1245620, 1086940],
        &IngestOptions { dry_run: true },
        None,
    );
    assert_eq!(report.stored(), 2);
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn test_coming_soon_stores_null_date() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean").with_app(
        1030300,
        json!({
            "name": "Hollow Knight: Silksong",
            "release_date": { "coming_soon": true, "date": "Coming Soon" },
            "developers": ["Team Cherry"],
            "header_image": "https://cdn.example/1030300/header.jpg"
        }),
    );

    let report = ingest_apps(&conn, &source, &[1030300], &IngestOptions::default(), None);
    let Some(IngestOutcome::Stored { game_id, .. }) = report.outcome_for(1030300) else {
        panic!("expected stored outcome");
    };
    let game = find_game(&conn, *game_id).unwrap().unwrap();
    assert!(game.release_date.is_none());
    let raw: Option<String> = conn
        .query_row(
            "SELECT release_date FROM Game WHERE game_id = ?1",
            [game_id],
            |r| r.get(0),
        )
        .unwrap();
    assert!(raw.is_none());
}

#[test]
fn test_empty_app_list() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean");
    let report = ingest_apps(&conn, &source, &[], &IngestOptions::default(), None);
    assert!(report.outcomes.is_empty());
    assert!(source.requests.borrow().is_empty());
}

// ── Progress ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingProgress {
    events: RefCell<Vec<String>>,
}

impl IngestProgress for RecordingProgress {
    fn on_app_start(&self, current: usize, total: usize, app_id: u32) {
        self.events
            .borrow_mut()
            .push(format!("start {current}/{total} {app_id}"));
    }

    fn on_app_done(&self, current: usize, total: usize, outcome: &AppOutcome) {
        let kind = match outcome.outcome {
            IngestOutcome::Stored { .. } => "stored",
            IngestOutcome::Skipped => "skipped",
            IngestOutcome::Failed { .. } => "failed",
        };
        self.events
            .borrow_mut()
            .push(format!("done {current}/{total} {} {kind}", outcome.app_id));
    }

    fn on_complete(&self, report: &IngestReport) {
        self.events
            .borrow_mut()
            .push(format!("complete {}", report.outcomes.len()));
    }
}

#[test]
fn test_progress_callbacks() {
    let conn = open_memory().unwrap();
    let source = CannedSource::new("korean")
        .with_app(1245620, elden_ring())
        .with_unavailable(10);
    let progress = RecordingProgress::default();

    ingest_apps(
        &conn,
        &source,
        &[1245620, 10, 3],
        &IngestOptions::default(),
        Some(&progress),
    );

    assert_eq!(
        *progress.events.borrow(),
        vec![
            "start 1/3 1245620",
            "done 1/3 1245620 stored",
            "start 2/3 10",
            "done 2/3 10 skipped",
            "start 3/3 3",
            "done 3/3 3 failed",
            "complete 3",
        ]
    );
}

#[test]
fn test_outcome_display() {
    let stored = IngestOutcome::Stored {
        game_id: 3,
        title: "ELDEN RING".to_string(),
        images: 4,
        genres: 2,
    };
    assert_eq!(
        stored.to_string(),
        "stored ELDEN RING as game_id 3 (4 images, 2 genres)"
    );
    assert_eq!(IngestOutcome::Skipped.to_string(), "skipped");
}

fn mixed_batch_source() -> CannedSource {
    CannedSource::new("korean")
        .with_app(1245620, elden_ring())
        .with_unavailable(10)
}

#[test]
fn test_silent_progress_batch() {
    let conn = open_memory().unwrap();
    let source = mixed_batch_source();

    let report = ingest_apps(
        &conn,
        &source,
        &[1245620, 10, 3],
        &IngestOptions::default(),
        Some(&SilentProgress),
    );
    assert_eq!(
        (report.stored(), report.skipped(), report.failed()),
        (1, 1, 1)
    );
    assert_eq!(count(&conn, "Game"), 1);
}

#[test]
fn test_log_progress_batch() {
    let conn = open_memory().unwrap();
    let source = mixed_batch_source();

    let report = ingest_apps(
        &conn,
        &source,
        &[1245620, 10, 3],
        &IngestOptions::default(),
        Some(&LogProgress),
    );
    assert_eq!(
        (report.stored(), report.skipped(), report.failed()),
        (1, 1, 1)
    );
    assert_eq!(catalog_stats(&conn).unwrap().details, 3);
}
