//! Fetch an app's details from the store and insert its game row.

use rusqlite::Connection;
use steam_ingest_catalog::{parse_release_date, NewGame, UNKNOWN_DEVELOPER};
use steam_ingest_db::operations;
use steam_ingest_store::{AppData, AppDetailsSource};

use crate::error::IngestError;

/// A game row that was just inserted, with the payload it came from.
#[derive(Debug, Clone)]
pub struct StoredGame {
    pub game_id: i64,
    pub title: String,
    pub data: AppData,
}

/// Fetch `app_id` and insert one game row.
///
/// Returns `Ok(None)` without writing anything when the store reports no
/// success for the AppID.
pub fn fetch_and_store(
    conn: &Connection,
    source: &dyn AppDetailsSource,
    app_id: u32,
) -> Result<Option<StoredGame>, IngestError> {
    let Some(data) = source.app_details(app_id)?.into_app_data(app_id)? else {
        log::info!("AppID {} skipped: store returned no data", app_id);
        return Ok(None);
    };

    let game = build_new_game(&data, source.language())?;
    let game_id = operations::insert_game(conn, &game)?;

    log::info!(
        "{} stored (AppID={}, game_id={})",
        game.title,
        app_id,
        game_id
    );
    Ok(Some(StoredGame {
        game_id,
        title: game.title,
        data,
    }))
}

/// Map a store payload to a game row.
///
/// `language` is the request language and selects the date format. Date
/// text that does not parse becomes `None`.
pub fn build_new_game(data: &AppData, language: &str) -> Result<NewGame, IngestError> {
    let title = data.name.clone().ok_or(IngestError::MissingField("name"))?;

    let release_date = data.release_date_text().and_then(|raw| {
        let parsed = parse_release_date(raw, language);
        if parsed.is_none() {
            if data.is_coming_soon() {
                log::debug!("{} is not released yet ('{}'), storing no date", title, raw);
            } else {
                log::debug!("No calendar date in '{}' for {}", raw, title);
            }
        }
        parsed
    });

    Ok(NewGame {
        release_date,
        developer: data
            .primary_developer()
            .unwrap_or(UNKNOWN_DEVELOPER)
            .to_string(),
        price: data.final_price(),
        description: data.short_description.clone().unwrap_or_default(),
        title,
    })
}
