//! Insert operations for all catalog entity types.
//!
//! Every function here appends rows; nothing updates or deletes. Callers
//! decide the transaction boundary.

use rusqlite::{params, Connection};
use steam_ingest_catalog::{Genre, NewGame, NewGameImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game. Returns the generated `game_id`.
pub fn insert_game(conn: &Connection, game: &NewGame) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Game (title, release_date, developer, price, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            game.title,
            game.release_date,
            game.developer,
            game.price,
            game.description,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Genre Operations ────────────────────────────────────────────────────────

/// Insert a genre unless a row with the same `genre_id` already exists.
///
/// Returns `true` when a row was created. The existing name is kept on
/// conflict.
pub fn ensure_genre(conn: &Connection, genre: &Genre) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT INTO Genre (genre_id, genre_name) VALUES (?1, ?2)
         ON CONFLICT(genre_id) DO NOTHING",
        params![genre.genre_id, genre.genre_name],
    )?;
    Ok(inserted == 1)
}

/// Link a game to a genre. Duplicate links are not detected.
pub fn link_game_genre(
    conn: &Connection,
    game_id: i64,
    genre_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO GameGenre (game_id, genre_id) VALUES (?1, ?2)",
        params![game_id, genre_id],
    )?;
    Ok(())
}

// ── Image Operations ────────────────────────────────────────────────────────

/// Insert an image row stamped with the current time. Returns the generated `image_id`.
pub fn insert_game_image(
    conn: &Connection,
    image: &NewGameImage,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO GameImage (game_id, image_url, image_type, sort_order)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            image.game_id,
            image.image_url,
            image.image_type.as_str(),
            image.sort_order,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
