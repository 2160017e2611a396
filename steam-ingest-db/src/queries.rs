//! Read queries for the catalog database.
//!
//! Provides game lookup, per-game genres and images, listing, and counts.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use steam_ingest_catalog::{Game, GameDetail, GameImage, Genre, ImageType};

use crate::operations::OperationError;

// ── Game Lookups ────────────────────────────────────────────────────────────

/// Find a game by its generated key.
pub fn find_game(conn: &Connection, game_id: i64) -> Result<Option<Game>, OperationError> {
    conn.query_row(
        "SELECT game_id, title, release_date, developer, price, description
         FROM Game WHERE game_id = ?1",
        params![game_id],
        row_to_game,
    )
    .optional()
    .map_err(Into::into)
}

/// List the most recently inserted games, newest first.
pub fn list_games(conn: &Connection, limit: u32) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT game_id, title, release_date, developer, price, description
         FROM Game ORDER BY game_id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Load a game with its genres and images.
pub fn game_detail(conn: &Connection, game_id: i64) -> Result<GameDetail, OperationError> {
    let game = find_game(conn, game_id)?.ok_or_else(|| OperationError::NotFound {
        entity_type: "game".to_string(),
        id: game_id.to_string(),
    })?;
    Ok(GameDetail {
        genres: genres_for_game(conn, game_id)?,
        images: images_for_game(conn, game_id)?,
        game,
    })
}

// ── Genre Lookups ───────────────────────────────────────────────────────────

/// Genres linked to a game, in link order. Duplicate links appear once.
pub fn genres_for_game(conn: &Connection, game_id: i64) -> Result<Vec<Genre>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT g.genre_id, g.genre_name
         FROM GameGenre gg JOIN Genre g ON g.genre_id = gg.genre_id
         WHERE gg.game_id = ?1
         GROUP BY g.genre_id
         ORDER BY MIN(gg.rowid)",
    )?;
    let rows = stmt.query_map(params![game_id], |row| {
        Ok(Genre {
            genre_id: row.get(0)?,
            genre_name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Image Lookups ───────────────────────────────────────────────────────────

/// Images for a game: the thumbnail first, then details by sort order.
pub fn images_for_game(
    conn: &Connection,
    game_id: i64,
) -> Result<Vec<GameImage>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT image_id, game_id, image_url, image_type, sort_order, created_at
         FROM GameImage WHERE game_id = ?1
         ORDER BY CASE image_type WHEN 'thumbnail' THEN 0 ELSE 1 END, sort_order",
    )?;
    let rows = stmt.query_map(params![game_id], row_to_image)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get row counts for the catalog.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM Game", [], |r| r.get(0))?;
    let genres: i64 = conn.query_row("SELECT COUNT(*) FROM Genre", [], |r| r.get(0))?;
    let genre_links: i64 = conn.query_row("SELECT COUNT(*) FROM GameGenre", [], |r| r.get(0))?;
    let thumbnails: i64 = conn.query_row(
        "SELECT COUNT(*) FROM GameImage WHERE image_type = 'thumbnail'",
        [],
        |r| r.get(0),
    )?;
    let details: i64 = conn.query_row(
        "SELECT COUNT(*) FROM GameImage WHERE image_type = 'detail'",
        [],
        |r| r.get(0),
    )?;

    Ok(CatalogStats {
        games,
        genres,
        genre_links,
        thumbnails,
        details,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub games: i64,
    pub genres: i64,
    pub genre_links: i64,
    pub thumbnails: i64,
    pub details: i64,
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        game_id: row.get(0)?,
        title: row.get(1)?,
        release_date: row.get(2)?,
        developer: row.get(3)?,
        price: row.get(4)?,
        description: row.get(5)?,
    })
}

fn row_to_image(row: &rusqlite::Row<'_>) -> rusqlite::Result<GameImage> {
    let type_str: String = row.get(3)?;
    let image_type: ImageType = type_str
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(GameImage {
        image_id: row.get(0)?,
        game_id: row.get(1)?,
        image_url: row.get(2)?,
        image_type,
        sort_order: row.get(4)?,
        created_at: row.get(5)?,
    })
}
