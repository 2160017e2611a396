//! Record a game's genres and its game/genre links.

use rusqlite::Connection;
use steam_ingest_catalog::Genre;
use steam_ingest_db::operations;
use steam_ingest_store::AppData;

use crate::error::IngestError;

/// Counts from recording one game's genres.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenreStats {
    /// Genre reference rows that did not exist before.
    pub genres_created: u64,
    /// Game/genre link rows written.
    pub links_created: u64,
}

/// Insert missing genres and link each listed genre to `game_id`.
///
/// An empty or absent genre list writes nothing.
pub fn record_genres(
    conn: &Connection,
    game_id: i64,
    data: &AppData,
) -> Result<GenreStats, IngestError> {
    let mut stats = GenreStats::default();

    let entries = data.genres();
    if entries.is_empty() {
        log::info!("No genres (game_id={})", game_id);
        return Ok(stats);
    }

    for entry in entries {
        let genre = Genre {
            genre_id: entry.id,
            genre_name: entry.description.clone(),
        };
        if operations::ensure_genre(conn, &genre)? {
            stats.genres_created += 1;
        }
        operations::link_game_genre(conn, game_id, genre.genre_id)?;
        stats.links_created += 1;
    }

    log::info!(
        "Genres saved (game_id={}): {} linked, {} new",
        game_id,
        stats.links_created,
        stats.genres_created
    );
    Ok(stats)
}
