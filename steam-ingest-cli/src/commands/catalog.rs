//! Catalog database commands: init, show, list, stats.

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use steam_ingest_db::OperationError;

use super::{format_price, truncate_str};
use crate::CliError;

/// Create the database, or bring an existing one up to the current schema.
pub(crate) fn run_init(db_path: &Path) -> Result<(), CliError> {
    let existed = db_path.exists();
    let conn = steam_ingest_db::open_database(db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            db_path.display(),
            e
        ))
    })?;
    let version = steam_ingest_db::schema::get_schema_version(&conn)
        .map_err(|e| CliError::database(e.to_string()))?;

    let verb = if existed { "Opened" } else { "Created" };
    log::info!(
        "  {} {} catalog database at {} (schema v{})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        verb,
        db_path.display().if_supports_color(Stdout, |t| t.cyan()),
        version,
    );
    Ok(())
}

/// Show one game with its genres and images.
pub(crate) fn run_show(db_path: &Path, game_id: i64) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let detail = match steam_ingest_db::game_detail(&conn, game_id) {
        Ok(d) => d,
        Err(OperationError::NotFound { .. }) => {
            return Err(CliError::not_found(format!("game_id {}", game_id)));
        }
        Err(e) => return Err(CliError::database(e.to_string())),
    };
    let game = &detail.game;

    log::info!(
        "{}",
        game.title.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Game ID:      {}", game.game_id);
    log::info!(
        "  Released:     {}",
        game.release_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    );
    log::info!("  Developer:    {}", game.developer);
    log::info!("  Price:        {}", format_price(game.price));

    let genre_names: Vec<&str> = detail
        .genres
        .iter()
        .map(|g| g.genre_name.as_str())
        .collect();
    if genre_names.is_empty() {
        log::info!(
            "  Genres:       {}",
            "none".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::info!("  Genres:       {}", genre_names.join(", "));
    }

    if !game.description.is_empty() {
        crate::log_blank();
        log::info!("  {}", game.description);
    }

    crate::log_blank();
    match detail.thumbnail() {
        Some(thumb) => log::info!(
            "  Thumbnail:    {}",
            thumb.image_url.if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "  Thumbnail:    {}",
            "none".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    for image in detail.details() {
        log::info!(
            "  Detail #{}:    {}",
            image.sort_order,
            image.image_url.if_supports_color(Stdout, |t| t.cyan()),
        );
    }

    Ok(())
}

/// List the most recently stored games.
pub(crate) fn run_list(db_path: &Path, limit: u32) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let games = steam_ingest_db::list_games(&conn, limit)
        .map_err(|e| CliError::database(format!("Failed to list games: {}", e)))?;

    if games.is_empty() {
        log::info!("No games stored yet.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!(
            "{:>6}  {:<10}  {:>10}  {:<32}  {}",
            "ID", "Released", "Price", "Title", "Developer"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for game in &games {
        log::info!(
            "{:>6}  {:<10}  {:>10}  {:<32}  {}",
            game.game_id,
            game.release_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_price(game.price),
            truncate_str(&game.title, 32),
            truncate_str(&game.developer, 24),
        );
    }

    Ok(())
}

/// Show row counts per table.
pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let stats = steam_ingest_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:          {:>8}", stats.games);
    log::info!("  Genres:         {:>8}", stats.genres);
    log::info!("  Genre links:    {:>8}", stats.genre_links);
    log::info!("  Thumbnails:     {:>8}", stats.thumbnails);
    log::info!("  Detail images:  {:>8}", stats.details);

    Ok(())
}

/// Open the database only if it already exists.
fn open_existing(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'steam-ingest ingest' to create one.");
        return Ok(None);
    }

    steam_ingest_db::open_database(db_path)
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}
