//! SQLite schema creation and migration.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent, so it is safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Bring a database at `from_version` up to `CURRENT_VERSION`.
///
/// All DDL is `IF NOT EXISTS`, so re-applying it adds whatever an older
/// version lacks.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }
    create_schema(conn)
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- One row per successfully fetched AppID
CREATE TABLE IF NOT EXISTS Game (
    game_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    release_date TEXT,
    developer TEXT NOT NULL,
    price INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT ''
);

-- Genre ids come from the storefront, not from SQLite
CREATE TABLE IF NOT EXISTS Genre (
    genre_id INTEGER PRIMARY KEY,
    genre_name TEXT NOT NULL
);

-- No uniqueness: re-ingesting a game adds new links
CREATE TABLE IF NOT EXISTS GameGenre (
    game_id INTEGER NOT NULL REFERENCES Game(game_id),
    genre_id INTEGER NOT NULL REFERENCES Genre(genre_id)
);
CREATE INDEX IF NOT EXISTS idx_game_genre_game ON GameGenre(game_id);
CREATE INDEX IF NOT EXISTS idx_game_genre_genre ON GameGenre(genre_id);

CREATE TABLE IF NOT EXISTS GameImage (
    image_id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES Game(game_id),
    image_url TEXT NOT NULL,
    image_type TEXT NOT NULL CHECK (image_type IN ('thumbnail', 'detail')),
    sort_order INTEGER NOT NULL CHECK (sort_order >= 1),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_game_image_slot ON GameImage(game_id, image_type, sort_order);
"#;
