//! SQLite persistence layer for the game catalog.
//!
//! Provides schema creation, insert operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    ensure_genre, insert_game, insert_game_image, link_game_genre, OperationError,
};
pub use queries::{
    catalog_stats, find_game, game_detail, genres_for_game, images_for_game, list_games,
    CatalogStats,
};
pub use schema::{open_database, open_memory, SchemaError};
