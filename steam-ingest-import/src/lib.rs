//! Ingest storefront metadata into the game catalog database.
//!
//! This crate owns the ETL steps: fetching an app's details and storing the
//! game row, recording its images and genres, and driving a batch of AppIDs
//! with one transaction per AppID.

pub mod driver;
pub mod error;
pub mod fetch;
pub mod genres;
pub mod images;
pub mod progress;

pub use driver::{AppOutcome, IngestOptions, IngestOutcome, IngestReport, ingest_app, ingest_apps};
pub use error::IngestError;
pub use fetch::{StoredGame, build_new_game, fetch_and_store};
pub use genres::{GenreStats, record_genres};
pub use images::{ImageStats, record_images};
pub use progress::{IngestProgress, LogProgress, SilentProgress};
