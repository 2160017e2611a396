//! Game catalog data model types and release-date normalization.
//!
//! This crate defines the rows the ingester writes without any database or
//! network dependencies. `steam-ingest-db` persists these types and
//! `steam-ingest-import` builds them from storefront payloads.

pub mod release_date;
pub mod types;

pub use release_date::{date_formats_for_language, parse_release_date};
pub use types::*;
