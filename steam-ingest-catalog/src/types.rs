//! Data model types for the game catalog.
//!
//! These types mirror the persistent schema: games, genres, the game/genre
//! join, and game images.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Developer recorded when the storefront lists none.
pub const UNKNOWN_DEVELOPER: &str = "Unknown";

/// Maximum number of screenshots stored as detail images per game.
pub const MAX_DETAIL_IMAGES: usize = 3;

// ── Game ────────────────────────────────────────────────────────────────────

/// A game row ready for insertion. The key is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub title: String,
    /// `None` when the storefront date text could not be parsed.
    pub release_date: Option<NaiveDate>,
    pub developer: String,
    /// Price in the smallest currency unit. 0 when the store has no price.
    pub price: i64,
    pub description: String,
}

/// A stored game row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: i64,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub developer: String,
    pub price: i64,
    pub description: String,
}

// ── Genre ───────────────────────────────────────────────────────────────────

/// A genre reference row. `genre_id` is the storefront's own identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i64,
    pub genre_name: String,
}

// ── Game Image ──────────────────────────────────────────────────────────────

/// Role of an image attached to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// The storefront header image. Exactly one per game.
    Thumbnail,
    /// A full-size screenshot.
    Detail,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown image type: '{0}'")]
pub struct UnknownImageType(pub String);

impl FromStr for ImageType {
    type Err = UnknownImageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thumbnail" => Ok(Self::Thumbnail),
            "detail" => Ok(Self::Detail),
            other => Err(UnknownImageType(other.to_string())),
        }
    }
}

/// An image row ready for insertion. `created_at` is set by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameImage {
    pub game_id: i64,
    pub image_url: String,
    pub image_type: ImageType,
    /// 1-based position within the image type.
    pub sort_order: u32,
}

/// A stored image row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameImage {
    pub image_id: i64,
    pub game_id: i64,
    pub image_url: String,
    pub image_type: ImageType,
    pub sort_order: u32,
    pub created_at: String,
}

// ── Aggregates ──────────────────────────────────────────────────────────────

/// A game together with its genres and images, as shown by `show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetail {
    pub game: Game,
    pub genres: Vec<Genre>,
    pub images: Vec<GameImage>,
}

impl GameDetail {
    /// The thumbnail image, if one was recorded.
    pub fn thumbnail(&self) -> Option<&GameImage> {
        self.images
            .iter()
            .find(|i| i.image_type == ImageType::Thumbnail)
    }

    /// Detail images in sort order.
    pub fn details(&self) -> impl Iterator<Item = &GameImage> {
        self.images
            .iter()
            .filter(|i| i.image_type == ImageType::Detail)
    }
}
