//! Record a game's thumbnail and detail screenshots.

use rusqlite::Connection;
use steam_ingest_catalog::{ImageType, NewGameImage, MAX_DETAIL_IMAGES};
use steam_ingest_db::operations;
use steam_ingest_store::AppData;

use crate::error::IngestError;

/// Counts from recording one game's images.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageStats {
    pub thumbnails: u64,
    pub details: u64,
}

impl ImageStats {
    pub fn total(&self) -> u64 {
        self.thumbnails + self.details
    }
}

/// Insert the header image as the thumbnail, then the first
/// `MAX_DETAIL_IMAGES` screenshots as detail images in store order.
pub fn record_images(
    conn: &Connection,
    game_id: i64,
    data: &AppData,
) -> Result<ImageStats, IngestError> {
    let mut stats = ImageStats::default();

    let header = data
        .header_image
        .as_deref()
        .ok_or(IngestError::MissingField("header_image"))?;
    operations::insert_game_image(
        conn,
        &NewGameImage {
            game_id,
            image_url: header.to_string(),
            image_type: ImageType::Thumbnail,
            sort_order: 1,
        },
    )?;
    stats.thumbnails += 1;

    for (position, shot) in data
        .screenshots()
        .iter()
        .take(MAX_DETAIL_IMAGES)
        .enumerate()
    {
        let url = shot
            .path_full
            .as_deref()
            .ok_or(IngestError::MissingField("screenshots.path_full"))?;
        operations::insert_game_image(
            conn,
            &NewGameImage {
                game_id,
                image_url: url.to_string(),
                image_type: ImageType::Detail,
                sort_order: position as u32 + 1,
            },
        )?;
        stats.details += 1;
    }

    log::info!(
        "Images saved (game_id={}): {} thumbnail, {} detail",
        game_id,
        stats.thumbnails,
        stats.details
    );
    Ok(stats)
}
