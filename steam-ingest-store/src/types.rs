use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::error::{excerpt, StoreError};

/// Top-level response from `appdetails`, keyed by the AppID's string form.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct AppDetailsResponse {
    pub entries: HashMap<String, AppDetailsEntry>,
}

impl AppDetailsResponse {
    /// Parse a response body.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|e| {
            StoreError::Api(format!(
                "Failed to parse app details: {e}. Response: {}",
                excerpt(text)
            ))
        })
    }

    /// The payload for `app_id`, or `None` when the store reports no success
    /// for it (flag false, flag missing, or no entry at all).
    pub fn into_app_data(mut self, app_id: u32) -> Result<Option<AppData>, StoreError> {
        let Some(entry) = self.entries.remove(&app_id.to_string()) else {
            return Ok(None);
        };
        if !entry.success {
            return Ok(None);
        }
        entry
            .data
            .map(Some)
            .ok_or_else(|| StoreError::Api(format!("AppID {app_id} reported success without data")))
    }
}

/// Per-AppID entry: a success flag and, when successful, the payload.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppDetailsEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppData>,
}

/// The subset of the `data` object the ingester reads.
///
/// Every field is optional here; required-ness is decided by the consumer so
/// that a missing field is reported against the stage that needs it.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    #[serde(default)]
    pub developers: Option<Vec<String>>,
    #[serde(default)]
    pub price_overview: Option<PriceOverview>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub screenshots: Option<Vec<Screenshot>>,
    #[serde(default)]
    pub genres: Option<Vec<GenreEntry>>,
}

impl AppData {
    /// Raw localized release-date text.
    pub fn release_date_text(&self) -> Option<&str> {
        self.release_date.as_ref().and_then(|d| d.date.as_deref())
    }

    /// Whether the store marks the title as not yet released.
    pub fn is_coming_soon(&self) -> bool {
        self.release_date.as_ref().is_some_and(|d| d.coming_soon)
    }

    /// First listed developer.
    pub fn primary_developer(&self) -> Option<&str> {
        self.developers
            .as_ref()
            .and_then(|d| d.first())
            .map(String::as_str)
    }

    /// Final price in the smallest currency unit, 0 when the store lists none.
    pub fn final_price(&self) -> i64 {
        self.price_overview
            .as_ref()
            .and_then(|p| p.final_price)
            .unwrap_or(0)
    }

    /// Screenshots in the order the store returned them.
    pub fn screenshots(&self) -> &[Screenshot] {
        self.screenshots.as_deref().unwrap_or_default()
    }

    /// Genre entries, empty when absent.
    pub fn genres(&self) -> &[GenreEntry] {
        self.genres.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default)]
    pub date: Option<String>,
}

/// Price in the storefront currency. Only the final (discounted) price is kept.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PriceOverview {
    #[serde(rename = "final", default)]
    pub final_price: Option<i64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Screenshot {
    #[serde(default)]
    pub path_full: Option<String>,
}

/// A genre as the store lists it. The store sends ids as strings (`"1"`);
/// numbers are accepted too.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GenreEntry {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: i64,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid genre id '{s}'"))),
    }
}
