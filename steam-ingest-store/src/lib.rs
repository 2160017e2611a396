//! Client for the Steam storefront `appdetails` API.
//!
//! Also owns the tool's settings (AppID list, database path, request
//! locale), since they are resolved from the same config file.

pub mod client;
pub mod error;
pub mod settings;
pub mod types;

pub use client::{AppDetailsSource, SteamStoreClient, StoreOptions};
pub use error::StoreError;
pub use settings::{
    config_path, default_db_path, parse_app_ids, write_config, SettingOverrides, SettingSource,
    SettingSources, Settings, SettingsFile, DEFAULT_APP_IDS,
};
pub use types::{AppData, AppDetailsEntry, AppDetailsResponse, GenreEntry, Screenshot};
