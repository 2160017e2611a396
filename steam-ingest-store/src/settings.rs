use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::StoreOptions;
use crate::error::StoreError;

/// AppIDs ingested when nothing else is configured.
pub const DEFAULT_APP_IDS: &[u32] = &[1245620, 1086940, 1091500];

const ENV_APP_IDS: &str = "STEAM_INGEST_APP_IDS";
const ENV_DB: &str = "STEAM_INGEST_DB";
const ENV_COUNTRY: &str = "STEAM_INGEST_COUNTRY";
const ENV_LANGUAGE: &str = "STEAM_INGEST_LANGUAGE";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_ids: Vec<u32>,
    pub db_path: PathBuf,
    pub store: StoreOptions,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    /// Given as a command-line flag or argument.
    CommandLine,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSources {
    pub app_ids: SettingSource,
    pub db_path: SettingSource,
    pub country: SettingSource,
    pub language: SettingSource,
    pub request_interval: SettingSource,
    pub timeout: SettingSource,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingOverrides {
    pub app_ids: Option<Vec<u32>>,
    pub db_path: Option<PathBuf>,
    pub country: Option<String>,
    pub language: Option<String>,
}

/// TOML config file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub ingest: IngestSection,
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IngestSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_ids: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl SettingsFile {
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        toml::from_str(content)
            .map_err(|e| StoreError::config(format!("Failed to parse config file: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// A file that spells out the given settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            ingest: IngestSection {
                app_ids: Some(settings.app_ids.clone()),
                db_path: Some(settings.db_path.clone()),
            },
            store: StoreSection {
                country: Some(settings.store.country.clone()),
                language: Some(settings.store.language.clone()),
                request_interval_ms: Some(settings.store.request_interval.as_millis() as u64),
                timeout_secs: Some(settings.store.timeout.as_secs()),
            },
        }
    }
}

impl Settings {
    /// Load settings from the command line, environment, and config file.
    ///
    /// Priority: command line > env vars > config file > defaults.
    /// An explicit `config_file` must exist; the default config path is
    /// used only when present.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &SettingOverrides,
    ) -> Result<(Self, SettingSources), StoreError> {
        let file = match config_file {
            Some(path) => Some(SettingsFile::load(path)?),
            None => match config_path() {
                Some(path) if path.exists() => Some(SettingsFile::load(&path)?),
                _ => None,
            },
        };
        Self::resolve(file.as_ref(), |key| std::env::var(key).ok(), overrides)
    }

    /// Resolve settings from explicit sources. `env` looks up an environment variable.
    pub fn resolve(
        file: Option<&SettingsFile>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &SettingOverrides,
    ) -> Result<(Self, SettingSources), StoreError> {
        let ingest = file.map(|f| &f.ingest);
        let store = file.map(|f| &f.store);

        let (app_ids, app_ids_src) = resolve_field(
            overrides.app_ids.clone(),
            ENV_APP_IDS,
            env(ENV_APP_IDS),
            parse_app_ids,
            ingest.and_then(|s| s.app_ids.clone()),
            || DEFAULT_APP_IDS.to_vec(),
        )?;

        let (db_path, db_path_src) = resolve_field(
            overrides.db_path.clone(),
            ENV_DB,
            env(ENV_DB),
            |raw| Ok(PathBuf::from(raw)),
            ingest.and_then(|s| s.db_path.clone()),
            default_db_path,
        )?;

        let defaults = StoreOptions::default();

        let (country, country_src) = resolve_field(
            overrides.country.clone(),
            ENV_COUNTRY,
            env(ENV_COUNTRY),
            |raw| Ok(raw.trim().to_string()),
            store.and_then(|s| s.country.clone()),
            || defaults.country.clone(),
        )?;

        let (language, language_src) = resolve_field(
            overrides.language.clone(),
            ENV_LANGUAGE,
            env(ENV_LANGUAGE),
            |raw| Ok(raw.trim().to_string()),
            store.and_then(|s| s.language.clone()),
            || defaults.language.clone(),
        )?;

        let (request_interval, interval_src) = match store.and_then(|s| s.request_interval_ms) {
            Some(ms) => (Duration::from_millis(ms), SettingSource::ConfigFile),
            None => (defaults.request_interval, SettingSource::Default),
        };

        let (timeout, timeout_src) = match store.and_then(|s| s.timeout_secs) {
            Some(secs) => (Duration::from_secs(secs), SettingSource::ConfigFile),
            None => (defaults.timeout, SettingSource::Default),
        };

        if app_ids.is_empty() {
            return Err(StoreError::config("No AppIDs configured"));
        }
        if country.is_empty() {
            return Err(StoreError::config("Store country must not be empty"));
        }
        if language.is_empty() {
            return Err(StoreError::config("Store language must not be empty"));
        }
        if timeout.is_zero() {
            return Err(StoreError::config("store.timeout_secs must be > 0"));
        }

        let settings = Settings {
            app_ids,
            db_path,
            store: StoreOptions {
                country,
                language,
                request_interval,
                timeout,
            },
        };
        let sources = SettingSources {
            app_ids: app_ids_src,
            db_path: db_path_src,
            country: country_src,
            language: language_src,
            request_interval: interval_src,
            timeout: timeout_src,
        };
        Ok((settings, sources))
    }
}

fn resolve_field<T>(
    cli: Option<T>,
    env_var: &'static str,
    env_value: Option<String>,
    parse_env: impl FnOnce(&str) -> Result<T, StoreError>,
    file: Option<T>,
    default: impl FnOnce() -> T,
) -> Result<(T, SettingSource), StoreError> {
    if let Some(value) = cli {
        return Ok((value, SettingSource::CommandLine));
    }
    if let Some(raw) = env_value {
        let value = parse_env(&raw)
            .map_err(|e| StoreError::config(format!("${env_var}: {e}")))?;
        return Ok((value, SettingSource::EnvVar(env_var)));
    }
    if let Some(value) = file {
        return Ok((value, SettingSource::ConfigFile));
    }
    Ok((default(), SettingSource::Default))
}

/// Parse a comma-separated AppID list such as `1245620, 1086940`.
pub fn parse_app_ids(raw: &str) -> Result<Vec<u32>, StoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| StoreError::config(format!("Invalid AppID '{part}'")))
        })
        .collect()
}

/// Return the path to the default config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("steam-ingest").join("config.toml"))
}

/// Default location of the catalog database.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("steam-ingest").join("catalog.db"))
        .unwrap_or_else(|| PathBuf::from("catalog.db"))
}

/// Write a config file, creating parent directories as needed.
pub fn write_config(path: &Path, file: &SettingsFile) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(file)
        .map_err(|e| StoreError::config(format!("Failed to serialize config: {e}")))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
