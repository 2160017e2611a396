use std::cell::Cell;
use std::time::{Duration, Instant};

use reqwest::StatusCode;

use crate::error::{excerpt, StoreError};
use crate::types::AppDetailsResponse;

const APP_DETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";

pub const DEFAULT_COUNTRY: &str = "kr";
pub const DEFAULT_LANGUAGE: &str = "korean";
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(400);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can answer an `appdetails` query for one AppID.
///
/// The ingester only depends on this trait, so tests can serve canned
/// payloads instead of calling the storefront.
pub trait AppDetailsSource {
    /// Fetch the `appdetails` envelope for `app_id`.
    fn app_details(&self, app_id: u32) -> Result<AppDetailsResponse, StoreError>;

    /// Request language (`l=`). Date text in payloads is localized to it.
    fn language(&self) -> &str;
}

/// Locale and pacing for storefront requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Storefront country code (`cc=`), decides currency and pricing.
    pub country: String,
    /// Storefront language (`l=`).
    pub language: String,
    /// Minimum spacing between two requests.
    pub request_interval: Duration,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            request_interval: DEFAULT_REQUEST_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking HTTP client for the Steam storefront with request pacing.
pub struct SteamStoreClient {
    http: reqwest::blocking::Client,
    options: StoreOptions,
    last_request: Cell<Option<Instant>>,
}

impl SteamStoreClient {
    pub fn new(options: StoreOptions) -> Result<Self, StoreError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("steam-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            options,
            last_request: Cell::new(None),
        })
    }

    /// Fetch details for a single AppID.
    pub fn fetch_app_details(&self, app_id: u32) -> Result<AppDetailsResponse, StoreError> {
        self.rate_limit();

        log::debug!(
            "GET {} appids={} cc={} l={}",
            APP_DETAILS_URL,
            app_id,
            self.options.country,
            self.options.language
        );

        let resp = self
            .http
            .get(APP_DETAILS_URL)
            .query(&[
                ("appids", app_id.to_string()),
                ("cc", self.options.country.clone()),
                ("l", self.options.language.clone()),
            ])
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        check_status(status, &text)?;

        AppDetailsResponse::from_json(&text)
    }

    /// Wait until at least `request_interval` has passed since the last request.
    fn rate_limit(&self) {
        let wait = wait_time(
            self.last_request.get(),
            Instant::now(),
            self.options.request_interval,
        );
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.last_request.set(Some(Instant::now()));
    }
}

/// Map a response status to an error. 429 is a rate limit; any other
/// non-success status carries an excerpt of the body.
fn check_status(status: StatusCode, body: &str) -> Result<(), StoreError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(StoreError::RateLimit);
    }
    if !status.is_success() {
        return Err(StoreError::ServerError {
            status: status.as_u16(),
            message: excerpt(body),
        });
    }
    Ok(())
}

/// How long to sleep before the next request.
fn wait_time(last: Option<Instant>, now: Instant, interval: Duration) -> Duration {
    match last {
        Some(last) => interval.saturating_sub(now.saturating_duration_since(last)),
        None => Duration::ZERO,
    }
}

impl AppDetailsSource for SteamStoreClient {
    fn app_details(&self, app_id: u32) -> Result<AppDetailsResponse, StoreError> {
        self.fetch_app_details(app_id)
    }

    fn language(&self) -> &str {
        &self.options.language
    }
}
