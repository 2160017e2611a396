//! Release-date normalization for storefront date text.
//!
//! The storefront localizes `release_date.date` according to the `l=`
//! request parameter. Korean responses look like `2022년 2월 25일`, English
//! ones like `25 Feb, 2022` or `Feb 25, 2022`. Anything else (placeholders
//! such as "Coming Soon", quarter names, empty text) has no calendar date.

use chrono::NaiveDate;

const KOREAN_FORMATS: &[&str] = &["%Y년 %m월 %d일"];
const ENGLISH_FORMATS: &[&str] = &["%d %b, %Y", "%b %d, %Y"];

/// Date formats used by the storefront for a request language.
///
/// Unknown languages have no formats, so their dates always normalize to `None`.
pub fn date_formats_for_language(language: &str) -> &'static [&'static str] {
    match language.trim().to_ascii_lowercase().as_str() {
        "korean" | "koreana" => KOREAN_FORMATS,
        "english" => ENGLISH_FORMATS,
        _ => &[],
    }
}

/// Parse storefront date text for the given request language.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use steam_ingest_catalog::parse_release_date;
///
/// assert_eq!(
///     parse_release_date("2023년 5월 10일", "korean"),
///     NaiveDate::from_ymd_opt(2023, 5, 10),
/// );
/// assert_eq!(parse_release_date("Coming Soon", "korean"), None);
/// ```
pub fn parse_release_date(raw: &str, language: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    date_formats_for_language(language)
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
