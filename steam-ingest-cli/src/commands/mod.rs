pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod ingest;

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Format a price stored in the smallest currency unit.
pub(crate) fn format_price(price: i64) -> String {
    if price == 0 {
        return "free".to_string();
    }
    format!("{}.{:02}", price / 100, price % 100)
}
