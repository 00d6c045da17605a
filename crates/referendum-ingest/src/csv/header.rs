//! Header name normalization.

/// Trims whitespace and a leading UTF-8 BOM from a header name.
///
/// Inner runs of whitespace collapse to a single space, so
/// `"Choice  A"` and `"Choice A"` name the same column.
pub fn normalize_header(value: &str) -> String {
    let trimmed = value.trim_start_matches('\u{feff}').trim();
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
