/// Normalize a free-text address into a lookup key.
/// Lower-cases the input, keeps everything before the first comma and trims it,
/// so "Mumbai, Maharashtra" becomes "mumbai".
pub fn normalize_location(location: &str) -> String {
    let lowered = location.to_lowercase();
    lowered
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Case-insensitive substring match used by location search
pub fn location_contains(location: &str, query: &str) -> bool {
    location.to_lowercase().contains(&query.to_lowercase())
}
