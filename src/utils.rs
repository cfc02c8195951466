/// Parse a shared seed. Absent, blank or non-numeric input means no seed.
pub fn parse_seed(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}

/// Loose boolean for query and form values: `1`, `true`, `yes`, `on`
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Resolve a catalog variant name to the expansion flag
pub fn parse_variant(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "base" => Some(false),
        "expansion" | "full" => Some(true),
        _ => None,
    }
}
