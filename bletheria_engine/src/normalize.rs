//! Text normalization shared by rooms, the player, the world map and the REPL.
//!
//! Player input is compared against game data only after passing through
//! [`capitalize`], so "east", " EAST " and "East" all land on the same key.

/// Trim `raw`, upper-case its first character and lower-case the rest.
///
/// Returns an empty string for blank input.
pub fn capitalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Collapse runs of whitespace in `raw` into single spaces and trim the ends.
pub fn squash_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
