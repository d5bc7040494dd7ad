//! Team name normalization.

/// Characters dropped before comparison.
const STRIPPED_CHARS: &[char] = &['.', '\'', '-'];

/// Normalize a team name for loose equality comparison.
///
/// Lowercases, drops `.`, `'` and `-`, collapses whitespace runs to a single
/// space and trims. "St. John's" and "st johns" both become "st johns".
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
