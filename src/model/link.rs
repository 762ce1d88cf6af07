//! Lookup keys and canonical link paths.
//!
//! Keys are lower-cased display strings. They are computed once when the
//! index is built and once per query argument, and never shown to clients.
//! Links are built from keys, so two leagues that differ only by case share
//! one link.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped inside a single path segment.
///
/// Unreserved characters pass through, as do the sub-delimiters that are
/// legal inside a segment. `/`, `;`, `,` and `?` are escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Normalize a display string into a lookup key.
///
/// Each character maps to exactly one lower-case character, with no
/// context-sensitive rules: `İ` becomes `i` and `Σ` is always `σ`.
pub fn normalize_key(value: &str) -> String {
    value.chars().map(lower_char).collect()
}

fn lower_char(c: char) -> char {
    match c {
        '\u{130}' => 'i',
        c => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Percent-encode a value for use as one path segment.
pub fn escape_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Link to the team list of a league, built from its normalized key.
pub fn league_link(league_key: &str) -> String {
    format!("/leagues/{}", escape_segment(league_key))
}

/// Link to a single team, built from the display league and team name.
pub fn team_link(league: &str, name: &str) -> String {
    format!(
        "/leagues/{}/{}",
        escape_segment(&normalize_key(league)),
        escape_segment(&normalize_key(name))
    )
}
