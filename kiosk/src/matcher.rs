//! Guest matching
//!
//! Both functions are pure scans over the guest list. Guests arrive sorted
//! by name, so every tier resolves ties to the lexicographically first name.

use shared::models::{GuestRecord, Suggestion};
use shared::util::normalize;

/// Suggestion lists never grow beyond this
pub const MAX_SUGGESTIONS: usize = 6;

/// Shorter inputs hide suggestions instead of computing them
pub const MIN_AUTOCOMPLETE_CHARS: usize = 2;

/// Resolve a typed name to one guest
///
/// Tiers, first hit wins:
/// 1. exact name (case-insensitive, trimmed)
/// 2. name contains the query, or the query contains the (non-empty) name
/// 3. some query word and some name word contain one another, provided the
///    first query word is longer than two characters
pub fn find_guest<'a>(guests: &'a [GuestRecord], query: &str) -> Option<&'a GuestRecord> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }

    if let Some(guest) = guests.iter().find(|g| normalize(&g.name) == query) {
        return Some(guest);
    }

    if let Some(guest) = guests.iter().find(|g| {
        let name = normalize(&g.name);
        !name.is_empty() && (name.contains(&query) || query.contains(&name))
    }) {
        return Some(guest);
    }

    let query_words: Vec<&str> = query.split_whitespace().collect();
    match query_words.first() {
        Some(first) if first.chars().count() > 2 => {}
        _ => return None,
    }

    guests.iter().find(|g| {
        let name = normalize(&g.name);
        name.split_whitespace().any(|name_word| {
            query_words
                .iter()
                .any(|qw| name_word.contains(qw) || qw.contains(name_word))
        })
    })
}

/// Ranked autocomplete suggestions for `query`
///
/// Priority 1 is a name prefix, 2 a substring elsewhere in the name, and 3 a
/// query word (two or more characters) that starts some name word. Results
/// are ordered by priority then name and capped at [`MAX_SUGGESTIONS`].
pub fn suggest(guests: &[GuestRecord], query: &str) -> Vec<Suggestion> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }
    let query_words: Vec<&str> = query
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .collect();

    let mut matches: Vec<Suggestion> = guests
        .iter()
        .filter_map(|guest| {
            let name = normalize(&guest.name);
            let priority = if name.starts_with(&query) {
                1
            } else if name.contains(&query) {
                2
            } else if name
                .split_whitespace()
                .any(|nw| query_words.iter().any(|qw| nw.starts_with(qw)))
            {
                3
            } else {
                return None;
            };
            Some(Suggestion::from_guest(guest, priority))
        })
        .collect();

    matches.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
    matches.truncate(MAX_SUGGESTIONS);
    matches
}

/// Whether `input` is long enough to ask for suggestions
pub fn wants_suggestions(input: &str) -> bool {
    input.trim().chars().count() >= MIN_AUTOCOMPLETE_CHARS
}
