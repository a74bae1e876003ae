//! Ingredient name normalization and term matching.
//!
//! Ingredient names come from external recipe APIs and free-text chat input,
//! so both sides are reduced to the same shape before comparison: lowercase,
//! punctuation removed, whitespace collapsed to single spaces.

use crate::core::types::MatchMode;

/// Common English words that never name an ingredient
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no",
    "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours",
];

/// Check whether a normalized word is a stop word
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Normalize an ingredient name or query term for comparison.
///
/// ```
/// use ingreedy::matching::normalize::normalize;
///
/// assert_eq!(normalize("  Urad Dal (split) "), "urad dal split");
/// assert_eq!(normalize("Salt & Pepper"), "salt pepper");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether a normalized query term matches a normalized ingredient name.
///
/// In [`MatchMode::Strict`] the words of the term must appear as a contiguous
/// run of whole words in the name. The last word may also match the name's
/// word with a trailing "s" (so "egg" matches "eggs", but not the reverse).
///
/// [`MatchMode::Lenient`] additionally accepts plain substring containment.
#[must_use]
pub fn term_matches(term: &str, name: &str, mode: MatchMode) -> bool {
    if term.is_empty() || name.is_empty() {
        return false;
    }

    if matches_whole_words(term, name) {
        return true;
    }

    mode == MatchMode::Lenient && name.contains(term)
}

fn matches_whole_words(term: &str, name: &str) -> bool {
    let term_words: Vec<&str> = term.split_whitespace().collect();
    let name_words: Vec<&str> = name.split_whitespace().collect();

    let Some((last, leading)) = term_words.split_last() else {
        return false;
    };
    if term_words.len() > name_words.len() {
        return false;
    }

    name_words.windows(term_words.len()).any(|window| {
        let (window_leading, window_last) = window.split_at(window.len() - 1);
        window_leading == leading && word_matches(last, window_last[0])
    })
}

/// A term word matches a name word exactly or as its simple plural.
fn word_matches(term_word: &str, name_word: &str) -> bool {
    name_word == term_word
        || (name_word.len() == term_word.len() + 1
            && name_word.starts_with(term_word)
            && name_word.ends_with('s'))
}
