//! Centralized input limits and validation helpers.
//!
//! The engine itself never rejects a query; these checks guard the outer
//! surfaces (web API and CLI) against oversized or malformed input.

use crate::core::types::Operator;

/// Maximum number of terms accepted in one query (DOS protection)
pub const MAX_QUERY_TERMS: usize = 32;

/// Maximum length of a single query term, in characters
pub const MAX_TERM_LENGTH: usize = 100;

/// Maximum length of a chat message, in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Maximum number of recipes accepted by a single merge
pub const MAX_MERGE_RECIPES: usize = 10_000;

/// Maximum number of random recipes returned by one request
pub const MAX_RANDOM_RECIPES: usize = 100;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Message too long: exceeds {MAX_MESSAGE_LENGTH} characters")]
    MessageTooLong,
    #[error("Too many query terms: exceeds maximum of {MAX_QUERY_TERMS}")]
    TooManyTerms,
    #[error("Query term too long: exceeds {MAX_TERM_LENGTH} characters")]
    TermTooLong,
    #[error("Too many operators: {operators} operators for {terms} terms")]
    TooManyOperators { terms: usize, operators: usize },
    #[error("Query contains control characters")]
    ControlCharacters,
    #[error("Too many recipes: exceeds maximum of {MAX_MERGE_RECIPES}")]
    TooManyRecipes,
    #[error("Invalid operator '{0}': expected AND or OR")]
    InvalidOperator(String),
}

fn has_control_chars(s: &str) -> bool {
    s.chars().any(|c| c.is_control() && c != '\n' && c != '\t' && c != '\r')
}

/// Validate a chat message before scanning it.
///
/// # Examples
///
/// ```
/// use ingreedy::utils::validation::validate_message;
///
/// assert!(validate_message("rice and urad dal").is_ok());
/// assert!(validate_message("   ").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyMessage` for a blank message,
/// `ValidationError::MessageTooLong` past the length limit, or
/// `ValidationError::ControlCharacters` if it contains control characters.
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::MessageTooLong);
    }
    if has_control_chars(message) {
        return Err(ValidationError::ControlCharacters);
    }
    Ok(())
}

/// Validate the raw terms and operators of a structured query.
///
/// Missing operators are fine (they default to AND), but more operators than
/// term gaps plus one blank term's worth is almost certainly a client bug.
///
/// # Errors
///
/// Returns a `ValidationError` if there are too many terms or operators, a
/// term exceeds the length limit, or a term contains control characters.
pub fn validate_terms<S: AsRef<str>>(
    terms: &[S],
    operators: &[Operator],
) -> Result<(), ValidationError> {
    if terms.len() > MAX_QUERY_TERMS {
        return Err(ValidationError::TooManyTerms);
    }
    if operators.len() > terms.len() {
        return Err(ValidationError::TooManyOperators {
            terms: terms.len(),
            operators: operators.len(),
        });
    }
    for term in terms {
        let term = term.as_ref();
        if term.chars().count() > MAX_TERM_LENGTH {
            return Err(ValidationError::TermTooLong);
        }
        if has_control_chars(term) {
            return Err(ValidationError::ControlCharacters);
        }
    }
    Ok(())
}

/// Parse operator names as sent by clients ("AND", "or", "&", "||", ...)
///
/// # Errors
///
/// Returns `ValidationError::InvalidOperator` for the first unknown name.
pub fn parse_operators<S: AsRef<str>>(names: &[S]) -> Result<Vec<Operator>, ValidationError> {
    names
        .iter()
        .map(|name| {
            Operator::parse(name.as_ref())
                .ok_or_else(|| ValidationError::InvalidOperator(name.as_ref().to_string()))
        })
        .collect()
}

/// Check a merge batch size
///
/// # Errors
///
/// Returns `ValidationError::TooManyRecipes` past [`MAX_MERGE_RECIPES`].
pub fn validate_merge_size(count: usize) -> Result<(), ValidationError> {
    if count > MAX_MERGE_RECIPES {
        Err(ValidationError::TooManyRecipes)
    } else {
        Ok(())
    }
}

/// Clamp a requested random recipe count into `1..=MAX_RANDOM_RECIPES`
#[must_use]
pub fn clamp_random_count(requested: usize) -> usize {
    requested.clamp(1, MAX_RANDOM_RECIPES)
}
