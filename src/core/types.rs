use serde::{Deserialize, Serialize};

/// Unique identifier for a recipe in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl RecipeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Boolean operator joining two consecutive query terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    /// Parse an operator word, case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "and" | "&" | "&&" => Some(Self::And),
            "or" | "|" | "||" => Some(Self::Or),
            _ => None,
        }
    }
}

impl std::str::FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown operator '{s}' (expected 'and' or 'or')"))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// How strictly a query term must match an ingredient name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Whole-word match, with a simple plural allowance
    #[default]
    Strict,
    /// Whole-word match or plain substring containment
    Lenient,
}

/// Which tier of the recommendation flow produced a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// At least one recipe satisfied the boolean ingredient query
    Boolean,
    /// No boolean match; recipes ranked by ingredient-text similarity
    Similarity,
    /// Nothing ranked; random recipes offered instead
    Random,
    /// Nothing to rank (empty query or empty catalog)
    None,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Similarity => write!(f, "similarity"),
            Self::Random => write!(f, "random"),
            Self::None => write!(f, "none"),
        }
    }
}
