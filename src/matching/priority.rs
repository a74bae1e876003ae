use serde::{Deserialize, Serialize};

use crate::core::recipe::Recipe;
use crate::core::types::MatchMode;
use crate::matching::normalize::{normalize, term_matches};

/// Source domains whose recipes are listed first by default
pub const DEFAULT_PRIORITY_SOURCES: &[&str] = &[
    "indianhealthyrecipes.com",
    "vegrecipesofindia.com",
    "hebbarskitchen.com",
    "archanaskitchen.com",
];

/// Cuisine tags whose recipes are listed first by default
pub const DEFAULT_PRIORITY_CUISINES: &[&str] =
    &["indian", "south asian", "north indian", "south indian"];

/// Rules deciding which recipes are promoted ahead of the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRules {
    /// Source hosts, compared without a leading `www.`
    pub sources: Vec<String>,
    /// Matched as substrings of the recipe's cuisine tags
    pub cuisine_keywords: Vec<String>,
    /// Matched against ingredient names with whole-word matching
    pub ingredient_keywords: Vec<String>,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self {
            sources: DEFAULT_PRIORITY_SOURCES.iter().map(|s| (*s).to_string()).collect(),
            cuisine_keywords: DEFAULT_PRIORITY_CUISINES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            ingredient_keywords: Vec::new(),
        }
    }
}

impl PriorityRules {
    /// Rules that promote nothing
    pub fn none() -> Self {
        Self {
            sources: Vec::new(),
            cuisine_keywords: Vec::new(),
            ingredient_keywords: Vec::new(),
        }
    }

    /// Replace the source allow-list, normalizing each entry to a bare host
    #[must_use]
    pub fn with_sources<S: AsRef<str>>(mut self, sources: &[S]) -> Self {
        self.sources = sources
            .iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .map(|s| s.strip_prefix("www.").map(str::to_string).unwrap_or(s))
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn with_ingredient_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.ingredient_keywords = keywords
            .iter()
            .map(|k| normalize(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    /// Whether a recipe belongs to the priority partition
    #[must_use]
    pub fn is_priority(&self, recipe: &Recipe) -> bool {
        let from_source = recipe
            .source_domain()
            .is_some_and(|domain| self.sources.iter().any(|s| *s == domain));
        if from_source {
            return true;
        }

        let cuisine_hit = recipe.cuisines.iter().any(|cuisine| {
            let cuisine = cuisine.to_lowercase();
            self.cuisine_keywords
                .iter()
                .any(|k| cuisine.contains(k.as_str()))
        });
        if cuisine_hit {
            return true;
        }

        self.ingredient_keywords.iter().any(|keyword| {
            recipe
                .normalized_ingredients()
                .iter()
                .any(|name| term_matches(keyword, name, MatchMode::Strict))
        })
    }

    /// Stable partition: priority recipes first, relative order kept on both sides
    pub fn apply<T>(&self, items: Vec<T>, recipe_of: impl Fn(&T) -> &Recipe) -> Vec<T> {
        let (mut priority, other): (Vec<T>, Vec<T>) =
            items.into_iter().partition(|item| self.is_priority(recipe_of(item)));
        priority.extend(other);
        priority
    }
}
