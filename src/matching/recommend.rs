//! Chat replies: message scanning, recommendation and the random last resort.

use serde::Serialize;

use crate::catalog::store::RecipeCatalog;
use crate::core::recipe::Recipe;
use crate::core::types::{Operator, Strategy};
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::parsing::message::{scan_message, Vocabulary};

/// Default cap on recipes returned per search (`MAX_RECIPES_PER_SEARCH`)
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Random recipes offered when nothing could be recommended
pub const RANDOM_ALTERNATIVES: usize = 5;

/// Reply to one chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Human-readable reply text
    pub message: String,
    /// Ingredient terms recognized in the user's message
    pub ingredients: Vec<String>,
    pub operators: Vec<Operator>,
    pub strategy: Strategy,
    pub recipes: Vec<Recipe>,
}

/// Answer a chat message against a catalog snapshot.
///
/// The recognized ingredients go through [`MatchingEngine::recommend`]. When
/// neither tier produces anything, a few random recipes are offered instead.
pub fn respond(
    catalog: &RecipeCatalog,
    message: &str,
    config: &MatchingConfig,
    max_results: usize,
) -> ChatReply {
    let vocabulary = Vocabulary::from_catalog(catalog);
    let query = scan_message(message, &vocabulary);
    let engine = MatchingEngine::with_config(catalog, config.clone());

    let mut recommendation = engine.recommend(&query);
    recommendation.recipes.truncate(max_results);

    tracing::debug!(
        terms = query.terms().len(),
        strategy = %recommendation.strategy,
        recipes = recommendation.recipes.len(),
        "Chat recommendation"
    );

    if recommendation.recipes.is_empty() {
        let alternatives: Vec<Recipe> = catalog
            .random(RANDOM_ALTERNATIVES.min(max_results))
            .into_iter()
            .cloned()
            .collect();
        let strategy = if alternatives.is_empty() {
            Strategy::None
        } else {
            Strategy::Random
        };
        return ChatReply {
            message: "I couldn't find recipes with exactly those ingredients. Here are some alternatives."
                .to_string(),
            ingredients: query.terms().to_vec(),
            operators: query.operators().to_vec(),
            strategy,
            recipes: alternatives,
        };
    }

    ChatReply {
        message: format!(
            "I found {} recipes with your ingredients: {}",
            recommendation.recipes.len(),
            query.terms().join(", ")
        ),
        ingredients: query.terms().to_vec(),
        operators: query.operators().to_vec(),
        strategy: recommendation.strategy,
        recipes: recommendation.recipes,
    }
}
