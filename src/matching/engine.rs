use serde::Serialize;

use crate::catalog::store::RecipeCatalog;
use crate::core::query::IngredientQuery;
use crate::core::recipe::Recipe;
use crate::core::types::{MatchMode, Operator, Strategy};
use crate::matching::priority::PriorityRules;
use crate::matching::ranking::compare_matches;
use crate::matching::scoring::MatchScore;
use crate::matching::similarity::{rank_by_similarity, FALLBACK_TOP_N, SIMILARITY_THRESHOLD};

/// Result of matching a boolean query against one recipe
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// The matched recipe
    pub recipe: Recipe,

    /// Group coverage details
    pub score: MatchScore,
}

/// Result of the similarity fallback for one recipe
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResult {
    pub recipe: Recipe,

    /// Cosine similarity between the query and the recipe's ingredient text
    pub similarity: f64,
}

/// Outcome of the full recommendation flow
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub recipes: Vec<Recipe>,
}

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Strict whole-word or lenient substring matching
    pub mode: MatchMode,
    /// Similarity a recipe must exceed to be returned by the fallback
    pub similarity_threshold: f64,
    /// Closest recipes returned when none pass the similarity threshold
    pub fallback_top_n: usize,
    /// Source/cuisine promotion applied to every result list
    pub priority: PriorityRules,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Strict,
            similarity_threshold: SIMILARITY_THRESHOLD,
            fallback_top_n: FALLBACK_TOP_N,
            priority: PriorityRules::default(),
        }
    }
}

/// The main matching engine.
///
/// Evaluation is a pure scan of the catalog it was created with; callers
/// holding a [`RecipeStore`](crate::catalog::shared::RecipeStore) pass a
/// snapshot so the table cannot change underneath a query.
pub struct MatchingEngine<'a> {
    catalog: &'a RecipeCatalog,
    /// Configuration including match mode and fallback thresholds
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(catalog: &'a RecipeCatalog) -> Self {
        Self {
            catalog,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(catalog: &'a RecipeCatalog, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Evaluate a boolean query against every recipe.
    ///
    /// Recipes covering no group are dropped; the rest are ranked and then
    /// passed through the priority partition.
    pub fn find_matches(&self, query: &IngredientQuery) -> Vec<MatchResult> {
        if query.is_empty() || self.catalog.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&Recipe, MatchScore)> = self
            .catalog
            .recipes()
            .iter()
            .map(|recipe| (recipe, MatchScore::calculate(query, recipe, self.config.mode)))
            .filter(|(_, score)| score.is_match())
            .collect();

        scored.sort_by(|a, b| compare_matches((a.0, &a.1), (b.0, &b.1)));

        tracing::debug!(
            query = %query,
            mode = ?self.config.mode,
            scanned = self.catalog.len(),
            matched = scored.len(),
            "Boolean ingredient match"
        );

        let results = scored
            .into_iter()
            .map(|(recipe, score)| MatchResult {
                recipe: recipe.clone(),
                score,
            })
            .collect();
        self.config.priority.apply(results, |r| &r.recipe)
    }

    /// Recipes matching `terms` joined by `operators`, best first.
    ///
    /// Never fails: missing operators default to AND and an empty term list
    /// yields an empty result.
    pub fn match_by_ingredients<S: AsRef<str>>(
        &self,
        terms: &[S],
        operators: &[Operator],
    ) -> Vec<Recipe> {
        let query = IngredientQuery::new(terms, operators);
        self.find_matches(&query)
            .into_iter()
            .map(|m| m.recipe)
            .collect()
    }

    /// Similarity fallback with scores, priority partition applied
    pub fn find_similar<S: AsRef<str>>(&self, terms: &[S]) -> Vec<SimilarityResult> {
        let results = rank_by_similarity(
            self.catalog,
            terms,
            self.config.similarity_threshold,
            self.config.fallback_top_n,
        )
        .into_iter()
        .map(|(recipe, similarity)| SimilarityResult {
            recipe: recipe.clone(),
            similarity,
        })
        .collect();
        self.config.priority.apply(results, |r| &r.recipe)
    }

    /// Recipes whose ingredient text is closest to `terms`
    pub fn similarity_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<Recipe> {
        self.find_similar(terms)
            .into_iter()
            .map(|r| r.recipe)
            .collect()
    }

    /// Boolean match first, similarity fallback when nothing matches
    pub fn recommend(&self, query: &IngredientQuery) -> Recommendation {
        let matches = self.find_matches(query);
        if !matches.is_empty() {
            return Recommendation {
                strategy: Strategy::Boolean,
                recipes: matches.into_iter().map(|m| m.recipe).collect(),
            };
        }

        let similar = self.similarity_search(query.terms());
        if similar.is_empty() {
            return Recommendation {
                strategy: Strategy::None,
                recipes: Vec::new(),
            };
        }

        Recommendation {
            strategy: Strategy::Similarity,
            recipes: similar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::Ingredient;

    fn recipe(id: u64, title: &str, ingredients: &[&str]) -> Recipe {
        let ingredients = ingredients.iter().map(|n| Ingredient::named(*n)).collect();
        Recipe::new(id, title, ingredients).unwrap()
    }

    fn make_test_catalog() -> RecipeCatalog {
        RecipeCatalog::from_recipes(vec![
            recipe(2, "Pongal", &["rice", "moong dal", "ghee", "pepper", "cumin", "ginger", "cashews"]),
            recipe(1, "Idli", &["rice", "urad dal", "fenugreek seeds", "salt"]),
            recipe(3, "Chicken Biryani", &["basmati rice", "chicken", "yogurt", "onions"]),
            recipe(4, "Butter Chicken", &["chicken", "butter", "tomato puree", "cream"]),
        ])
    }

    #[test]
    fn test_and_query() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine.find_matches(&IngredientQuery::new(&["rice", "urad dal"], &[Operator::And]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].recipe.title, "Idli");
        assert_eq!(matches[0].score.groups_covered, 1);
        assert_eq!(matches[0].score.total_matches, 2);
    }

    #[test]
    fn test_single_term_orders_by_title() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let titles: Vec<String> = engine
            .match_by_ingredients(&["rice"], &[])
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Chicken Biryani", "Idli", "Pongal"]);
    }

    #[test]
    fn test_or_query_prefers_both() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let titles: Vec<String> = engine
            .match_by_ingredients(&["rice", "chicken"], &[Operator::Or])
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Chicken Biryani", "Butter Chicken", "Idli", "Pongal"]
        );
    }

    #[test]
    fn test_empty_terms_yield_nothing() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);
        assert!(engine.match_by_ingredients::<&str>(&[], &[]).is_empty());
        assert!(engine.match_by_ingredients(&["", "  "], &[Operator::Or]).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = RecipeCatalog::new();
        let engine = MatchingEngine::new(&catalog);
        assert!(engine.match_by_ingredients(&["rice"], &[]).is_empty());
        assert!(engine.similarity_search(&["rice"]).is_empty());
        assert_eq!(
            engine.recommend(&IngredientQuery::new(&["rice"], &[])).strategy,
            Strategy::None
        );
    }

    #[test]
    fn test_lenient_mode() {
        let catalog = make_test_catalog();
        let config = MatchingConfig {
            mode: MatchMode::Lenient,
            ..MatchingConfig::default()
        };
        let engine = MatchingEngine::with_config(&catalog, config);

        // "chick" is only a substring of "chicken", never a whole word
        let found = engine.match_by_ingredients(&["chick"], &[]);
        assert_eq!(found.len(), 2);
        assert!(MatchingEngine::new(&catalog)
            .match_by_ingredients(&["chick"], &[])
            .is_empty());
    }

    #[test]
    fn test_priority_partition_applied() {
        let catalog = RecipeCatalog::from_recipes(vec![
            recipe(1, "Idli", &["rice"]),
            recipe(2, "Pongal", &["rice"]).with_cuisines(vec!["Indian".to_string()]),
        ]);
        let engine = MatchingEngine::new(&catalog);
        let titles: Vec<String> = engine
            .match_by_ingredients(&["rice"], &[])
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Pongal", "Idli"]);
    }

    #[test]
    fn test_recommend_falls_back_to_similarity() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let boolean = engine.recommend(&IngredientQuery::new(&["ghee"], &[]));
        assert_eq!(boolean.strategy, Strategy::Boolean);
        assert_eq!(boolean.recipes[0].title, "Pongal");

        let fallback = engine.recommend(&IngredientQuery::new(&["unobtainium"], &[]));
        assert_eq!(fallback.strategy, Strategy::Similarity);
        assert!(!fallback.recipes.is_empty());
    }
}
