//! Ingredient matching engine, ranking and similarity fallback.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`]: Main entry point for matching ingredient queries
//! - [`MatchScore`]: Group coverage of a query against one recipe
//! - [`PriorityRules`]: Source and cuisine promotion of results
//!
//! ## Matching Algorithm
//!
//! A query is a list of terms joined by AND/OR. Runs of AND-joined terms form
//! required groups, and groups are alternatives to each other:
//!
//! ```text
//! rice AND urad dal OR chicken   =>   [rice, urad dal] | [chicken]
//! ```
//!
//! 1. **Group evaluation**: a group is covered when every term in it matches
//!    one of the recipe's ingredient names
//! 2. **Filtering**: recipes covering no group are dropped
//! 3. **Ranking**: groups covered, percentage of terms matched, total matches
//!    (all descending), then title and id
//! 4. **Priority**: recipes from preferred sources or cuisines move to the
//!    front, keeping their relative order
//!
//! ## Similarity Fallback
//!
//! When nothing satisfies the boolean query, recipes are ranked by TF-IDF
//! cosine similarity between the query terms and their ingredient text.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingreedy::{IngredientQuery, MatchingEngine, Operator, RecipeCatalog};
//!
//! let catalog = RecipeCatalog::load_embedded().unwrap();
//! let engine = MatchingEngine::new(&catalog);
//!
//! let query = IngredientQuery::new(&["rice", "urad dal"], &[Operator::And]);
//! for m in engine.find_matches(&query) {
//!     println!("{}: {}/{} groups", m.recipe.title, m.score.groups_covered, m.score.total_groups);
//! }
//! ```

pub mod engine;
pub mod normalize;
pub mod priority;
pub mod ranking;
pub mod recommend;
pub mod scoring;
pub mod similarity;

pub use engine::{MatchResult, MatchingConfig, MatchingEngine, Recommendation, SimilarityResult};
pub use priority::PriorityRules;
pub use scoring::MatchScore;
