//! # ingreedy
//!
//! A library for recommending recipes from the ingredients a user has at hand.
//!
//! Users describe what is in their kitchen in a chat message or as a list of
//! ingredients joined by AND/OR. `ingreedy` matches those ingredients against
//! a catalog of recipes and returns a deterministically ordered list, falling
//! back to text similarity when no recipe satisfies the query exactly.
//!
//! ## Features
//!
//! - **Boolean queries**: AND binds tighter than OR, so `rice AND urad dal OR chicken`
//!   asks for either both of the first two or the third
//! - **Whole-word matching**: "rice" matches "basmati rice" but not "licorice";
//!   a lenient substring mode is available
//! - **Deterministic ranking**: coverage, match percentage, match count, title, id
//! - **Similarity fallback**: TF-IDF cosine ranking when nothing matches exactly
//! - **Priority sources**: recipes from preferred sites or cuisines listed first
//! - **Chat scanning**: pick ingredient phrases out of free text
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingreedy::{IngredientQuery, MatchingEngine, Operator, RecipeCatalog};
//!
//! // Load the embedded recipe catalog
//! let catalog = RecipeCatalog::load_embedded().unwrap();
//!
//! // Recipes using both rice and urad dal
//! let engine = MatchingEngine::new(&catalog);
//! let recipes = engine.match_by_ingredients(&["rice", "urad dal"], &[Operator::And]);
//!
//! for recipe in &recipes {
//!     println!("{}", recipe.title);
//! }
//!
//! // Nothing matches? Rank by similarity instead
//! let query = IngredientQuery::new(&["unobtainium"], &[]);
//! let recommendation = engine.recommend(&query);
//! println!("{} via {}", recommendation.recipes.len(), recommendation.strategy);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Recipe catalog storage and the shared snapshot store
//! - [`core`]: Recipes, ingredients, queries and small shared types
//! - [`matching`]: Matching engine, ranking and similarity fallback
//! - [`parsing`]: Chat message scanning
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON web API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::shared::RecipeStore;
pub use catalog::store::RecipeCatalog;
pub use core::query::IngredientQuery;
pub use core::recipe::{Ingredient, Recipe};
pub use core::types::*;
pub use matching::engine::{MatchResult, MatchingConfig, MatchingEngine};
