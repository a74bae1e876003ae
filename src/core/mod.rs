//! Core data types for ingredient matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Recipe`](recipe::Recipe), [`Ingredient`](recipe::Ingredient): validated recipe records
//! - [`IngredientQuery`](query::IngredientQuery): terms joined by boolean operators
//! - [`RecipeId`](types::RecipeId), [`Operator`](types::Operator),
//!   [`MatchMode`](types::MatchMode), [`Strategy`](types::Strategy): small shared types
//!
//! Ingredient names are normalized once when a recipe is built (lowercase,
//! punctuation removed, whitespace collapsed) so matching never re-normalizes
//! the catalog side.

pub mod query;
pub mod recipe;
pub mod types;
