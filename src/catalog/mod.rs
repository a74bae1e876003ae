//! Recipe catalog storage.
//!
//! A [`RecipeCatalog`](store::RecipeCatalog) is an in-memory table of recipes
//! in insertion order with an id index. An embedded catalog is compiled into
//! the binary, but custom catalogs can also be loaded from JSON files, either
//! a bare array of recipes or the versioned export format:
//!
//! ```json
//! {"version": "1.0.0", "created_at": "...", "recipes": [...]}
//! ```
//!
//! Services share the catalog through a [`RecipeStore`](shared::RecipeStore),
//! which hands out immutable snapshots and swaps in a rebuilt catalog on every
//! update.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingreedy::{RecipeCatalog, RecipeId};
//! use std::path::Path;
//!
//! // Load embedded catalog
//! let catalog = RecipeCatalog::load_embedded().unwrap();
//!
//! // List all recipes
//! for recipe in catalog.recipes() {
//!     println!("{} {}", recipe.id, recipe.title);
//! }
//!
//! // Get a specific recipe
//! let idli = catalog.get(RecipeId::new(1));
//!
//! // Load from custom file
//! let custom = RecipeCatalog::load_from_file(Path::new("my_recipes.json")).unwrap();
//! ```

pub mod shared;
pub mod store;
