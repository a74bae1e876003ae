use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::recipe::Recipe;
use crate::core::types::RecipeId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub recipes: Vec<Recipe>,
}

/// Counts reported by [`RecipeCatalog::merge`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub added: usize,
    pub replaced: usize,
}

/// In-memory recipe table with an id index.
///
/// Ids are unique. Adding a recipe whose id is already present replaces the
/// existing record in place (last write wins), so table order stays stable.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,

    /// Index: recipe ID -> index in recipes vec
    id_to_index: HashMap<RecipeId, usize>,
}

impl RecipeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from recipes, later duplicates replacing earlier ones
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut catalog = Self::new();
        catalog.merge(recipes);
        catalog
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../data/recipes.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from a file when a path is given, otherwise the embedded catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse catalog from JSON string.
    ///
    /// Accepts the versioned format or a bare recipe array, chosen by the
    /// root value, so a bad recipe reports its own validation error.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let recipes = if json.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Recipe>>(json)?
        } else {
            let data: CatalogData = serde_json::from_str(json)?;
            // Version check (warn but don't fail)
            if data.version != CATALOG_VERSION {
                tracing::warn!(
                    "Catalog version mismatch (expected {}, found {})",
                    CATALOG_VERSION,
                    data.version
                );
            }
            data.recipes
        };

        Ok(Self::from_recipes(recipes))
    }

    /// Add a recipe, replacing any existing recipe with the same id.
    ///
    /// Returns `true` when an existing recipe was replaced.
    pub fn add_recipe(&mut self, recipe: Recipe) -> bool {
        if let Some(&idx) = self.id_to_index.get(&recipe.id) {
            self.recipes[idx] = recipe;
            return true;
        }

        self.id_to_index.insert(recipe.id, self.recipes.len());
        self.recipes.push(recipe);
        false
    }

    /// Merge recipes into this catalog (last write wins on duplicate ids)
    pub fn merge(&mut self, recipes: impl IntoIterator<Item = Recipe>) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for recipe in recipes {
            if self.add_recipe(recipe) {
                summary.replaced += 1;
            } else {
                summary.added += 1;
            }
        }
        summary
    }

    /// All recipes, in table order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Get a recipe by ID
    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.id_to_index.get(&id).map(|&idx| &self.recipes[idx])
    }

    /// Recipes whose title contains `query`, case-insensitively, in table order
    pub fn search_title(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.recipes
            .iter()
            .filter(|r| r.title_key().contains(&needle))
            .collect()
    }

    /// Recipes whose title or any ingredient name contains `query`.
    ///
    /// An empty query matches every recipe.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|r| {
                r.title_key().contains(&needle)
                    || r.ingredients
                        .iter()
                        .any(|i| i.name.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Up to `n` distinct recipes chosen at random
    pub fn random(&self, n: usize) -> Vec<&Recipe> {
        self.random_with(&mut rand::thread_rng(), n)
    }

    /// Up to `n` distinct recipes chosen with the given generator
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<&Recipe> {
        self.recipes.choose_multiple(rng, n).collect()
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            recipes: self.recipes.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of recipes in catalog
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::Ingredient;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn recipe(id: u64, title: &str, ingredients: &[&str]) -> Recipe {
        let ingredients = ingredients.iter().map(|n| Ingredient::named(*n)).collect();
        Recipe::new(id, title, ingredients).unwrap()
    }

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = RecipeCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.search_title("idli").len() == 1);
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = RecipeCatalog::from_recipes(vec![
            recipe(1, "Idli", &["rice", "urad dal"]),
            recipe(2, "Pongal", &["rice", "moong dal"]),
        ]);

        let pongal = catalog.get(RecipeId::new(2)).unwrap();
        assert_eq!(pongal.title, "Pongal");
        assert!(catalog.get(RecipeId::new(99)).is_none());
    }

    #[test]
    fn test_add_recipe_last_write_wins() {
        let mut catalog = RecipeCatalog::new();
        assert!(!catalog.add_recipe(recipe(1, "Idli", &["rice"])));
        assert!(!catalog.add_recipe(recipe(2, "Pongal", &["rice"])));
        assert!(catalog.add_recipe(recipe(1, "Soft Idli", &["rice", "urad dal"])));

        assert_eq!(catalog.len(), 2);
        // Replacement keeps the original position
        assert_eq!(catalog.recipes()[0].title, "Soft Idli");
        assert_eq!(catalog.get(RecipeId::new(1)).unwrap().ingredients.len(), 2);
    }

    #[test]
    fn test_merge_summary() {
        let mut catalog = RecipeCatalog::from_recipes(vec![recipe(1, "Idli", &["rice"])]);
        let summary = catalog.merge(vec![
            recipe(1, "Idli v2", &["rice"]),
            recipe(3, "Upma", &["semolina"]),
        ]);
        assert_eq!(summary, MergeSummary { added: 1, replaced: 1 });
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_search_title() {
        let catalog = RecipeCatalog::from_recipes(vec![
            recipe(1, "Masala Dosa", &["rice"]),
            recipe(2, "Plain Dosa", &["rice"]),
            recipe(3, "Pongal", &["rice"]),
        ]);
        let hits: Vec<_> = catalog.search_title("DOSA").iter().map(|r| r.id.0).collect();
        assert_eq!(hits, vec![1, 2]);
        assert!(catalog.search_title("  ").is_empty());
    }

    #[test]
    fn test_search_title_or_ingredient() {
        let catalog = RecipeCatalog::from_recipes(vec![
            recipe(1, "Idli", &["rice", "Urad Dal"]),
            recipe(2, "Dal Tadka", &["toor dal"]),
            recipe(3, "Omelette", &["eggs"]),
        ]);
        let hits: Vec<_> = catalog.search("dal").iter().map(|r| r.id.0).collect();
        assert_eq!(hits, vec![1, 2]);
        assert_eq!(catalog.search("").len(), 3);
        assert_eq!(catalog.search("  ").len(), 3);
    }

    #[test]
    fn test_random_with_seed() {
        let catalog = RecipeCatalog::from_recipes(vec![
            recipe(1, "A", &["rice"]),
            recipe(2, "B", &["rice"]),
            recipe(3, "C", &["rice"]),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = catalog.random_with(&mut rng, 2);
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0].id, picked[1].id);

        // Asking for more than available returns everything once
        assert_eq!(catalog.random(10).len(), 3);
        assert!(RecipeCatalog::new().random(3).is_empty());
    }

    #[test]
    fn test_from_json_bare_array() {
        let json = r#"[
            {"id": 1, "title": "Idli", "ingredients": [{"name": "rice", "amount": 2, "unit": "cups"}]},
            {"id": 1, "title": "Idli (updated)", "ingredients": [{"name": "rice"}]}
        ]"#;
        let catalog = RecipeCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.recipes()[0].title, "Idli (updated)");
    }

    #[test]
    fn test_from_json_rejects_invalid_recipe() {
        let json = r#"{"version": "1.0.0", "created_at": "now", "recipes": [{"id": 1, "title": "", "ingredients": []}]}"#;
        assert!(matches!(
            RecipeCatalog::from_json(json),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_json_reports_recipe_error() {
        let bare = r#"[{"id": 1, "title": "  ", "ingredients": []}]"#;
        let err = RecipeCatalog::from_json(bare).unwrap_err().to_string();
        assert!(err.contains("Recipe 1 has an empty title"), "{err}");

        let versioned = r#"{"version": "1.0.0", "created_at": "now", "recipes": [
            {"id": 2, "title": "Upma", "ingredients": [{"name": " "}]}
        ]}"#;
        let err = RecipeCatalog::from_json(versioned).unwrap_err().to_string();
        assert!(err.contains("Recipe 2: ingredient #0 has an empty name"), "{err}");
    }

    #[test]
    fn test_catalog_to_json_round_trip() {
        let catalog = RecipeCatalog::from_recipes(vec![recipe(5, "Pongal", &["rice", "ghee"])]);
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"recipes\""));

        let back = RecipeCatalog::from_json(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.recipes()[0].normalized_ingredients(), &["rice", "ghee"]);
    }
}
