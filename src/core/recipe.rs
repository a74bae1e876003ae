use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::RecipeId;
use crate::matching::normalize::normalize;

/// Errors raised when an external recipe payload fails validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    #[error("Recipe id must be positive")]
    InvalidId,

    #[error("Recipe {id} has an empty title")]
    EmptyTitle { id: RecipeId },

    #[error("Recipe {id}: ingredient #{index} has an empty name")]
    EmptyIngredientName { id: RecipeId, index: usize },

    #[error("Recipe {id}: ingredient '{name}' has an invalid amount {amount}")]
    InvalidAmount {
        id: RecipeId,
        name: String,
        amount: f64,
    },
}

/// A single ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Free-text ingredient name, compared case-insensitively
    pub name: String,

    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }

    /// Ingredient with no quantity information
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, "")
    }
}

/// A recipe in the catalog.
///
/// Recipes are validated on construction and not mutated afterwards; the
/// catalog replaces whole records instead. Deserialization goes through the
/// same validation, so malformed API payloads are rejected at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecipeData")]
pub struct Recipe {
    pub id: RecipeId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(default)]
    pub summary: String,

    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub instructions: String,

    /// Cuisine tags reported by the recipe source (e.g. "Indian")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cuisines: Vec<String>,

    // === Pre-computed for fast matching (populated on construction) ===
    /// Normalized ingredient names, parallel to `ingredients`
    #[serde(skip)]
    normalized_ingredients: Vec<String>,

    /// Lowercased title used for ordering
    #[serde(skip)]
    title_key: String,
}

/// Wire shape of a recipe before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeData {
    id: u64,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    ready_in_minutes: Option<u32>,
    #[serde(default)]
    servings: Option<u32>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    cuisines: Vec<String>,
}

impl TryFrom<RecipeData> for Recipe {
    type Error = RecipeError;

    fn try_from(data: RecipeData) -> Result<Self, Self::Error> {
        let mut recipe = Recipe::new(data.id, data.title, data.ingredients)?;
        recipe.image = data.image.filter(|s| !s.is_empty());
        recipe.ready_in_minutes = data.ready_in_minutes;
        recipe.servings = data.servings;
        recipe.source_url = data.source_url.filter(|s| !s.is_empty());
        recipe.summary = data.summary.unwrap_or_default();
        recipe.instructions = data.instructions.unwrap_or_default();
        recipe.cuisines = data.cuisines;
        Ok(recipe)
    }
}

impl Recipe {
    /// Create a validated recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is zero, the title is blank, or any
    /// ingredient has a blank name or a negative/non-finite amount.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        ingredients: Vec<Ingredient>,
    ) -> Result<Self, RecipeError> {
        if id == 0 {
            return Err(RecipeError::InvalidId);
        }
        let id = RecipeId::new(id);

        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(RecipeError::EmptyTitle { id });
        }

        for (index, ingredient) in ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(RecipeError::EmptyIngredientName { id, index });
            }
            if !ingredient.amount.is_finite() || ingredient.amount < 0.0 {
                return Err(RecipeError::InvalidAmount {
                    id,
                    name: ingredient.name.clone(),
                    amount: ingredient.amount,
                });
            }
        }

        let normalized_ingredients = ingredients.iter().map(|i| normalize(&i.name)).collect();
        let title_key = title.to_lowercase();

        Ok(Self {
            id,
            title,
            image: None,
            ready_in_minutes: None,
            servings: None,
            source_url: None,
            summary: String::new(),
            ingredients,
            instructions: String::new(),
            cuisines: Vec::new(),
            normalized_ingredients,
            title_key,
        })
    }

    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_cuisines(mut self, cuisines: Vec<String>) -> Self {
        self.cuisines = cuisines;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_timing(mut self, ready_in_minutes: u32, servings: u32) -> Self {
        self.ready_in_minutes = Some(ready_in_minutes);
        self.servings = Some(servings);
        self
    }

    #[must_use]
    pub fn with_text(mut self, summary: impl Into<String>, instructions: impl Into<String>) -> Self {
        self.summary = summary.into();
        self.instructions = instructions.into();
        self
    }

    /// Normalized ingredient names, in recipe order
    #[must_use]
    pub fn normalized_ingredients(&self) -> &[String] {
        &self.normalized_ingredients
    }

    /// All normalized ingredient names joined into one document
    #[must_use]
    pub fn ingredient_text(&self) -> String {
        self.normalized_ingredients.join(" ")
    }

    /// Case-insensitive ordering key for the title
    #[must_use]
    pub fn title_key(&self) -> &str {
        &self.title_key
    }

    /// Host of the source URL without a leading `www.`
    #[must_use]
    pub fn source_domain(&self) -> Option<String> {
        let parsed = url::Url::parse(self.source_url.as_deref()?).ok()?;
        let host = parsed.host_str()?.to_lowercase();
        Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
    }
}
