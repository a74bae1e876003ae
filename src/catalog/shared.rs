use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::store::{MergeSummary, RecipeCatalog};
use crate::core::recipe::Recipe;

/// Shared handle to the current recipe catalog.
///
/// Readers take an `Arc` snapshot and evaluate against it without holding
/// any lock. Writers build a complete new catalog and swap it in, so a
/// snapshot never observes a partially applied update.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    current: Arc<RwLock<Arc<RecipeCatalog>>>,
}

impl RecipeStore {
    pub fn new(catalog: RecipeCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Consistent, immutable view of the catalog at this moment
    pub fn snapshot(&self) -> Arc<RecipeCatalog> {
        // A poisoned lock still holds a complete catalog; swaps never leave it half-written
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the whole catalog
    pub fn swap(&self, catalog: RecipeCatalog) -> Arc<RecipeCatalog> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }

    /// Merge recipes into a copy of the current catalog and swap it in
    pub fn merge(&self, recipes: Vec<Recipe>) -> MergeSummary {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = RecipeCatalog::clone(&**guard);
        let summary = next.merge(recipes);
        *guard = Arc::new(next);

        tracing::info!(
            added = summary.added,
            replaced = summary.replaced,
            total = guard.len(),
            "Merged recipes into catalog"
        );
        summary
    }
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new(RecipeCatalog::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::Ingredient;
    use crate::core::types::RecipeId;

    fn recipe(id: u64, title: &str) -> Recipe {
        Recipe::new(id, title, vec![Ingredient::named("rice")]).unwrap()
    }

    #[test]
    fn test_snapshot_unaffected_by_merge() {
        let store = RecipeStore::new(RecipeCatalog::from_recipes(vec![recipe(1, "Idli")]));
        let before = store.snapshot();

        let summary = store.merge(vec![recipe(1, "Idli v2"), recipe(2, "Pongal")]);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.replaced, 1);

        // The old snapshot is untouched
        assert_eq!(before.len(), 1);
        assert_eq!(before.get(RecipeId::new(1)).unwrap().title, "Idli");

        let after = store.snapshot();
        assert_eq!(after.len(), 2);
        assert_eq!(after.get(RecipeId::new(1)).unwrap().title, "Idli v2");
    }

    #[test]
    fn test_swap_returns_previous() {
        let store = RecipeStore::default();
        let previous = store.swap(RecipeCatalog::from_recipes(vec![recipe(3, "Upma")]));
        assert!(previous.is_empty());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_concurrent_readers_see_whole_catalogs() {
        let store = RecipeStore::default();
        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for batch in 0..50u64 {
                    let recipes = (1..=10).map(|i| recipe(batch * 10 + i, "Batch")).collect();
                    store.merge(recipes);
                }
            })
        };

        for _ in 0..200 {
            // Every snapshot holds a multiple of the batch size
            assert_eq!(store.snapshot().len() % 10, 0);
        }
        writer.join().unwrap();
        assert_eq!(store.snapshot().len(), 500);
    }
}
