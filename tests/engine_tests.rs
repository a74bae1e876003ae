//! Matching engine behavior against small hand-built catalogs and the
//! embedded catalog.

use ingreedy::matching::priority::PriorityRules;
use ingreedy::{
    Ingredient, IngredientQuery, MatchMode, MatchingConfig, MatchingEngine, Operator, Recipe,
    RecipeCatalog, RecipeId, RecipeStore, Strategy,
};

fn recipe(id: u64, title: &str, ingredients: &[&str]) -> Recipe {
    let ingredients = ingredients.iter().map(|n| Ingredient::named(*n)).collect();
    Recipe::new(id, title, ingredients).unwrap()
}

fn idli_pongal() -> RecipeCatalog {
    RecipeCatalog::from_recipes(vec![
        recipe(1, "Idli", &["rice", "urad dal", "fenugreek seeds", "salt"]),
        recipe(
            2,
            "Pongal",
            &["rice", "moong dal", "ghee", "pepper", "cumin", "ginger", "cashews"],
        ),
    ])
}

fn mixed_catalog() -> RecipeCatalog {
    RecipeCatalog::from_recipes(vec![
        recipe(1, "Idli", &["rice", "urad dal", "fenugreek seeds", "salt"]),
        recipe(2, "Pongal", &["rice", "moong dal", "ghee", "pepper"]),
        recipe(3, "Chicken Fried Rice", &["rice", "chicken", "soy sauce", "eggs"]),
        recipe(4, "Butter Chicken", &["chicken", "butter", "tomato puree", "cream"]),
        recipe(5, "Guacamole", &["avocados", "lime", "onion"]),
    ])
}

fn unprioritized() -> MatchingConfig {
    MatchingConfig {
        priority: PriorityRules::none(),
        ..MatchingConfig::default()
    }
}

fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn test_empty_terms_return_nothing() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);
    assert!(engine.match_by_ingredients::<&str>(&[], &[]).is_empty());
    assert!(engine
        .find_matches(&IngredientQuery::default())
        .is_empty());
}

#[test]
fn test_single_term_covers_one_group() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);

    let matches = engine.find_matches(&IngredientQuery::new(&["ghee"], &[]));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].recipe.id, RecipeId::new(2));
    assert_eq!(matches[0].score.groups_covered, 1);
    assert_eq!(matches[0].score.total_groups, 1);
}

#[test]
fn test_results_are_idempotent() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);
    let query = IngredientQuery::new(&["rice", "chicken"], &[Operator::Or]);

    let first: Vec<RecipeId> = engine.find_matches(&query).iter().map(|m| m.recipe.id).collect();
    let second: Vec<RecipeId> = engine.find_matches(&query).iter().map(|m| m.recipe.id).collect();
    assert_eq!(first, second);
}

#[test]
fn test_ties_ordered_by_title_then_id() {
    let catalog = RecipeCatalog::from_recipes(vec![
        recipe(9, "zucchini bake", &["zucchini", "cheese"]),
        recipe(8, "Apple Crumble", &["apple", "butter"]),
        recipe(7, "Cheese Toast", &["bread", "cheese"]),
        recipe(6, "cheese toast", &["bread", "cheese"]),
    ]);
    let engine = MatchingEngine::with_config(&catalog, unprioritized());

    let found = engine.match_by_ingredients(&["cheese", "butter"], &[Operator::Or]);
    let ids: Vec<u64> = found.iter().map(|r| r.id.0).collect();
    // Equal keys everywhere: title case-insensitively, then id
    assert_eq!(ids, vec![8, 6, 7, 9]);
}

#[test]
fn test_and_excludes_partial_matches() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);

    let found = engine.match_by_ingredients(&["rice", "urad dal"], &[Operator::And]);
    assert_eq!(titles(&found), vec!["Idli"]);
}

#[test]
fn test_or_includes_either_and_prefers_both() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);

    let found = engine.match_by_ingredients(&["rice", "chicken"], &[Operator::Or]);
    assert_eq!(
        titles(&found),
        vec!["Chicken Fried Rice", "Butter Chicken", "Idli", "Pongal"]
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);

    // (rice AND urad dal) OR avocados
    let query = IngredientQuery::parse_expression("rice and urad dal or avocado");
    assert_eq!(query.required_groups(), vec![vec!["rice", "urad dal"], vec!["avocado"]]);

    let found = engine.match_by_ingredients(query.terms(), query.operators());
    assert_eq!(titles(&found), vec!["Idli", "Guacamole"]);
}

#[test]
fn test_missing_operators_default_to_and() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);

    let found = engine.match_by_ingredients(&["chicken", "butter"], &[]);
    assert_eq!(titles(&found), vec!["Butter Chicken"]);
}

#[test]
fn test_fallback_for_unknown_ingredient() {
    let catalog = mixed_catalog();
    let engine = MatchingEngine::new(&catalog);

    assert!(engine.match_by_ingredients(&["unobtainium"], &[]).is_empty());
    let similar = engine.similarity_search(&["unobtainium"]);
    assert!(!similar.is_empty());

    let recommendation = engine.recommend(&IngredientQuery::new(&["unobtainium"], &[]));
    assert_eq!(recommendation.strategy, Strategy::Similarity);
}

#[test]
fn test_idli_pongal_scenario() {
    let catalog = idli_pongal();
    let engine = MatchingEngine::new(&catalog);

    let matches = engine.find_matches(&IngredientQuery::new(&["rice", "urad dal"], &[Operator::And]));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].recipe.title, "Idli");
    assert_eq!(matches[0].score.groups_covered, 1);
    assert_eq!(matches[0].score.total_matches, 2);

    let found = engine.match_by_ingredients(&["rice"], &[]);
    assert_eq!(titles(&found), vec!["Idli", "Pongal"]);
}

#[test]
fn test_strict_and_lenient_modes() {
    let catalog = RecipeCatalog::from_recipes(vec![
        recipe(1, "Black Licorice", &["licorice root", "sugar"]),
        recipe(2, "Fried Eggs", &["eggs", "butter"]),
    ]);

    let strict = MatchingEngine::new(&catalog);
    assert!(strict.match_by_ingredients(&["rice"], &[]).is_empty());
    // Plural allowance still applies in strict mode
    assert_eq!(titles(&strict.match_by_ingredients(&["egg"], &[])), vec!["Fried Eggs"]);

    let lenient = MatchingEngine::with_config(
        &catalog,
        MatchingConfig {
            mode: MatchMode::Lenient,
            ..MatchingConfig::default()
        },
    );
    assert_eq!(
        titles(&lenient.match_by_ingredients(&["rice"], &[])),
        vec!["Black Licorice"]
    );
}

#[test]
fn test_priority_sources_move_to_front() {
    let catalog = RecipeCatalog::from_recipes(vec![
        recipe(1, "Aloo Paratha", &["potatoes", "flour"]),
        recipe(2, "Baked Potatoes", &["potatoes", "butter"])
            .with_source_url("https://www.mykitchen.example/baked"),
        recipe(3, "Crispy Potatoes", &["potatoes", "oil"]),
    ]);
    let config = MatchingConfig {
        priority: PriorityRules::none().with_sources(&["mykitchen.example"]),
        ..MatchingConfig::default()
    };
    let engine = MatchingEngine::with_config(&catalog, config);

    let found = engine.match_by_ingredients(&["potatoes"], &[]);
    assert_eq!(
        titles(&found),
        vec!["Baked Potatoes", "Aloo Paratha", "Crispy Potatoes"]
    );
}

#[test]
fn test_priority_applies_to_similarity_fallback() {
    let catalog = RecipeCatalog::from_recipes(vec![
        recipe(1, "Plain Rice", &["rice", "water", "salt"]),
        recipe(2, "Lemon Rice", &["rice", "lemon"]),
        recipe(3, "Omelette", &["eggs", "onion"]).with_cuisines(vec!["Indian".to_string()]),
        recipe(4, "Toast", &["bread", "butter"]),
    ]);
    // Nothing can pass this threshold, so the top-N cut is used
    let top_n = |priority| MatchingConfig {
        similarity_threshold: 2.0,
        priority,
        ..MatchingConfig::default()
    };

    let plain = MatchingEngine::with_config(&catalog, top_n(PriorityRules::none()));
    let scored = plain.find_similar(&["rice"]);
    let ids: Vec<u64> = scored.iter().map(|r| r.recipe.id.0).collect();
    // Score descending, then id ascending among the zero scores
    assert_eq!(ids, vec![2, 1, 3, 4]);
    assert!(scored[0].similarity > scored[1].similarity);

    let prioritized = MatchingEngine::with_config(&catalog, top_n(PriorityRules::default()));
    let ids: Vec<u64> = prioritized
        .similarity_search(&["rice"])
        .iter()
        .map(|r| r.id.0)
        .collect();
    assert_eq!(ids, vec![3, 2, 1, 4]);
}

#[test]
fn test_store_snapshot_isolated_from_merge() {
    let store = RecipeStore::new(idli_pongal());
    let before = store.snapshot();

    store.merge(vec![recipe(3, "Urad Vada", &["urad dal", "pepper", "curry leaves"])]);
    let after = store.snapshot();

    let query = IngredientQuery::new(&["urad dal"], &[]);
    assert_eq!(MatchingEngine::new(&before).find_matches(&query).len(), 1);
    assert_eq!(MatchingEngine::new(&after).find_matches(&query).len(), 2);
}

#[test]
fn test_embedded_catalog_rice_and_urad_dal() {
    let catalog = RecipeCatalog::load_embedded().unwrap();
    let engine = MatchingEngine::new(&catalog);

    let found = engine.match_by_ingredients(&["rice", "urad dal"], &[Operator::And]);
    assert_eq!(titles(&found), vec!["Idli", "Masala Dosa"]);
}
