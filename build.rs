use std::path::Path;

fn main() {
    let catalog_path = Path::new("data/recipes.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the recipe catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    // Parse and validate JSON
    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    assert!(
        catalog.get("version").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Missing 'version' field\n"
    );

    let recipes = catalog.get("recipes").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'recipes' field\n\
             The catalog must have a top-level 'recipes' array.\n"
        );
    });

    let recipes = recipes.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'recipes' must be an array\n\
             Got: {recipes}\n"
        );
    });

    let total_ingredients = validate_recipes(recipes);

    println!(
        "cargo:warning=Validated catalog: {} recipes, {total_ingredients} total ingredients",
        recipes.len()
    );
}

fn validate_recipes(recipes: &[serde_json::Value]) -> usize {
    let mut seen_ids = std::collections::HashSet::new();
    let mut total_ingredients = 0;

    for (i, recipe) in recipes.iter().enumerate() {
        let id = recipe.get("id").and_then(serde_json::Value::as_u64);
        assert!(
            id.is_some_and(|id| id > 0),
            "\n\nCATALOG BUILD ERROR: Recipe at index {i} needs a positive integer 'id'\n"
        );
        let id = id.unwrap_or_default();
        assert!(
            seen_ids.insert(id),
            "\n\nCATALOG BUILD ERROR: Duplicate recipe id {id} (index {i})\n"
        );

        let title = recipe
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        assert!(
            !title.trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Recipe {id} (index {i}) missing 'title'\n"
        );

        total_ingredients += validate_recipe_ingredients(recipe, id);
    }

    total_ingredients
}

fn validate_recipe_ingredients(recipe: &serde_json::Value, id: u64) -> usize {
    let ingredients = recipe
        .get("ingredients")
        .and_then(|v| v.as_array())
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Recipe {id} missing 'ingredients' array\n");
        });

    for (j, ingredient) in ingredients.iter().enumerate() {
        let name = ingredient
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        assert!(
            !name.trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Recipe {id} ingredient {j} has no 'name'\n"
        );
    }

    ingredients.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=data/recipes.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
