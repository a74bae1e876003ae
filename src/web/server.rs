use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::shared::RecipeStore;
use crate::catalog::store::RecipeCatalog;
use crate::cli::{GlobalOptions, ServeArgs};
use crate::core::query::IngredientQuery;
use crate::core::recipe::Recipe;
use crate::core::types::{MatchMode, Operator, RecipeId};
use crate::matching::engine::{MatchResult, MatchingConfig, MatchingEngine, SimilarityResult};
use crate::matching::recommend::{respond, RANDOM_ALTERNATIVES};
use crate::utils::validation::{
    clamp_random_count, parse_operators, validate_merge_size, validate_message, validate_terms,
    ValidationError,
};

/// Request body limit (merges carry whole recipe lists)
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Shared application state
pub struct AppState {
    pub store: RecipeStore,
    pub config: MatchingConfig,
    pub max_results: usize,
}

impl AppState {
    pub fn new(catalog: RecipeCatalog, config: MatchingConfig, max_results: usize) -> Self {
        Self {
            store: RecipeStore::new(catalog),
            config,
            max_results,
        }
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_reply(status: StatusCode, response: ErrorResponse) -> Response {
    (status, Json(response)).into_response()
}

fn validation_error(err: &ValidationError) -> Response {
    error_reply(
        StatusCode::BAD_REQUEST,
        create_safe_error_response("validation_error", &err.to_string(), None),
    )
}

fn json_rejection(rejection: &JsonRejection) -> Response {
    error_reply(
        rejection.status(),
        create_safe_error_response(
            "invalid_request",
            "Request body is not valid JSON for this endpoint",
            Some(&rejection.body_text()),
        ),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeSummary<'a> {
    id: RecipeId,
    title: &'a str,
    image: Option<&'a str>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    source_url: Option<&'a str>,
    cuisines: &'a [String],
    ingredient_count: usize,
}

impl<'a> From<&'a Recipe> for RecipeSummary<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            id: recipe.id,
            title: &recipe.title,
            image: recipe.image.as_deref(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            source_url: recipe.source_url.as_deref(),
            cuisines: &recipe.cuisines,
            ingredient_count: recipe.ingredients.len(),
        }
    }
}

#[derive(Deserialize)]
struct RandomParams {
    number: Option<usize>,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
struct MatchRequest {
    terms: Vec<String>,
    #[serde(default)]
    operators: Vec<String>,
    /// Overrides the server's match mode for this request
    lenient: Option<bool>,
}

#[derive(Serialize)]
struct MatchResponse {
    query: String,
    terms: Vec<String>,
    operators: Vec<Operator>,
    count: usize,
    results: Vec<MatchResult>,
}

#[derive(Deserialize)]
struct SimilarRequest {
    terms: Vec<String>,
}

#[derive(Serialize)]
struct SimilarResponse {
    count: usize,
    results: Vec<SimilarityResult>,
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let catalog = options.load_catalog()?;
    let state = Arc::new(AppState::new(
        catalog,
        options.matching.clone(),
        options.max_results,
    ));

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, state).await })
}

/// API routes without the network-facing middleware.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/recipes", get(list_recipes_handler))
        .route("/api/recipes/random", get(random_recipes_handler))
        .route("/api/recipes/search", get(search_recipes_handler))
        .route("/api/recipes/merge", post(merge_recipes_handler))
        .route("/api/recipes/{id}", get(get_recipe_handler))
        .route("/api/match", post(match_handler))
        .route("/api/similar", post(similar_handler))
        .route("/api/chat", post(chat_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    // Build router with comprehensive security layers
    let app = create_api_router(state).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("strict-transport-security"),
                HeaderValue::from_static("max-age=31536000; includeSubDomains"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs, state: Arc<AppState>) -> anyhow::Result<()> {
    let recipes = state.store.snapshot().len();
    let app = create_router(state)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting ingreedy web server at http://{addr}");
    tracing::info!(%addr, recipes, "Server listening");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/recipes"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "recipes": state.store.snapshot().len(),
    }))
}

async fn list_recipes_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let catalog = state.store.snapshot();
    let recipes: Vec<RecipeSummary> = catalog.recipes().iter().map(RecipeSummary::from).collect();

    Json(serde_json::json!({
        "count": recipes.len(),
        "recipes": recipes,
    }))
}

async fn get_recipe_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Response {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            return error_reply(
                rejection.status(),
                create_safe_error_response(
                    "invalid_request",
                    "Recipe id must be a positive integer",
                    Some(&rejection.body_text()),
                ),
            );
        }
    };

    let catalog = state.store.snapshot();
    match catalog.get(RecipeId::new(id)) {
        Some(recipe) => Json(recipe).into_response(),
        None => error_reply(
            StatusCode::NOT_FOUND,
            create_safe_error_response("not_found", &format!("Recipe {id} not found"), None),
        ),
    }
}

async fn random_recipes_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RandomParams>,
) -> Json<Vec<Recipe>> {
    let number = clamp_random_count(params.number.unwrap_or(RANDOM_ALTERNATIVES));
    let catalog = state.store.snapshot();
    Json(catalog.random(number).into_iter().cloned().collect())
}

async fn search_recipes_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Recipe>> {
    let catalog = state.store.snapshot();
    Json(
        catalog
            .search(&params.query)
            .into_iter()
            .take(state.max_results)
            .cloned()
            .collect(),
    )
}

async fn merge_recipes_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let Ok(text) = std::str::from_utf8(&body) else {
        return error_reply(
            StatusCode::BAD_REQUEST,
            create_safe_error_response("invalid_request", "Request body must be UTF-8 JSON", None),
        );
    };

    let incoming = match RecipeCatalog::from_json(text) {
        Ok(incoming) => incoming,
        Err(e) => {
            return error_reply(
                StatusCode::BAD_REQUEST,
                create_safe_error_response(
                    "invalid_recipes",
                    "Body must be a recipe array or catalog with valid recipes",
                    Some(&e.to_string()),
                ),
            );
        }
    };
    if let Err(e) = validate_merge_size(incoming.len()) {
        return validation_error(&e);
    }

    let summary = state.store.merge(incoming.recipes().to_vec());
    Json(serde_json::json!({
        "added": summary.added,
        "replaced": summary.replaced,
        "total": state.store.snapshot().len(),
    }))
    .into_response()
}

async fn match_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&rejection),
    };

    let operators = match parse_operators(&request.operators) {
        Ok(operators) => operators,
        Err(e) => return validation_error(&e),
    };
    if let Err(e) = validate_terms(&request.terms, &operators) {
        return validation_error(&e);
    }

    let mut config = state.config.clone();
    match request.lenient {
        Some(true) => config.mode = MatchMode::Lenient,
        Some(false) => config.mode = MatchMode::Strict,
        None => {}
    }

    let query = IngredientQuery::new(&request.terms, &operators);
    let catalog = state.store.snapshot();
    let engine = MatchingEngine::with_config(&catalog, config);

    let mut results = engine.find_matches(&query);
    results.truncate(state.max_results);

    Json(MatchResponse {
        query: query.to_string(),
        terms: query.terms().to_vec(),
        operators: query.operators().to_vec(),
        count: results.len(),
        results,
    })
    .into_response()
}

async fn similar_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimilarRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&rejection),
    };
    if let Err(e) = validate_terms(&request.terms, &[]) {
        return validation_error(&e);
    }

    let catalog = state.store.snapshot();
    let engine = MatchingEngine::with_config(&catalog, state.config.clone());
    let mut results = engine.find_similar(&request.terms);
    results.truncate(state.max_results);

    Json(SimilarResponse {
        count: results.len(),
        results,
    })
    .into_response()
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&rejection),
    };
    if let Err(e) = validate_message(&request.message) {
        return validation_error(&e);
    }

    tracing::info!(length = request.message.len(), "Received chat message");

    let catalog = state.store.snapshot();
    Json(respond(
        &catalog,
        &request.message,
        &state.config,
        state.max_results,
    ))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_error_response_hides_details() {
        let response = create_safe_error_response(
            "invalid_recipes",
            "Bad recipes",
            Some("missing field `title` at line 3"),
        );
        assert_eq!(response.error, "Bad recipes");
        assert_eq!(response.error_type, "invalid_recipes");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_recipe_summary_fields() {
        let recipe = Recipe::new(
            7,
            "Idli",
            vec![crate::core::recipe::Ingredient::named("rice")],
        )
        .unwrap()
        .with_timing(30, 4);
        let json = serde_json::to_value(RecipeSummary::from(&recipe)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["readyInMinutes"], 30);
        assert_eq!(json["ingredientCount"], 1);
    }

    #[test]
    fn test_create_router_builds() {
        let state = Arc::new(AppState::new(
            RecipeCatalog::new(),
            MatchingConfig::default(),
            20,
        ));
        assert!(create_router(state).is_ok());
    }
}
