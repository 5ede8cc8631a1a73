//! HTTP route handlers for the module API.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::error::ModuleError;
use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the full application router, CORS and fallback included.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/modules", get(list_modules))
        .route("/module/{name}", get(get_module))
        .route("/module/{name}/content", get(get_module_content))
        .route("/reload", post(reload))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// GET / - service info and endpoint listing.
async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "modserve",
        "version": VERSION,
        "description": "Serves JSON conversation modules for the voice agent",
        "endpoints": {
            "GET /": "Service info (this page)",
            "GET /health": "Health check",
            "GET /modules": "List all modules",
            "GET /module/{name}": "Get a specific module",
            "GET /module/{name}/content": "Get a module's content field only",
            "POST /reload": "Clear the module cache",
        },
        "modules_directory": state.cache.modules_dir().display().to_string(),
        "modules_loaded": state.cache.cached_count(),
    }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    modules_available: usize,
    version: &'static str,
}

/// GET /health - always healthy while the process is up, regardless of
/// cache or directory state.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        modules_available: state.cache.available(),
        version: VERSION,
    })
}

#[derive(Serialize)]
struct ModulesResponse {
    modules: Vec<String>,
    count: usize,
}

/// GET /modules - enumerate module files on disk (not just cached ones).
async fn list_modules(
    State(state): State<AppState>,
) -> Result<Json<ModulesResponse>, ModuleError> {
    let modules = state.cache.list()?;
    let count = modules.len();
    Ok(Json(ModulesResponse { modules, count }))
}

/// GET /module/{name} - full JSON of the named module.
async fn get_module(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ModuleError> {
    let value = state.cache.get(&name)?;
    Ok(Json(value))
}

/// GET /module/{name}/content - just the module's `content` field.
async fn get_module_content(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ModuleError> {
    let value = state.cache.get(&name)?;
    match value.get("content") {
        Some(content) => Ok(Json(json!({ "content": content }))),
        None => Err(ModuleError::NotFound {
            name: format!("{name}#content"),
        }),
    }
}

#[derive(Serialize)]
struct ReloadResponse {
    status: &'static str,
    message: String,
    timestamp: String,
}

/// POST /reload - drop every cached module so the next read re-parses from
/// disk.
async fn reload(State(state): State<AppState>) -> Json<ReloadResponse> {
    let dropped = state.cache.reload();
    Json(ReloadResponse {
        status: "success",
        message: format!("cache cleared ({dropped} entries dropped)"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Fallback for unknown paths.
async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "endpoint not found",
            "available_endpoints": [
                "/", "/health", "/modules", "/module/{name}",
                "/module/{name}/content", "/reload",
            ],
        })),
    )
}
