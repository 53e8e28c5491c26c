use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sift_core::{RankingMode, SearchEngine, SearchHit};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// The engine behind one lock: indexing takes the write half, searches
/// take the read half. BM25 scans every posting table for its average
/// document length, so nothing finer-grained than a whole-index lock is
/// sound here.
pub type SharedEngine = Arc<RwLock<SearchEngine>>;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_mode() -> String {
    "frequency".to_string()
}
fn default_k() -> usize {
    10
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: &'static str,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Deserialize)]
pub struct IndexRequest {
    pub id: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub indexed: String,
    pub documents: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub terms: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub admin_token: Option<String>,
}

pub fn build_app(engine: SharedEngine, admin_token: Option<String>) -> Router {
    let state = AppState {
        engine,
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/index", post(index_handler))
        .with_state(state)
        .layer(cors)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let mode = RankingMode::parse(&params.mode);
    let hits = state.engine.read().search_ranked(&params.q, mode);
    let total_hits = hits.len();
    let k = params.k.max(1).min(100);
    let results: Vec<SearchHit> = hits.into_iter().take(k).collect();
    Json(SearchResponse {
        query: params.q,
        mode: mode.as_str(),
        took_s: start.elapsed().as_secs_f64(),
        total_hits,
        results,
    })
}

async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.read();
    Json(StatsResponse {
        documents: engine.index().document_count(),
        terms: engine.index().term_count(),
    })
}

async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<IndexRequest>,
) -> Result<Json<IndexResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.write();
    engine.index_document(&req.id, &req.text);
    let documents = engine.index().document_count();
    tracing::info!(doc_id = %req.id, documents, "indexed document");
    Ok(Json(IndexResponse {
        indexed: req.id,
        documents,
    }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers
        .get("X-ADMIN-TOKEN")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
