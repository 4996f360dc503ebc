use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use catalog_core::persist::{load_corpus, CatalogPaths};
use catalog_core::{compare, search, CatalogError, CourseCorpus, CourseRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct SearchResult {
    pub course_id: String,
    pub title: String,
    pub url: String,
    pub score: f64,
}

#[derive(Deserialize)]
pub struct CompareParams {
    pub a: String,
    pub b: String,
}

#[derive(Serialize)]
pub struct CompareResponse {
    pub a: String,
    pub b: String,
    pub similarity: f64,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<CourseCorpus>,
}

pub fn build_app(catalog_dir: String) -> Result<Router> {
    // Load the corpus snapshot once; it is read-only afterwards
    let corpus = load_corpus(&CatalogPaths::new(&catalog_dir))?;
    tracing::info!(courses = corpus.len(), catalog = %catalog_dir, "loaded course corpus");
    Ok(build_router(corpus))
}

pub fn build_router(corpus: CourseCorpus) -> Router {
    let app_state = AppState { corpus: Arc::new(corpus) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/compare", get(compare_handler))
        .route("/course/:course_id", get(course_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let words: Vec<&str> = params.q.split_whitespace().collect();
    let mut hits = search(&words, &state.corpus, state.corpus.len());
    let total_hits = hits.len();
    hits.truncate(params.k);

    let results = hits
        .into_iter()
        .map(|hit| {
            let title = state.corpus.get(&hit.course_id).map(|c| c.title.clone()).unwrap_or_default();
            SearchResult { course_id: hit.course_id, title, url: hit.url, score: hit.score }
        })
        .collect();

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn compare_handler(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<CompareResponse>, (StatusCode, String)> {
    let similarity = compare(&state.corpus, &params.a, &params.b).map_err(not_found)?;
    Ok(Json(CompareResponse { a: params.a, b: params.b, similarity }))
}

pub async fn course_handler(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseRecord>, (StatusCode, String)> {
    let course = state.corpus.lookup(&course_id).map_err(not_found)?;
    Ok(Json(course.clone()))
}

fn not_found(err: CatalogError) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, err.to_string())
}
