//! Application builder: wires routes, pagination, and logging into an Axum app.

use std::sync::Arc;

use axum::extract::State;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use pagekit_api::Paged;
use pagekit_api::middleware::logging::request_logging;
use pagekit_api::middleware::pagination::paginate;
use pagekit_core::config::pagination::PaginationConfig;
use pagekit_core::types::{ArrayPage, IndexablePage};

use crate::catalog::{Book, Catalog};

/// State shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Builds the application. Paginated routes run behind [`paginate`].
pub fn build_app(state: AppState, pagination: PaginationConfig) -> Router {
    Router::new()
        .route("/api/books", get(list_books))
        .route("/api/books/titles", get(list_titles))
        .route_layer(from_fn_with_state(pagination, paginate))
        .route("/health", get(health))
        .layer(from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Books in the shape requested by `indexed`.
async fn list_books(
    State(state): State<AppState>,
    Paged(pageable): Paged,
) -> Json<IndexablePage<Book>> {
    let (content, total) = state.catalog.find_page(&pageable);
    Json(IndexablePage::new(content, total, &pageable))
}

/// Book titles only, always as a flat array.
async fn list_titles(
    State(state): State<AppState>,
    Paged(pageable): Paged,
) -> Json<ArrayPage<String>> {
    let (content, total) = state.catalog.find_page(&pageable);
    let page = ArrayPage::new(content, total, &pageable).map(|book, _| book.title);
    Json(page)
}

async fn health() -> &'static str {
    "ok"
}
