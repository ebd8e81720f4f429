//! Pagination entry point.
//!
//! Install with [`axum::middleware::from_fn_with_state`]:
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/books", get(list_books))
//!     .layer(from_fn_with_state(config.pagination.clone(), paginate));
//! ```

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use pagekit_core::config::pagination::PaginationConfig;
use pagekit_core::error::AppError;
use pagekit_core::types::{Pageable, QueryParams};

/// Parses `page`, `size`, `sort`, and `indexed` from the query string and
/// stores the resulting [`Pageable`] in the request extensions before
/// running the rest of the chain.
///
/// Malformed input short-circuits with a 400 response; the next handler
/// is not called.
pub async fn paginate(
    State(config): State<PaginationConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let params = QueryParams::parse(request.uri().query().unwrap_or_default());
    let pageable = Pageable::from_query(&params, &config)?;

    request.extensions_mut().insert(pageable);

    Ok(next.run(request).await)
}
