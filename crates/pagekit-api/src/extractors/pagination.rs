//! `Paged` extractor: hands the request's parsed `Pageable` to handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use pagekit_core::error::AppError;
use pagekit_core::types::Pageable;

/// Pagination request stored by the [`paginate`](crate::middleware::pagination::paginate)
/// middleware.
#[derive(Debug, Clone)]
pub struct Paged(pub Pageable);

impl Paged {
    /// Returns the inner `Pageable`.
    pub fn pageable(&self) -> &Pageable {
        &self.0
    }

    /// Consumes the extractor, returning the `Pageable`.
    pub fn into_inner(self) -> Pageable {
        self.0
    }
}

impl std::ops::Deref for Paged {
    type Target = Pageable;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Paged
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Pageable>()
            .cloned()
            .map(Paged)
            .ok_or_else(|| {
                AppError::internal(
                    "No Pageable on request; the pagination middleware is not installed",
                )
            })
    }
}
