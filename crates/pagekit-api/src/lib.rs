//! # pagekit-api
//!
//! Axum integration for PageKit.
//!
//! Provides the pagination middleware that turns request query parameters
//! into a [`Pageable`](pagekit_core::Pageable) stored on the request, the
//! [`Paged`] extractor that hands it to handlers, and request logging.

pub mod extractors;
pub mod middleware;

pub use extractors::Paged;
pub use middleware::pagination::paginate;
