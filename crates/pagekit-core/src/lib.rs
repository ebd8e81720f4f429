//! # pagekit-core
//!
//! Core crate for PageKit. Parses pagination intent (page, size, sort,
//! output shape) from request query parameters into a [`Pageable`], and
//! provides the page containers a data layer fills and a serializer emits
//! as either a flat array or an id-normalized index.
//!
//! This crate has **no** internal dependencies on other PageKit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::{Pageable, QueryParams, Sort};
