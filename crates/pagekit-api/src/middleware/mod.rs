//! Axum middleware stack.

pub mod logging;
pub mod pagination;
