//! # pagekit
//!
//! Demo server wiring the PageKit crates together: an in-memory book
//! catalog served through the pagination middleware.

pub mod app;
pub mod catalog;

pub use app::{AppState, build_app};
