//! Project construction from page input.
//!
//! # Responsibility
//! - Parse element attribute bags (`element`).
//! - Build, number and register project records (`project_factory`).
//!
//! DOM traversal stays with the caller; this layer only sees attribute bags.

pub mod element;
pub mod project_factory;
