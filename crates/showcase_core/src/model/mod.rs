//! Project catalog domain model.
//!
//! # Responsibility
//! - Define the record shape every other layer passes around.
//!
//! # Invariants
//! - Recognized detail keys form a closed set (`DetailKey`).
//! - Detail values are either one string or a list of strings (`DetailValue`).

pub mod project;
