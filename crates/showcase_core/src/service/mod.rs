//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate factory, store and navigator into page-level flows.
//! - Keep callers decoupled from how projects are built and stored.

pub mod catalog_service;
