//! In-memory project storage.
//!
//! # Responsibility
//! - Hold registered projects for the process lifetime.
//! - Provide the process-wide shared store and injectable instances.
//!
//! # Invariants
//! - Nothing here persists across process restarts.

pub mod project_store;
