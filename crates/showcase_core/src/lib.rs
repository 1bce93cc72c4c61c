//! Core domain logic for the Showcase project catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod factory;
pub mod logging;
pub mod model;
pub mod nav;
pub mod service;
pub mod store;

pub use factory::element::{split_tags, ElementSource, PROJECT_ATTR, PROJECT_DETAILS_ATTR};
pub use factory::project_factory::{FactoryError, FactoryOptions, ProjectFactory};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status, LoggingError};
pub use model::project::{DetailError, DetailKey, DetailValue, ProjectId, ProjectRecord};
pub use nav::catalog_navigator::{
    CatalogLoadReport, CatalogNavigator, NavigatorError, RejectedItem,
};
pub use service::catalog_service::{BootstrapResult, CatalogService, SkippedElement};
pub use store::project_store::{ProjectHandle, ProjectStore, StoreError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
