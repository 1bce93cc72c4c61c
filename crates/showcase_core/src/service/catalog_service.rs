//! Catalog bootstrap use-case service.
//!
//! # Responsibility
//! - Turn the project elements found on a page into registered projects.
//! - Hand back a navigator over exactly the projects registered by one run.
//!
//! # Invariants
//! - One bad element never aborts the run; it is skipped and reported.
//! - Successful projects keep element order in both store and navigator.

use crate::factory::element::ElementSource;
use crate::factory::project_factory::{FactoryError, FactoryOptions, ProjectFactory};
use crate::nav::catalog_navigator::CatalogNavigator;
use crate::store::project_store::{ProjectHandle, ProjectStore};
use log::{info, warn};

/// Element that did not produce a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedElement {
    /// Position of the element in the input list.
    pub index: usize,
    pub error: FactoryError,
}

/// Result envelope of one bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// Navigator over `registered`, cursor at the first project.
    pub navigator: CatalogNavigator,
    /// Projects added to the store by this run, in element order.
    pub registered: Vec<ProjectHandle>,
    pub skipped: Vec<SkippedElement>,
}

/// Use-case service wiring factory, store and navigator together.
#[derive(Debug)]
pub struct CatalogService<'store> {
    store: &'store ProjectStore,
    factory: ProjectFactory,
}

impl CatalogService<'static> {
    /// Service bound to the process-wide store.
    pub fn global(options: FactoryOptions) -> Self {
        Self::new(ProjectStore::global(), options)
    }
}

impl<'store> CatalogService<'store> {
    pub fn new(store: &'store ProjectStore, options: FactoryOptions) -> Self {
        Self {
            store,
            factory: ProjectFactory::with_options(options),
        }
    }

    pub fn store(&self) -> &'store ProjectStore {
        self.store
    }

    /// Builds one element and registers it in the store.
    pub fn register_element(
        &mut self,
        element: &ElementSource,
    ) -> Result<ProjectHandle, FactoryError> {
        self.factory.build_and_register(self.store, element)
    }

    /// Registers every element and returns a navigator over the new projects.
    pub fn bootstrap(&mut self, elements: &[ElementSource]) -> BootstrapResult {
        let mut registered = Vec::with_capacity(elements.len());
        let mut skipped = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            match self.register_element(element) {
                Ok(project) => registered.push(project),
                Err(error) => {
                    warn!(
                        "event=catalog_bootstrap module=service status=skip index={} error={}",
                        index, error
                    );
                    skipped.push(SkippedElement { index, error });
                }
            }
        }

        info!(
            "event=catalog_bootstrap module=service status=ok registered={} skipped={}",
            registered.len(),
            skipped.len()
        );

        let mut navigator = CatalogNavigator::new();
        navigator.set_catalog(registered.iter().cloned());
        BootstrapResult {
            navigator,
            registered,
            skipped,
        }
    }
}
