//! Cyclic cursor over a project catalog.
//!
//! # Responsibility
//! - Wrap an ordered list of project handles for next/prev UI navigation.
//! - Look up the first project carrying a given detail.
//!
//! # Invariants
//! - `0 <= current < len` whenever the catalog is non-empty.
//! - Replacing the catalog resets the cursor to 0.
//! - Navigating an empty catalog is an error, never a panic.
//! - The navigator shares handles with the store; it never removes projects.

use crate::model::project::ProjectRecord;
use crate::store::project_store::{ProjectHandle, ProjectStore};
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Navigation and catalog loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    /// Navigation attempted on a zero-length catalog.
    EmptyCatalog,
    /// A catalog item is not a project record.
    InvalidRecordKind(String),
}

impl Display for NavigatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "catalog is empty"),
            Self::InvalidRecordKind(details) => {
                write!(f, "catalog item is not a project record: {details}")
            }
        }
    }
}

impl Error for NavigatorError {}

/// One catalog item skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedItem {
    /// Position of the item in the input list.
    pub index: usize,
    pub error: NavigatorError,
}

/// Outcome of loading a loosely typed catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLoadReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedItem>,
}

/// Cursor-based view over an ordered list of projects.
#[derive(Debug, Clone, Default)]
pub struct CatalogNavigator {
    items: Vec<ProjectHandle>,
    current: usize,
}

impl CatalogNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator over a snapshot of the store contents.
    pub fn from_store(store: &ProjectStore) -> Self {
        let mut navigator = Self::new();
        navigator.set_catalog(store.all());
        navigator
    }

    /// Replaces the catalog and resets the cursor to 0.
    pub fn set_catalog(&mut self, items: impl IntoIterator<Item = ProjectHandle>) {
        self.items = items.into_iter().collect();
        self.current = 0;
    }

    /// Replaces the catalog from JSON record values.
    ///
    /// Items that do not decode into a project record are skipped and
    /// reported; the valid ones still form the new catalog.
    pub fn set_catalog_values(&mut self, values: &[Value]) -> CatalogLoadReport {
        let mut accepted = Vec::with_capacity(values.len());
        let mut rejected = Vec::new();

        for (index, value) in values.iter().enumerate() {
            match ProjectRecord::from_value(value) {
                Ok(record) => accepted.push(ProjectHandle::new(record)),
                Err(err) => {
                    warn!(
                        "event=catalog_load module=nav status=skip index={} reason=invalid_record_kind error={}",
                        index, err
                    );
                    rejected.push(RejectedItem {
                        index,
                        error: NavigatorError::InvalidRecordKind(err.to_string()),
                    });
                }
            }
        }

        let report = CatalogLoadReport {
            accepted: accepted.len(),
            rejected,
        };
        self.set_catalog(accepted);
        report
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ProjectHandle] {
        &self.items
    }

    /// Cursor index, `None` when the catalog is empty.
    pub fn position(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current)
    }

    /// Project under the cursor, `None` when the catalog is empty.
    pub fn current(&self) -> Option<ProjectHandle> {
        self.items.get(self.current).cloned()
    }

    /// Advances the cursor, wrapping to the first project after the last.
    pub fn next(&mut self) -> Result<ProjectHandle, NavigatorError> {
        let len = self.non_empty_len("next")?;
        self.current = (self.current + 1) % len;
        Ok(self.items[self.current].clone())
    }

    /// Moves the cursor back, wrapping to the last project before the first.
    pub fn prev(&mut self) -> Result<ProjectHandle, NavigatorError> {
        let len = self.non_empty_len("prev")?;
        self.current = (self.current + len - 1) % len;
        Ok(self.items[self.current].clone())
    }

    /// First project whose detail `key` is present and non-empty.
    pub fn find(&self, key: &str) -> Option<ProjectHandle> {
        self.items
            .iter()
            .find(|project| {
                project
                    .get_detail(key)
                    .is_some_and(|value| value.is_truthy())
            })
            .cloned()
    }

    fn non_empty_len(&self, direction: &str) -> Result<usize, NavigatorError> {
        if self.items.is_empty() {
            warn!(
                "event=catalog_navigate module=nav status=skip direction={} reason=empty_catalog",
                direction
            );
            return Err(NavigatorError::EmptyCatalog);
        }
        Ok(self.items.len())
    }
}
