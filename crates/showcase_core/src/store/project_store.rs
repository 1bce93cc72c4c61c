//! Shared project store.
//!
//! # Responsibility
//! - Own every registered project for the lifetime of the process.
//! - Answer id/tag lookups over registered projects.
//!
//! # Invariants
//! - `ProjectStore::global()` always returns the same instance.
//! - Identity is handle identity: two handles are the same project only when
//!   they share one allocation (`ProjectHandle::ptr_eq`).
//! - `all()` and the lookup APIs return snapshots, never live views.
//!
//! The host is a single UI event loop, so the lock is never contended; it
//! exists because a process-wide static must be `Sync`.

use crate::model::project::{DetailError, DetailValue, ProjectId, ProjectRecord};
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static GLOBAL_STORE: Lazy<ProjectStore> = Lazy::new(ProjectStore::new);

/// Store ingestion errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The value handed to the store is not a project record.
    InvalidRecordKind(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecordKind(details) => {
                write!(f, "value is not a project record: {details}")
            }
        }
    }
}

impl Error for StoreError {}

/// Shared, mutable reference to one project record.
///
/// Cloning a handle clones the reference, not the record.
#[derive(Debug, Clone)]
pub struct ProjectHandle(Arc<RwLock<ProjectRecord>>);

impl ProjectHandle {
    pub fn new(record: ProjectRecord) -> Self {
        Self(Arc::new(RwLock::new(record)))
    }

    /// Whether both handles point at the same project.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> ProjectId {
        self.read().id()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.read().has_tag(tag)
    }

    /// Copy of the current record state.
    pub fn snapshot(&self) -> ProjectRecord {
        self.read().clone()
    }

    pub fn get_detail(&self, key: &str) -> Option<DetailValue> {
        self.read().get_detail(key)
    }

    /// See [`ProjectRecord::set_detail`].
    pub fn set_detail(&self, key: &str, value: impl Into<DetailValue>) -> Result<(), DetailError> {
        self.write().set_detail(key, value)
    }

    /// See [`ProjectRecord::set_detail_value`].
    pub fn set_detail_value(&self, key: &str, value: &Value) -> Result<(), DetailError> {
        self.write().set_detail_value(key, value)
    }

    pub fn to_json(&self) -> String {
        self.read().to_json()
    }

    fn read(&self) -> RwLockReadGuard<'_, ProjectRecord> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProjectRecord> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<ProjectRecord> for ProjectHandle {
    fn from(value: ProjectRecord) -> Self {
        Self::new(value)
    }
}

/// Ordered collection of registered projects.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: RwLock<Vec<ProjectHandle>>,
}

impl ProjectStore {
    /// Creates an independent store, for callers that inject their own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store, created on first access.
    pub fn global() -> &'static ProjectStore {
        &GLOBAL_STORE
    }

    /// Appends a project handle.
    pub fn add(&self, project: ProjectHandle) {
        debug!(
            "event=project_add module=store status=ok id={}",
            project.id()
        );
        self.write().push(project);
    }

    /// Wraps a record in a new handle, appends it, and returns the handle.
    pub fn insert(&self, record: ProjectRecord) -> ProjectHandle {
        let handle = ProjectHandle::new(record);
        self.add(handle.clone());
        handle
    }

    /// Appends a project given in its JSON record form.
    ///
    /// # Errors
    /// - `InvalidRecordKind` when `value` does not decode into a record; the
    ///   store is left unchanged.
    pub fn add_value(&self, value: &Value) -> Result<ProjectHandle, StoreError> {
        match ProjectRecord::from_value(value) {
            Ok(record) => Ok(self.insert(record)),
            Err(err) => {
                warn!(
                    "event=project_add module=store status=skip reason=invalid_record_kind error={}",
                    err
                );
                Err(StoreError::InvalidRecordKind(err.to_string()))
            }
        }
    }

    /// Removes the first occurrence of `project`.
    ///
    /// Returns `false` when the project is not registered.
    pub fn remove(&self, project: &ProjectHandle) -> bool {
        let mut projects = self.write();
        let Some(index) = projects.iter().position(|entry| entry.ptr_eq(project)) else {
            debug!("event=project_remove module=store status=skip reason=not_found");
            return false;
        };
        projects.remove(index);
        true
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn contains(&self, project: &ProjectHandle) -> bool {
        self.read().iter().any(|entry| entry.ptr_eq(project))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of all projects in insertion order.
    pub fn all(&self) -> Vec<ProjectHandle> {
        self.read().clone()
    }

    /// Projects whose id equals `id`; more than one only if ids collide.
    pub fn find_by_id(&self, id: ProjectId) -> Vec<ProjectHandle> {
        self.filter(|project| project.id() == id)
    }

    /// Projects whose tag list contains `tag` exactly.
    pub fn find_by_tag(&self, tag: &str) -> Vec<ProjectHandle> {
        self.filter(|project| project.has_tag(tag))
    }

    fn filter(&self, predicate: impl Fn(&ProjectHandle) -> bool) -> Vec<ProjectHandle> {
        self.read()
            .iter()
            .filter(|project| predicate(project))
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<ProjectHandle>> {
        self.projects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ProjectHandle>> {
        self.projects.write().unwrap_or_else(PoisonError::into_inner)
    }
}
