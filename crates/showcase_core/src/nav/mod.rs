//! Catalog navigation for UI next/prev controls.

pub mod catalog_navigator;
