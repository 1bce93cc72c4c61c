//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `showcase_core` linkage without a browser host.
//! - Run the catalog bootstrap over two fixed elements with stable output.

use showcase_core::{CatalogService, ElementSource, FactoryOptions};
use std::path::PathBuf;

const LOG_DIR_NAME: &str = "showcase";

fn log_dir() -> PathBuf {
    std::env::temp_dir().join(LOG_DIR_NAME)
}

fn demo_elements() -> Vec<ElementSource> {
    vec![
        ElementSource::new().with_attribute(
            "data-project-details",
            r#"{"label":"showcase","title":"Showcase","tags":["rust","web"]}"#,
        ),
        ElementSource::new()
            .with_attribute("data-title", "Field Notes")
            .with_attribute("data-tags", "writing, featured")
            .with_inner_html(r#"<img src="covers/field-notes.png">"#),
    ]
}

fn main() {
    println!("showcase_core ping={}", showcase_core::ping());
    println!("showcase_core version={}", showcase_core::core_version());

    let dir = log_dir();
    match showcase_core::init_logging(
        showcase_core::default_log_level(),
        &dir.to_string_lossy(),
    ) {
        Ok(()) => println!("logging dir={}", dir.display()),
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let mut service = CatalogService::global(FactoryOptions::default());
    let mut result = service.bootstrap(&demo_elements());
    println!(
        "catalog registered={} skipped={}",
        result.registered.len(),
        result.skipped.len()
    );

    if let Some(project) = result.navigator.current() {
        println!("current={}", project.to_json());
    }
    if let Ok(project) = result.navigator.next() {
        println!("next={}", project.to_json());
    }

    showcase_core::flush_logging();
}
