use showcase_core::{CatalogService, ElementSource, FactoryError, FactoryOptions, ProjectStore};

fn page_elements() -> Vec<ElementSource> {
    vec![
        ElementSource::new().with_attribute(
            "data-project-details",
            r#"{"label":"first","title":"First","tags":["featured"]}"#,
        ),
        ElementSource::new().with_attribute("class", "project"),
        ElementSource::new()
            .with_attribute("data-title", "Second")
            .with_attribute("data-tags", "x,featured"),
        ElementSource::new().with_attribute("data-project-details", "not json"),
    ]
}

#[test]
fn bootstrap_registers_valid_elements_and_reports_skipped() {
    let store = ProjectStore::new();
    let mut service = CatalogService::new(&store, FactoryOptions::default());

    let result = service.bootstrap(&page_elements());

    assert_eq!(result.registered.len(), 2);
    assert_eq!(store.len(), 2);
    assert_eq!(
        result
            .skipped
            .iter()
            .map(|skipped| skipped.index)
            .collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(result.skipped[0].error, FactoryError::MissingMarker);
    assert!(matches!(
        result.skipped[1].error,
        FactoryError::MalformedDetails(_)
    ));
    assert_eq!(store.find_by_tag("featured").len(), 2);
}

#[test]
fn bootstrap_navigator_covers_only_this_run() {
    let store = ProjectStore::new();
    let mut service = CatalogService::new(&store, FactoryOptions::default());
    service.bootstrap(&page_elements());

    let mut result = service.bootstrap(&page_elements()[..1]);
    assert_eq!(store.len(), 3);
    assert_eq!(result.navigator.len(), 1);

    let current = result.navigator.current().unwrap();
    assert!(current.ptr_eq(&result.registered[0]));
    assert_eq!(current.id(), 2);
    assert!(result.navigator.next().unwrap().ptr_eq(&current));
}
