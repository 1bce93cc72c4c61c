use showcase_core::{
    DetailKey, DetailValue, ElementSource, FactoryError, FactoryOptions, ProjectFactory,
    ProjectStore,
};

#[test]
fn builds_from_json_details_attribute() {
    let element = ElementSource::new().with_attribute(
        "data-project-details",
        r#"{"label":"p1","title":"Demo","link":"https://example.com","img":"cover.png","tags":["a","b"]}"#,
    );

    let record = ProjectFactory::new().from_element(&element).unwrap();
    assert_eq!(record.label(), "p1");
    assert_eq!(record.url(), Some("https://example.com"));
    assert_eq!(record.image(), Some("cover.png"));
    assert_eq!(
        record.get_detail("tags"),
        Some(DetailValue::List(vec!["a".to_string(), "b".to_string()]))
    );
}

#[test]
fn builds_from_discrete_attributes() {
    let element: ElementSource = [
        ("data-title", "Field Notes"),
        ("data-description", "Writing log"),
        ("data-image", "notes.png"),
        ("data-link", "/notes"),
        ("data-tags", "writing, featured"),
        ("data-date", "2024-03-02"),
        ("data-label", "notes"),
    ]
    .into_iter()
    .collect();

    let record = ProjectFactory::new().from_element(&element).unwrap();
    assert!(record.is_complete());
    assert_eq!(record.tags().unwrap(), ["writing", "featured"]);
    assert_eq!(record.date(), Some("2024-03-02"));
}

#[test]
fn recovers_image_from_inner_markup() {
    let element = ElementSource::new()
        .with_attribute("data-project-details", r#"{"title":"Gallery"}"#)
        .with_inner_html(r#"<figure><img alt="x" src="shots/main.jpg"></figure>"#);

    let record = ProjectFactory::new().from_element(&element).unwrap();
    assert_eq!(record.image(), Some("shots/main.jpg"));

    let mut factory = ProjectFactory::with_options(FactoryOptions {
        recover_image_from_markup: false,
        ..FactoryOptions::default()
    });
    assert_eq!(factory.from_element(&element).unwrap().image(), None);
}

#[test]
fn declared_image_wins_over_markup() {
    let element = ElementSource::new()
        .with_attribute("data-image", "declared.png")
        .with_inner_html(r#"<img src="markup.png">"#);

    let record = ProjectFactory::new().from_element(&element).unwrap();
    assert_eq!(record.image(), Some("declared.png"));
}

#[test]
fn missing_marker_yields_nothing_and_keeps_counter() {
    let mut factory = ProjectFactory::new();
    let element = ElementSource::new()
        .with_attribute("class", "project")
        .with_inner_html(r#"<img src="orphan.png">"#);

    assert_eq!(
        factory.from_element(&element).unwrap_err(),
        FactoryError::MissingMarker
    );
    assert_eq!(factory.next_id(), 0);
}

#[test]
fn malformed_json_and_bad_shapes_are_reported() {
    let mut factory = ProjectFactory::new();

    let broken = ElementSource::new().with_attribute("data-project-details", "{title:");
    assert!(matches!(
        factory.from_element(&broken),
        Err(FactoryError::MalformedDetails(_))
    ));

    let numeric = ElementSource::new().with_attribute("data-project-details", r#"{"title":5}"#);
    let err = factory.from_element(&numeric).unwrap_err();
    assert!(err.to_string().contains("title"));
    assert_eq!(factory.next_id(), 0);
}

#[test]
fn require_complete_flags_missing_details() {
    let mut factory = ProjectFactory::with_options(FactoryOptions {
        require_complete: true,
        ..FactoryOptions::default()
    });
    let element = ElementSource::new().with_attribute("data-title", "Half done");

    match factory.from_element(&element).unwrap_err() {
        FactoryError::IncompleteRecord { missing } => {
            assert!(missing.contains(&DetailKey::Date));
            assert!(!missing.contains(&DetailKey::Title));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn build_and_register_appends_to_store() {
    let store = ProjectStore::new();
    let mut factory = ProjectFactory::new();

    let first = factory
        .build_and_register(&store, &ElementSource::new().with_attribute("data-title", "A"))
        .unwrap();
    let second = factory
        .build_and_register(&store, &ElementSource::new().with_attribute("data-title", "B"))
        .unwrap();

    assert_eq!((first.id(), second.id()), (0, 1));
    let all = store.all();
    assert_eq!(all.len(), 2);
    assert!(all[0].ptr_eq(&first));
    assert!(all[1].ptr_eq(&second));
}
