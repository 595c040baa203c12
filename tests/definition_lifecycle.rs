//! Lifecycle of a schema class definition: prepare, commit, load, modify.

mod common;

use ad_schema::definition::{AUXILIARY_CLASS, POSS_SUPERIORS, SchemaClassDefinition};
use ad_schema::directory::InMemorySchemaStore;
use ad_schema::error::{ErrorKind, SchemaError};
use common::*;

#[test]
fn test_commit_persists_collections_in_bulk() {
    init_logging();
    let store = InMemorySchemaStore::new();
    let mut draft = SchemaClassDefinition::new(store.clone(), context(), "contoso-Widget").unwrap();

    draft
        .possible_superiors_mut()
        .add_range(&[bound("organizationalUnit"), bound("container")])
        .unwrap();
    draft
        .auxiliary_classes_mut()
        .add(bound("mailRecipient"))
        .unwrap();
    assert_eq!(store.stats().total(), 0);

    draft.commit().unwrap();

    assert!(draft.is_bound());
    assert!(draft.possible_superiors().is_attached());
    assert!(draft.auxiliary_classes().is_attached());
    assert_eq!(store.stats().binds, 1);
    assert_eq!(store.stats().writes, 0);
    assert_eq!(
        store.class_values("contoso-Widget", POSS_SUPERIORS),
        Some(vec![
            "organizationalUnit".to_string(),
            "container".to_string()
        ])
    );
    assert_eq!(
        store.class_values("contoso-Widget", AUXILIARY_CLASS),
        Some(vec!["mailRecipient".to_string()])
    );
}

#[test]
fn test_committed_definition_writes_through() {
    let store = InMemorySchemaStore::new();
    let mut widget =
        SchemaClassDefinition::new(store.clone(), context(), "contoso-Widget").unwrap();
    widget.commit().unwrap();

    widget
        .possible_superiors_mut()
        .add(bound("domainDNS"))
        .unwrap();
    widget
        .possible_superiors_mut()
        .remove(&bound("domainDNS"))
        .unwrap();
    widget
        .auxiliary_classes_mut()
        .add(bound("securityPrincipal"))
        .unwrap();

    assert_eq!(
        store.class_values("contoso-Widget", POSS_SUPERIORS),
        Some(Vec::new())
    );
    assert_eq!(
        store.class_values("contoso-Widget", AUXILIARY_CLASS),
        Some(vec!["securityPrincipal".to_string()])
    );
}

#[test]
fn test_load_reads_both_attributes() {
    let store = InMemorySchemaStore::new();
    store.seed_class(
        "user",
        &[
            (POSS_SUPERIORS, &["builtinDomain", "domainDNS", "organizationalUnit"]),
            (AUXILIARY_CLASS, &["securityPrincipal"]),
        ],
    );

    let user = SchemaClassDefinition::load(store.clone(), context(), "USER").unwrap();

    assert!(user.is_bound());
    assert_eq!(
        user.possible_superiors().multi_valued_property(),
        vec!["builtinDomain", "domainDNS", "organizationalUnit"]
    );
    assert_eq!(
        user.auxiliary_classes().multi_valued_property(),
        vec!["securityPrincipal"]
    );
    assert_eq!(user.possible_superiors().owner_name().as_str(), "USER");
}

#[test]
fn test_committed_class_can_be_referenced() {
    let store = InMemorySchemaStore::new();
    store.seed_class("user", &[(POSS_SUPERIORS, &["domainDNS"])]);
    let mut user = SchemaClassDefinition::load(store.clone(), context(), "user").unwrap();

    let mut widget =
        SchemaClassDefinition::new(store.clone(), context(), "contoso-Widget").unwrap();
    let error = user
        .possible_superiors_mut()
        .add(widget.as_class().clone())
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidState);

    widget.commit().unwrap();
    user.possible_superiors_mut()
        .add(widget.as_class().clone())
        .unwrap();
    assert_eq!(
        store.class_values("user", POSS_SUPERIORS),
        Some(vec!["domainDNS".to_string(), "contoso-Widget".to_string()])
    );
}

#[test]
fn test_commit_existing_class_fails() {
    let store = InMemorySchemaStore::new();
    store.seed_class("contoso-Widget", &[]);

    let mut draft =
        SchemaClassDefinition::new(store.clone(), context(), "contoso-Widget").unwrap();
    let error = draft.commit().unwrap_err();
    assert!(matches!(error, SchemaError::DirectoryOperation { .. }));
    assert!(!draft.is_bound());
}

#[test]
fn test_invalid_class_name() {
    let error = SchemaClassDefinition::new(InMemorySchemaStore::new(), context(), "").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NullArgument);

    let error =
        SchemaClassDefinition::new(InMemorySchemaStore::new(), context(), "widget class")
            .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}
