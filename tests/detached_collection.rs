//! Collections whose owning schema class has not been committed.
//!
//! Every mutation stays in memory and no directory call is made.

mod common;

use ad_schema::collection::ReadOnlySchemaClassCollection;
use ad_schema::directory::InMemorySchemaStore;
use ad_schema::error::{ErrorKind, SchemaError};
use common::*;

#[test]
fn test_mutations_make_no_directory_calls() {
    init_logging();
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &["container"]);
    assert!(!collection.is_attached());

    collection.add(bound("domainDNS")).unwrap();
    collection.insert(0, bound("organizationalUnit")).unwrap();
    collection.set(1, bound("builtinDomain")).unwrap();
    collection.remove(&bound("domainDNS")).unwrap();
    collection
        .add_range(&[bound("locality"), bound("country")])
        .unwrap();
    collection.clear().unwrap();

    assert!(collection.is_empty());
    assert_eq!(store.stats().total(), 0);
    assert!(!store.has_class(OWNER));
}

#[test]
fn test_duplicate_add_keeps_single_copy() {
    init_logging();
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &[]);

    collection.add(bound("container")).unwrap();
    let error = collection.add(bound("container")).unwrap_err();

    assert!(matches!(error, SchemaError::DuplicateEntry { .. }));
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_names_compare_ignoring_case() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &[]);

    collection.add(bound("Foo")).unwrap();
    let error = collection.add(bound("foo")).unwrap_err();
    assert!(matches!(error, SchemaError::DuplicateEntry { .. }));

    assert!(collection.contains(&bound("FOO")).unwrap());
    assert_eq!(
        collection.index_of(&bound("fOO")).unwrap(),
        collection.index_of(&bound("Foo")).unwrap()
    );
    assert_eq!(collection.index_of(&bound("bar")).unwrap(), None);
}

#[test]
fn test_unbound_classes_are_rejected() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &["container"]);
    let draft = unbound("contoso-Gadget");

    assert_eq!(
        collection.add(draft.clone()).unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(
        collection.insert(0, draft.clone()).unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(
        collection.set(0, draft.clone()).unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(
        collection.remove(&unbound("container")).unwrap_err().kind(),
        ErrorKind::InvalidState
    );

    assert_eq!(collection.multi_valued_property(), vec!["container"]);
}

#[test]
fn test_remove_missing_is_not_found() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &["container"]);

    let error = collection.remove(&bound("domainDNS")).unwrap_err();
    assert!(matches!(error, SchemaError::NotFound { ref name } if name == "domainDNS"));
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn test_remove_returns_stored_spelling() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &["organizationalUnit"]);

    let removed = collection.remove(&bound("ORGANIZATIONALUNIT")).unwrap();
    assert_eq!(removed.name().as_str(), "organizationalUnit");
}

#[test]
fn test_multi_valued_property_follows_order() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &["domainDNS"]);

    collection.insert(0, bound("container")).unwrap();
    collection.add(bound("organizationalUnit")).unwrap();

    assert_eq!(
        collection.multi_valued_property(),
        vec!["container", "domainDNS", "organizationalUnit"]
    );
    assert_eq!(collection.multi_valued_property().len(), collection.len());
}

#[test]
fn test_add_range_from_every_source_shape() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &[]);

    collection.add_range(&[bound("container")]).unwrap();

    let other = detached_collection(&store, &["domainDNS", "builtinDomain"]);
    collection.add_range_from(&other).unwrap();

    let read_only: ReadOnlySchemaClassCollection =
        vec![bound("organizationalUnit")].into_iter().collect();
    collection.add_range_read_only(&read_only).unwrap();

    assert_eq!(
        collection.multi_valued_property(),
        vec!["container", "domainDNS", "builtinDomain", "organizationalUnit"]
    );

    let error = collection.add_range_from(&other).unwrap_err();
    assert!(matches!(error, SchemaError::DuplicateEntry { .. }));
    assert_eq!(collection.len(), 4);
}

#[test]
fn test_read_only_snapshot_is_independent() {
    let store = InMemorySchemaStore::new();
    let mut collection = detached_collection(&store, &["container"]);
    let snapshot = collection.to_read_only();

    collection.add(bound("domainDNS")).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains(&unbound("container")));
}

#[test]
fn test_copy_to_requires_room() {
    let store = InMemorySchemaStore::new();
    let collection = detached_collection(&store, &["container", "domainDNS"]);

    let mut target = vec![bound("top"); 3];
    collection.copy_to(&mut target, 1).unwrap();
    assert_eq!(target[1], bound("container"));
    assert_eq!(target[2], bound("domainDNS"));

    let error = collection.copy_to(&mut target, 2).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    let error = collection.copy_to(&mut target, 4).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}
