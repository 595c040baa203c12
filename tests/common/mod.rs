//! Shared fixtures for the collection integration tests.

#![allow(dead_code)]

use ad_schema::collection::SchemaClassCollection;
use ad_schema::context::{DirectoryContext, DirectoryContextType};
use ad_schema::directory::InMemorySchemaStore;
use ad_schema::schema_class::SchemaClass;

pub const OWNER: &str = "contoso-Widget";
pub const PROPERTY: &str = "possSuperiors";

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn context() -> DirectoryContext {
    DirectoryContext::builder(DirectoryContextType::DirectoryServer)
        .name("dc01.corp.example.com")
        .build()
        .expect("valid test context")
}

/// A bound class reference.
pub fn bound(name: &str) -> SchemaClass {
    SchemaClass::existing(name).expect("valid class name")
}

/// A class reference that has not been committed.
pub fn unbound(name: &str) -> SchemaClass {
    SchemaClass::new(name).expect("valid class name")
}

/// Collection whose owner is not committed yet.
pub fn detached_collection(
    store: &InMemorySchemaStore,
    names: &[&str],
) -> SchemaClassCollection<InMemorySchemaStore> {
    SchemaClassCollection::from_names(store.clone(), context(), &unbound(OWNER), PROPERTY, names)
        .expect("detached collection")
}

/// Collection of a committed owner whose attribute holds `local` while the
/// collection additionally shows `inherited` values from superior classes.
pub fn attached_collection(
    store: &InMemorySchemaStore,
    local: &[&str],
    inherited: &[&str],
) -> SchemaClassCollection<InMemorySchemaStore> {
    store.seed_class(OWNER, &[(PROPERTY, local)]);
    let names = local.iter().chain(inherited.iter());
    SchemaClassCollection::from_names(store.clone(), context(), &bound(OWNER), PROPERTY, names)
        .expect("attached collection")
}

pub fn remote_values(store: &InMemorySchemaStore) -> Vec<String> {
    store.class_values(OWNER, PROPERTY).unwrap_or_default()
}
