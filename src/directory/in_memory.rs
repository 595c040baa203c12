//! In-memory schema store.
//!
//! This module provides a thread-safe in-memory implementation of
//! [`SchemaStore`] backed by a `HashMap` behind an `RwLock`. It is meant for
//! tests, benchmarks and offline tooling where no directory server is
//! available.
//!
//! # Features
//!
//! * Case-insensitive class, attribute and value lookup
//! * Entry handles share state with the store, so changes are visible to
//!   every handle and to the store's inspection methods
//! * Per-operation statistics for asserting how many remote calls were made
//! * One-shot fault injection for exercising failure paths
//!
//! # Example Usage
//!
//! ```rust
//! use ad_schema::context::DirectoryContext;
//! use ad_schema::directory::{DirectoryEntry, DirectoryError, InMemorySchemaStore, SchemaStore};
//! use ad_schema::error::WriteOperation;
//! use ad_schema::schema_class::LdapDisplayName;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemorySchemaStore::new();
//!     store.seed_class("user", &[("possSuperiors", &["builtinDomain", "organizationalUnit"])]);
//!
//!     let mut entry = store.open_class_entry(
//!         &DirectoryContext::default(),
//!         &LdapDisplayName::new("user")?,
//!     )?;
//!     assert!(entry.contains_value("possSuperiors", "builtinDomain")?);
//!
//!     store.fail_next(WriteOperation::AddValue, DirectoryError::AccessDenied);
//!     assert!(entry.add_value("possSuperiors", "container").is_err());
//!     assert_eq!(store.stats().writes, 1);
//!     Ok(())
//! }
//! ```

use crate::context::DirectoryContext;
use crate::directory::{
    AttributeValues, DirectoryEntry, DirectoryError, SchemaStore, eq_ignore_case, fold_case,
};
use crate::error::WriteOperation;
use crate::schema_class::LdapDisplayName;
use log::trace;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Counters of the calls made against an [`InMemorySchemaStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InMemorySchemaStoreStats {
    /// Entries opened or created
    pub binds: usize,
    /// Attribute reads
    pub reads: usize,
    /// Attribute writes
    pub writes: usize,
}

impl InMemorySchemaStoreStats {
    /// Total number of calls, of any kind.
    pub fn total(&self) -> usize {
        self.binds + self.reads + self.writes
    }
}

#[derive(Debug, Default)]
struct ClassRecord {
    // Attribute name as first written -> values in insertion order.
    // Lookups fold case through `find_property`.
    properties: Vec<(String, Vec<String>)>,
}

impl ClassRecord {
    fn find_property(&self, property: &str) -> Option<usize> {
        self.properties
            .iter()
            .position(|(name, _)| eq_ignore_case(name, property))
    }

    fn values(&self, property: &str) -> &[String] {
        self.find_property(property)
            .map(|i| self.properties[i].1.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Default)]
struct StoreState {
    // Folded class name -> record
    classes: HashMap<String, ClassRecord>,
    stats: InMemorySchemaStoreStats,
    faults: Vec<(WriteOperation, DirectoryError)>,
}

impl StoreState {
    fn record(&mut self, operation: WriteOperation) -> Result<(), DirectoryError> {
        match operation {
            WriteOperation::Bind | WriteOperation::CreateEntry => self.stats.binds += 1,
            WriteOperation::Read => self.stats.reads += 1,
            WriteOperation::AddValue
            | WriteOperation::RemoveValue
            | WriteOperation::ClearValues => self.stats.writes += 1,
        }

        match self.faults.iter().position(|(op, _)| *op == operation) {
            Some(index) => Err(self.faults.remove(index).1),
            None => Ok(()),
        }
    }

    fn class(&self, key: &str) -> Result<&ClassRecord, DirectoryError> {
        self.classes
            .get(key)
            .ok_or_else(|| DirectoryError::NoSuchObject {
                object: key.to_string(),
            })
    }

    fn class_mut(&mut self, key: &str) -> Result<&mut ClassRecord, DirectoryError> {
        self.classes
            .get_mut(key)
            .ok_or_else(|| DirectoryError::NoSuchObject {
                object: key.to_string(),
            })
    }
}

/// Thread-safe in-memory schema store.
///
/// Cloning the store is cheap and yields a handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemorySchemaStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a class with the given attribute values.
    ///
    /// Seeding is not counted in the statistics.
    pub fn seed_class(&self, name: &str, attributes: &[(&str, &[&str])]) {
        let record = ClassRecord {
            properties: attributes
                .iter()
                .filter(|(_, values)| !values.is_empty())
                .map(|(property, values)| {
                    (
                        property.to_string(),
                        values.iter().map(|v| v.to_string()).collect(),
                    )
                })
                .collect(),
        };
        self.lock_mut().classes.insert(fold_case(name), record);
    }

    /// Remove a class, returning whether it existed.
    pub fn delete_class(&self, name: &str) -> bool {
        self.lock_mut().classes.remove(&fold_case(name)).is_some()
    }

    /// Whether the class exists.
    pub fn has_class(&self, name: &str) -> bool {
        self.lock().classes.contains_key(&fold_case(name))
    }

    /// Current values of a class attribute, `None` when the class is unknown.
    ///
    /// Inspection is not counted in the statistics.
    pub fn class_values(&self, name: &str, property: &str) -> Option<Vec<String>> {
        self.lock()
            .classes
            .get(&fold_case(name))
            .map(|record| record.values(property).to_vec())
    }

    /// Make the next call of the given kind fail with `error`.
    pub fn fail_next(&self, operation: WriteOperation, error: DirectoryError) {
        self.lock_mut().faults.push((operation, error));
    }

    /// Statistics gathered since creation or the last reset.
    pub fn stats(&self) -> InMemorySchemaStoreStats {
        self.lock().stats
    }

    pub fn reset_stats(&self) {
        self.lock_mut().stats = InMemorySchemaStoreStats::default();
    }

    // Seeding and inspection recover the state from a poisoned lock; entry
    // operations report it as a directory failure through `write`.
    fn lock(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_mut(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, DirectoryError> {
        self.state
            .write()
            .map_err(|_| DirectoryError::internal("in-memory schema store lock poisoned"))
    }
}

impl SchemaStore for InMemorySchemaStore {
    type Entry = InMemoryEntry;

    fn open_class_entry(
        &self,
        _context: &DirectoryContext,
        class_name: &LdapDisplayName,
    ) -> Result<Self::Entry, DirectoryError> {
        let key = fold_case(class_name.as_str());
        let mut state = self.write()?;
        state.record(WriteOperation::Bind)?;
        state.class(&key)?;
        trace!("Opened in-memory entry for class {}", class_name);

        Ok(InMemoryEntry {
            store: self.clone(),
            key,
        })
    }

    fn create_class_entry(
        &self,
        _context: &DirectoryContext,
        class_name: &LdapDisplayName,
        attributes: &[AttributeValues],
    ) -> Result<Self::Entry, DirectoryError> {
        let key = fold_case(class_name.as_str());
        let mut state = self.write()?;
        state.record(WriteOperation::CreateEntry)?;

        if state.classes.contains_key(&key) {
            return Err(DirectoryError::ConstraintViolation {
                message: format!("schema class '{}' already exists", class_name),
            });
        }

        let record = ClassRecord {
            properties: attributes
                .iter()
                .filter(|attribute| !attribute.values().is_empty())
                .map(|attribute| (attribute.property().to_string(), attribute.values().to_vec()))
                .collect(),
        };
        state.classes.insert(key.clone(), record);
        trace!("Created in-memory entry for class {}", class_name);

        Ok(InMemoryEntry {
            store: self.clone(),
            key,
        })
    }
}

/// Handle to one class entry of an [`InMemorySchemaStore`].
#[derive(Debug, Clone)]
pub struct InMemoryEntry {
    store: InMemorySchemaStore,
    key: String,
}

impl DirectoryEntry for InMemoryEntry {
    fn has_property(&self, property: &str) -> Result<bool, DirectoryError> {
        let mut state = self.store.write()?;
        state.record(WriteOperation::Read)?;
        Ok(state.class(&self.key)?.find_property(property).is_some())
    }

    fn values(&self, property: &str) -> Result<Vec<String>, DirectoryError> {
        let mut state = self.store.write()?;
        state.record(WriteOperation::Read)?;
        Ok(state.class(&self.key)?.values(property).to_vec())
    }

    fn contains_value(&self, property: &str, value: &str) -> Result<bool, DirectoryError> {
        let mut state = self.store.write()?;
        state.record(WriteOperation::Read)?;
        Ok(state
            .class(&self.key)?
            .values(property)
            .iter()
            .any(|v| eq_ignore_case(v, value)))
    }

    fn add_value(&mut self, property: &str, value: &str) -> Result<(), DirectoryError> {
        let mut state = self.store.write()?;
        state.record(WriteOperation::AddValue)?;
        let record = state.class_mut(&self.key)?;

        match record.find_property(property) {
            Some(index) => {
                let values = &mut record.properties[index].1;
                if values.iter().any(|v| eq_ignore_case(v, value)) {
                    return Err(DirectoryError::AttributeOrValueExists {
                        property: property.to_string(),
                        value: value.to_string(),
                    });
                }
                values.push(value.to_string());
            }
            None => record
                .properties
                .push((property.to_string(), vec![value.to_string()])),
        }
        Ok(())
    }

    fn remove_value(&mut self, property: &str, value: &str) -> Result<(), DirectoryError> {
        let mut state = self.store.write()?;
        state.record(WriteOperation::RemoveValue)?;
        let record = state.class_mut(&self.key)?;

        let missing = || DirectoryError::NoSuchAttribute {
            property: property.to_string(),
            value: value.to_string(),
        };
        let index = record.find_property(property).ok_or_else(missing)?;
        let values = &mut record.properties[index].1;
        let position = values
            .iter()
            .position(|v| eq_ignore_case(v, value))
            .ok_or_else(missing)?;
        values.remove(position);

        // An attribute without values is not present on the entry.
        if values.is_empty() {
            record.properties.remove(index);
        }
        Ok(())
    }

    fn clear_property(&mut self, property: &str) -> Result<(), DirectoryError> {
        let mut state = self.store.write()?;
        state.record(WriteOperation::ClearValues)?;
        let record = state.class_mut(&self.key)?;

        let index = record
            .find_property(property)
            .ok_or_else(|| DirectoryError::NoSuchAttribute {
                property: property.to_string(),
                value: String::new(),
            })?;
        record.properties.remove(index);
        Ok(())
    }
}
