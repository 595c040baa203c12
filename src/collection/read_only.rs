//! Read-only ordered collection of schema class references.

use crate::collection::copy_into;
use crate::error::SchemaResult;
use crate::schema_class::SchemaClass;
use serde::{Deserialize, Serialize};

/// An immutable, ordered list of schema classes.
///
/// Used for computed views such as the classes a schema class inherits, and
/// accepted as a source by [`SchemaClassCollection::add_range_read_only`].
/// Lookups are case-insensitive and, unlike the writable collection, do not
/// require the argument to be bound.
///
/// [`SchemaClassCollection::add_range_read_only`]: crate::collection::SchemaClassCollection::add_range_read_only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadOnlySchemaClassCollection {
    classes: Vec<SchemaClass>,
}

impl ReadOnlySchemaClassCollection {
    pub fn new(classes: Vec<SchemaClass>) -> Self {
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SchemaClass> {
        self.classes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaClass> {
        self.classes.iter()
    }

    pub fn as_slice(&self) -> &[SchemaClass] {
        &self.classes
    }

    pub fn contains(&self, class: &SchemaClass) -> bool {
        self.index_of(class).is_some()
    }

    pub fn index_of(&self, class: &SchemaClass) -> Option<usize> {
        self.classes.iter().position(|c| c.same_name(class))
    }

    /// Copy the classes into `target`, starting at `index`.
    pub fn copy_to(&self, target: &mut [SchemaClass], index: usize) -> SchemaResult<()> {
        copy_into(&self.classes, target, index)
    }

    /// Class names in collection order.
    pub fn multi_valued_property(&self) -> Vec<String> {
        self.classes
            .iter()
            .map(|c| c.name().as_str().to_string())
            .collect()
    }
}

impl From<Vec<SchemaClass>> for ReadOnlySchemaClassCollection {
    fn from(classes: Vec<SchemaClass>) -> Self {
        Self::new(classes)
    }
}

impl FromIterator<SchemaClass> for ReadOnlySchemaClassCollection {
    fn from_iter<I: IntoIterator<Item = SchemaClass>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReadOnlySchemaClassCollection {
    type Item = &'a SchemaClass;
    type IntoIter = std::slice::Iter<'a, SchemaClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}
