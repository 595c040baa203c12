//! Directory access abstraction for schema objects.
//!
//! Collections never talk to a directory server themselves. They go through
//! two traits:
//!
//! - [`SchemaStore`] hands out the directory entry backing a schema class and
//!   creates new class entries.
//! - [`DirectoryEntry`] exposes the named multi-valued properties of one
//!   entry.
//!
//! Attribute names and values are compared case-insensitively, as LDAP does
//! for the object-identifier syntax used by schema class references.
//!
//! # Example Usage
//!
//! ```rust
//! use ad_schema::context::DirectoryContext;
//! use ad_schema::directory::{AttributeValues, DirectoryEntry, InMemorySchemaStore, SchemaStore};
//! use ad_schema::schema_class::LdapDisplayName;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemorySchemaStore::new();
//!     let context = DirectoryContext::default();
//!     let name = LdapDisplayName::new("contoso-Widget")?;
//!
//!     let mut entry = store.create_class_entry(
//!         &context,
//!         &name,
//!         &[AttributeValues::new("possSuperiors", vec!["container".to_string()])],
//!     )?;
//!     entry.add_value("possSuperiors", "organizationalUnit")?;
//!     assert!(entry.contains_value("possSuperiors", "OrganizationalUnit")?);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod in_memory;


pub use errors::DirectoryError;
pub use in_memory::{InMemoryEntry, InMemorySchemaStore, InMemorySchemaStoreStats};

use crate::context::DirectoryContext;
use crate::schema_class::LdapDisplayName;

/// One directory object with named multi-valued properties.
pub trait DirectoryEntry {
    /// Whether the property currently has at least one value.
    fn has_property(&self, property: &str) -> Result<bool, DirectoryError>;

    /// All values of the property, in directory order. Empty when the
    /// property is not set.
    fn values(&self, property: &str) -> Result<Vec<String>, DirectoryError>;

    /// Whether the property holds the value.
    fn contains_value(&self, property: &str, value: &str) -> Result<bool, DirectoryError>;

    /// Append a value to the property.
    fn add_value(&mut self, property: &str, value: &str) -> Result<(), DirectoryError>;

    /// Remove a value from the property.
    fn remove_value(&mut self, property: &str, value: &str) -> Result<(), DirectoryError>;

    /// Remove every value of the property.
    fn clear_property(&mut self, property: &str) -> Result<(), DirectoryError>;
}

/// Access to the directory entries of schema classes.
pub trait SchemaStore {
    /// Entry handle type produced by this store
    type Entry: DirectoryEntry;

    /// Open the entry backing an existing schema class.
    fn open_class_entry(
        &self,
        context: &DirectoryContext,
        class_name: &LdapDisplayName,
    ) -> Result<Self::Entry, DirectoryError>;

    /// Create a new schema class entry with its initial attribute values.
    fn create_class_entry(
        &self,
        context: &DirectoryContext,
        class_name: &LdapDisplayName,
        attributes: &[AttributeValues],
    ) -> Result<Self::Entry, DirectoryError>;
}

/// The values of one multi-valued attribute, used for bulk writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValues {
    property: String,
    values: Vec<String>,
}

impl AttributeValues {
    pub fn new(property: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            property: property.into(),
            values,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Case-insensitive comparison used for attribute names and values.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Lookup key for case-insensitive maps.
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
