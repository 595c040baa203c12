//! Write-through schema class collections for directory services.
//!
//! Keeps an ordered list of schema class references in sync with a
//! multi-valued attribute of a schema class in a directory, such as
//! `possSuperiors` or `auxiliaryClass`.
//!
//! # Core Components
//!
//! - [`SchemaClassCollection`] - Validated, write-through collection
//! - [`ReadOnlySchemaClassCollection`] - Immutable view of schema classes
//! - [`SchemaClassDefinition`] - Schema class owning the collections
//! - [`SchemaStore`] / [`DirectoryEntry`] - Traits for directory backends
//!
//! # Quick Start
//!
//! ```rust
//! use ad_schema::{DirectoryContext, InMemorySchemaStore, SchemaClass, SchemaClassDefinition};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemorySchemaStore::new();
//! store.seed_class("user", &[("possSuperiors", &["builtinDomain", "domainDNS"])]);
//!
//! let mut user = SchemaClassDefinition::load(store.clone(), DirectoryContext::default(), "user")?;
//! user.possible_superiors_mut()
//!     .add(SchemaClass::existing("organizationalUnit")?)?;
//!
//! assert_eq!(
//!     user.possible_superiors().multi_valued_property(),
//!     vec!["builtinDomain", "domainDNS", "organizationalUnit"]
//! );
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod context;
pub mod definition;
pub mod directory;
pub mod error;
pub mod schema_class;

// Re-export commonly used types for convenience
pub use collection::{ReadOnlySchemaClassCollection, SchemaClassCollection};
pub use context::{DirectoryContext, DirectoryContextType};
pub use definition::SchemaClassDefinition;
pub use directory::{DirectoryEntry, DirectoryError, InMemorySchemaStore, SchemaStore};
pub use error::{ErrorKind, SchemaError, SchemaResult};
pub use schema_class::{LdapDisplayName, SchemaClass};
