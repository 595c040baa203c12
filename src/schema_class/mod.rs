//! Schema class references.
//!
//! A [`SchemaClass`] identifies a class in the directory schema by its
//! [`LdapDisplayName`] and records whether the class has been committed to
//! the directory. Only committed ("bound") classes may be placed into a
//! writable collection.

mod class;
mod name;

pub use class::SchemaClass;
pub use name::LdapDisplayName;
