//! Ordered collections of schema class references.
//!
//! This module provides the writable [`SchemaClassCollection`], which mirrors
//! a multi-valued attribute of a schema class such as `possSuperiors` or
//! `auxiliaryClass`, and the immutable [`ReadOnlySchemaClassCollection`].
//!
//! ## Design Principles
//!
//! - **Validated**: only bound classes enter a writable collection, and names
//!   are unique ignoring case
//! - **Write-through**: when the owning class is bound, each mutation is
//!   mirrored to the directory attribute
//! - **Atomic**: the directory write happens first; when it fails the
//!   in-memory list is left unchanged
//!
//! ## Usage Pattern
//!
//! ```rust
//! use ad_schema::collection::SchemaClassCollection;
//! use ad_schema::context::DirectoryContext;
//! use ad_schema::directory::InMemorySchemaStore;
//! use ad_schema::schema_class::SchemaClass;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemorySchemaStore::new();
//!     store.seed_class("contoso-Widget", &[("possSuperiors", &["container"])]);
//!
//!     let owner = SchemaClass::existing("contoso-Widget")?;
//!     let mut superiors = SchemaClassCollection::from_names(
//!         store.clone(),
//!         DirectoryContext::default(),
//!         &owner,
//!         "possSuperiors",
//!         ["container"],
//!     )?;
//!
//!     superiors.add(SchemaClass::existing("organizationalUnit")?)?;
//!     assert_eq!(
//!         store.class_values("contoso-Widget", "possSuperiors"),
//!         Some(vec!["container".to_string(), "organizationalUnit".to_string()])
//!     );
//!     Ok(())
//! }
//! ```

mod link;
mod read_only;
mod writable;

pub use read_only::ReadOnlySchemaClassCollection;
pub use writable::SchemaClassCollection;

use crate::error::{SchemaError, SchemaResult};
use crate::schema_class::SchemaClass;

pub(crate) fn copy_into(
    source: &[SchemaClass],
    target: &mut [SchemaClass],
    index: usize,
) -> SchemaResult<()> {
    let available = target.len().checked_sub(index).ok_or_else(|| {
        SchemaError::invalid_argument(
            "index",
            format!(
                "index {} is past the end of a target of length {}",
                index,
                target.len()
            ),
        )
    })?;

    if available < source.len() {
        return Err(SchemaError::invalid_argument(
            "target",
            format!(
                "{} classes do not fit into {} remaining slots",
                source.len(),
                available
            ),
        ));
    }

    target[index..index + source.len()].clone_from_slice(source);
    Ok(())
}
