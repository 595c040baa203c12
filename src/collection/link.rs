//! Write-through link between a collection and its directory attribute.
//!
//! A collection is either detached (its owner is not committed, mutations
//! stay in memory) or attached (every mutation is mirrored to the owner's
//! attribute). The directory entry is opened on the first write and kept for
//! the lifetime of the collection.

use crate::context::DirectoryContext;
use crate::directory::{DirectoryEntry, DirectoryError, SchemaStore};
use crate::error::{SchemaError, SchemaResult, WriteOperation};
use crate::schema_class::LdapDisplayName;
use log::{debug, warn};

/// The attribute a collection mirrors.
#[derive(Debug, Clone)]
pub(crate) struct Owner {
    pub(crate) context: DirectoryContext,
    pub(crate) class_name: LdapDisplayName,
    pub(crate) property: String,
}

impl Owner {
    fn translate(
        &self,
        operation: WriteOperation,
    ) -> impl FnOnce(DirectoryError) -> SchemaError + '_ {
        move |error| {
            warn!(
                "Directory {} failed for {}.{}: {}",
                operation, self.class_name, self.property, error
            );
            SchemaError::from_directory_error(&self.context, operation, error)
        }
    }
}

pub(crate) enum Link<S: SchemaStore> {
    Detached,
    Attached(Attachment<S>),
}

impl<S: SchemaStore> Link<S> {
    pub(crate) fn attached(store: S) -> Self {
        Link::Attached(Attachment { store, entry: None })
    }

    pub(crate) fn is_attached(&self) -> bool {
        matches!(self, Link::Attached(_))
    }
}

pub(crate) struct Attachment<S: SchemaStore> {
    store: S,
    entry: Option<S::Entry>,
}

impl<S: SchemaStore> Attachment<S> {
    fn entry(&mut self, owner: &Owner) -> SchemaResult<&mut S::Entry> {
        let entry = match self.entry.take() {
            Some(entry) => entry,
            None => {
                debug!(
                    "Binding directory entry for schema class {}",
                    owner.class_name
                );
                self.store
                    .open_class_entry(&owner.context, &owner.class_name)
                    .map_err(owner.translate(WriteOperation::Bind))?
            }
        };
        Ok(self.entry.insert(entry))
    }

    /// Append a value to the owner's attribute.
    pub(crate) fn add(&mut self, owner: &Owner, value: &LdapDisplayName) -> SchemaResult<()> {
        let entry = self.entry(owner)?;
        entry
            .add_value(&owner.property, value.as_str())
            .map_err(owner.translate(WriteOperation::AddValue))?;
        debug!("Added {} to {}.{}", value, owner.class_name, owner.property);
        Ok(())
    }

    /// Remove a value from the owner's attribute.
    ///
    /// Values the collection shows but the attribute does not hold come from
    /// superior classes and cannot be removed here.
    pub(crate) fn remove(&mut self, owner: &Owner, value: &LdapDisplayName) -> SchemaResult<()> {
        let entry = self.entry(owner)?;
        let present = entry
            .contains_value(&owner.property, value.as_str())
            .map_err(owner.translate(WriteOperation::Read))?;

        if !present {
            debug!(
                "{} is not held by {}.{}, refusing removal",
                value, owner.class_name, owner.property
            );
            return Err(SchemaError::ValueCannotBeModified {
                property: owner.property.clone(),
                value: value.to_string(),
            });
        }

        entry
            .remove_value(&owner.property, value.as_str())
            .map_err(owner.translate(WriteOperation::RemoveValue))?;
        debug!(
            "Removed {} from {}.{}",
            value, owner.class_name, owner.property
        );
        Ok(())
    }

    /// Remove `old` then add `new`. If the add fails the old value is put
    /// back so the attribute does not lose it.
    pub(crate) fn replace(
        &mut self,
        owner: &Owner,
        old: &LdapDisplayName,
        new: &LdapDisplayName,
    ) -> SchemaResult<()> {
        self.remove(owner, old)?;

        if let Err(error) = self.add(owner, new) {
            if let Err(restore) = self.add(owner, old) {
                warn!(
                    "Could not restore {} to {}.{} after a failed replace: {}",
                    old, owner.class_name, owner.property, restore
                );
            }
            return Err(error);
        }
        Ok(())
    }

    /// Remove every value of the owner's attribute, if it is set.
    pub(crate) fn clear(&mut self, owner: &Owner) -> SchemaResult<()> {
        let entry = self.entry(owner)?;
        let present = entry
            .has_property(&owner.property)
            .map_err(owner.translate(WriteOperation::Read))?;

        if present {
            entry
                .clear_property(&owner.property)
                .map_err(owner.translate(WriteOperation::ClearValues))?;
            debug!("Cleared {}.{}", owner.class_name, owner.property);
        }
        Ok(())
    }
}
