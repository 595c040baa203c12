//! Writable collection mirroring a multi-valued schema class attribute.

use crate::collection::link::{Link, Owner};
use crate::collection::{ReadOnlySchemaClassCollection, copy_into};
use crate::context::DirectoryContext;
use crate::directory::SchemaStore;
use crate::error::{SchemaError, SchemaResult};
use crate::schema_class::{LdapDisplayName, SchemaClass};
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;

/// An ordered, duplicate-free list of bound schema classes that mirrors one
/// attribute of its owning schema class.
///
/// The mode is fixed at construction: when the owner is bound the
/// collection is attached and writes every change through to the directory;
/// otherwise it is detached and only the in-memory list changes. A detached
/// collection is persisted in bulk by its owner through
/// [`multi_valued_property`](Self::multi_valued_property).
///
/// All validation happens before any directory call. Directory writes happen
/// before the in-memory list changes, so a failed write leaves the
/// collection as it was.
pub struct SchemaClassCollection<S: SchemaStore> {
    owner: Owner,
    classes: Vec<SchemaClass>,
    link: Link<S>,
}

impl<S: SchemaStore> SchemaClassCollection<S> {
    /// Build a collection from class names read from the directory.
    ///
    /// The names reference classes the directory already knows, so the
    /// resulting entries are bound.
    pub fn from_names<I, N>(
        store: S,
        context: DirectoryContext,
        owner: &SchemaClass,
        property: impl Into<String>,
        names: I,
    ) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let classes = names
            .into_iter()
            .map(|name| SchemaClass::existing(name.as_ref()))
            .collect::<SchemaResult<Vec<_>>>()?;
        Self::from_classes(store, context, owner, property, classes)
    }

    /// Build a collection from existing class references.
    pub fn from_classes(
        store: S,
        context: DirectoryContext,
        owner: &SchemaClass,
        property: impl Into<String>,
        classes: Vec<SchemaClass>,
    ) -> SchemaResult<Self> {
        let property = property.into();
        if property.is_empty() {
            return Err(SchemaError::NullArgument {
                parameter: "property",
            });
        }

        let mut seen = HashSet::with_capacity(classes.len());
        if let Some(duplicate) = classes.iter().find(|c| !seen.insert(c.name())) {
            return Err(SchemaError::duplicate(duplicate));
        }

        let link = if owner.is_bound() {
            Link::attached(store)
        } else {
            Link::Detached
        };

        debug!(
            "Loaded {} collection {}.{} with {} classes",
            if link.is_attached() {
                "attached"
            } else {
                "detached"
            },
            owner,
            property,
            classes.len()
        );

        Ok(Self {
            owner: Owner {
                context,
                class_name: owner.name().clone(),
                property,
            },
            classes,
            link,
        })
    }

    /// Name of the mirrored attribute.
    pub fn property_name(&self) -> &str {
        &self.owner.property
    }

    /// Name of the owning schema class.
    pub fn owner_name(&self) -> &LdapDisplayName {
        &self.owner.class_name
    }

    pub fn context(&self) -> &DirectoryContext {
        &self.owner.context
    }

    /// Whether mutations are written through to the directory.
    pub fn is_attached(&self) -> bool {
        self.link.is_attached()
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

    pub fn to_vec(&self) -> Vec<SchemaClass> {
        self.classes.clone()
    }

    /// Snapshot of the current contents.
    pub fn to_read_only(&self) -> ReadOnlySchemaClassCollection {
        ReadOnlySchemaClassCollection::new(self.classes.clone())
    }

    /// Replace the class at `index`, returning the previous one.
    ///
    /// The new class must not already be in the collection, even at `index`.
    pub fn set(&mut self, index: usize, class: SchemaClass) -> SchemaResult<SchemaClass> {
        self.ensure_insertable(&class)?;
        let len = self.classes.len();
        let old = self
            .classes
            .get(index)
            .ok_or(SchemaError::IndexOutOfRange { index, len })?;

        if let Link::Attached(attachment) = &mut self.link {
            attachment.replace(&self.owner, old.name(), class.name())?;
        }

        debug!(
            "Replaced {} with {} at {} in {}.{}",
            old, class, index, self.owner.class_name, self.owner.property
        );
        Ok(std::mem::replace(&mut self.classes[index], class))
    }

    /// Append a class, returning its index.
    pub fn add(&mut self, class: SchemaClass) -> SchemaResult<usize> {
        self.ensure_insertable(&class)?;

        if let Link::Attached(attachment) = &mut self.link {
            attachment.add(&self.owner, class.name())?;
        }

        debug!(
            "Added {} to {}.{}",
            class, self.owner.class_name, self.owner.property
        );
        self.classes.push(class);
        Ok(self.classes.len() - 1)
    }

    /// Append every class of a slice.
    pub fn add_range(&mut self, classes: &[SchemaClass]) -> SchemaResult<()> {
        self.add_all(classes)
    }

    /// Append every class of another writable collection.
    pub fn add_range_from<T: SchemaStore>(
        &mut self,
        other: &SchemaClassCollection<T>,
    ) -> SchemaResult<()> {
        self.add_all(other.as_slice())
    }

    /// Append every class of a read-only collection.
    pub fn add_range_read_only(
        &mut self,
        classes: &ReadOnlySchemaClassCollection,
    ) -> SchemaResult<()> {
        self.add_all(classes.as_slice())
    }

    /// Remove the class with the same name as `class`, returning the stored
    /// reference.
    pub fn remove(&mut self, class: &SchemaClass) -> SchemaResult<SchemaClass> {
        class.ensure_bound()?;
        let index = self
            .position(class.name())
            .ok_or_else(|| SchemaError::not_found(class))?;
        self.remove_index(index)
    }

    /// Remove the class at `index`.
    pub fn remove_at(&mut self, index: usize) -> SchemaResult<SchemaClass> {
        if index >= self.classes.len() {
            return Err(SchemaError::IndexOutOfRange {
                index,
                len: self.classes.len(),
            });
        }
        self.remove_index(index)
    }

    /// Insert a class at `index`, shifting later classes back.
    pub fn insert(&mut self, index: usize, class: SchemaClass) -> SchemaResult<()> {
        self.ensure_insertable(&class)?;
        if index > self.classes.len() {
            return Err(SchemaError::IndexOutOfRange {
                index,
                len: self.classes.len(),
            });
        }

        if let Link::Attached(attachment) = &mut self.link {
            attachment.add(&self.owner, class.name())?;
        }

        debug!(
            "Inserted {} at {} in {}.{}",
            class, index, self.owner.class_name, self.owner.property
        );
        self.classes.insert(index, class);
        Ok(())
    }

    /// Whether a class with the same name is in the collection.
    pub fn contains(&self, class: &SchemaClass) -> SchemaResult<bool> {
        Ok(self.index_of(class)?.is_some())
    }

    /// Position of the class with the same name, if present.
    pub fn index_of(&self, class: &SchemaClass) -> SchemaResult<Option<usize>> {
        class.ensure_bound()?;
        Ok(self.position(class.name()))
    }

    /// Copy the classes into `target`, starting at `index`.
    pub fn copy_to(&self, target: &mut [SchemaClass], index: usize) -> SchemaResult<()> {
        copy_into(&self.classes, target, index)
    }

    /// Remove every class. When attached, every value of the attribute is
    /// cleared as well.
    pub fn clear(&mut self) -> SchemaResult<()> {
        if let Link::Attached(attachment) = &mut self.link {
            attachment.clear(&self.owner)?;
        }

        debug!(
            "Cleared {} classes from {}.{}",
            self.classes.len(),
            self.owner.class_name,
            self.owner.property
        );
        self.classes.clear();
        Ok(())
    }

    /// Class names in collection order, as written to the attribute.
    pub fn multi_valued_property(&self) -> Vec<String> {
        self.classes
            .iter()
            .map(|c| c.name().as_str().to_string())
            .collect()
    }

    fn position(&self, name: &LdapDisplayName) -> Option<usize> {
        let position = self.classes.iter().position(|c| c.name() == name);
        trace!(
            "Lookup of {} in {}.{}: {:?}",
            name, self.owner.class_name, self.owner.property, position
        );
        position
    }

    fn ensure_insertable(&self, class: &SchemaClass) -> SchemaResult<()> {
        class.ensure_bound()?;
        if self.position(class.name()).is_some() {
            return Err(SchemaError::duplicate(class));
        }
        Ok(())
    }

    fn remove_index(&mut self, index: usize) -> SchemaResult<SchemaClass> {
        if let Link::Attached(attachment) = &mut self.link {
            attachment.remove(&self.owner, self.classes[index].name())?;
        }

        let removed = self.classes.remove(index);
        debug!(
            "Removed {} from {}.{}",
            removed, self.owner.class_name, self.owner.property
        );
        Ok(removed)
    }

    // The whole batch is validated before anything is written.
    fn add_all(&mut self, classes: &[SchemaClass]) -> SchemaResult<()> {
        let mut batch = HashSet::with_capacity(classes.len());
        for class in classes {
            self.ensure_insertable(class)?;
            if !batch.insert(class.name()) {
                return Err(SchemaError::duplicate(class));
            }
        }

        for class in classes {
            self.add(class.clone())?;
        }
        Ok(())
    }
}

impl<S: SchemaStore> fmt::Debug for SchemaClassCollection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaClassCollection")
            .field("owner", &self.owner.class_name)
            .field("property", &self.owner.property)
            .field("attached", &self.is_attached())
            .field("classes", &self.classes)
            .finish()
    }
}

impl<'a, S: SchemaStore> IntoIterator for &'a SchemaClassCollection<S> {
    type Item = &'a SchemaClass;
    type IntoIter = std::slice::Iter<'a, SchemaClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}
