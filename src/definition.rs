//! Schema class definitions and their class-reference attributes.
//!
//! A [`SchemaClassDefinition`] is the schema object that owns the writable
//! collections for `possSuperiors` and `auxiliaryClass`. A new definition
//! starts unbound: its collections are detached and only change in memory.
//! [`commit`](SchemaClassDefinition::commit) writes the class and both
//! attributes in one bulk operation and then binds the definition, so its
//! collections write through to the directory. A failed commit leaves the
//! draft untouched and can be retried.
//!
//! # Example Usage
//!
//! ```rust
//! use ad_schema::context::DirectoryContext;
//! use ad_schema::definition::SchemaClassDefinition;
//! use ad_schema::directory::InMemorySchemaStore;
//! use ad_schema::schema_class::SchemaClass;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemorySchemaStore::new();
//!     let mut widget =
//!         SchemaClassDefinition::new(store.clone(), DirectoryContext::default(), "contoso-Widget")?;
//!     widget
//!         .possible_superiors_mut()
//!         .add(SchemaClass::existing("organizationalUnit")?)?;
//!
//!     widget.commit()?;
//!     assert!(widget.is_bound());
//!
//!     widget
//!         .auxiliary_classes_mut()
//!         .add(SchemaClass::existing("mailRecipient")?)?;
//!     assert_eq!(
//!         store.class_values("contoso-Widget", "auxiliaryClass"),
//!         Some(vec!["mailRecipient".to_string()])
//!     );
//!     Ok(())
//! }
//! ```

use crate::collection::SchemaClassCollection;
use crate::context::DirectoryContext;
use crate::directory::{AttributeValues, DirectoryEntry, DirectoryError, SchemaStore};
use crate::error::{SchemaError, SchemaResult, WriteOperation};
use crate::schema_class::{LdapDisplayName, SchemaClass};
use log::info;
use std::fmt;

/// Attribute listing the classes that may contain instances of a class.
pub const POSS_SUPERIORS: &str = "possSuperiors";

/// Attribute listing the auxiliary classes mixed into a class.
pub const AUXILIARY_CLASS: &str = "auxiliaryClass";

/// A schema class and its class-reference attributes.
pub struct SchemaClassDefinition<S: SchemaStore + Clone> {
    store: S,
    context: DirectoryContext,
    class: SchemaClass,
    possible_superiors: SchemaClassCollection<S>,
    auxiliary_classes: SchemaClassCollection<S>,
}

impl<S: SchemaStore + Clone> SchemaClassDefinition<S> {
    /// Prepare a new, uncommitted schema class.
    pub fn new(store: S, context: DirectoryContext, name: &str) -> SchemaResult<Self> {
        let class = SchemaClass::new(name)?;
        Self::assemble(store, context, class, Vec::new(), Vec::new())
    }

    /// Load an existing schema class from the directory.
    pub fn load(store: S, context: DirectoryContext, name: &str) -> SchemaResult<Self> {
        let class = SchemaClass::existing(name)?;
        let context_ref = &context;
        let translate = |operation: WriteOperation| {
            move |e: DirectoryError| SchemaError::from_directory_error(context_ref, operation, e)
        };

        let entry = store
            .open_class_entry(&context, class.name())
            .map_err(translate(WriteOperation::Bind))?;
        let superiors = entry
            .values(POSS_SUPERIORS)
            .map_err(translate(WriteOperation::Read))?;
        let auxiliaries = entry
            .values(AUXILIARY_CLASS)
            .map_err(translate(WriteOperation::Read))?;

        let superiors = names_to_classes(&superiors)?;
        let auxiliaries = names_to_classes(&auxiliaries)?;
        Self::assemble(store, context, class, superiors, auxiliaries)
    }

    /// Create the class in the directory, persisting both attributes in bulk,
    /// and bind the definition.
    ///
    /// On failure the definition is left as it was.
    pub fn commit(&mut self) -> SchemaResult<()> {
        if self.class.is_bound() {
            return Err(SchemaError::AlreadyCommitted {
                name: self.class.to_string(),
            });
        }

        let attributes = [
            AttributeValues::new(
                POSS_SUPERIORS,
                self.possible_superiors.multi_valued_property(),
            ),
            AttributeValues::new(
                AUXILIARY_CLASS,
                self.auxiliary_classes.multi_valued_property(),
            ),
        ];
        self.store
            .create_class_entry(&self.context, self.class.name(), &attributes)
            .map_err(|e| {
                SchemaError::from_directory_error(&self.context, WriteOperation::CreateEntry, e)
            })?;

        let class = SchemaClass::bound(self.class.name().clone());
        let (possible_superiors, auxiliary_classes) = Self::collections(
            &self.store,
            &self.context,
            &class,
            self.possible_superiors.to_vec(),
            self.auxiliary_classes.to_vec(),
        )?;

        info!(
            "Committed schema class {} with {} superiors and {} auxiliary classes",
            class,
            possible_superiors.len(),
            auxiliary_classes.len()
        );

        self.class = class;
        self.possible_superiors = possible_superiors;
        self.auxiliary_classes = auxiliary_classes;
        Ok(())
    }

    pub fn name(&self) -> &LdapDisplayName {
        self.class.name()
    }

    /// Whether the class exists in the directory.
    pub fn is_bound(&self) -> bool {
        self.class.is_bound()
    }

    /// Reference to this class, usable in other classes' collections once
    /// the class is bound.
    pub fn as_class(&self) -> &SchemaClass {
        &self.class
    }

    pub fn context(&self) -> &DirectoryContext {
        &self.context
    }

    pub fn possible_superiors(&self) -> &SchemaClassCollection<S> {
        &self.possible_superiors
    }

    pub fn possible_superiors_mut(&mut self) -> &mut SchemaClassCollection<S> {
        &mut self.possible_superiors
    }

    pub fn auxiliary_classes(&self) -> &SchemaClassCollection<S> {
        &self.auxiliary_classes
    }

    pub fn auxiliary_classes_mut(&mut self) -> &mut SchemaClassCollection<S> {
        &mut self.auxiliary_classes
    }

    fn assemble(
        store: S,
        context: DirectoryContext,
        class: SchemaClass,
        superiors: Vec<SchemaClass>,
        auxiliaries: Vec<SchemaClass>,
    ) -> SchemaResult<Self> {
        let (possible_superiors, auxiliary_classes) =
            Self::collections(&store, &context, &class, superiors, auxiliaries)?;

        Ok(Self {
            store,
            context,
            class,
            possible_superiors,
            auxiliary_classes,
        })
    }

    fn collections(
        store: &S,
        context: &DirectoryContext,
        class: &SchemaClass,
        superiors: Vec<SchemaClass>,
        auxiliaries: Vec<SchemaClass>,
    ) -> SchemaResult<(SchemaClassCollection<S>, SchemaClassCollection<S>)> {
        let possible_superiors = SchemaClassCollection::from_classes(
            store.clone(),
            context.clone(),
            class,
            POSS_SUPERIORS,
            superiors,
        )?;
        let auxiliary_classes = SchemaClassCollection::from_classes(
            store.clone(),
            context.clone(),
            class,
            AUXILIARY_CLASS,
            auxiliaries,
        )?;
        Ok((possible_superiors, auxiliary_classes))
    }
}

fn names_to_classes(names: &[String]) -> SchemaResult<Vec<SchemaClass>> {
    names.iter().map(|n| SchemaClass::existing(n)).collect()
}

impl<S: SchemaStore + Clone> fmt::Debug for SchemaClassDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaClassDefinition")
            .field("class", &self.class)
            .field("context", &self.context)
            .field("possible_superiors", &self.possible_superiors)
            .field("auxiliary_classes", &self.auxiliary_classes)
            .finish()
    }
}
