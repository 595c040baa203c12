//! The schema class reference stored in collections.

use crate::error::{SchemaError, SchemaResult};
use crate::schema_class::LdapDisplayName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a schema class.
///
/// # Examples
///
/// ```rust
/// use ad_schema::schema_class::SchemaClass;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let existing = SchemaClass::existing("organizationalUnit")?;
///     assert!(existing.is_bound());
///
///     let draft = SchemaClass::new("contoso-Widget")?;
///     assert!(!draft.is_bound());
///     assert!(draft.ensure_bound().is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaClass {
    ldap_display_name: LdapDisplayName,
    is_bound: bool,
}

impl SchemaClass {
    /// Reference a class that has not been committed to the directory yet.
    pub fn new(name: &str) -> SchemaResult<Self> {
        Ok(Self::unbound(LdapDisplayName::new(name)?))
    }

    /// Reference a class that already exists in the directory.
    pub fn existing(name: &str) -> SchemaResult<Self> {
        Ok(Self::bound(LdapDisplayName::new(name)?))
    }

    pub fn bound(name: LdapDisplayName) -> Self {
        Self {
            ldap_display_name: name,
            is_bound: true,
        }
    }

    pub fn unbound(name: LdapDisplayName) -> Self {
        Self {
            ldap_display_name: name,
            is_bound: false,
        }
    }

    pub fn name(&self) -> &LdapDisplayName {
        &self.ldap_display_name
    }

    /// Whether the class has been committed to the directory.
    pub fn is_bound(&self) -> bool {
        self.is_bound
    }

    /// Fail with an invalid-state error unless the class is bound.
    pub fn ensure_bound(&self) -> SchemaResult<()> {
        if self.is_bound {
            Ok(())
        } else {
            Err(SchemaError::not_committed(&self.ldap_display_name))
        }
    }

    /// Case-insensitive name comparison.
    pub fn same_name(&self, other: &SchemaClass) -> bool {
        self.ldap_display_name == other.ldap_display_name
    }
}

impl fmt::Display for SchemaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ldap_display_name)
    }
}
