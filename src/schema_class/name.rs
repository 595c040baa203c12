//! LdapDisplayName value object for schema object identifiers.
//!
//! Schema classes and attributes are referenced by their LDAP display name.
//! Directory servers treat these names case-insensitively, so equality and
//! hashing here do too, while the original spelling is kept for display and
//! for the values written back to the directory.

use crate::directory::{eq_ignore_case, fold_case};
use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A validated LDAP display name.
///
/// ## Validation Rules
///
/// - Must not be empty
/// - Must start with an ASCII letter
/// - May only contain ASCII letters, digits and hyphens
///
/// ## Examples
///
/// ```rust
/// use ad_schema::schema_class::LdapDisplayName;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let name = LdapDisplayName::new("organizationalUnit")?;
///     assert_eq!(name, LdapDisplayName::new("OrganizationalUnit")?);
///     assert_eq!(name.as_str(), "organizationalUnit");
///
///     assert!(LdapDisplayName::new("").is_err());
///     assert!(LdapDisplayName::new("1stClass").is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Eq)]
pub struct LdapDisplayName(String);

impl LdapDisplayName {
    /// Create a new LdapDisplayName with validation.
    pub fn new(value: impl Into<String>) -> SchemaResult<Self> {
        let value = value.into();
        Self::validate_format(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Case-insensitive comparison against a raw name.
    pub fn matches(&self, other: &str) -> bool {
        eq_ignore_case(&self.0, other)
    }

    fn validate_format(value: &str) -> SchemaResult<()> {
        let mut chars = value.chars();
        let first = chars.next().ok_or(SchemaError::NullArgument {
            parameter: "ldapDisplayName",
        })?;

        if !first.is_ascii_alphabetic() {
            return Err(SchemaError::invalid_argument(
                "ldapDisplayName",
                format!("'{}' must start with a letter", value),
            ));
        }

        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(SchemaError::invalid_argument(
                "ldapDisplayName",
                format!("'{}' contains invalid character '{}'", value, bad),
            ));
        }

        Ok(())
    }
}

impl PartialEq for LdapDisplayName {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.0, &other.0)
    }
}

impl Hash for LdapDisplayName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_case(&self.0).hash(state);
    }
}

impl fmt::Display for LdapDisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LdapDisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for LdapDisplayName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LdapDisplayName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for LdapDisplayName {
    type Error = SchemaError;

    fn try_from(value: String) -> SchemaResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LdapDisplayName {
    type Error = SchemaError;

    fn try_from(value: &str) -> SchemaResult<Self> {
        Self::new(value)
    }
}
