//! Directory context configuration.
//!
//! A [`DirectoryContext`] names the directory a collection writes to and the
//! credentials used for it. It is the configuration surface of the crate and
//! can be built in code or loaded from JSON.
//!
//! # Example
//!
//! ```rust
//! use ad_schema::context::{DirectoryContext, DirectoryContextType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = DirectoryContext::from_json_str(
//!         r#"{ "contextType": "directoryServer", "name": "dc01.corp.example.com" }"#,
//!     )?;
//!     assert_eq!(context.target(), "dc01.corp.example.com");
//!
//!     let forest = DirectoryContext::builder(DirectoryContextType::Forest).build()?;
//!     assert_eq!(forest.target(), "the current forest");
//!     Ok(())
//! }
//! ```

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of directory a context points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryContextType {
    #[default]
    Domain,
    Forest,
    DirectoryServer,
    ConfigurationSet,
    ApplicationPartition,
}

impl DirectoryContextType {
    /// Whether a context of this type may omit the target name and fall back
    /// to the domain or forest of the current security principal.
    pub fn allows_implicit_target(self) -> bool {
        matches!(self, DirectoryContextType::Domain | DirectoryContextType::Forest)
    }
}

/// Target directory and credentials for schema operations.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryContext {
    #[serde(default)]
    context_type: DirectoryContextType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing)]
    password: Option<String>,
}

impl DirectoryContext {
    /// Start building a context of the given type.
    pub fn builder(context_type: DirectoryContextType) -> DirectoryContextBuilder {
        DirectoryContextBuilder {
            context: DirectoryContext {
                context_type,
                ..Default::default()
            },
        }
    }

    /// Load and validate a context from its JSON representation.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        let context: DirectoryContext = serde_json::from_str(json)
            .map_err(|e| SchemaError::invalid_argument("context", e.to_string()))?;
        context.validate()?;
        Ok(context)
    }

    pub fn context_type(&self) -> DirectoryContextType {
        self.context_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Human readable target used in error messages.
    pub fn target(&self) -> &str {
        match (&self.name, self.context_type) {
            (Some(name), _) => name,
            (None, DirectoryContextType::Forest) => "the current forest",
            (None, _) => "the current domain",
        }
    }

    fn validate(&self) -> SchemaResult<()> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(SchemaError::NullArgument {
                parameter: "name",
            }),
            None if !self.context_type.allows_implicit_target() => {
                Err(SchemaError::invalid_argument(
                    "name",
                    format!(
                        "a {:?} context requires an explicit target name",
                        self.context_type
                    ),
                ))
            }
            _ => Ok(()),
        }
    }
}

// The password never appears in debug output.
impl fmt::Debug for DirectoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryContext")
            .field("context_type", &self.context_type)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Builder for [`DirectoryContext`].
#[derive(Debug, Clone)]
pub struct DirectoryContextBuilder {
    context: DirectoryContext,
}

impl DirectoryContextBuilder {
    /// Set the target domain, forest, server or partition name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.context.name = Some(name.into());
        self
    }

    /// Set explicit credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.context.username = Some(username.into());
        self.context.password = Some(password.into());
        self
    }

    pub fn build(self) -> SchemaResult<DirectoryContext> {
        self.context.validate()?;
        Ok(self.context)
    }
}
