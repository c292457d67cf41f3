use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Validated name of a managed instance.
///
/// An instance name doubles as a directory name under the catalog root and
/// under the state directory, so the same value is resolved into filesystem
/// paths by several components. Validation therefore rejects anything that
/// could escape those roots:
/// - empty or whitespace-only names
/// - path separators (`/`, `\`)
/// - the `.` and `..` segments
/// - embedded NUL bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct InstanceName(String);

impl InstanceName {
    /// Creates a new `InstanceName` from a string-like value.
    ///
    /// # Examples
    /// ```
    /// use warden_model::InstanceName;
    ///
    /// let name = InstanceName::new("alice").unwrap();
    /// assert_eq!(name.as_str(), "alice");
    ///
    /// assert!(InstanceName::new("../etc").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, ModelError> {
        Self::try_from(s.into())
    }

    /// Returns the underlying name as `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InstanceName {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for InstanceName {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(ModelError::InvalidInstance("name is empty".into()));
        }
        if s.contains('/') || s.contains('\\') {
            return Err(ModelError::InvalidInstance(format!(
                "'{s}' contains a path separator"
            )));
        }
        if s == "." || s == ".." {
            return Err(ModelError::InvalidInstance(format!(
                "'{s}' is a relative path segment"
            )));
        }
        if s.contains('\0') {
            return Err(ModelError::InvalidInstance("name contains NUL".into()));
        }
        Ok(InstanceName(s))
    }
}

impl From<InstanceName> for String {
    fn from(n: InstanceName) -> Self {
        n.0
    }
}
