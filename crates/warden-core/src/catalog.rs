use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::trace;

use warden_model::InstanceName;

use crate::error::CoreError;

/// Read-only view over the catalog root directory.
///
/// Every call re-reads the filesystem; the catalog holds no cache, so an
/// instance provisioned externally shows up on the next listing without any
/// coordination. Enumeration order follows the underlying directory
/// iteration and is not guaranteed.
pub struct InstanceCatalog {
    root: PathBuf,
    exclusions: BTreeSet<String>,
}

impl InstanceCatalog {
    /// Create a catalog over `root`, hiding any name in `exclusions`.
    ///
    /// The exclusion set is used to keep the controller's own infrastructure
    /// directories out of listings.
    pub fn new(root: impl Into<PathBuf>, exclusions: impl IntoIterator<Item = String>) -> Self {
        Self {
            root: root.into(),
            exclusions: exclusions.into_iter().collect(),
        }
    }

    /// The catalog root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the names of all managed instances.
    ///
    /// Keeps direct child directories of the root, drops everything else
    /// (plain files, symlink targets that are not directories, non-UTF-8
    /// names) and filters the exclusion set. An unreadable root is a
    /// request-scoped [`CoreError::Listing`], not a crash.
    pub async fn list(&self) -> Result<Vec<String>, CoreError> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| CoreError::Listing {
            root: self.root.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| CoreError::Listing {
            root: self.root.clone(),
            source: e,
        })? {
            let file_type = entry.file_type().await.map_err(|e| CoreError::Listing {
                root: self.root.clone(),
                source: e,
            })?;
            if !file_type.is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if self.exclusions.contains(&name) {
                trace!(name = %name, "excluded from catalog listing");
                continue;
            }
            names.push(name);
        }

        Ok(names)
    }

    /// Whether `name` currently resolves to an instance directory.
    pub async fn contains(&self, name: &InstanceName) -> bool {
        fs::metadata(self.root.join(name.as_str()))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
