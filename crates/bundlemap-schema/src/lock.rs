use crate::types::BundleKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the persisted manifest, relative to the base directory.
pub const LOCK_FILE: &str = "build.lock";

#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lock file parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("lock file serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Hashed output file names for one bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleDest {
    pub javascript: String,
    pub css: String,
}

/// One manifest entry: prefixed source files and their hashed destinations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bundle {
    pub javascript: Vec<String>,
    pub css: Vec<String>,
    pub dest: BundleDest,
}

/// The build manifest, written verbatim as `build.lock`.
///
/// Keys are kept sorted so identical builds produce byte-identical lock files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BuildManifest {
    pub bundles: BTreeMap<BundleKey, Bundle>,
}

/// Bundle-level differences between two manifests.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ManifestDiff {
    /// Present in both but with different sources or destinations.
    pub changed: Vec<BundleKey>,
    /// Present in the new manifest only.
    pub added: Vec<BundleKey>,
    /// Present in the old manifest only.
    pub removed: Vec<BundleKey>,
}

impl ManifestDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

impl BuildManifest {
    pub fn get(&self, key: &str) -> Option<&Bundle> {
        self.bundles.get(key)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn to_json(&self) -> Result<String, LockError> {
        serde_json::to_string(self).map_err(LockError::Serialize)
    }

    /// Compare `self` (the previous state) against `current`.
    pub fn diff(&self, current: &BuildManifest) -> ManifestDiff {
        let mut diff = ManifestDiff::default();
        for (key, bundle) in &current.bundles {
            match self.bundles.get(key) {
                Some(old) if old != bundle => diff.changed.push(key.clone()),
                Some(_) => {}
                None => diff.added.push(key.clone()),
            }
        }
        diff.removed = self
            .bundles
            .keys()
            .filter(|key| !current.bundles.contains_key(*key))
            .cloned()
            .collect();
        diff
    }

    /// Replace the file at `path` with this manifest as compact JSON.
    ///
    /// The write goes through a temp file in the same directory and a rename,
    /// so readers never see a torn file. Concurrent writers are not
    /// serialized: the last rename wins.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), LockError> {
        let path = path.as_ref();
        let content = self.to_json()?;
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        std::io::Write::write_all(&mut tmp, content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| LockError::Io(e.error))?;
        if let Ok(f) = fs::File::open(dir) {
            let _ = f.sync_all();
        }
        Ok(())
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, LockError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(LockError::Parse)
    }
}
