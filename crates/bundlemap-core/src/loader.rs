//! Discovery and merging of resource configs.
//!
//! A resources config is either a single file or a directory of files. In a
//! directory, the `global` section is located first across all files and then
//! applied to every other section, so the result does not depend on
//! directory enumeration order.

use crate::{under_base, CoreError};
use bundlemap_schema::{
    merge_sections, ConfigError, ConfigStore, MergedResourceConfig, RawResourceConfig,
    ResourceEntry, SectionConfig,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why loading produced no configuration. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// `path.resources_config` is not set.
    NoConfigPath,
    /// The resources-config directory has no entries.
    EmptyConfigDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOutcome {
    Empty(EmptyReason),
    Sections(MergedResourceConfig),
}

impl ConfigOutcome {
    pub fn sections(&self) -> Option<&MergedResourceConfig> {
        match self {
            Self::Sections(sections) => Some(sections),
            Self::Empty(_) => None,
        }
    }
}

pub struct ResourceConfigLoader<'a> {
    base_dir: &'a Path,
    store: &'a dyn ConfigStore,
}

impl<'a> ResourceConfigLoader<'a> {
    pub fn new(base_dir: &'a Path, store: &'a dyn ConfigStore) -> Self {
        Self { base_dir, store }
    }

    /// Load the configs named by `resources_config` (relative to the base directory).
    pub fn load(&self, resources_config: Option<&str>) -> Result<ConfigOutcome, CoreError> {
        let Some(relative) = resources_config else {
            debug!("path.resources_config not set; nothing to build");
            return Ok(ConfigOutcome::Empty(EmptyReason::NoConfigPath));
        };

        let path = under_base(self.base_dir, relative);
        if fs::metadata(&path)?.is_file() {
            self.load_file(&path).map(ConfigOutcome::Sections)
        } else {
            self.load_dir(&path)
        }
    }

    /// A single file: sections are taken as written, `global` is dropped.
    fn load_file(&self, path: &Path) -> Result<MergedResourceConfig, CoreError> {
        info!("loading resources config {}", path.display());
        let raw = self
            .store
            .load(path)?
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let (global, sections) = raw.into_parts();
        if global.is_some() {
            debug!("ignoring 'global' section in single-file config");
        }
        Ok(sections
            .into_iter()
            .map(|(key, entry)| (key, SectionConfig::from(entry)))
            .collect())
    }

    fn load_dir(&self, dir: &Path) -> Result<ConfigOutcome, CoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            entries.push(entry?.path());
        }
        if entries.is_empty() {
            debug!("resources config directory {} is empty", dir.display());
            return Ok(ConfigOutcome::Empty(EmptyReason::EmptyConfigDirectory));
        }
        entries.sort();
        info!(
            "loading {} resources config entries from {}",
            entries.len(),
            dir.display()
        );

        let files = self.read_files(&entries)?;
        let global = find_global(&files)?.cloned();

        let mut merged = MergedResourceConfig::new();
        for (path, raw) in files {
            let (_, sections) = raw.into_parts();
            for (key, config) in merge_sections(global.as_ref(), sections) {
                if merged.insert(key.clone(), config).is_some() {
                    warn!(
                        "section '{key}' redefined in {}; later definition wins",
                        path.display()
                    );
                }
            }
        }
        Ok(ConfigOutcome::Sections(merged))
    }

    fn read_files(
        &self,
        entries: &[PathBuf],
    ) -> Result<Vec<(PathBuf, RawResourceConfig)>, CoreError> {
        let mut files = Vec::with_capacity(entries.len());
        for path in entries {
            if path.is_dir() {
                debug!("skipping subdirectory {}", path.display());
                continue;
            }
            if let Some(raw) = self.store.load(path)? {
                files.push((path.clone(), raw));
            }
        }
        Ok(files)
    }
}

/// Locate the single `global` section across all files.
fn find_global(
    files: &[(PathBuf, RawResourceConfig)],
) -> Result<Option<&ResourceEntry>, ConfigError> {
    let mut found: Option<(&Path, &ResourceEntry)> = None;
    for (path, raw) in files {
        let Some(global) = raw.global() else {
            continue;
        };
        if let Some((first, _)) = found {
            return Err(ConfigError::DuplicateGlobal {
                first: first.display().to_string(),
                second: path.display().to_string(),
            });
        }
        debug!("global defaults taken from {}", path.display());
        found = Some((path.as_path(), global));
    }
    Ok(found.map(|(_, global)| global))
}
