//! Resource config model, global-defaults merge, settings, and lock file for bundlemap.
//!
//! This crate defines the schema layer: raw resource sections as read from
//! disk (`RawResourceConfig`), the merge of `global` defaults into each
//! section (`merge_sections`), the primary settings file (`Settings`), the
//! `ConfigStore` seam for reading one config file, and the build manifest
//! persisted as `build.lock` (`BuildManifest`).

pub mod lock;
pub mod merge;
pub mod resource;
pub mod settings;
pub mod store;
pub mod types;

pub use lock::{Bundle, BundleDest, BuildManifest, LockError, ManifestDiff, LOCK_FILE};
pub use merge::{merge_section, merge_sections, union_ordered};
pub use resource::{
    MergedResourceConfig, RawResourceConfig, ResolvedComponent, ResolvedComponents,
    ResourceEntry, SectionConfig,
};
pub use settings::{
    join_prefix, parse_settings_file, parse_settings_str, PathSettings, PrefixSettings, Settings,
    SETTINGS_FILE,
};
pub use store::{ConfigError, ConfigFormat, ConfigStore, FileConfigStore};
pub use types::{BundleKey, CacheKey, SectionKey, GLOBAL_SECTION};
