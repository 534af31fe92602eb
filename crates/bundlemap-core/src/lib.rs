//! Manifest builder for bundlemap.
//!
//! This crate ties the schema layer to the filesystem: it discovers and
//! merges resource configs (`ResourceConfigLoader`), hands them to a
//! pluggable `ComponentResolver`, derives timestamp-based cache keys for each
//! bundle (`hash_files`), and assembles, memoizes, and persists the build
//! manifest through the `ManifestBuilder`.

pub mod builder;
pub mod hasher;
pub mod lifecycle;
pub mod loader;
pub mod resolver;

pub use builder::ManifestBuilder;
pub use hasher::{hash_files, CACHE_KEY_LEN};
pub use lifecycle::{validate_transition, BuilderState};
pub use loader::{ConfigOutcome, EmptyReason, ResourceConfigLoader};
pub use resolver::{ComponentResolver, PassthroughResolver, ResolveError, ResolveRequest};

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Join `relative` onto `base`, dropping any root or drive prefix first.
///
/// Configured paths are always relative to the base directory, even when
/// written with a leading `/`.
pub(crate) fn under_base(base: &Path, relative: impl AsRef<Path>) -> PathBuf {
    let rest: PathBuf = relative
        .as_ref()
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    base.join(rest)
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(#[from] bundlemap_schema::ConfigError),
    #[error("lock error: {0}")]
    Lock(#[from] bundlemap_schema::LockError),
    #[error("component resolution failed: {0}")]
    Resolve(#[from] ResolveError),
    #[error("source file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid builder state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
