//! Cache keys for bundle destination names.
//!
//! The key is derived from each file's path and modification time, never its
//! contents: touching a file changes the key even if its bytes are unchanged,
//! and editing a file without changing its mtime does not.

use crate::CoreError;
use bundlemap_schema::CacheKey;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::Path;

/// Number of hex characters kept from the final digest.
pub const CACHE_KEY_LEN: usize = 32;

/// Hash an ordered list of files into a [`CacheKey`].
///
/// Each file contributes `blake3(path ++ mtime)` in list order; the
/// concatenated hex digests are hashed once more and truncated to
/// [`CACHE_KEY_LEN`]. Any file that cannot be stat'ed aborts with
/// [`CoreError::FileNotFound`].
pub fn hash_files<P: AsRef<Path>>(files: &[P]) -> Result<CacheKey, CoreError> {
    let mut digests = String::with_capacity(files.len() * 64);
    for file in files {
        let seed = file_seed(file.as_ref())?;
        digests.push_str(blake3::hash(seed.as_bytes()).to_hex().as_str());
    }

    let hex = blake3::hash(digests.as_bytes()).to_hex();
    Ok(CacheKey::new(&hex.as_str()[..CACHE_KEY_LEN]))
}

fn file_seed(path: &Path) -> Result<String, CoreError> {
    let not_found = |source| CoreError::FileNotFound {
        path: path.to_path_buf(),
        source,
    };
    let modified = fs::symlink_metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(not_found)?;
    let mtime = DateTime::<Utc>::from(modified).to_rfc3339_opts(SecondsFormat::Nanos, true);
    Ok(format!("{}{mtime}", path.display()))
}
