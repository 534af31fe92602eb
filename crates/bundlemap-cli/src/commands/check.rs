use super::{colorize_status, json_pretty, open_builder, EXIT_STALE_LOCK, EXIT_SUCCESS};
use bundlemap_schema::{BuildManifest, LockError, ManifestDiff};
use std::path::Path;

pub fn run(config: &Path, json: bool) -> Result<u8, String> {
    let mut builder = open_builder(config)?;
    let lock_path = builder.lock_path();
    let current = builder
        .dry_run()
        .map_err(|e| e.to_string())?
        .unwrap_or_default();

    let (previous, lock_present) = match BuildManifest::read_from_file(&lock_path) {
        Ok(manifest) => (manifest, true),
        Err(LockError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            (BuildManifest::default(), false)
        }
        Err(e) => return Err(e.to_string()),
    };

    let diff = previous.diff(&current);
    // A missing lock is stale unless there is nothing to build.
    let fresh = diff.is_empty() && (lock_present || current.is_empty());

    if json {
        let report = serde_json::json!({
            "fresh": fresh,
            "lock_present": lock_present,
            "changed": diff.changed,
            "added": diff.added,
            "removed": diff.removed,
        });
        println!("{}", json_pretty(&report)?);
    } else {
        print_report(&lock_path, lock_present, fresh, &diff);
    }

    Ok(if fresh { EXIT_SUCCESS } else { EXIT_STALE_LOCK })
}

fn print_report(lock_path: &Path, lock_present: bool, fresh: bool, diff: &ManifestDiff) {
    if !lock_present {
        println!("{}: {}", colorize_status("missing"), lock_path.display());
    }
    for key in &diff.changed {
        println!("{}: {key}", colorize_status("changed"));
    }
    for key in &diff.added {
        println!("{}: {key}", colorize_status("added"));
    }
    for key in &diff.removed {
        println!("{}: {key}", colorize_status("removed"));
    }
    if fresh {
        println!("{}: {}", colorize_status("fresh"), lock_path.display());
    }
}
