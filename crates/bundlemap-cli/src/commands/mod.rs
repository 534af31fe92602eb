pub mod build;
pub mod check;
pub mod configs;

use bundlemap_core::ManifestBuilder;
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_STALE_LOCK: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn open_builder(config: &Path) -> Result<ManifestBuilder, String> {
    ManifestBuilder::open(config).map_err(|e| e.to_string())
}

pub fn colorize_status(status: &str) -> String {
    use console::Style;
    match status {
        "fresh" => Style::new().green().apply_to(status).to_string(),
        "changed" => Style::new().yellow().apply_to(status).to_string(),
        "added" => Style::new().cyan().apply_to(status).to_string(),
        "removed" | "missing" => Style::new().red().apply_to(status).to_string(),
        other => other.to_owned(),
    }
}
