use crate::store::ConfigError;
use crate::types::{BundleKey, SectionKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name of the primary settings file.
pub const SETTINGS_FILE: &str = "bundlemap.toml";

/// Primary settings locating the resource configs and naming path prefixes.
///
/// The settings file may be shared with other tools, so unknown tables and
/// keys are accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub path: PathSettings,
    #[serde(default)]
    pub prefix: PrefixSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PathSettings {
    /// File or directory of resources configs, relative to the base directory.
    #[serde(default)]
    pub resources_config: Option<String>,
    /// Component definitions handed to the component resolver.
    #[serde(default)]
    pub components_config: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PrefixSettings {
    #[serde(default)]
    pub resources_javascript: String,
    #[serde(default)]
    pub resources_css: String,
    #[serde(default)]
    pub resources_controller: String,
}

impl Settings {
    pub fn javascript_source(&self, file: &str) -> String {
        join_prefix(&self.prefix.resources_javascript, file)
    }

    pub fn css_source(&self, file: &str) -> String {
        join_prefix(&self.prefix.resources_css, file)
    }

    pub fn bundle_key(&self, section: &SectionKey) -> BundleKey {
        BundleKey::new(join_prefix(&self.prefix.resources_controller, section))
    }
}

/// `{prefix}/{name}`, or the bare name when no prefix is configured.
pub fn join_prefix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

pub fn parse_settings_str(input: &str) -> Result<Settings, ConfigError> {
    Ok(toml::from_str(input)?)
}

pub fn parse_settings_file(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_settings_str(&content)
}
