use crate::resource::RawResourceConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("failed to parse JSON config: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("more than one 'global' section: found in '{first}' and '{second}'")]
    DuplicateGlobal { first: String, second: String },
}

/// On-disk formats a resources config file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn parse(self, input: &str) -> Result<RawResourceConfig, ConfigError> {
        match self {
            Self::Toml => Ok(toml::from_str(input)?),
            Self::Json => Ok(serde_json::from_str(input)?),
        }
    }
}

/// Loads one physical resources config file into its sections.
///
/// `Ok(None)` means the file is not a config this store understands and
/// should be skipped.
pub trait ConfigStore {
    fn load(&self, path: &Path) -> Result<Option<RawResourceConfig>, ConfigError>;
}

/// Reads TOML and JSON files from disk, picking the format by extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileConfigStore;

impl ConfigStore for FileConfigStore {
    fn load(&self, path: &Path) -> Result<Option<RawResourceConfig>, ConfigError> {
        let Some(format) = ConfigFormat::from_path(path) else {
            debug!("skipping unrecognised config file {}", path.display());
            return Ok(None);
        };
        let content = fs::read_to_string(path)?;
        format.parse(&content).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/home.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("home.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new(".DS_Store")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn loads_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("a.toml");
        let json_path = dir.path().join("b.json");
        fs::write(&toml_path, "[home]\njavascript = [\"home.js\"]\n").unwrap();
        fs::write(&json_path, r#"{"cart": {"css": ["cart.css"]}}"#).unwrap();

        let store = FileConfigStore;
        let a = store.load(&toml_path).unwrap().unwrap();
        let b = store.load(&json_path).unwrap().unwrap();
        assert!(a.sections.contains_key("home"));
        assert!(b.sections.contains_key("cart"));
    }

    #[test]
    fn skips_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not a config").unwrap();
        assert!(FileConfigStore.load(&path).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            FileConfigStore.load(&path),
            Err(ConfigError::ParseJson(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfigStore
            .load(&dir.path().join("gone.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
