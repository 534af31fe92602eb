use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of one [`ManifestBuilder`](crate::ManifestBuilder) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderState {
    Uninitialized,
    /// Resource configs are merged and cached, or resolved to the empty outcome.
    ConfigsLoaded,
    ManifestBuilt,
}

impl fmt::Display for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::ConfigsLoaded => "configs_loaded",
            Self::ManifestBuilt => "manifest_built",
        };
        f.write_str(s)
    }
}

pub fn validate_transition(from: BuilderState, to: BuilderState) -> Result<(), CoreError> {
    let valid = matches!(
        (from, to),
        (BuilderState::Uninitialized, BuilderState::ConfigsLoaded)
            | (
                BuilderState::ConfigsLoaded | BuilderState::ManifestBuilt,
                BuilderState::ManifestBuilt
            )
            | (_, BuilderState::Uninitialized)
    );

    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        assert!(
            validate_transition(BuilderState::Uninitialized, BuilderState::ConfigsLoaded).is_ok()
        );
        assert!(
            validate_transition(BuilderState::ConfigsLoaded, BuilderState::ManifestBuilt).is_ok()
        );
        assert!(
            validate_transition(BuilderState::ManifestBuilt, BuilderState::ManifestBuilt).is_ok()
        ); // cached parse
        assert!(
            validate_transition(BuilderState::ManifestBuilt, BuilderState::Uninitialized).is_ok()
        ); // invalidate
    }

    #[test]
    fn invalid_transitions() {
        assert!(
            validate_transition(BuilderState::Uninitialized, BuilderState::ManifestBuilt).is_err()
        );
        assert!(
            validate_transition(BuilderState::ConfigsLoaded, BuilderState::ConfigsLoaded).is_err()
        );
        assert!(
            validate_transition(BuilderState::ManifestBuilt, BuilderState::ConfigsLoaded).is_err()
        );
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(BuilderState::ManifestBuilt.to_string(), "manifest_built");
        let json = serde_json::to_string(&BuilderState::ConfigsLoaded).unwrap();
        assert_eq!(json, "\"configs_loaded\"");
    }
}
