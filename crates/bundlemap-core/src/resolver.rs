use bundlemap_schema::{MergedResourceConfig, ResolvedComponent, ResolvedComponents};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("resolver returned section '{0}' that is not in the merged config")]
    UnknownSection(String),
    #[error("resolver dropped section '{0}' from the merged config")]
    MissingSection(String),
    #[error("{0}")]
    Failed(String),
}

/// Input handed to a [`ComponentResolver`].
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub sections: &'a MergedResourceConfig,
    /// Absolute location of `path.components_config`, when configured.
    pub components_config: Option<&'a Path>,
}

impl ResolveRequest<'_> {
    /// The resolver must return exactly the requested section keys.
    pub fn check_output(&self, resolved: &ResolvedComponents) -> Result<(), ResolveError> {
        if let Some(unknown) = resolved
            .keys()
            .find(|key| !self.sections.contains_key(key.as_str()))
        {
            return Err(ResolveError::UnknownSection(unknown.to_string()));
        }
        if let Some(missing) = self
            .sections
            .keys()
            .find(|key| !resolved.contains_key(key.as_str()))
        {
            return Err(ResolveError::MissingSection(missing.to_string()));
        }
        Ok(())
    }
}

/// Expands merged section configs through component composition.
///
/// The builder calls this exactly once per manifest computation. The returned
/// map must use the same section keys as `request.sections`.
pub trait ComponentResolver {
    fn name(&self) -> &str;

    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<ResolvedComponents, ResolveError>;
}

/// Resolver that performs no composition: every section's lists come back as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl ComponentResolver for PassthroughResolver {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<ResolvedComponents, ResolveError> {
        Ok(request
            .sections
            .iter()
            .map(|(key, config)| (key.clone(), ResolvedComponent::from(config)))
            .collect())
    }
}
