use crate::hasher::hash_files;
use crate::lifecycle::{validate_transition, BuilderState};
use crate::loader::{ConfigOutcome, ResourceConfigLoader};
use crate::resolver::{ComponentResolver, PassthroughResolver, ResolveRequest};
use crate::{under_base, CoreError};
use bundlemap_schema::{
    parse_settings_file, Bundle, BundleDest, BuildManifest, CacheKey, ConfigStore,
    FileConfigStore, MergedResourceConfig, ResolvedComponent, SectionKey, Settings, LOCK_FILE,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds the bundle manifest for one base directory.
///
/// Merged configs and the finished manifest are computed once and cached on
/// the instance until [`invalidate`](Self::invalidate). Every successful
/// [`parse`](Self::parse) rewrites `build.lock`, cached or not.
///
/// Nothing here locks the lock file: two builders writing the same base
/// directory race and the last write wins.
pub struct ManifestBuilder {
    base_dir: PathBuf,
    settings: Settings,
    store: Box<dyn ConfigStore>,
    resolver: Box<dyn ComponentResolver>,
    configs: Option<ConfigOutcome>,
    manifest: Option<BuildManifest>,
    state: BuilderState,
}

impl ManifestBuilder {
    /// Create a builder rooted at `base_dir` with file-backed configs and no
    /// component composition.
    pub fn new(base_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            base_dir: base_dir.into(),
            settings,
            store: Box::new(FileConfigStore),
            resolver: Box::new(PassthroughResolver),
            configs: None,
            manifest: None,
            state: BuilderState::Uninitialized,
        }
    }

    /// Read the settings file; its directory becomes the base directory.
    pub fn open(settings_path: &Path) -> Result<Self, CoreError> {
        let settings = parse_settings_file(settings_path)?;
        let absolute = fs::canonicalize(settings_path)?;
        let base_dir = absolute
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
        debug!("base directory {}", base_dir.display());
        Ok(Self::new(base_dir, settings))
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ComponentResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: impl ConfigStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn lock_path(&self) -> PathBuf {
        self.base_dir.join(LOCK_FILE)
    }

    /// Load and merge resource configs, or return the cached outcome.
    pub fn load_configs(&mut self) -> Result<&ConfigOutcome, CoreError> {
        let outcome = match self.configs.take() {
            Some(cached) => cached,
            None => {
                let loader = ResourceConfigLoader::new(&self.base_dir, self.store.as_ref());
                let outcome = loader.load(self.settings.path.resources_config.as_deref())?;
                self.advance(BuilderState::ConfigsLoaded)?;
                outcome
            }
        };
        Ok(&*self.configs.insert(outcome))
    }

    /// Merged section configs, or `None` when there is nothing to build.
    pub fn get_configs(&mut self) -> Result<Option<&MergedResourceConfig>, CoreError> {
        Ok(self.load_configs()?.sections())
    }

    /// Build the manifest (once) and write it to `build.lock` (every call).
    ///
    /// Returns `None` when no resources config is configured or its directory
    /// is empty; no lock file is written in that case. A missing source file
    /// fails the whole build before anything is cached or written.
    pub fn parse(&mut self) -> Result<Option<&BuildManifest>, CoreError> {
        self.load_configs()?;

        let manifest = match self.manifest.take() {
            Some(cached) => {
                debug!("reusing cached manifest ({} bundles)", cached.len());
                self.advance(BuilderState::ManifestBuilt)?;
                cached
            }
            None => {
                let Some(ConfigOutcome::Sections(sections)) = &self.configs else {
                    return Ok(None);
                };
                let built = self.compute_manifest(sections)?;
                self.advance(BuilderState::ManifestBuilt)?;
                built
            }
        };

        let lock_path = self.lock_path();
        let manifest = self.manifest.insert(manifest);
        manifest.write_to_file(&lock_path)?;
        info!("wrote {} bundles to {}", manifest.len(), lock_path.display());
        Ok(Some(&*manifest))
    }

    /// Compute a fresh manifest without caching it or touching `build.lock`.
    pub fn dry_run(&mut self) -> Result<Option<BuildManifest>, CoreError> {
        self.load_configs()?;
        match &self.configs {
            Some(ConfigOutcome::Sections(sections)) => self.compute_manifest(sections).map(Some),
            _ => Ok(None),
        }
    }

    /// Drop both caches; the next call reloads configs and re-hashes every bundle.
    pub fn invalidate(&mut self) {
        debug!("invalidating cached configs and manifest");
        self.configs = None;
        self.manifest = None;
        self.state = BuilderState::Uninitialized;
    }

    pub fn rebuild(&mut self) -> Result<Option<&BuildManifest>, CoreError> {
        self.invalidate();
        self.parse()
    }

    fn advance(&mut self, to: BuilderState) -> Result<(), CoreError> {
        validate_transition(self.state, to)?;
        self.state = to;
        Ok(())
    }

    fn compute_manifest(
        &self,
        sections: &MergedResourceConfig,
    ) -> Result<BuildManifest, CoreError> {
        info!(
            "building manifest for {} sections with {} resolver",
            sections.len(),
            self.resolver.name()
        );
        let components_config = self
            .settings
            .path
            .components_config
            .as_ref()
            .map(|relative| under_base(&self.base_dir, relative));
        let request = ResolveRequest {
            sections,
            components_config: components_config.as_deref(),
        };
        let resolved = self.resolver.resolve(&request)?;
        request.check_output(&resolved)?;

        let mut manifest = BuildManifest::default();
        for (key, component) in &resolved {
            let dest_prefix = sections
                .get(key.as_str())
                .and_then(|config| config.dest_prefix.as_deref());
            let bundle = self.build_bundle(key, component, dest_prefix)?;
            manifest.bundles.insert(self.settings.bundle_key(key), bundle);
        }
        Ok(manifest)
    }

    fn build_bundle(
        &self,
        key: &SectionKey,
        component: &ResolvedComponent,
        dest_prefix: Option<&str>,
    ) -> Result<Bundle, CoreError> {
        let javascript: Vec<String> = component
            .javascript
            .iter()
            .map(|file| self.settings.javascript_source(file))
            .collect();
        let css: Vec<String> = component
            .css
            .iter()
            .map(|file| self.settings.css_source(file))
            .collect();

        let javascript_hash = self.hash_sources(&javascript)?;
        let css_hash = self.hash_sources(&css)?;

        let dest_prefix = dest_prefix.map_or_else(
            || self.settings.bundle_key(key).into_inner(),
            str::to_owned,
        );
        debug!("bundle '{key}' -> {dest_prefix}_{javascript_hash}");

        Ok(Bundle {
            javascript,
            css,
            dest: BundleDest {
                javascript: format!("{dest_prefix}_{javascript_hash}.js"),
                css: format!("{dest_prefix}_{css_hash}.css"),
            },
        })
    }

    fn hash_sources(&self, sources: &[String]) -> Result<CacheKey, CoreError> {
        let paths: Vec<PathBuf> = sources
            .iter()
            .map(|source| under_base(&self.base_dir, source))
            .collect();
        hash_files(&paths)
    }
}
