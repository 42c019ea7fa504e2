//! Generator configuration
//!
//! Target-project layout is read from a `crudgen.toml` in the project root.
//! Every field has a default matching a stock Laravel application, so the
//! file is optional.
//!
//! ```toml
//! namespace = "App"
//! app_dir = "app"
//! database_dir = "database"
//! routes_file = "routes/api.php"
//! provider_file = "app/Providers/AppServiceProvider.php"
//! schema = "schema.yaml"
//! ```

use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "crudgen.toml";

/// Target-project layout threaded into every generator call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Project root; relative roots resolve against the config file's directory
    pub root: PathBuf,
    /// Root PHP namespace of the application
    pub namespace: String,
    pub app_dir: PathBuf,
    pub database_dir: PathBuf,
    /// Route file receiving the autoload block
    pub routes_file: PathBuf,
    /// Service provider receiving repository bindings
    pub provider_file: PathBuf,
    /// Schema snapshot (YAML or JSON)
    pub schema: Option<PathBuf>,
    /// Default `perPage` emitted into generated list actions
    pub default_per_page: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            namespace: "App".to_string(),
            app_dir: PathBuf::from("app"),
            database_dir: PathBuf::from("database"),
            routes_file: PathBuf::from("routes/api.php"),
            provider_file: PathBuf::from("app/Providers/AppServiceProvider.php"),
            schema: None,
            default_per_page: crate::query::DEFAULT_PER_PAGE,
        }
    }
}

impl GeneratorConfig {
    /// Defaults rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// `<root>/<app_dir>/<relative>`
    pub fn app_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.app_dir).join(relative)
    }

    /// `<root>/<database_dir>/<relative>`
    pub fn database_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.database_dir).join(relative)
    }

    pub fn routes_file_path(&self) -> PathBuf {
        self.root.join(&self.routes_file)
    }

    pub fn provider_path(&self) -> PathBuf {
        self.root.join(&self.provider_file)
    }

    /// Schema snapshot path, resolved against the root
    pub fn schema_path(&self) -> Option<PathBuf> {
        self.schema.as_ref().map(|p| self.root.join(p))
    }

    /// Namespace below the application root (`App\Models`)
    pub fn ns(&self, segments: &[&str]) -> String {
        std::iter::once(self.namespace.as_str())
            .chain(segments.iter().copied())
            .collect::<Vec<_>>()
            .join("\\")
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_config(config_path: &Path) -> GeneratorResult<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents =
        std::fs::read_to_string(config_path).map_err(|e| GeneratorError::io(config_path, e))?;
    let mut config: GeneratorConfig =
        toml::from_str(&contents).map_err(|e| GeneratorError::Config {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;
    if config.root.is_relative() {
        if let Some(dir) = config_path.parent() {
            config.root = dir.join(&config.root);
        }
    }
    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(Some(config))
}

/// Look for `crudgen.toml` directly under `root`
pub fn auto_detect_config_path(root: &Path) -> Option<PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the configuration path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected in the project root
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "configuration file not found, falling back");
    }
    auto_detect_config_path(root)
}

/// Resolve and load the configuration, falling back to defaults rooted at `root`.
pub fn resolve_config(explicit_path: Option<&Path>, root: &Path) -> GeneratorResult<GeneratorConfig> {
    match resolve_config_path(explicit_path, root) {
        Some(path) => Ok(load_config(&path)?.unwrap_or_else(|| GeneratorConfig::with_root(root))),
        None => Ok(GeneratorConfig::with_root(root)),
    }
}

/// Write starter content only if the file does not exist.
///
/// Returns whether the file was written.
pub fn write_config_if_missing(config_path: &Path, content: &str) -> GeneratorResult<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
    }
    std::fs::write(config_path, content).map_err(|e| GeneratorError::io(config_path, e))?;
    Ok(true)
}
