use config::{Config, Environment, File};
use lineage_domain::constants::{ENV_PREFIX, ENV_SEPARATOR};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Custom error type for config loading.
#[lineage_derive::lineage_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A layered configuration loader.
///
/// Sources are applied in this order, later ones overriding earlier ones:
/// 1. **Defaults**: whatever `#[serde(default)]` on the target type provides.
/// 2. **File**: an optional or required file; the format follows the extension
///    (`.toml`, `.json`).
/// 3. **Environment**: variables prefixed with `LINEAGE__`. Nested keys are joined with
///    double underscores (`LINEAGE__ENUMERATION__MAX_DEPTH` maps to `enumeration.max_depth`).
///
/// # Example
/// ```rust,no_run
/// use lineage_kernel::config::ConfigLoader;
/// use lineage_kernel::domain::config::LineageConfig;
///
/// let cfg: LineageConfig = ConfigLoader::new().optional_file("lineage.toml").load().unwrap();
/// # let _ = cfg;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<(PathBuf, bool)>,
    env_prefix: Cow<'static, str>,
    env_source: Option<config::Map<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self { file: None, env_prefix: Cow::Borrowed(ENV_PREFIX), env_source: None }
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file source that must exist.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some((path.into(), true));
        self
    }

    /// Adds a file source that is skipped when missing.
    #[must_use]
    pub fn optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some((path.into(), false));
        self
    }

    /// Overrides the environment variable prefix (`LINEAGE` by default).
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Reads environment overrides from the given pairs instead of the process environment.
    #[must_use]
    pub fn env_source<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_source = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Builds the layered configuration and deserializes it into `T`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if a required file is missing, a file cannot be
    /// parsed, or the merged values do not match the structure of `T`.
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let mut builder = Config::builder();

        if let Some((path, required)) = &self.file {
            debug!(path = %path.display(), required, "Loading config file");
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(self.env_source.clone()),
        );

        builder
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")
    }
}

/// Loads `T` from an optional file plus `LINEAGE__` environment overrides.
///
/// A path that is given must exist. Without a path only defaults and the
/// environment are used.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust,no_run
/// use lineage_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     depth: usize,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// # let _ = cfg.depth;
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    let loader = match path {
        Some(path) => loader.file(path.as_ref()),
        None => loader,
    };
    loader.load()
}
