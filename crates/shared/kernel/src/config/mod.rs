use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix for environment overrides (`FONTLOOM__ASSETS__BASE_URI`).
pub const ENV_PREFIX: &str = "FONTLOOM";
/// Separator between nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";
/// File stem used when no path is given (`fontloom.toml`, `fontloom.json`, ...).
pub const DEFAULT_CONFIG_STEM: &str = "fontloom";

/// Custom error type for config loading.
#[fontloom_derive::fontloom_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration: a file source overlaid with environment overrides.
///
/// Nested keys in the environment use double underscores, so
/// `FONTLOOM__LOGGING__LEVEL=debug` maps to `logging.level`.
///
/// # Example
/// ```rust,no_run
/// use fontloom_kernel::config::ConfigLoader;
/// use fontloom_kernel::domain::config::AppConfig;
///
/// let cfg: AppConfig = ConfigLoader::new().file("config/local").required(false).load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    required: bool,
    env: Option<Map<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_CONFIG_STEM), required: true, env: None }
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the config file. The extension may be omitted; supported formats are probed.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Whether a missing file is an error. Defaults to `true`.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replaces the process environment with an explicit variable map.
    #[must_use]
    pub fn env(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Builds and deserializes the layered configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if a required file is missing, a source is
    /// malformed, or the merged values do not match `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        info!(path = %self.path.display(), required = self.required, "Loading config");

        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(self.env);

        let config = Config::builder()
            .add_source(File::from(self.path.as_path()).required(self.required))
            .add_source(environment)
            .build()
            .context("Failed to build config")?;

        debug!("Config sources merged");

        config.try_deserialize::<T>().context("Failed to deserialize config")
    }
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// 1. **Base File**: `path`, or `fontloom` in the working directory (any supported extension).
/// 2. **Environment Overrides**: variables prefixed with `FONTLOOM__`.
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use fontloom_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    let loader = match path {
        Some(path) => loader.file(path),
        None => loader,
    };
    loader.load()
}
