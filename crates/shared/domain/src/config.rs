use crate::options::FontArgs;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the shell and the font registry.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
    /// Fonts enqueued on every page render.
    pub fonts: Vec<FontDeclaration>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where bundled font stylesheets are published.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Public URI that relative asset paths are resolved against.
    pub base_uri: String,
    /// Directory (relative to `base_uri`) holding `<handle>/<handle>.css` stylesheets.
    pub local_dir: String,
    /// Register the bundled stylesheet when a font has neither `src` nor `family`.
    pub local_fallback: bool,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Extra env-filter directives, e.g. `fontloom_fonts=debug`.
    pub filter: Option<String>,
    pub console: bool,
    /// Rolling log directory; no file output when unset.
    pub directory: Option<PathBuf>,
    /// Write file logs as JSON lines.
    pub json: bool,
}

/// One font to enqueue, as written in config.
///
/// ```toml
/// [[fonts]]
/// handle = "roboto"
/// family = ["Roboto:400,700", "Roboto Slab"]
/// display = "swap"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FontDeclaration {
    pub handle: String,
    #[serde(flatten)]
    pub args: FontArgs,
}

// --- Default ---

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost".to_owned(),
            local_dir: "assets/fonts".to_owned(),
            local_fallback: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            json: false,
        }
    }
}
