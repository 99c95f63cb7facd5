//! Facade crate for the fontloom workspace.
//! Re-exports domain/kernel primitives and wires the fonts feature to a host.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`domain::config::AppConfig`] (see [`kernel::config::load_config`]).
//! - Call [`init`] with the host's [`hooks::Hooks`], then emit
//!   [`hooks::EnqueueAssets`] once per page render.

pub use fontloom_domain as domain;
pub use fontloom_fonts as fonts;
pub use fontloom_hooks as hooks;
pub use fontloom_kernel as kernel;

use fontloom_domain::config::AppConfig;
use fontloom_fonts::{FontRegistry, FontsError, InMemoryAssets, SharedRegistry};
use fontloom_hooks::Hooks;
use tracing::info;

/// Builds a registry over [`InMemoryAssets`] and installs the configured fonts on `hooks`.
///
/// # Errors
/// Returns [`FontsError::InvalidDeclaration`] if a configured font is invalid.
pub fn init(config: &AppConfig, hooks: &Hooks) -> Result<SharedRegistry<InMemoryAssets>, FontsError> {
    let assets = InMemoryAssets::new(config.assets.base_uri.clone());
    let registry = fonts::shared(FontRegistry::from_config(assets, &config.assets));

    fonts::boot(&registry, hooks, config.fonts.clone())?;
    info!(fonts = config.fonts.len(), base_uri = %config.assets.base_uri, "Fonts initialized");

    Ok(registry)
}
