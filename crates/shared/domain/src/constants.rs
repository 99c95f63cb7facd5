//! Fixed strings shared across crates.

/// Google Fonts CSS API endpoint used for synthesized stylesheet URLs.
pub const GOOGLE_FONTS_API: &str = "https://fonts.googleapis.com/css";

/// Origin that serves the font files referenced by the Google Fonts stylesheet.
pub const GOOGLE_FONTS_STATIC: &str = "https://fonts.gstatic.com";

/// Suffix appended to a handle to form its asset-system id.
pub const ASSET_ID_SUFFIX: &str = "-font";

/// Media query used when none is given.
pub const DEFAULT_MEDIA: &str = "all";

/// Builds the asset-system id for a font handle (`"<handle>-font"`).
#[must_use]
pub fn asset_id(handle: &str) -> String {
    format!("{handle}{ASSET_ID_SUFFIX}")
}
