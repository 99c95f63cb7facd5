//! # Fonts
//!
//! Web-font stylesheets for a host page: build a stylesheet URL for a handle,
//! register it with the host's asset system, and track whether it is
//! registered or enqueued for output.
//!
//! ## Architecture
//!
//! 1.  **URL building ([`url`]):** explicit `src` wins, otherwise a Google Fonts
//!     CSS API URL is synthesized. Optional interceptors rewrite options or URLs per handle.
//! 2.  **Registry ([`registry`]):** `handle -> entry` map delegating side effects to
//!     an [`AssetSystem`]. Asset ids are `"<handle>-font"`.
//! 3.  **Lifecycle ([`boot`]):** enqueues configured fonts whenever the host emits
//!     [`fontloom_hooks::EnqueueAssets`].
//!
//! Nothing on the URL or registry path returns an error. Missing or invalid
//! options shrink the URL, and the asset system's verdict is returned as a `bool`.
//!
//! ```
//! use fontloom_domain::options::FontArgs;
//! use fontloom_fonts::{FontRegistry, InMemoryAssets};
//!
//! let mut fonts = FontRegistry::new(InMemoryAssets::new("https://example.test"));
//! fonts.enqueue("lato", FontArgs::new().family(["Lato"]).display("swap"));
//!
//! assert!(fonts.is_enqueued("lato"));
//! assert_eq!(fonts.url("lato"), Some("https://fonts.googleapis.com/css?family=Lato&display=swap"));
//! ```

pub mod assets;
mod error;
pub mod escape;
pub mod hints;
mod lifecycle;
pub mod registry;
pub mod url;

pub use crate::assets::{AssetSystem, InMemoryAssets, Stylesheet};
pub use crate::error::{FontsError, FontsErrorExt};
pub use crate::hints::{HintRelation, ResourceHint};
pub use crate::lifecycle::{SharedRegistry, boot, shared};
pub use crate::registry::{FontRegistry, RegistryEntry};
pub use crate::url::{UrlBuilder, build_url};
