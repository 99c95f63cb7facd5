//! Handle-keyed font registry.
//!
//! Each handle moves through `Absent -> Registered -> Enqueued`; `dequeue`
//! steps back to `Registered` and `deregister` removes it. Membership queries
//! are answered by the asset system, which owns the authoritative lists.

use crate::assets::AssetSystem;
use crate::url::UrlBuilder;
use fontloom_domain::config::AssetsConfig;
use fontloom_domain::constants::asset_id;
use fontloom_domain::options::{FontArgs, FontOptions, FontSource};
use fontloom_domain::status::{FontStatus, StatusList};
use fxhash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

/// What the registry remembers about a handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub handle: String,
    /// The URL handed to the asset system.
    pub url: String,
    /// Options after defaults were applied.
    pub options: FontOptions,
    /// Mirrors the asset queue: re-registering a queued handle keeps it `Enqueued`.
    pub status: FontStatus,
}

/// Registers and enqueues font stylesheets with an [`AssetSystem`].
///
/// Operations are synchronous and take `&mut self`; share one instance
/// across threads through [`crate::SharedRegistry`].
#[derive(Debug)]
pub struct FontRegistry<A> {
    assets: A,
    urls: UrlBuilder,
    defaults: FontOptions,
    local_dir: Option<String>,
    entries: FxHashMap<String, RegistryEntry>,
}

impl<A: AssetSystem> FontRegistry<A> {
    /// Creates an empty registry over `assets` with plain URL building and no local fallback.
    #[must_use]
    pub fn new(assets: A) -> Self {
        Self {
            assets,
            urls: UrlBuilder::default(),
            defaults: FontOptions::default(),
            local_dir: None,
            entries: FxHashMap::default(),
        }
    }

    /// Creates a registry configured from the `[assets]` section.
    #[must_use]
    pub fn from_config(assets: A, config: &AssetsConfig) -> Self {
        let registry = Self::new(assets);
        if config.local_fallback {
            registry.with_local_fallback(config.local_dir.clone())
        } else {
            registry
        }
    }

    /// Uses `urls` (and its interceptors) to compute stylesheet URLs.
    #[must_use]
    pub fn with_urls(mut self, urls: UrlBuilder) -> Self {
        self.urls = urls;
        self
    }

    /// Replaces the options that registration arguments are merged over.
    #[must_use]
    pub fn with_defaults(mut self, defaults: FontOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Registers `<dir>/<handle>/<handle>.css` when a font has neither `src` nor `family`.
    #[must_use]
    pub fn with_local_fallback(mut self, dir: impl Into<String>) -> Self {
        self.local_dir = Some(dir.into());
        self
    }

    /// Resolves `args`, builds the URL, and registers it with the asset system.
    ///
    /// An existing entry for `handle` is overwritten. The entry is stored even
    /// when the asset system rejects the stylesheet; its verdict is returned as-is.
    /// A handle the asset system still has queued stays `Enqueued`.
    pub fn register(&mut self, handle: &str, args: FontArgs) -> bool {
        let options = self.resolve(handle, args);
        let url = self.urls.build(handle, &options);
        let id = asset_id(handle);

        let accepted = self.assets.register(
            &id,
            &url,
            &options.depends,
            options.version.as_deref(),
            &options.media,
        );
        if accepted {
            debug!(handle, url = %url, "Font registered");
        } else {
            warn!(handle, id = %id, "Asset system rejected font stylesheet");
        }

        let status = if self.assets.status_is(&id, StatusList::Enqueued) {
            FontStatus::Enqueued
        } else {
            FontStatus::Registered
        };
        self.entries.insert(
            handle.to_owned(),
            RegistryEntry { handle: handle.to_owned(), url, options, status },
        );
        accepted
    }

    /// Removes `handle`. Unknown handles are a no-op.
    pub fn deregister(&mut self, handle: &str) {
        if self.entries.remove(handle).is_some() {
            debug!(handle, "Font deregistered");
        }
        self.assets.deregister(&asset_id(handle));
    }

    /// Marks `handle` for output, registering it with `args` first if needed.
    ///
    /// `args` are ignored when the handle is already registered. The result of
    /// the implicit registration is not checked.
    pub fn enqueue(&mut self, handle: &str, args: FontArgs) {
        if !self.is_registered(handle) {
            self.register(handle, args);
        }

        self.assets.enqueue(&asset_id(handle));
        if let Some(entry) = self.entries.get_mut(handle) {
            entry.status = FontStatus::Enqueued;
        }
        debug!(handle, "Font enqueued");
    }

    /// Unmarks `handle` for output. The registration is kept.
    pub fn dequeue(&mut self, handle: &str) {
        self.assets.dequeue(&asset_id(handle));
        if let Some(entry) = self.entries.get_mut(handle) {
            entry.status = FontStatus::Registered;
            debug!(handle, "Font dequeued");
        }
    }

    /// Whether the asset system lists `handle` in `list`.
    #[must_use]
    pub fn status(&self, handle: &str, list: StatusList) -> bool {
        self.assets.status_is(&asset_id(handle), list)
    }

    #[must_use]
    pub fn is_registered(&self, handle: &str) -> bool {
        self.status(handle, StatusList::Registered)
    }

    #[must_use]
    pub fn is_enqueued(&self, handle: &str) -> bool {
        self.status(handle, StatusList::Enqueued)
    }

    /// The URL computed for `handle` on its last registration.
    #[must_use]
    pub fn url(&self, handle: &str) -> Option<&str> {
        self.entries.get(handle).map(|entry| entry.url.as_str())
    }

    #[must_use]
    pub fn entry(&self, handle: &str) -> Option<&RegistryEntry> {
        self.entries.get(handle)
    }

    /// Entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn assets(&self) -> &A {
        &self.assets
    }

    pub const fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    fn resolve(&self, handle: &str, args: FontArgs) -> FontOptions {
        let mut options = args.merge_over(self.defaults.clone());
        if options.src.is_empty()
            && options.family.is_empty()
            && let Some(dir) = &self.local_dir
        {
            let path = format!("{}/{handle}/{handle}.css", dir.trim_end_matches('/'));
            options.src = FontSource::Stylesheets(vec![self.assets.file_uri(&path)]);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::InMemoryAssets;

    fn registry() -> FontRegistry<InMemoryAssets> {
        FontRegistry::new(InMemoryAssets::new("https://site.test"))
    }

    #[test]
    fn register_stores_resolved_entry() {
        let mut fonts = registry();
        assert!(fonts.register("lato", FontArgs::new().family(["Lato"]).version("2")));

        let entry = fonts.entry("lato").unwrap();
        assert_eq!(entry.url, "https://fonts.googleapis.com/css?family=Lato");
        assert_eq!(entry.status, FontStatus::Registered);
        assert_eq!(entry.options.media, "all");

        let sheet = fonts.assets().get("lato-font").unwrap();
        assert_eq!(sheet.version.as_deref(), Some("2"));
    }

    #[test]
    fn enqueue_ignores_args_once_registered() {
        let mut fonts = registry();
        fonts.register("lato", FontArgs::new().family(["Lato"]));
        fonts.enqueue("lato", FontArgs::new().family(["Roboto"]));

        assert_eq!(fonts.url("lato"), Some("https://fonts.googleapis.com/css?family=Lato"));
        assert_eq!(fonts.entry("lato").unwrap().status, FontStatus::Enqueued);
    }

    #[test]
    fn reregistering_a_queued_handle_keeps_it_enqueued() {
        let mut fonts = registry();
        fonts.enqueue("lato", FontArgs::new().family(["Lato"]));
        assert!(fonts.register("lato", FontArgs::new().family(["Lato"]).display("swap")));

        let entry = fonts.entry("lato").unwrap();
        assert_eq!(entry.status, FontStatus::Enqueued);
        assert_eq!(entry.url, "https://fonts.googleapis.com/css?family=Lato&display=swap");
        assert!(fonts.is_enqueued("lato"));

        fonts.dequeue("lato");
        fonts.register("lato", FontArgs::new().family(["Lato"]));
        assert_eq!(fonts.entry("lato").unwrap().status, FontStatus::Registered);
    }

    #[test]
    fn defaults_are_merged_under_args() {
        let defaults = FontOptions { media: "print".to_owned(), ..FontOptions::default() };
        let mut fonts = registry().with_defaults(defaults);
        fonts.register("lato", FontArgs::new().family(["Lato"]));
        assert_eq!(fonts.entry("lato").unwrap().options.media, "print");
    }

    #[test]
    fn local_fallback_only_without_src_or_family() {
        let mut fonts = registry().with_local_fallback("assets/fonts/");
        fonts.register("icons", FontArgs::new());
        fonts.register("lato", FontArgs::new().family(["Lato"]));

        assert_eq!(fonts.url("icons"), Some("https://site.test/assets/fonts/icons/icons.css"));
        assert_eq!(fonts.url("lato"), Some("https://fonts.googleapis.com/css?family=Lato"));
    }

    #[test]
    fn without_fallback_empty_options_register_empty_url() {
        let mut fonts = registry();
        assert!(fonts.register("icons", FontArgs::new()));
        assert_eq!(fonts.url("icons"), Some(""));
    }

    #[test]
    fn url_interceptors_apply_per_handle() {
        let urls = UrlBuilder::new().intercept_options(|handle, mut opts: FontOptions| {
            if handle == "heading" {
                opts.subset = vec!["greek".to_owned()];
            }
            opts
        });
        let mut fonts = registry().with_urls(urls);
        fonts.register("heading", FontArgs::new().family(["Lato"]));
        fonts.register("body", FontArgs::new().family(["Lato"]));

        assert_eq!(fonts.url("heading"), Some("https://fonts.googleapis.com/css?family=Lato&subset=greek"));
        assert_eq!(fonts.url("body"), Some("https://fonts.googleapis.com/css?family=Lato"));
    }

    #[test]
    fn from_config_respects_fallback_switch() {
        let mut config = AssetsConfig::default();
        let mut on = FontRegistry::from_config(InMemoryAssets::new("https://site.test"), &config);
        on.register("icons", FontArgs::new());
        assert_eq!(on.url("icons"), Some("https://site.test/assets/fonts/icons/icons.css"));

        config.local_fallback = false;
        let mut off = FontRegistry::from_config(InMemoryAssets::new("https://site.test"), &config);
        off.register("icons", FontArgs::new());
        assert_eq!(off.url("icons"), Some(""));
    }
}
