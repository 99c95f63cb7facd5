//! The host asset system the registry delegates to, plus an in-memory implementation.

use crate::escape::escape_attr;
use fontloom_domain::status::StatusList;
use fxhash::{FxHashMap, FxHashSet};
use tracing::trace;

/// Host-side stylesheet management.
///
/// Ids passed here are asset ids (`"<handle>-font"`), never bare handles.
pub trait AssetSystem {
    /// Registers a stylesheet. Returns `false` when the host rejects it.
    fn register(
        &mut self,
        id: &str,
        url: &str,
        depends: &[String],
        version: Option<&str>,
        media: &str,
    ) -> bool;

    fn deregister(&mut self, id: &str);

    /// Marks a stylesheet for output on the current page.
    fn enqueue(&mut self, id: &str);

    fn dequeue(&mut self, id: &str);

    /// Whether `id` is a member of `list`.
    fn status_is(&self, id: &str, list: StatusList) -> bool;

    /// Resolves a path relative to the published asset root into a public URL.
    fn file_uri(&self, relative_path: &str) -> String;
}

/// A stylesheet as recorded by [`InMemoryAssets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub id: String,
    pub src: String,
    pub depends: Vec<String>,
    pub version: Option<String>,
    pub media: String,
}

impl Stylesheet {
    /// The `href` written to the page: `src` with `ver=<version>` appended when set.
    #[must_use]
    pub fn href(&self) -> String {
        match &self.version {
            Some(version) if !version.is_empty() => {
                let separator = if self.src.contains('?') { '&' } else { '?' };
                format!("{}{separator}ver={version}", self.src)
            },
            _ => self.src.clone(),
        }
    }

    /// Renders the `<link>` tag for this stylesheet.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<link rel='stylesheet' id='{}-css' href='{}' media='{}' />",
            escape_attr(&self.id),
            escape_attr(&self.href()),
            escape_attr(&self.media),
        )
    }
}

/// Process-local [`AssetSystem`]: a map of registered stylesheets and an ordered output queue.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    base_uri: String,
    registered: FxHashMap<String, Stylesheet>,
    queue: Vec<String>,
}

impl InMemoryAssets {
    /// Creates an empty asset system publishing files under `base_uri`.
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self { base_uri: base_uri.into(), ..Self::default() }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Stylesheet> {
        self.registered.get(id)
    }

    /// Ids marked for output, in enqueue order.
    #[must_use]
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Enqueued stylesheets in output order.
    ///
    /// Dependencies come before their dependents and each stylesheet appears
    /// once. Unregistered ids are skipped, as are stylesheets with an empty
    /// `src` (their dependencies are still emitted).
    #[must_use]
    pub fn render_styles(&self) -> Vec<&Stylesheet> {
        let mut done = FxHashSet::default();
        let mut out = Vec::new();
        for id in &self.queue {
            self.visit(id, &mut done, &mut out);
        }
        out
    }

    /// Renders every enqueued stylesheet as a `<link>` tag, one per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.render_styles().iter().map(|sheet| sheet.to_html()).collect::<Vec<_>>().join("\n")
    }

    fn visit<'a>(&'a self, id: &str, done: &mut FxHashSet<String>, out: &mut Vec<&'a Stylesheet>) {
        if !done.insert(id.to_owned()) {
            return;
        }
        let Some(sheet) = self.registered.get(id) else {
            trace!(id, "Skipping unregistered stylesheet");
            return;
        };
        for dependency in &sheet.depends {
            self.visit(dependency, done, out);
        }
        if !sheet.src.is_empty() {
            out.push(sheet);
        }
    }
}

impl AssetSystem for InMemoryAssets {
    fn register(
        &mut self,
        id: &str,
        url: &str,
        depends: &[String],
        version: Option<&str>,
        media: &str,
    ) -> bool {
        if id.is_empty() {
            return false;
        }
        self.registered.insert(
            id.to_owned(),
            Stylesheet {
                id: id.to_owned(),
                src: url.to_owned(),
                depends: depends.to_vec(),
                version: version.map(str::to_owned),
                media: media.to_owned(),
            },
        );
        true
    }

    fn deregister(&mut self, id: &str) {
        self.registered.remove(id);
        self.queue.retain(|queued| queued != id);
    }

    fn enqueue(&mut self, id: &str) {
        if !self.queue.iter().any(|queued| queued == id) {
            self.queue.push(id.to_owned());
        }
    }

    fn dequeue(&mut self, id: &str) {
        self.queue.retain(|queued| queued != id);
    }

    fn status_is(&self, id: &str, list: StatusList) -> bool {
        match list {
            StatusList::Registered => self.registered.contains_key(id),
            StatusList::Enqueued => self.queue.iter().any(|queued| queued == id),
        }
    }

    fn file_uri(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base_uri.trim_end_matches('/'), relative_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(assets: &mut InMemoryAssets, id: &str, url: &str, depends: &[&str]) {
        let depends: Vec<String> = depends.iter().map(|d| (*d).to_owned()).collect();
        assert!(assets.register(id, url, &depends, None, "all"));
    }

    #[test]
    fn status_follows_register_and_queue() {
        let mut assets = InMemoryAssets::new("https://site.test");
        register(&mut assets, "lato-font", "https://cdn.test/lato.css", &[]);
        assert!(assets.status_is("lato-font", StatusList::Registered));
        assert!(!assets.status_is("lato-font", StatusList::Enqueued));

        assets.enqueue("lato-font");
        assets.enqueue("lato-font");
        assert_eq!(assets.queue(), ["lato-font"]);

        assets.dequeue("lato-font");
        assert!(!assets.status_is("lato-font", StatusList::Enqueued));
        assert!(assets.status_is("lato-font", StatusList::Registered));

        assets.enqueue("lato-font");
        assets.deregister("lato-font");
        assert!(!assets.status_is("lato-font", StatusList::Registered));
        assert!(assets.queue().is_empty());
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut assets = InMemoryAssets::default();
        assert!(!assets.register("", "https://cdn.test/a.css", &[], None, "all"));
    }

    #[test]
    fn dependencies_render_first_and_once() {
        let mut assets = InMemoryAssets::default();
        register(&mut assets, "base-font", "https://cdn.test/base.css", &[]);
        register(&mut assets, "alias-font", "", &["base-font"]);
        register(&mut assets, "body-font", "https://cdn.test/body.css", &["alias-font", "missing-font"]);
        register(&mut assets, "title-font", "https://cdn.test/title.css", &["base-font"]);

        assets.enqueue("body-font");
        assets.enqueue("title-font");
        assets.enqueue("base-font");
        assets.enqueue("ghost-font");

        let ids: Vec<&str> = assets.render_styles().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["base-font", "body-font", "title-font"]);
    }

    #[test]
    fn version_and_escaping_in_html() {
        let mut assets = InMemoryAssets::default();
        assert!(assets.register(
            "lato-font",
            "https://fonts.googleapis.com/css?family=Lato&display=swap",
            &[],
            Some("1.2"),
            "screen",
        ));
        assets.enqueue("lato-font");

        assert_eq!(
            assets.to_html(),
            "<link rel='stylesheet' id='lato-font-css' \
             href='https://fonts.googleapis.com/css?family=Lato&amp;display=swap&amp;ver=1.2' \
             media='screen' />"
        );
    }

    #[test]
    fn file_uri_joins_base() {
        let assets = InMemoryAssets::new("https://site.test/");
        assert_eq!(assets.file_uri("/assets/fonts/a/a.css"), "https://site.test/assets/fonts/a/a.css");
    }
}
