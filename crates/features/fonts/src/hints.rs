//! Resource hints for enqueued remote fonts.

use crate::assets::AssetSystem;
use crate::escape::escape_attr;
use crate::registry::FontRegistry;
use fontloom_domain::constants::GOOGLE_FONTS_STATIC;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The `rel` of a resource hint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum HintRelation {
    DnsPrefetch,
    Preconnect,
    Prefetch,
    Prerender,
}

/// One `<link>` resource hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceHint {
    pub relation: HintRelation,
    pub href: String,
    pub crossorigin: bool,
}

impl ResourceHint {
    #[must_use]
    pub fn to_html(&self) -> String {
        let crossorigin = if self.crossorigin { " crossorigin" } else { "" };
        format!("<link rel='{}' href='{}'{crossorigin}>", self.relation, escape_attr(&self.href))
    }
}

impl<A: AssetSystem> FontRegistry<A> {
    /// Hints the page should emit for `relation`.
    ///
    /// Only `preconnect` produces anything: a single hint to the font file
    /// origin once at least one enqueued font loads from the remote API.
    #[must_use]
    pub fn resource_hints(&self, relation: HintRelation) -> Vec<ResourceHint> {
        if relation != HintRelation::Preconnect {
            return Vec::new();
        }

        let remote = self.entries().any(|entry| {
            entry.options.is_remote() && !entry.url.is_empty() && self.is_enqueued(&entry.handle)
        });

        if remote {
            vec![ResourceHint {
                relation,
                href: GOOGLE_FONTS_STATIC.to_owned(),
                crossorigin: true,
            }]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::InMemoryAssets;
    use fontloom_domain::options::FontArgs;
    use strum::IntoEnumIterator;

    #[test]
    fn relation_names() {
        let names: Vec<String> = HintRelation::iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["dns-prefetch", "preconnect", "prefetch", "prerender"]);
    }

    #[test]
    fn preconnect_only_for_enqueued_remote_fonts() {
        let mut fonts = FontRegistry::new(InMemoryAssets::default());
        fonts.register("lato", FontArgs::new().family(["Lato"]));
        fonts.enqueue("local", FontArgs::new().src("https://cdn.test/local.css"));
        assert!(fonts.resource_hints(HintRelation::Preconnect).is_empty());

        fonts.enqueue("lato", FontArgs::new());
        fonts.enqueue("roboto", FontArgs::new().family(["Roboto"]));

        let hints = fonts.resource_hints(HintRelation::Preconnect);
        assert_eq!(hints.len(), 1);
        assert_eq!(
            hints[0].to_html(),
            "<link rel='preconnect' href='https://fonts.gstatic.com' crossorigin>"
        );
        assert!(fonts.resource_hints(HintRelation::DnsPrefetch).is_empty());

        fonts.dequeue("lato");
        fonts.dequeue("roboto");
        assert!(fonts.resource_hints(HintRelation::Preconnect).is_empty());
    }
}
