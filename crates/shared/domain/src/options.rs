//! Font stylesheet options.
//!
//! [`FontArgs`] is what callers (and config files) supply: every field optional.
//! [`FontOptions`] is the resolved value the URL builder and registry work with.
//! [`FontArgs::merge_over`] is the only place defaults are applied.

use crate::constants::DEFAULT_MEDIA;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Allow-listed values of the `display` query parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FontDisplay {
    Auto,
    Block,
    Swap,
    Fallback,
    Optional,
}

impl FontDisplay {
    /// Parses a `display` value, dropping anything outside the allow-list.
    ///
    /// Matching is exact and case-sensitive; `"Swap"` and `" swap"` are dropped.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Option<Self> {
        Self::from_str(value).ok()
    }
}

/// Explicit stylesheet location(s). Any non-empty source bypasses URL synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FontSource {
    #[default]
    None,
    /// A single stylesheet URL.
    Url(String),
    /// Local stylesheet URLs, emitted comma-joined.
    Stylesheets(Vec<String>),
}

impl FontSource {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Url(url) => url.is_empty(),
            Self::Stylesheets(list) => list.is_empty(),
        }
    }

    /// The source as one string: a list is joined with `,`.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Url(url) => url.clone(),
            Self::Stylesheets(list) => list.join(","),
        }
    }
}

impl From<&str> for FontSource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for FontSource {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Vec<String>> for FontSource {
    fn from(list: Vec<String>) -> Self {
        Self::Stylesheets(list)
    }
}

impl<'de> Deserialize<'de> for FontSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(url) if url.is_empty() => Self::None,
            OneOrMany::One(url) => Self::Url(url),
            OneOrMany::Many(list) => Self::Stylesheets(list),
        })
    }
}

/// Fully resolved options for one font stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontOptions {
    /// Font family names, joined with `|` in the query.
    pub family: Vec<String>,
    /// Allow-listed `display` value, or unset.
    pub display: Option<FontDisplay>,
    /// Character subsets, joined with `,` in the query.
    pub subset: Vec<String>,
    /// Restricts the served glyphs to these characters.
    pub text: String,
    /// Font effects, joined with `|` in the query.
    pub effect: Vec<String>,
    pub src: FontSource,
    /// Handles this stylesheet depends on.
    pub depends: Vec<String>,
    pub version: Option<String>,
    pub media: String,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            family: Vec::new(),
            display: None,
            subset: Vec::new(),
            text: String::new(),
            effect: Vec::new(),
            src: FontSource::None,
            depends: Vec::new(),
            version: None,
            media: DEFAULT_MEDIA.to_owned(),
        }
    }
}

impl FontOptions {
    /// Whether these options load from the remote font API rather than an explicit source.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.src.is_empty() && !self.family.is_empty()
    }
}

/// Caller-supplied font arguments. Unset fields fall back to the defaults they
/// are merged over.
///
/// List fields accept either a single string or a sequence when deserialized,
/// and `version` accepts a string or a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontArgs {
    #[serde(deserialize_with = "list")]
    pub family: Option<Vec<String>>,
    /// Raw `display` value; anything outside [`FontDisplay`] is dropped on resolve.
    pub display: Option<String>,
    #[serde(deserialize_with = "list")]
    pub subset: Option<Vec<String>>,
    pub text: Option<String>,
    #[serde(deserialize_with = "list")]
    pub effect: Option<Vec<String>>,
    pub src: Option<FontSource>,
    #[serde(deserialize_with = "list")]
    pub depends: Option<Vec<String>>,
    #[serde(deserialize_with = "version")]
    pub version: Option<String>,
    pub media: Option<String>,
}

impl FontArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn family<I, S>(mut self, family: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.family = Some(family.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    #[must_use]
    pub fn subset<I, S>(mut self, subset: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subset = Some(subset.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn effect<I, S>(mut self, effect: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effect = Some(effect.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn src(mut self, src: impl Into<FontSource>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Sets `src` to a list of local stylesheet URLs.
    #[must_use]
    pub fn stylesheets<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.src = Some(FontSource::Stylesheets(urls.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends = Some(depends.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Resolves against [`FontOptions::default`].
    #[must_use]
    pub fn resolve(self) -> FontOptions {
        self.merge_over(FontOptions::default())
    }

    /// Field-by-field merge: a set argument replaces the default, an unset one keeps it.
    ///
    /// A `display` argument always replaces the default, even when it is not
    /// allow-listed; in that case the result is unset.
    #[must_use]
    pub fn merge_over(self, defaults: FontOptions) -> FontOptions {
        FontOptions {
            family: self.family.unwrap_or(defaults.family),
            display: match self.display {
                Some(raw) => FontDisplay::parse_lenient(&raw),
                None => defaults.display,
            },
            subset: self.subset.unwrap_or(defaults.subset),
            text: self.text.unwrap_or(defaults.text),
            effect: self.effect.unwrap_or(defaults.effect),
            src: self.src.unwrap_or(defaults.src),
            depends: self.depends.unwrap_or(defaults.depends),
            version: self.version.or(defaults.version),
            media: self.media.unwrap_or(defaults.media),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) if value.is_empty() => Vec::new(),
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    }))
}

fn version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Version>::deserialize(deserializer)?.map(|v| match v {
        Version::Text(text) => text,
        Version::Integer(n) => n.to_string(),
        Version::Float(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_allow_list_is_exact() {
        assert_eq!(FontDisplay::parse_lenient("swap"), Some(FontDisplay::Swap));
        assert_eq!(FontDisplay::parse_lenient("optional"), Some(FontDisplay::Optional));
        assert_eq!(FontDisplay::parse_lenient("Swap"), None);
        assert_eq!(FontDisplay::parse_lenient("block "), None);
        assert_eq!(FontDisplay::parse_lenient(""), None);
    }

    #[test]
    fn unset_args_keep_defaults() {
        let opts = FontArgs::new().resolve();
        assert_eq!(opts, FontOptions::default());
        assert_eq!(opts.media, "all");
        assert!(opts.version.is_none());
    }

    #[test]
    fn set_args_replace_defaults() {
        let defaults = FontOptions {
            family: vec!["Lato".to_owned()],
            display: Some(FontDisplay::Swap),
            media: "print".to_owned(),
            ..FontOptions::default()
        };

        let opts = FontArgs::new().family(["Roboto"]).display("bogus").merge_over(defaults);

        assert_eq!(opts.family, vec!["Roboto"]);
        assert_eq!(opts.display, None);
        assert_eq!(opts.media, "print");
    }

    #[test]
    fn source_emptiness() {
        assert!(FontSource::None.is_empty());
        assert!(FontSource::Url(String::new()).is_empty());
        assert!(FontSource::Stylesheets(Vec::new()).is_empty());
        assert!(!FontSource::from("https://cdn.test/a.css").is_empty());
        assert_eq!(
            FontSource::from(vec!["a.css".to_owned(), "b.css".to_owned()]).joined(),
            "a.css,b.css"
        );
    }

    #[test]
    fn remote_means_family_without_src() {
        let remote = FontArgs::new().family(["Lato"]).resolve();
        assert!(remote.is_remote());

        let local = FontArgs::new().family(["Lato"]).src("https://cdn.test/lato.css").resolve();
        assert!(!local.is_remote());

        assert!(!FontArgs::new().resolve().is_remote());
    }
}
