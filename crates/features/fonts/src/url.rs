//! Stylesheet URL construction.
//!
//! An explicit `src` always wins. Otherwise a Google Fonts CSS API URL is
//! synthesized from the family list and the optional remote parameters. Bad or
//! missing input never fails; it only shrinks the query (or empties the URL).

use crate::escape::sanitize_url;
use fontloom_domain::constants::GOOGLE_FONTS_API;
use fontloom_domain::options::FontOptions;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Characters left unencoded in query values: `A-Z a-z 0-9 - _ . ~`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Rewrites a font's options before its URL is built.
pub type OptionsInterceptor = Arc<dyn Fn(&str, FontOptions) -> FontOptions + Send + Sync>;

/// Rewrites a built URL before it is sanitized.
pub type UrlInterceptor = Arc<dyn Fn(&str, String, &FontOptions) -> String + Send + Sync>;

/// Builds stylesheet URLs, running registered interceptors around synthesis.
///
/// Interceptors run in the order they were added. With none registered this
/// is exactly [`build_url`].
#[derive(Clone, Default)]
pub struct UrlBuilder {
    options: Vec<OptionsInterceptor>,
    urls: Vec<UrlInterceptor>,
}

impl fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("options_interceptors", &self.options.len())
            .field("url_interceptors", &self.urls.len())
            .finish()
    }
}

impl UrlBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook that may rewrite family, subset, display and the rest per handle.
    #[must_use]
    pub fn intercept_options<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&str, FontOptions) -> FontOptions + Send + Sync + 'static,
    {
        self.options.push(Arc::new(interceptor));
        self
    }

    /// Adds a hook that may rewrite the unsanitized URL per handle.
    #[must_use]
    pub fn intercept_url<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&str, String, &FontOptions) -> String + Send + Sync + 'static,
    {
        self.urls.push(Arc::new(interceptor));
        self
    }

    /// Whether any interceptor is registered.
    #[must_use]
    pub fn is_intercepted(&self) -> bool {
        !self.options.is_empty() || !self.urls.is_empty()
    }

    /// Computes the stylesheet URL for `handle`.
    #[must_use]
    pub fn build(&self, handle: &str, options: &FontOptions) -> String {
        let rewritten;
        let options = if self.options.is_empty() {
            options
        } else {
            rewritten = self.options.iter().fold(options.clone(), |opts, hook| hook(handle, opts));
            &rewritten
        };

        let url = self.urls.iter().fold(raw_url(options), |url, hook| hook(handle, url, options));
        let url = sanitize_url(&url);
        trace!(handle, url = %url, "Stylesheet URL built");
        url
    }
}

/// Computes the stylesheet URL for `handle` without any interceptors.
///
/// ```
/// # use fontloom_domain::options::FontArgs;
/// let opts = FontArgs::new().family(["Roboto", "Open Sans"]).resolve();
/// assert_eq!(
///     fontloom_fonts::build_url("roboto", &opts),
///     "https://fonts.googleapis.com/css?family=Roboto%7COpen%20Sans"
/// );
/// ```
#[must_use]
pub fn build_url(handle: &str, options: &FontOptions) -> String {
    UrlBuilder::default().build(handle, options)
}

/// Query parameters in the fixed API order. Empty when `family` is empty.
#[must_use]
pub fn query_pairs(options: &FontOptions) -> Vec<(&'static str, String)> {
    if options.family.is_empty() {
        return Vec::new();
    }

    let mut pairs = vec![("family", options.family.join("|"))];
    if let Some(display) = options.display {
        pairs.push(("display", display.to_string()));
    }
    if !options.subset.is_empty() {
        pairs.push(("subset", options.subset.join(",")));
    }
    if !options.text.is_empty() {
        pairs.push(("text", options.text.clone()));
    }
    if !options.effect.is_empty() {
        pairs.push(("effect", options.effect.join("|")));
    }
    pairs
}

fn raw_url(options: &FontOptions) -> String {
    if !options.src.is_empty() {
        return options.src.joined();
    }

    let pairs = query_pairs(options);
    if pairs.is_empty() {
        return String::new();
    }

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{GOOGLE_FONTS_API}?{query}")
}
