//! Output escaping for stylesheet URLs and HTML attributes.

/// Schemes a stylesheet URL may use. Anything else sanitizes to an empty string.
pub const ALLOWED_PROTOCOLS: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

const ENCODED_LINE_BREAKS: &[&str] = &["%0d", "%0a", "%0D", "%0A"];

/// Sanitizes a URL for use as an `href` value.
///
/// * surrounding whitespace is trimmed and inner spaces become `%20`;
/// * characters outside the URL-safe set are removed (non-ASCII is kept);
/// * percent-encoded CR/LF sequences are removed, repeatedly;
/// * input without a scheme that is not root-, fragment- or query-relative gets `http://`;
/// * a scheme outside [`ALLOWED_PROTOCOLS`] yields `""`.
///
/// `&` is left as-is; use [`escape_attr`] when writing into HTML.
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    let mut url: String =
        url.replace(' ', "%20").chars().filter(|&c| !c.is_ascii() || is_url_char(c)).collect();
    strip_repeatedly(&mut url, ENCODED_LINE_BREAKS);
    url = url.replace(";//", "://");

    if url.is_empty() {
        return url;
    }

    if !url.contains(':') && !url.starts_with(['/', '#', '?']) && !starts_with_php_file(&url) {
        url.insert_str(0, "http://");
    }

    if url.starts_with('/') {
        return url;
    }

    match scheme(&url) {
        Some(scheme) if !ALLOWED_PROTOCOLS.contains(&scheme.to_ascii_lowercase().as_str()) => {
            String::new()
        },
        _ => url,
    }
}

/// Escapes a value for a single-quoted HTML attribute.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    html_escape::encode_single_quoted_attribute(value).into_owned()
}

const fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '~'
                | '+'
                | '_'
                | '.'
                | '?'
                | '#'
                | '='
                | '!'
                | '&'
                | ';'
                | ','
                | '/'
                | ':'
                | '%'
                | '@'
                | '$'
                | '|'
                | '*'
                | '\''
                | '('
                | ')'
                | '['
                | ']'
        )
}

fn strip_repeatedly(url: &mut String, needles: &[&str]) {
    while let Some(needle) = needles.iter().find(|n| url.contains(**n)) {
        *url = url.replace(needle, "");
    }
}

/// `index.php`-style relative targets are left without a scheme.
fn starts_with_php_file(url: &str) -> bool {
    let Some(dot) = url.find('.') else {
        return false;
    };
    let (name, rest) = url.split_at(dot);
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && rest.get(..4).is_some_and(|ext| ext.eq_ignore_ascii_case(".php"))
}

/// The text before the first `:` when it looks like a scheme rather than a path or query.
fn scheme(url: &str) -> Option<&str> {
    let (candidate, _) = url.split_once(':')?;
    (!candidate.contains(['/', '?', '#'])).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_clean_urls() {
        let url = "https://fonts.googleapis.com/css?family=Lato&display=swap";
        assert_eq!(sanitize_url(url), url);
    }

    #[test]
    fn encodes_spaces_and_strips_unsafe_characters() {
        assert_eq!(
            sanitize_url("  https://cdn.test/my font.css\"<script>  "),
            "https://cdn.test/my%20font.cssscript"
        );
        assert_eq!(sanitize_url("https://cdn.test/a.css%0d%0Ax"), "https://cdn.test/a.cssx");
        assert_eq!(sanitize_url("https://cdn.test/a.css%0%0dd"), "https://cdn.test/a.css");
    }

    #[test]
    fn rejects_disallowed_schemes() {
        assert_eq!(sanitize_url("javascript:alert(1)"), "");
        assert_eq!(sanitize_url("data:text/css,body{}"), "");
        assert_eq!(sanitize_url("localhost:8080/fonts.css"), "");
        assert_eq!(sanitize_url("HTTPS://cdn.test/a.css"), "HTTPS://cdn.test/a.css");
    }

    #[test]
    fn relative_inputs() {
        assert_eq!(sanitize_url("/wp-content/fonts.css"), "/wp-content/fonts.css");
        assert_eq!(sanitize_url("?ver=1"), "?ver=1");
        assert_eq!(sanitize_url("cdn.test/fonts.css"), "http://cdn.test/fonts.css");
        assert_eq!(sanitize_url("index.php?font=1"), "index.php?font=1");
        assert_eq!(sanitize_url("   "), "");
    }

    #[test]
    fn keeps_non_ascii() {
        assert_eq!(sanitize_url("https://cdn.test/schrift-ä.css"), "https://cdn.test/schrift-ä.css");
    }

    #[test]
    fn attribute_escaping() {
        let escaped = escape_attr("a&b<c>'d'");
        assert!(escaped.starts_with("a&amp;b&lt;c&gt;"));
        assert!(!escaped.contains('\''));
        assert_eq!(escape_attr("https://cdn.test/a.css?x=1&ver=2"), "https://cdn.test/a.css?x=1&amp;ver=2");
    }
}
