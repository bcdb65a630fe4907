//! URL path joining.
//!
//! Resources are addressed by appending segments to the path component of a
//! base URL. The scheme, authority, query and fragment of the base are left
//! untouched, and bare paths (`"/"`, `"/api/"`) are accepted as well as
//! absolute URLs.

use std::fmt::Display;

/// The five components of a URL, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UrlParts<'a> {
    scheme: &'a str,
    /// `Some("")` when `//` is present with an empty authority.
    authority: Option<&'a str>,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    fn split(url: &'a str) -> Self {
        let (rest, fragment) = url.split_once('#').unwrap_or((url, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        let (scheme, rest) = match rest.split_once(':') {
            Some((scheme, tail)) if is_scheme(scheme) => (scheme, tail),
            _ => ("", rest),
        };

        let (authority, path) = match rest.strip_prefix("//") {
            Some(tail) => {
                let end = tail.find('/').unwrap_or(tail.len());
                (Some(&tail[..end]), &tail[end..])
            }
            None => (None, rest),
        };

        Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        }
    }

    fn assemble(&self, path: &str) -> String {
        let mut url = String::with_capacity(
            self.scheme.len() + path.len() + self.query.len() + self.fragment.len() + 16,
        );
        if !self.scheme.is_empty() {
            url.push_str(self.scheme);
            url.push(':');
        }
        if let Some(authority) = self.authority {
            url.push_str("//");
            url.push_str(authority);
            if !path.is_empty() && !path.starts_with('/') {
                url.push('/');
            }
        }
        url.push_str(path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(self.query);
        }
        if !self.fragment.is_empty() {
            url.push('#');
            url.push_str(self.fragment);
        }
        url
    }
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`.
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Joins path segments onto the path of `base`.
///
/// An empty base path is treated as `/`. Segments are joined POSIX-style:
/// a segment starting with `/` restarts the path, and a trailing slash on the
/// last segment is kept.
///
/// ## Examples
///
/// ```rust
/// use slumber::url_join;
///
/// assert_eq!(url_join::<&str>("http://example.com", &[]), "http://example.com/");
/// assert_eq!(
///     url_join("http://example.com/", &["test", "example"]),
///     "http://example.com/test/example"
/// );
/// assert_eq!(url_join("/path/", &[42]), "/path/42");
/// ```
pub fn url_join<T: Display>(base: &str, segments: &[T]) -> String {
    let parts = UrlParts::split(base);
    let mut path = if parts.path.is_empty() {
        String::from("/")
    } else {
        parts.path.to_string()
    };

    for segment in segments {
        let segment = segment.to_string();
        if segment.starts_with('/') {
            path = segment;
        } else if path.is_empty() || path.ends_with('/') {
            path.push_str(&segment);
        } else {
            path.push('/');
            path.push_str(&segment);
        }
    }

    parts.assemble(&path)
}

/// Appends `/` to the path component of `url` unless it already ends in one.
pub fn ensure_trailing_slash(url: &str) -> String {
    let parts = UrlParts::split(url);
    if parts.path.ends_with('/') {
        return url.to_string();
    }
    let path = format!("{}/", parts.path);
    parts.assemble(&path)
}
