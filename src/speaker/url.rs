//! URL composition for API requests.

use reqwest::Url;

/// Joins the configured base URL and an API path with exactly one slash
/// between them, whatever trailing or leading slashes the caller supplied.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-escapes one path segment so reserved characters cannot alter
/// the request path structure (a `/` inside a template id must not create
/// an extra segment).
///
/// Escaping goes through [`Url::path_segments_mut`], the same rules the
/// transport applies, so segments are never double-escaped.
pub fn escape_segment(segment: &str) -> String {
    let mut url = Url::parse("https://segment.invalid").expect("static URL parses");
    url.path_segments_mut()
        .expect("https URLs always have path segments")
        .pop_if_empty()
        .push(segment);
    url.path()[1..].to_string()
}
