use percent_encoding::percent_decode_str;

/// Splits a URL into its path part and optional query string.
pub(crate) fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

pub(crate) fn strip_query(url: &str) -> &str {
    split_query(url).0
}

/// Drops the last non-empty segment of `path`. `None` when nothing is left to drop.
pub(crate) fn parent_path(path: &str) -> Option<String> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let mut parts: Vec<&str> = trimmed.split('/').collect();
    while parts.len() > 1 && parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    if parts.len() <= 1 {
        return None;
    }
    parts.pop();
    while parts.len() > 1 && parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    let joined = parts.join("/");
    if joined.is_empty() {
        Some("/".to_string())
    } else {
        Some(joined)
    }
}

/// Form used to compare locations: percent-decoded, ASCII case-folded,
/// without a trailing separator.
pub(crate) fn comparable_path(path: &str) -> String {
    percent_decode_str(path.trim_end_matches('/'))
        .decode_utf8_lossy()
        .to_ascii_lowercase()
}

pub(crate) fn same_location(a: &str, b: &str) -> bool {
    comparable_path(a) == comparable_path(b)
}

/// True when `path` equals `root` or lies below it.
pub(crate) fn is_within(path: &str, root: &str) -> bool {
    let path = comparable_path(path);
    let root = comparable_path(root);
    if root.is_empty() {
        return path.starts_with('/');
    }
    path == root
        || path
            .strip_prefix(&root)
            .is_some_and(|rest| rest.starts_with('/'))
}
