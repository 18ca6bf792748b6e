use crate::app::helpers::{is_within, parent_path, same_location, split_query, strip_query};
use crate::error::NavigationError;

/// Tracks the listing URL currently shown, relative to a fixed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathNavigator {
    root_url: String,
    current_url: String,
}

impl PathNavigator {
    pub(crate) fn new(root_url: impl Into<String>) -> Self {
        let root_url = root_url.into();
        Self {
            current_url: root_url.clone(),
            root_url,
        }
    }

    /// URL used for requests, query parameters included.
    pub(crate) fn fetch_url(&self) -> &str {
        &self.current_url
    }

    pub(crate) fn display_path(&self) -> &str {
        strip_query(&self.current_url)
    }

    pub(crate) fn is_at_root(&self) -> bool {
        self.current_url == self.root_url
    }

    pub(crate) fn enter(&mut self, listing_url: impl Into<String>) {
        self.current_url = listing_url.into();
    }

    /// Computes the parent listing URL without moving. Fails only at the root;
    /// a parent that does not lie below the root resolves to the root itself.
    pub(crate) fn parent_url(&self) -> Result<String, NavigationError> {
        if self.is_at_root() {
            return Err(NavigationError::AtRoot);
        }
        let (path, query) = split_query(&self.current_url);
        let root_path = strip_query(&self.root_url);
        let Some(parent) = parent_path(path) else {
            return Ok(self.root_url.clone());
        };
        if same_location(&parent, root_path) || !is_within(&parent, root_path) {
            return Ok(self.root_url.clone());
        }
        Ok(match query {
            Some(query) => format!("{parent}?{query}"),
            None => parent,
        })
    }

    pub(crate) fn move_up(&mut self) -> Result<String, NavigationError> {
        let parent = self.parent_url()?;
        self.current_url = parent.clone();
        Ok(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://api.github.com/repos/o/r/contents";

    #[test]
    fn starts_at_root() {
        let nav = PathNavigator::new(ROOT);
        assert!(nav.is_at_root());
        assert_eq!(nav.fetch_url(), ROOT);
    }

    #[test]
    fn move_up_at_root_fails_and_keeps_state() {
        let mut nav = PathNavigator::new(ROOT);
        assert_eq!(nav.move_up(), Err(NavigationError::AtRoot));
        assert_eq!(nav.fetch_url(), ROOT);
    }

    #[test]
    fn repeated_move_up_reaches_root_then_fails() {
        let mut nav = PathNavigator::new(ROOT);
        nav.enter(format!("{ROOT}/a/b/c"));
        assert_eq!(nav.move_up().unwrap(), format!("{ROOT}/a/b"));
        assert_eq!(nav.move_up().unwrap(), format!("{ROOT}/a"));
        assert_eq!(nav.move_up().unwrap(), ROOT);
        assert!(nav.is_at_root());
        assert_eq!(nav.move_up(), Err(NavigationError::AtRoot));
    }

    #[test]
    fn move_up_never_returns_trailing_separator() {
        let mut nav = PathNavigator::new(ROOT);
        nav.enter(format!("{ROOT}/a/b/"));
        while let Ok(url) = nav.move_up() {
            assert!(!strip_query(&url).ends_with('/'), "{url}");
        }
        assert!(nav.is_at_root());
    }

    #[test]
    fn query_is_kept_for_fetch_but_hidden_from_display() {
        let mut nav = PathNavigator::new(ROOT);
        nav.enter(format!("{ROOT}/src/bin?ref=main"));
        assert_eq!(nav.display_path(), format!("{ROOT}/src/bin"));
        assert_eq!(nav.move_up().unwrap(), format!("{ROOT}/src?ref=main"));
        assert_eq!(nav.fetch_url(), format!("{ROOT}/src?ref=main"));
        assert_eq!(nav.display_path(), format!("{ROOT}/src"));
    }

    #[test]
    fn parent_matching_root_path_snaps_to_root_url() {
        let root = format!("{ROOT}?ref=dev");
        let mut nav = PathNavigator::new(root.clone());
        nav.enter(format!("{ROOT}/docs?ref=dev"));
        assert_eq!(nav.move_up().unwrap(), root);
        assert!(nav.is_at_root());
    }

    #[test]
    fn root_path_marker_for_plain_paths() {
        let mut nav = PathNavigator::new("/");
        nav.enter("/a");
        assert_eq!(nav.move_up().unwrap(), "/");
        assert!(nav.is_at_root());
    }

    #[test]
    fn url_outside_root_returns_to_root() {
        let mut nav = PathNavigator::new(ROOT);
        nav.enter("https://example.com/other/place");
        assert_eq!(nav.move_up().unwrap(), ROOT);
        assert!(nav.is_at_root());
        assert_eq!(nav.move_up(), Err(NavigationError::AtRoot));
    }

    #[test]
    fn canonical_casing_from_server_still_climbs_to_root() {
        let root = "https://api.github.com/repos/JLambert68/fenixtestergui/contents";
        let mut nav = PathNavigator::new(root);
        nav.enter("https://api.github.com/repos/jlambert68/FenixTesterGui/contents/sub/deep?ref=main");
        assert_eq!(
            nav.move_up().unwrap(),
            "https://api.github.com/repos/jlambert68/FenixTesterGui/contents/sub?ref=main"
        );
        assert_eq!(nav.move_up().unwrap(), root);
        assert!(nav.is_at_root());
        assert_eq!(nav.move_up(), Err(NavigationError::AtRoot));
    }

    #[test]
    fn percent_encoded_listing_url_climbs_to_root() {
        let root = format!("{ROOT}/my dir");
        let mut nav = PathNavigator::new(root.clone());
        nav.enter(format!("{ROOT}/my%20dir/sub?ref=main"));
        assert_eq!(nav.move_up().unwrap(), root);
        assert!(nav.is_at_root());
    }

    #[test]
    fn move_up_fails_only_at_root() {
        for start in [
            format!("{ROOT}/a/b"),
            "https://API.github.com/repos/O/R/contents/x%2Fy/z".to_string(),
            "relative".to_string(),
        ] {
            let mut nav = PathNavigator::new(ROOT);
            nav.enter(start.clone());
            while !nav.is_at_root() {
                assert!(nav.move_up().is_ok(), "{start}");
            }
            assert_eq!(nav.move_up(), Err(NavigationError::AtRoot));
        }
    }

    #[test]
    fn parent_url_does_not_move() {
        let mut nav = PathNavigator::new(ROOT);
        nav.enter(format!("{ROOT}/a"));
        assert_eq!(nav.parent_url().unwrap(), ROOT);
        assert_eq!(nav.fetch_url(), format!("{ROOT}/a"));
    }
}
