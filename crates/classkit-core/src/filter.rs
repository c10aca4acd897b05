//! Repository-name filtering for bulk operations

use globset::{Glob, GlobMatcher};

use crate::error::Result;

/// Compiled glob filter over repository names.
///
/// `None` pattern matches everything, so callers can thread an optional
/// `--match` flag straight through.
#[derive(Debug)]
pub struct RepoFilter {
    matcher: Option<GlobMatcher>,
}

impl RepoFilter {
    /// Compile an optional glob pattern, e.g. `assignment-01-*`
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let matcher = match pattern {
            Some(p) => Some(Glob::new(p)?.compile_matcher()),
            None => None,
        };
        Ok(Self { matcher })
    }

    /// Does this repository name pass the filter?
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Some(m) => m.is_match(name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pattern_matches_everything() {
        let filter = RepoFilter::new(None).unwrap();
        assert!(filter.matches("assignment-01-alice"));
        assert!(filter.matches("anything"));
    }

    #[test]
    fn test_glob_narrows_selection() {
        let filter = RepoFilter::new(Some("assignment-01-*")).unwrap();
        assert!(filter.matches("assignment-01-alice"));
        assert!(!filter.matches("assignment-02-alice"));
        assert!(!filter.matches("course-site"));
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let err = RepoFilter::new(Some("assignment-[")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Pattern);
    }
}
