//! Dotted key paths over nested JSON mappings
//!
//! Resolution is total: a path either reaches a value or it does not. It never fails.

use serde_json::Value;

/// Separator between segments of a dotted key
pub const KEY_PATH_SEPARATOR: char = '.';

/// A parsed dotted key such as `"user.address.city"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'k> {
    segments: Vec<&'k str>,
}

impl<'k> KeyPath<'k> {
    /// Split a dotted key into its non-empty segments
    #[must_use]
    pub fn parse(key: &'k str) -> Self {
        Self {
            segments: key
                .split(KEY_PATH_SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .collect(),
        }
    }

    /// The segments in traversal order
    #[must_use]
    pub fn segments(&self) -> &[&'k str] {
        &self.segments
    }

    /// Whether this path has no segments and so names the root itself
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk the path from `root`.
    ///
    /// Each segment descends into a mapping that contains it. Anything else (a missing key, or an
    /// intermediate value that is not a mapping) ends the walk with `None`. Arrays are never
    /// indexed.
    #[must_use]
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| current.as_object()?.get(*segment))
    }
}
