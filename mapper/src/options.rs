//! Mapper configuration
//!
//! `MapperOptions` deserializes with serde so applications can keep it next to their own
//! settings. Every field has a default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

/// Behavior switches shared by a root Mapper and every nested Mapper built from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperOptions {
    /// Deepest nesting level a nested Mapper may reach; `None` leaves depth bounded only by the
    /// document
    pub max_depth:      Option<usize>,
    /// Treat a JSON `null` found under a key the same as a missing key
    pub null_is_absent: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            max_depth:      None,
            null_is_absent: true,
        }
    }
}

impl MapperOptions {
    /// Cap the depth of nested Mappers
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Choose whether JSON `null` counts as a missing field
    #[must_use]
    pub const fn with_null_is_absent(mut self, null_is_absent: bool) -> Self {
        self.null_is_absent = null_is_absent;
        self
    }
}
