//! Required and optional field extraction

use std::collections::HashMap;
use std::hash::Hash;

use serde_json::Value;

use super::{Mappable, Mapper};
use crate::convertible::{Convertible, RawBacked};
use crate::dispatch::{
    EnumBacked, LenientSequenceOf, MapOf, Nested, Scalar, SequenceOf, Shape, ShapeKind,
    enum_sequence,
};
use crate::error::{MapperError, Result};

/// The key or keys an extraction reads from
///
/// A fallback list is tried in order and the first key that both resolves and converts wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keys<'k> {
    /// One dotted key
    Single(&'k str),
    /// Dotted keys tried in declaration order
    Fallback(&'k [&'k str]),
}

impl<'k> From<&'k str> for Keys<'k> {
    fn from(key: &'k str) -> Self { Self::Single(key) }
}

impl<'k> From<&'k String> for Keys<'k> {
    fn from(key: &'k String) -> Self { Self::Single(key) }
}

impl<'k> From<&'k [&'k str]> for Keys<'k> {
    fn from(keys: &'k [&'k str]) -> Self { Self::Fallback(keys) }
}

impl<'k, const N: usize> From<&'k [&'k str; N]> for Keys<'k> {
    fn from(keys: &'k [&'k str; N]) -> Self { Self::Fallback(keys) }
}

/// Turn a failed extraction into absence.
///
/// Every optional operation goes through here, and it is the only place errors are discarded.
/// The discarded error is traced.
#[must_use]
pub fn collapse_to_absence<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::trace!(%error, "Optional extraction collapsed to absence");
            None
        },
    }
}

impl<'a> Mapper<'a> {
    /// Resolve `key`, treating `null` as absent when the options say so
    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.resolve(key)
            .filter(|value| !(self.options.null_is_absent && value.is_null()))
    }

    fn extract_with<T>(
        &self,
        keys: Keys<'_>,
        shape: ShapeKind,
        convert: impl Fn(&str, &'a Value) -> Result<T>,
    ) -> Result<T> {
        match keys {
            Keys::Single(key) => self
                .lookup(key)
                .map_or_else(|| Err(MapperError::missing_field(key)), |value| convert(key, value)),
            Keys::Fallback(keys) => {
                for key in keys {
                    let Some(value) = self.lookup(key) else {
                        tracing::trace!(key, %shape, "Skipping absent fallback key");
                        continue;
                    };
                    match convert(key, value) {
                        Ok(converted) => return Ok(converted),
                        Err(error) => {
                            tracing::trace!(
                                key,
                                %shape,
                                %error,
                                "Skipping unconvertible fallback key"
                            );
                        },
                    }
                }
                Err(MapperError::missing_field(keys.last().copied().unwrap_or_default()))
            },
        }
    }

    // Generic shape dispatch

    /// Extract a value of shape `S`, failing with exactly one error when it cannot be produced
    pub fn extract<'k, S: Shape>(&self, keys: impl Into<Keys<'k>>) -> Result<S::Output> {
        self.extract_with(keys.into(), S::KIND, |field, value| S::convert(self, field, value))
    }

    /// Extract a value of shape `S`, or nothing if it cannot be produced
    #[must_use]
    pub fn extract_optional<'k, S: Shape>(&self, keys: impl Into<Keys<'k>>) -> Option<S::Output> {
        collapse_to_absence(self.extract::<S>(keys))
    }

    // Scalars

    /// Required `Convertible` value
    pub fn required<'k, T: Convertible>(&self, keys: impl Into<Keys<'k>>) -> Result<T> {
        self.extract::<Scalar<T>>(keys)
    }

    /// Optional `Convertible` value
    #[must_use]
    pub fn optional<'k, T: Convertible>(&self, keys: impl Into<Keys<'k>>) -> Option<T> {
        self.extract_optional::<Scalar<T>>(keys)
    }

    // Enumerations

    /// Required `RawBacked` enum case
    pub fn required_enum<'k, T: RawBacked>(&self, keys: impl Into<Keys<'k>>) -> Result<T> {
        self.extract::<EnumBacked<T>>(keys)
    }

    /// Optional `RawBacked` enum case
    #[must_use]
    pub fn optional_enum<'k, T: RawBacked>(&self, keys: impl Into<Keys<'k>>) -> Option<T> {
        self.extract_optional::<EnumBacked<T>>(keys)
    }

    /// Required array of `RawBacked` cases.
    ///
    /// Every element must convert to the raw type. Raw values that match no case become
    /// `default`, or are dropped when there is no default.
    pub fn required_enum_vec<'k, T: RawBacked + Clone>(
        &self,
        keys: impl Into<Keys<'k>>,
        default: Option<T>,
    ) -> Result<Vec<T>> {
        self.extract_with(keys.into(), ShapeKind::EnumSequence, |field, value| {
            enum_sequence(field, value, default.as_ref())
        })
    }

    /// Optional array of `RawBacked` cases
    #[must_use]
    pub fn optional_enum_vec<'k, T: RawBacked + Clone>(
        &self,
        keys: impl Into<Keys<'k>>,
        default: Option<T>,
    ) -> Option<Vec<T>> {
        collapse_to_absence(self.required_enum_vec(keys, default))
    }

    // Nested objects

    /// Required `Mappable` object
    pub fn required_nested<'k, T: Mappable>(&self, keys: impl Into<Keys<'k>>) -> Result<T> {
        self.extract::<Nested<T>>(keys)
    }

    /// Optional `Mappable` object
    #[must_use]
    pub fn optional_nested<'k, T: Mappable>(&self, keys: impl Into<Keys<'k>>) -> Option<T> {
        self.extract_optional::<Nested<T>>(keys)
    }

    // Sequences and mappings

    /// Required array of `Convertible` values; one bad element fails the whole array
    pub fn required_vec<'k, T: Convertible>(&self, keys: impl Into<Keys<'k>>) -> Result<Vec<T>> {
        self.extract::<SequenceOf<T>>(keys)
    }

    /// Optional array of `Convertible` values
    #[must_use]
    pub fn optional_vec<'k, T: Convertible>(&self, keys: impl Into<Keys<'k>>) -> Option<Vec<T>> {
        self.extract_optional::<SequenceOf<T>>(keys)
    }

    /// Required array of `Mappable` objects; elements that fail to map are dropped
    pub fn required_lenient_vec<'k, T: Mappable>(
        &self,
        keys: impl Into<Keys<'k>>,
    ) -> Result<Vec<T>> {
        self.extract::<LenientSequenceOf<T>>(keys)
    }

    /// Optional array of `Mappable` objects
    #[must_use]
    pub fn optional_lenient_vec<'k, T: Mappable>(
        &self,
        keys: impl Into<Keys<'k>>,
    ) -> Option<Vec<T>> {
        self.extract_optional::<LenientSequenceOf<T>>(keys)
    }

    /// Required object of `Convertible` keys and values
    pub fn required_map_of<'k, K, V>(&self, keys: impl Into<Keys<'k>>) -> Result<HashMap<K, V>>
    where
        K: Convertible + Eq + Hash,
        V: Convertible,
    {
        self.extract::<MapOf<K, V>>(keys)
    }

    /// Optional object of `Convertible` keys and values
    #[must_use]
    pub fn optional_map_of<'k, K, V>(&self, keys: impl Into<Keys<'k>>) -> Option<HashMap<K, V>>
    where
        K: Convertible + Eq + Hash,
        V: Convertible,
    {
        self.extract_optional::<MapOf<K, V>>(keys)
    }

    // Caller-supplied transforms

    /// Required value produced by `transform` from the raw value.
    ///
    /// A `Custom` error from `transform` that names no field gets the key it was found under;
    /// every other error is returned as is.
    pub fn required_with<'k, T>(
        &self,
        keys: impl Into<Keys<'k>>,
        transform: impl Fn(&Value) -> Result<T>,
    ) -> Result<T> {
        self.extract_with(keys.into(), ShapeKind::Transform, |field, value| {
            transform(value).map_err(|error| error.with_field(field))
        })
    }

    /// Optional value produced by `transform` from the raw value
    #[must_use]
    pub fn optional_with<'k, T>(
        &self,
        keys: impl Into<Keys<'k>>,
        transform: impl Fn(&Value) -> Result<T>,
    ) -> Option<T> {
        collapse_to_absence(self.required_with(keys, transform))
    }
}
