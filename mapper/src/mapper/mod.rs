//! The Mapper: a read-only view over one JSON mapping plus the extraction operations on it

mod extraction;

use serde_json::{Map, Value};

pub use self::extraction::{Keys, collapse_to_absence};
use crate::error::{MapperError, Result};
use crate::key_path::KeyPath;
use crate::options::MapperOptions;

/// A type that can build itself from a Mapper.
///
/// Implementations read their fields through the Mapper's required and optional operations:
///
/// ```
/// use json_mapper::{Mappable, Mapper, Result};
///
/// struct User {
///     name: String,
///     age:  Option<u32>,
/// }
///
/// impl Mappable for User {
///     fn from_map(map: &Mapper<'_>) -> Result<Self> {
///         Ok(Self {
///             name: map.required("name")?,
///             age:  map.optional("age"),
///         })
///     }
/// }
///
/// let user = User::from_document(&serde_json::json!({ "name": "ada" })).unwrap();
/// assert_eq!(user.name, "ada");
/// assert_eq!(user.age, None);
/// ```
pub trait Mappable: Sized {
    /// Build a value from `map`, failing with the first required field that cannot be mapped
    fn from_map(map: &Mapper<'_>) -> Result<Self>;

    /// Build a value from a whole document, or nothing if it cannot be mapped
    fn from_document(value: &Value) -> Option<Self> {
        crate::document::from_document(value)
    }

    /// Build one value per mapping element of a document array, dropping elements that fail
    fn array_from_document(value: &Value) -> Option<Vec<Self>> {
        crate::document::array_from_document(value)
    }
}

/// A read-only view over one JSON mapping.
///
/// A Mapper borrows the document it reads and is cheap to copy. Nested objects are read through
/// child Mappers that share the parent's options and sit one level deeper.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    root:    &'a Value,
    object:  &'a Map<String, Value>,
    options: MapperOptions,
    depth:   usize,
}

impl<'a> Mapper<'a> {
    /// Create a Mapper over `value` with default options.
    ///
    /// Fails with a `TypeMismatch` naming the empty field when `value` is not a mapping.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| MapperError::type_mismatch::<Map<String, Value>>("", value))?;

        Ok(Self {
            root: value,
            object,
            options: MapperOptions::default(),
            depth: 0,
        })
    }

    /// Replace this Mapper's options
    #[must_use]
    pub const fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a child Mapper over a nested mapping, one level deeper than this one.
    ///
    /// The child inherits this Mapper's options. Fails with a `Custom` error when the child would
    /// exceed `max_depth`, and with a `TypeMismatch` when `value` is not a mapping.
    pub fn nested<'v>(&self, value: &'v Value) -> Result<Mapper<'v>> {
        let depth = self.depth + 1;
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(MapperError::custom(format!(
                    "nesting depth {depth} exceeds the maximum of {max_depth}"
                )));
            }
        }

        let child = Mapper::from_value(value)?;
        Ok(Mapper {
            options: self.options,
            depth,
            ..child
        })
    }

    /// The mapping this Mapper reads from, as a raw value
    #[must_use]
    pub const fn root(&self) -> &'a Value { self.root }

    /// The mapping this Mapper reads from
    #[must_use]
    pub const fn root_object(&self) -> &'a Map<String, Value> { self.object }

    /// The options this Mapper was created with
    #[must_use]
    pub const fn options(&self) -> MapperOptions { self.options }

    /// How many nested mappings lie between this Mapper and the document root
    #[must_use]
    pub const fn depth(&self) -> usize { self.depth }

    /// Resolve a dotted key path against this Mapper's mapping.
    ///
    /// The empty path resolves to the mapping itself. Nulls are returned as found.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&'a Value> { KeyPath::parse(key).resolve(self.root) }
}

impl<'a> TryFrom<&'a Value> for Mapper<'a> {
    type Error = MapperError;

    fn try_from(value: &'a Value) -> Result<Self> { Self::from_value(value) }
}
