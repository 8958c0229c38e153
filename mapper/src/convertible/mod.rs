//! Conversion capabilities for values that come from a single raw JSON value
//!
//! - `Convertible` - types built directly from one raw value (strings, numbers, URLs, dates)
//! - `RawBacked` - closed enumerations whose cases are each backed by a `Convertible` raw value

mod dates;
mod scalars;
mod urls;

use serde_json::Value;

use crate::error::Result;

/// A type that can attempt to build itself from one raw JSON value.
///
/// Implementations report a wrong input shape with `MapperError::Conversion` and a value of the
/// right shape that is still unacceptable with `MapperError::Custom`.
pub trait Convertible: Sized {
    /// Build a value from `value`
    fn from_raw(value: &Value) -> Result<Self>;
}

/// A closed enumeration whose cases are each backed by a `Convertible` raw value.
///
/// Usually derived with `#[derive(RawBacked)]`.
pub trait RawBacked: Sized {
    /// The type every case's raw value has
    type Raw: Convertible;

    /// The case whose raw value equals `raw`, if there is one
    fn from_raw_value(raw: &Self::Raw) -> Option<Self>;

    /// The raw value backing this case
    fn raw_value(&self) -> Self::Raw;
}
