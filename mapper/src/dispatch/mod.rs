//! Type-directed conversion dispatch.
//!
//! Each target shape category is a marker type implementing [`Shape`]:
//!
//! - [`Scalar`] - one `Convertible` value
//! - [`EnumBacked`] - a `RawBacked` enum case
//! - [`Nested`] - a `Mappable` object built from a nested Mapper
//! - [`SequenceOf`] - an array of `Convertible` values, aborting on the first bad element
//! - [`LenientSequenceOf`] - an array of `Mappable` objects, dropping elements that fail
//! - [`MapOf`] - an object whose keys and values are both `Convertible`
//!
//! Callers pick a branch by naming the marker, e.g. `mapper.extract::<SequenceOf<u32>>("ids")`.
//! The dispatcher never looks keys up itself; it only converts values that were found.

mod convert;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use serde_json::Value;
use strum::{AsRefStr, Display};

pub(crate) use self::convert::{enum_sequence, keep_successes};
use crate::convertible::{Convertible, RawBacked};
use crate::error::Result;
use crate::mapper::{Mappable, Mapper};

/// Tag naming the conversion branch an extraction goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ShapeKind {
    /// A single `Convertible` value
    Scalar,
    /// A `RawBacked` enum case
    EnumBacked,
    /// A `Mappable` object
    Nested,
    /// An array of `Convertible` values where any bad element fails the whole array
    StrictSequence,
    /// An array of `Mappable` objects where bad elements are dropped
    LenientSequence,
    /// An array of `RawBacked` cases where unknown raw values are defaulted or dropped
    EnumSequence,
    /// An object of `Convertible` keys and values
    MapOf,
    /// A caller-supplied transform over the raw value
    Transform,
}

/// A target shape the dispatcher knows how to produce
pub trait Shape {
    /// The typed value this shape produces
    type Output;

    /// The branch this shape dispatches to
    const KIND: ShapeKind;

    /// Convert the value found under `field`.
    ///
    /// `parent` is the Mapper the value was found in; nested shapes build their child Mapper from
    /// it so options and depth carry over.
    fn convert(parent: &Mapper<'_>, field: &str, value: &Value) -> Result<Self::Output>;
}

/// One `Convertible` value
pub struct Scalar<T>(PhantomData<fn() -> T>);

/// One case of a `RawBacked` enum
pub struct EnumBacked<T>(PhantomData<fn() -> T>);

/// One `Mappable` object
pub struct Nested<T>(PhantomData<fn() -> T>);

/// An array of `Convertible` values; the first bad element fails the whole array
pub struct SequenceOf<T>(PhantomData<fn() -> T>);

/// An array of `Mappable` objects; elements that fail to map are dropped
pub struct LenientSequenceOf<T>(PhantomData<fn() -> T>);

/// An object with `Convertible` keys and values; any bad entry fails the whole object
pub struct MapOf<K, V>(PhantomData<fn() -> (K, V)>);

impl<T: Convertible> Shape for Scalar<T> {
    type Output = T;

    const KIND: ShapeKind = ShapeKind::Scalar;

    fn convert(_parent: &Mapper<'_>, field: &str, value: &Value) -> Result<T> {
        convert::scalar(field, value)
    }
}

impl<T: RawBacked> Shape for EnumBacked<T> {
    type Output = T;

    const KIND: ShapeKind = ShapeKind::EnumBacked;

    fn convert(_parent: &Mapper<'_>, field: &str, value: &Value) -> Result<T> {
        convert::enum_backed(field, value)
    }
}

impl<T: Mappable> Shape for Nested<T> {
    type Output = T;

    const KIND: ShapeKind = ShapeKind::Nested;

    fn convert(parent: &Mapper<'_>, field: &str, value: &Value) -> Result<T> {
        convert::nested(parent, field, value)
    }
}

impl<T: Convertible> Shape for SequenceOf<T> {
    type Output = Vec<T>;

    const KIND: ShapeKind = ShapeKind::StrictSequence;

    fn convert(_parent: &Mapper<'_>, field: &str, value: &Value) -> Result<Vec<T>> {
        convert::strict_sequence(field, value)
    }
}

impl<T: Mappable> Shape for LenientSequenceOf<T> {
    type Output = Vec<T>;

    const KIND: ShapeKind = ShapeKind::LenientSequence;

    fn convert(parent: &Mapper<'_>, field: &str, value: &Value) -> Result<Vec<T>> {
        convert::lenient_sequence(parent, field, value)
    }
}

impl<K, V> Shape for MapOf<K, V>
where
    K: Convertible + Eq + Hash,
    V: Convertible,
{
    type Output = HashMap<K, V>;

    const KIND: ShapeKind = ShapeKind::MapOf;

    fn convert(_parent: &Mapper<'_>, field: &str, value: &Value) -> Result<HashMap<K, V>> {
        convert::map_of(field, value)
    }
}
