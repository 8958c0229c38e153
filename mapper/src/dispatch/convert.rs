//! Conversion branches, one per shape category

use std::collections::HashMap;
use std::hash::Hash;

use itertools::{Either, Itertools};
use serde_json::{Map, Value};

use crate::convertible::{Convertible, RawBacked};
use crate::error::{MapperError, Result};
use crate::mapper::{Mappable, Mapper};

/// Convert one present value. A custom failure that does not name a field gets `field`.
pub(crate) fn scalar<T: Convertible>(field: &str, value: &Value) -> Result<T> {
    T::from_raw(value).map_err(|error| error.with_field(field))
}

/// Convert to the backing type first, then match a case.
pub(crate) fn enum_backed<T: RawBacked>(field: &str, value: &Value) -> Result<T> {
    let raw = scalar::<T::Raw>(field, value)?;
    T::from_raw_value(&raw).ok_or_else(|| MapperError::invalid_raw_value::<T>(field, value))
}

/// Build a `Mappable` from a mapping value.
///
/// Errors raised while building `T` come back unchanged, so the field they name is the innermost
/// one that failed, not `field`.
pub(crate) fn nested<T: Mappable>(parent: &Mapper<'_>, field: &str, value: &Value) -> Result<T> {
    if !value.is_object() {
        return Err(MapperError::type_mismatch::<Map<String, Value>>(field, value));
    }

    let child = parent.nested(value).map_err(|error| error.with_field(field))?;
    T::from_map(&child)
}

fn array<'v>(field: &str, value: &'v Value) -> Result<&'v Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| MapperError::type_mismatch::<Vec<Value>>(field, value))
}

/// Convert every element; the first failure fails the whole array.
pub(crate) fn strict_sequence<T: Convertible>(field: &str, value: &Value) -> Result<Vec<T>> {
    array(field, value)?
        .iter()
        .map(|item| scalar(field, item))
        .collect()
}

/// Build every element as a `Mappable`; elements that fail are dropped.
pub(crate) fn lenient_sequence<T: Mappable>(
    parent: &Mapper<'_>,
    field: &str,
    value: &Value,
) -> Result<Vec<T>> {
    let items = array(field, value)?;
    Ok(keep_successes(field, items, |item| nested(parent, field, item)))
}

/// Run `build` over each item and keep what succeeds, in order.
pub(crate) fn keep_successes<T>(
    field: &str,
    items: &[Value],
    build: impl Fn(&Value) -> Result<T>,
) -> Vec<T> {
    let (kept, dropped): (Vec<T>, Vec<MapperError>) =
        items.iter().partition_map(|item| match build(item) {
            Ok(built) => Either::Left(built),
            Err(error) => Either::Right(error),
        });

    if !dropped.is_empty() {
        tracing::debug!(
            field,
            kept = kept.len(),
            dropped = dropped.len(),
            "Dropped sequence elements that failed to map"
        );
        for error in &dropped {
            tracing::trace!(field, %error, "Dropped sequence element");
        }
    }

    kept
}

/// Convert every element to the backing type (strict), then match cases. Raw values with no
/// matching case become `default` when one is given and are dropped otherwise.
pub(crate) fn enum_sequence<T: RawBacked + Clone>(
    field: &str,
    value: &Value,
    default: Option<&T>,
) -> Result<Vec<T>> {
    let raws = strict_sequence::<T::Raw>(field, value)?;

    Ok(raws
        .iter()
        .filter_map(|raw| T::from_raw_value(raw).or_else(|| default.cloned()))
        .collect())
}

/// Convert every key and value of a mapping; any failure fails the whole mapping.
pub(crate) fn map_of<K, V>(field: &str, value: &Value) -> Result<HashMap<K, V>>
where
    K: Convertible + Eq + Hash,
    V: Convertible,
{
    let Some(object) = value.as_object() else {
        return Err(MapperError::type_mismatch::<Map<String, Value>>(field, value));
    };

    object
        .iter()
        .map(|(key, item)| {
            let key = scalar::<K>(field, &Value::String(key.clone()))?;
            let item = scalar::<V>(field, item)?;
            Ok((key, item))
        })
        .collect()
}
