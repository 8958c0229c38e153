//! `Convertible` implementations for standard scalar types and raw JSON containers

use serde_json::{Map, Value};

use super::Convertible;
use crate::error::{MapperError, Result};

impl Convertible for String {
    fn from_raw(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MapperError::conversion::<Self>(value))
    }
}

impl Convertible for bool {
    fn from_raw(value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| MapperError::conversion::<Self>(value))
    }
}

// Integers accept integral JSON numbers that fit the target width, including integral floats
// such as `42.0`

/// An integral float that fits `i64`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    reason = "the value is integral and inside the i64 range before it is cast"
)]
fn integral_i64(value: &Value) -> Option<i64> {
    value
        .as_f64()
        .filter(|number| number.fract() == 0.0)
        .filter(|number| *number >= i64::MIN as f64 && *number < i64::MAX as f64)
        .map(|number| number as i64)
}

/// An integral, non-negative float that fits `u64`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    reason = "the value is integral and inside the u64 range before it is cast"
)]
fn integral_u64(value: &Value) -> Option<u64> {
    value
        .as_f64()
        .filter(|number| number.fract() == 0.0)
        .filter(|number| *number >= 0.0 && *number < u64::MAX as f64)
        .map(|number| number as u64)
}

macro_rules! convertible_signed {
    ($($int:ty),* $(,)?) => {
        $(
            impl Convertible for $int {
                fn from_raw(value: &Value) -> Result<Self> {
                    value
                        .as_i64()
                        .or_else(|| integral_i64(value))
                        .and_then(|number| Self::try_from(number).ok())
                        .ok_or_else(|| MapperError::conversion::<Self>(value))
                }
            }
        )*
    };
}

macro_rules! convertible_unsigned {
    ($($int:ty),* $(,)?) => {
        $(
            impl Convertible for $int {
                fn from_raw(value: &Value) -> Result<Self> {
                    value
                        .as_u64()
                        .or_else(|| integral_u64(value))
                        .and_then(|number| Self::try_from(number).ok())
                        .ok_or_else(|| MapperError::conversion::<Self>(value))
                }
            }
        )*
    };
}

convertible_signed!(i8, i16, i32, i64, isize);
convertible_unsigned!(u8, u16, u32, u64, usize);

impl Convertible for f64 {
    fn from_raw(value: &Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| MapperError::conversion::<Self>(value))
    }
}

impl Convertible for f32 {
    /// Narrowing rounds to the nearest `f32`; numbers beyond the `f32` range are rejected rather
    /// than becoming infinite.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "out-of-range results are detected as infinite and rejected"
    )]
    fn from_raw(value: &Value) -> Result<Self> {
        value
            .as_f64()
            .map(|number| number as Self)
            .filter(|narrowed| narrowed.is_finite())
            .ok_or_else(|| MapperError::conversion::<Self>(value))
    }
}

// Raw JSON passes through untouched

impl Convertible for Value {
    fn from_raw(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl Convertible for Map<String, Value> {
    fn from_raw(value: &Value) -> Result<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| MapperError::conversion::<Self>(value))
    }
}

impl Convertible for Vec<Value> {
    fn from_raw(value: &Value) -> Result<Self> {
        value
            .as_array()
            .cloned()
            .ok_or_else(|| MapperError::conversion::<Self>(value))
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::panic,
    reason = "tests fail loudly on unexpected shapes"
)]
mod tests {
    use std::any::type_name;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_integer_converts_across_widths() {
        let value = json!(42);

        assert_eq!(i8::from_raw(&value), Ok(42));
        assert_eq!(i16::from_raw(&value), Ok(42));
        assert_eq!(i32::from_raw(&value), Ok(42));
        assert_eq!(i64::from_raw(&value), Ok(42));
        assert_eq!(isize::from_raw(&value), Ok(42));
        assert_eq!(u8::from_raw(&value), Ok(42));
        assert_eq!(u16::from_raw(&value), Ok(42));
        assert_eq!(u32::from_raw(&value), Ok(42));
        assert_eq!(u64::from_raw(&value), Ok(42));
        assert_eq!(usize::from_raw(&value), Ok(42));

        let integral_float = json!(42.0);

        assert_eq!(i8::from_raw(&integral_float), Ok(42));
        assert_eq!(i32::from_raw(&integral_float), Ok(42));
        assert_eq!(i64::from_raw(&integral_float), Ok(42));
        assert_eq!(u8::from_raw(&integral_float), Ok(42));
        assert_eq!(u64::from_raw(&integral_float), Ok(42));
        assert_eq!(usize::from_raw(&integral_float), Ok(42));
        assert_eq!(i16::from_raw(&json!(-7.0)), Ok(-7));
    }

    #[test]
    fn test_integer_rejects_out_of_range_and_fractions() {
        assert_eq!(
            u8::from_raw(&json!(256)),
            Err(MapperError::conversion::<u8>(&json!(256)))
        );
        assert_eq!(
            u32::from_raw(&json!(-1)),
            Err(MapperError::conversion::<u32>(&json!(-1)))
        );
        assert_eq!(i8::from_raw(&json!(-128)), Ok(-128));
        assert_eq!(u64::from_raw(&json!(u64::MAX)), Ok(u64::MAX));
        assert!(i64::from_raw(&json!(u64::MAX)).is_err());
        assert!(i32::from_raw(&json!(4.5)).is_err());
        assert_eq!(
            u8::from_raw(&json!(1.5)),
            Err(MapperError::conversion::<u8>(&json!(1.5)))
        );
        assert_eq!(
            u8::from_raw(&json!(256.0)),
            Err(MapperError::conversion::<u8>(&json!(256.0)))
        );
        assert!(u32::from_raw(&json!(-1.0)).is_err());
        assert!(i64::from_raw(&json!(1e19)).is_err());
        assert!(u64::from_raw(&json!(1e300)).is_err());
    }

    #[test]
    fn test_integer_rejects_strings() {
        let Err(MapperError::Conversion {
            value,
            expected_type,
        }) = i32::from_raw(&json!("42"))
        else {
            panic!("expected a conversion error");
        };
        assert_eq!(value, json!("42"));
        assert_eq!(expected_type, type_name::<i32>());
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::from_raw(&json!(1.25)), Ok(1.25));
        assert_eq!(f64::from_raw(&json!(3)), Ok(3.0));
        assert_eq!(f32::from_raw(&json!(0.5)), Ok(0.5));
        assert_eq!(f32::from_raw(&json!(-65_536.0)), Ok(-65_536.0));
        assert_eq!(
            f32::from_raw(&json!(1e300)),
            Err(MapperError::conversion::<f32>(&json!(1e300)))
        );
        assert!(f32::from_raw(&json!(-1e300)).is_err());
        assert!(f64::from_raw(&json!("1.0")).is_err());
    }

    #[test]
    fn test_string_and_bool_require_exact_kind() {
        assert_eq!(String::from_raw(&json!("hi")), Ok("hi".to_string()));
        assert!(String::from_raw(&json!(1)).is_err());
        assert_eq!(bool::from_raw(&json!(true)), Ok(true));
        assert!(bool::from_raw(&json!(1)).is_err());
        assert!(bool::from_raw(&json!("true")).is_err());
    }

    #[test]
    fn test_raw_containers() {
        assert_eq!(Value::from_raw(&json!(null)), Ok(json!(null)));

        let object = Map::<String, Value>::from_raw(&json!({"a": 1})).expect("object");
        assert_eq!(object.get("a"), Some(&json!(1)));
        assert!(Map::<String, Value>::from_raw(&json!([1])).is_err());

        assert_eq!(
            Vec::<Value>::from_raw(&json!([1, "two"])),
            Ok(vec![json!(1), json!("two")])
        );
        assert!(Vec::<Value>::from_raw(&json!({"a": 1})).is_err());
    }
}
