use chrono::{DateTime, Utc};
use serde_json::Value;

use super::Convertible;
use crate::error::{MapperError, Result};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Dates come from a number of seconds since the Unix epoch, fractional seconds allowed.
impl Convertible for DateTime<Utc> {
    fn from_raw(value: &Value) -> Result<Self> {
        let Some(seconds) = value.as_f64() else {
            return Err(MapperError::conversion::<f64>(value));
        };

        datetime_from_seconds(seconds).ok_or_else(|| {
            MapperError::custom(format!("{seconds} is not a representable timestamp"))
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float to int casts saturate and chrono rejects saturated seconds"
)]
fn datetime_from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * NANOS_PER_SECOND).min(NANOS_PER_SECOND - 1.0);
    DateTime::<Utc>::from_timestamp(whole as i64, nanos as u32)
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::panic,
    reason = "tests fail loudly on unexpected shapes"
)]
mod tests {
    use std::any::type_name;

    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_integral_timestamp() {
        let date = DateTime::<Utc>::from_raw(&json!(0)).expect("epoch");
        assert_eq!(date, Utc.timestamp_opt(0, 0).single().expect("epoch"));

        let date = DateTime::<Utc>::from_raw(&json!(1_700_000_000)).expect("timestamp");
        assert_eq!(date.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_fractional_timestamp() {
        let date = DateTime::<Utc>::from_raw(&json!(1.5)).expect("timestamp");
        assert_eq!(date.timestamp(), 1);
        assert_eq!(date.timestamp_subsec_millis(), 500);

        let date = DateTime::<Utc>::from_raw(&json!(-0.25)).expect("timestamp");
        assert_eq!(
            date,
            DateTime::<Utc>::UNIX_EPOCH - TimeDelta::milliseconds(250)
        );
    }

    #[test]
    fn test_non_number_is_conversion_error() {
        assert_eq!(
            DateTime::<Utc>::from_raw(&json!("2024-01-01")),
            Err(MapperError::Conversion {
                value:         json!("2024-01-01"),
                expected_type: type_name::<f64>(),
            })
        );
    }

    #[test]
    fn test_out_of_range_is_custom_error() {
        let Err(MapperError::Custom { field, .. }) = DateTime::<Utc>::from_raw(&json!(1e300)) else {
            panic!("expected a custom error");
        };
        assert_eq!(field, None);
    }
}
