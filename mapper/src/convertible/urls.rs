use serde_json::Value;
use url::Url;

use super::Convertible;
use crate::error::{MapperError, Result};

/// URLs come from strings; a string that does not parse is a custom error rather than a shape
/// error.
impl Convertible for Url {
    fn from_raw(value: &Value) -> Result<Self> {
        let Some(text) = value.as_str() else {
            return Err(MapperError::conversion::<String>(value));
        };

        Self::parse(text).map_err(|_| MapperError::custom(format!("'{text}' is not a valid URL")))
    }
}
