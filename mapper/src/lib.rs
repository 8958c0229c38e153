//! Typed extraction of domain models from decoded JSON value trees.
//!
//! A [`Mapper`] wraps one JSON mapping and reads fields out of it by dotted key path
//! (`"user.address.city"`). Every read comes in two flavors: `required_*` operations fail with
//! exactly one [`MapperError`], and `optional_*` operations turn every failure into `None`.
//!
//! ```
//! use json_mapper::{Mappable, Mapper, RawBacked, Result};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq, RawBacked)]
//! enum Role {
//!     Admin,
//!     Viewer,
//! }
//!
//! struct Account {
//!     email: String,
//!     role:  Role,
//!     tags:  Vec<String>,
//! }
//!
//! impl Mappable for Account {
//!     fn from_map(map: &Mapper<'_>) -> Result<Self> {
//!         Ok(Self {
//!             email: map.required(&["email", "contact.email"])?,
//!             role:  map.required_enum("role")?,
//!             tags:  map.optional_vec("tags").unwrap_or_default(),
//!         })
//!     }
//! }
//!
//! let document = json!({ "contact": { "email": "ada@example.com" }, "role": "admin" });
//! let account = Account::from_document(&document).unwrap();
//! assert_eq!(account.email, "ada@example.com");
//! assert_eq!(account.role, Role::Admin);
//! assert!(account.tags.is_empty());
//! ```

extern crate self as json_mapper;

mod convertible;
mod dispatch;
mod document;
mod error;
mod key_path;
mod mapper;
mod options;
mod raw_kind;
#[cfg(test)]
mod test_support;

pub use convertible::{Convertible, RawBacked};
pub use dispatch::{
    EnumBacked, LenientSequenceOf, MapOf, Nested, Scalar, SequenceOf, Shape, ShapeKind,
};
pub use document::{
    array_from_document, array_from_document_with_options, decode, decode_str,
    decode_with_options, from_document, from_document_with_options,
};
pub use error::{DocumentError, DocumentResult, MapperError, Result};
pub use json_mapper_macros::RawBacked;
pub use key_path::{KEY_PATH_SEPARATOR, KeyPath};
pub use mapper::{Keys, Mappable, Mapper, collapse_to_absence};
pub use options::MapperOptions;
pub use raw_kind::RawKind;
