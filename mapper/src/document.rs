//! Whole-document entry points
//!
//! `from_document` and `array_from_document` answer "did it map?" with an `Option`. The `decode`
//! family answers "why not?" with an `error_stack::Report` whose frames carry the parse error or
//! the failing field.

use std::any::type_name;

use error_stack::{Report, ResultExt};
use serde_json::Value;

use crate::dispatch::keep_successes;
use crate::error::{DocumentError, DocumentResult, MapperError, Result};
use crate::mapper::{Mappable, Mapper, collapse_to_absence};
use crate::options::MapperOptions;
use crate::raw_kind::RawKind;

fn build<T: Mappable>(value: &Value, options: MapperOptions) -> Result<T> {
    let map = Mapper::from_value(value)?.with_options(options);
    T::from_map(&map)
}

/// Build a `T` from a document root, or nothing if the root is not a mapping or does not map
#[must_use]
pub fn from_document<T: Mappable>(value: &Value) -> Option<T> {
    from_document_with_options(value, MapperOptions::default())
}

/// [`from_document`] with explicit options
#[must_use]
pub fn from_document_with_options<T: Mappable>(
    value: &Value,
    options: MapperOptions,
) -> Option<T> {
    collapse_to_absence(build(value, options))
}

/// Build one `T` per element of a document array.
///
/// Returns nothing when the root is not an array. Elements that are not mappings, or that fail to
/// map, are dropped.
#[must_use]
pub fn array_from_document<T: Mappable>(value: &Value) -> Option<Vec<T>> {
    array_from_document_with_options(value, MapperOptions::default())
}

/// [`array_from_document`] with explicit options
#[must_use]
pub fn array_from_document_with_options<T: Mappable>(
    value: &Value,
    options: MapperOptions,
) -> Option<Vec<T>> {
    let Some(items) = value.as_array() else {
        tracing::trace!(kind = %RawKind::of(value), "Document root is not an array");
        return None;
    };

    Some(keep_successes("", items, |item| build(item, options)))
}

/// Build a `T` from a document root, reporting why it could not be built
pub fn decode<T: Mappable>(value: &Value) -> DocumentResult<T> {
    decode_with_options(value, MapperOptions::default())
}

/// [`decode`] with explicit options
pub fn decode_with_options<T: Mappable>(
    value: &Value,
    options: MapperOptions,
) -> DocumentResult<T> {
    if !value.is_object() {
        return Err(Report::new(DocumentError::NotAnObject)
            .attach(format!("Found: {}", RawKind::of(value))));
    }

    build(value, options).map_err(mapping_report::<T>)
}

/// Parse `text` as JSON and build a `T` from its root.
///
/// The whole text is parsed before mapping starts.
pub fn decode_str<T: Mappable>(text: &str) -> DocumentResult<T> {
    let value = serde_json::from_str::<Value>(text).change_context(DocumentError::InvalidJson)?;
    decode(&value)
}

fn mapping_report<T>(error: MapperError) -> Report<DocumentError> {
    let field = error.field().map(ToString::to_string);
    let report = Report::new(error).change_context(DocumentError::Mapping {
        type_name: type_name::<T>(),
    });

    match field {
        Some(field) => report.attach(format!("Field: {field}")),
        None => report,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail loudly on unexpected shapes")]

    use serde_json::json;

    use super::*;
    use crate::test_support::{Person, Team, init_tracing};

    #[test]
    fn test_from_document() {
        let person: Option<Person> = from_document(&json!({ "name": "ada", "age": 36 }));
        assert_eq!(
            person,
            Some(Person {
                name: "ada".to_string(),
                age:  Some(36),
            })
        );

        assert_eq!(from_document::<Person>(&json!({ "age": 36 })), None);
        assert_eq!(from_document::<Person>(&json!("ada")), None);
        assert_eq!(
            Person::from_document(&json!({ "name": "bob" })).map(|person| person.name),
            Some("bob".to_string())
        );
    }

    #[test]
    fn test_from_document_with_options() {
        let value = json!({ "name": "ada", "age": null });

        let person: Person =
            from_document_with_options(&value, MapperOptions::default()).expect("null is absent");
        assert_eq!(person.age, None);

        let strict = MapperOptions::default().with_null_is_absent(false);
        let person: Person = from_document_with_options(&value, strict).expect("age is optional");
        assert_eq!(person.age, None);
    }

    #[test]
    fn test_array_from_document_is_lenient() {
        init_tracing();

        let people: Vec<Person> = array_from_document(&json!([
            { "name": "a" },
            "garbage",
            { "age": 1 },
            { "name": "b" },
        ]))
        .expect("root is an array");

        assert_eq!(
            people
                .iter()
                .map(|person| person.name.as_str())
                .collect::<Vec<_>>(),
            ["a", "b"]
        );
        assert_eq!(Person::array_from_document(&json!({ "name": "a" })), None);
        assert_eq!(Person::array_from_document(&json!([])), Some(Vec::new()));
    }

    #[test]
    fn test_array_from_document_with_options() {
        let value = json!([
            { "name": "a" },
            { "name": "b", "team": { "lead": { "name": "c" } } },
        ]);

        let people: Vec<Person> =
            array_from_document_with_options(&value, MapperOptions::default().with_max_depth(0))
                .expect("root is an array");
        assert_eq!(people.len(), 2);

        let teams: Vec<Team> = array_from_document_with_options(
            &json!([{ "lead": { "name": "a" } }, { "lead": { "name": "b" } }]),
            MapperOptions::default().with_max_depth(0),
        )
        .expect("root is an array");
        assert!(teams.is_empty());

        assert_eq!(
            array_from_document_with_options::<Person>(&json!("a"), MapperOptions::default()),
            None
        );
    }

    #[test]
    fn test_decode_with_options() {
        let value = json!({ "lead": { "name": "ada" } });

        let team: Team = decode_with_options(&value, MapperOptions::default().with_max_depth(1))
            .expect("depth 1 is allowed");
        assert_eq!(team.lead.name, "ada");

        let report = decode_with_options::<Team>(&value, MapperOptions::default().with_max_depth(0))
            .expect_err("depth 1 exceeds the limit");
        assert_eq!(
            report.current_context(),
            &DocumentError::Mapping {
                type_name: type_name::<Team>(),
            }
        );
        assert!(format!("{report:?}").contains("Field: lead"));

        let report = decode_with_options::<Person>(
            &json!({ "name": null }),
            MapperOptions::default().with_null_is_absent(false),
        )
        .expect_err("null is not a string");
        assert_eq!(
            report.downcast_ref::<MapperError>(),
            Some(&MapperError::conversion::<String>(&Value::Null))
        );
    }

    #[test]
    fn test_decode_reports_mapping_context() {
        let report = decode::<Person>(&json!({ "name": 1 })).expect_err("name is not a string");

        assert_eq!(
            report.current_context(),
            &DocumentError::Mapping {
                type_name: type_name::<Person>(),
            }
        );
        assert_eq!(
            report.downcast_ref::<MapperError>(),
            Some(&MapperError::conversion::<String>(&json!(1)))
        );

        let report = decode::<Person>(&json!({})).expect_err("name is missing");
        assert!(format!("{report:?}").contains("Field: name"));
    }

    #[test]
    fn test_decode_non_object_root() {
        let report = decode::<Person>(&json!([1])).expect_err("root is an array");
        assert_eq!(report.current_context(), &DocumentError::NotAnObject);
        assert!(format!("{report:?}").contains("Found: array"));
    }

    #[test]
    fn test_decode_str() {
        let person: Person = decode_str(r#"{ "name": "ada" }"#).expect("valid document");
        assert_eq!(person.name, "ada");

        let report = decode_str::<Person>("{ not json").expect_err("invalid json");
        assert_eq!(report.current_context(), &DocumentError::InvalidJson);
        assert!(report.downcast_ref::<serde_json::Error>().is_some());

        let report = decode_str::<Person>("[]").expect_err("root is an array");
        assert_eq!(report.current_context(), &DocumentError::NotAnObject);
    }
}
