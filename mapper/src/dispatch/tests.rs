#![allow(
    clippy::expect_used,
    clippy::panic,
    reason = "tests fail loudly on unexpected shapes"
)]

use std::any::type_name;
use std::collections::HashMap;

use serde_json::{Map, Value, json};

use super::*;
use crate::error::MapperError;
use crate::test_support::{Person, Priority, Suit, init_tracing};

fn root() -> Value { json!({}) }

fn convert<S: Shape>(field: &str, value: &Value) -> Result<S::Output> {
    let root = root();
    let mapper = Mapper::from_value(&root).expect("root is a mapping");
    S::convert(&mapper, field, value)
}

#[test]
fn test_shape_kind_tags() {
    assert_eq!(<Scalar<u8>>::KIND, ShapeKind::Scalar);
    assert_eq!(<EnumBacked<Suit>>::KIND, ShapeKind::EnumBacked);
    assert_eq!(<Nested<Person>>::KIND, ShapeKind::Nested);
    assert_eq!(<SequenceOf<u8>>::KIND, ShapeKind::StrictSequence);
    assert_eq!(<LenientSequenceOf<Person>>::KIND, ShapeKind::LenientSequence);
    assert_eq!(<MapOf<String, u8>>::KIND, ShapeKind::MapOf);

    assert_eq!(ShapeKind::StrictSequence.to_string(), "strict_sequence");
    assert_eq!(ShapeKind::MapOf.as_ref(), "map_of");
}

#[test]
fn test_scalar_fills_field_on_custom_errors() {
    let error = convert::<Scalar<url::Url>>("homepage", &json!("nope")).expect_err("bad url");
    assert_eq!(error.field(), Some("homepage"));

    let error = convert::<Scalar<u8>>("count", &json!("3")).expect_err("string is not a number");
    assert_eq!(error, MapperError::conversion::<u8>(&json!("3")));
}

#[test]
fn test_enum_backed_string_and_integer() {
    assert_eq!(
        convert::<EnumBacked<Suit>>("suit", &json!("spades")),
        Ok(Suit::Spades)
    );
    assert_eq!(
        convert::<EnumBacked<Priority>>("priority", &json!(5)),
        Ok(Priority::High)
    );
}

#[test]
fn test_enum_backed_unknown_raw_value() {
    assert_eq!(
        convert::<EnumBacked<Suit>>("suit", &json!("hearts")),
        Err(MapperError::InvalidRawValue {
            field:     "suit".to_string(),
            value:     json!("hearts"),
            enum_type: type_name::<Suit>(),
        })
    );
}

#[test]
fn test_enum_backed_wrong_raw_type_is_conversion_error() {
    assert_eq!(
        convert::<EnumBacked<Suit>>("suit", &json!(1)),
        Err(MapperError::conversion::<String>(&json!(1)))
    );
}

#[test]
fn test_nested_requires_mapping() {
    assert_eq!(
        convert::<Nested<Person>>("lead", &json!([1])),
        Err(MapperError::type_mismatch::<Map<String, Value>>(
            "lead",
            &json!([1])
        ))
    );
}

#[test]
fn test_nested_reports_innermost_field() {
    assert_eq!(
        convert::<Nested<Person>>("lead", &json!({ "age": 3 })),
        Err(MapperError::missing_field("name"))
    );
}

#[test]
fn test_strict_sequence_aborts_on_bad_element() {
    assert_eq!(
        convert::<SequenceOf<u32>>("ids", &json!([1, 2, 3])),
        Ok(vec![1, 2, 3])
    );
    assert_eq!(
        convert::<SequenceOf<u32>>("ids", &json!([1, "two", 3])),
        Err(MapperError::conversion::<u32>(&json!("two")))
    );
    assert_eq!(
        convert::<SequenceOf<u32>>("ids", &json!({ "a": 1 })),
        Err(MapperError::type_mismatch::<Vec<Value>>(
            "ids",
            &json!({ "a": 1 })
        ))
    );
}

#[test]
fn test_lenient_sequence_drops_failures_in_order() {
    init_tracing();

    let people = convert::<LenientSequenceOf<Person>>(
        "people",
        &json!([{ "name": "ada" }, "garbage", { "age": 4 }, { "name": "bob", "age": 7 }]),
    )
    .expect("lenient sequences never fail on elements");

    assert_eq!(
        people,
        [
            Person {
                name: "ada".to_string(),
                age:  None,
            },
            Person {
                name: "bob".to_string(),
                age:  Some(7),
            },
        ]
    );
}

#[test]
fn test_lenient_sequence_still_requires_array() {
    let Err(MapperError::TypeMismatch { field, .. }) =
        convert::<LenientSequenceOf<Person>>("people", &json!("nope"))
    else {
        panic!("expected a type mismatch");
    };
    assert_eq!(field, "people");
}

#[test]
fn test_map_of_converts_keys_and_values() {
    let scores = convert::<MapOf<String, u8>>("scores", &json!({ "a": 1, "b": 2 }))
        .expect("all entries convert");
    assert_eq!(
        scores,
        HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)])
    );

    assert_eq!(
        convert::<MapOf<String, u8>>("scores", &json!({ "a": 1, "b": 300 })),
        Err(MapperError::conversion::<u8>(&json!(300)))
    );
    assert!(matches!(
        convert::<MapOf<u8, u8>>("scores", &json!({ "a": 1 })),
        Err(MapperError::Conversion { .. })
    ));
    assert!(matches!(
        convert::<MapOf<String, u8>>("scores", &json!([1])),
        Err(MapperError::TypeMismatch { .. })
    ));
}

#[test]
fn test_enum_sequence_default_and_drop() {
    let value = json!(["spades", "hearts", "clubs"]);

    assert_eq!(
        enum_sequence::<Suit>("suits", &value, None),
        Ok(vec![Suit::Spades, Suit::Clubs])
    );
    assert_eq!(
        enum_sequence("suits", &value, Some(&Suit::Spades)),
        Ok(vec![Suit::Spades, Suit::Spades, Suit::Clubs])
    );
    assert_eq!(
        enum_sequence::<Suit>("suits", &json!(["spades", 2]), None),
        Err(MapperError::conversion::<String>(&json!(2)))
    );
}

#[test]
fn test_keep_successes_preserves_order() {
    let items = [json!(1), json!("x"), json!(3)];
    let kept = keep_successes("", &items, |item| u8::from_raw(item));
    assert_eq!(kept, [1, 3]);
}
