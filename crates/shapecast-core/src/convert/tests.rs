//! Tests for record conversion
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

#[cfg(test)]
mod tests {
    use super::super::{from_raw, from_raw_into, Config, ConfigOptions};
    use crate::rewrites::SourceBinding;
    use crate::schema::{composite_field, from_field, FieldSpec, RecordSchema};
    use crate::types::{built_in, Annotation, EnumType, TypeDesc};
    use crate::value::{Map, Record, Value};
    use crate::Error;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    fn schema(name: &str, fields: Vec<FieldSpec>) -> RecordSchema {
        RecordSchema::new(name, fields).unwrap()
    }

    fn json(text: &str) -> Map {
        Map::from_json_str(text).unwrap()
    }

    fn status() -> TypeDesc {
        TypeDesc::enumeration(EnumType::new("Status", [("Open", "open"), ("Closed", "closed")]))
    }

    fn price_type() -> TypeDesc {
        TypeDesc::tuple([TypeDesc::float(), TypeDesc::str()])
    }

    // Source rewriting

    #[test]
    fn test_annotated_single_source() {
        let a = schema(
            "A",
            vec![FieldSpec::new(
                "type_",
                TypeDesc::sourced(TypeDesc::int(), SourceBinding::single("type")),
            )],
        );
        let record = from_raw(&a, &json(r#"{"type": 123}"#), &Config::default()).unwrap();
        assert_eq!(record, Record::new("A", vec![("type_".to_string(), Value::Int(123))]));
    }

    #[test]
    fn test_annotated_composite_source() {
        let binding = SourceBinding::composite(["amount", "currency"]).unwrap();
        let b = schema("B", vec![FieldSpec::new("price", TypeDesc::sourced(price_type(), binding))]);
        let record = from_raw(
            &b,
            &json(r#"{"amount": 100.0, "currency": "SEK"}"#),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(
            record.get("price"),
            Some(&Value::Tuple(vec![Value::Int(100), Value::from("SEK")]))
        );
    }

    #[test]
    fn test_descriptor_style_sources() {
        let order = schema(
            "Order",
            vec![
                from_field("kind", TypeDesc::str(), "type").build().unwrap(),
                composite_field("price", price_type(), ["amount", "currency"]).build().unwrap(),
            ],
        );
        let record = from_raw(
            &order,
            &json(r#"{"type": "sale", "amount": 9.5, "currency": "EUR"}"#),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(record.get("kind"), Some(&Value::from("sale")));
        assert_eq!(
            record.get("price"),
            Some(&Value::Tuple(vec![Value::Float(9.5), Value::from("EUR")]))
        );
    }

    #[test]
    fn test_descriptor_binding_beats_annotation() {
        let declared = TypeDesc::sourced(TypeDesc::int(), SourceBinding::single("b"));
        let s = schema("S", vec![from_field("x", declared, "a").build().unwrap()]);
        let record = from_raw(&s, &json(r#"{"a": 1, "b": 2}"#), &Config::default()).unwrap();
        assert_eq!(record.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_two_source_annotations_is_shape_error() {
        let declared = TypeDesc::annotated(
            TypeDesc::int(),
            [
                Annotation::Source(SourceBinding::single("a")),
                Annotation::Source(SourceBinding::single("b")),
            ],
        );
        let s = schema("S", vec![FieldSpec::new("x", declared)]);
        let err = from_raw(&s, &json(r#"{"a": 1, "b": 2}"#), &Config::default()).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_annotation_without_source_binding_is_shape_error() {
        let declared = TypeDesc::annotated(TypeDesc::int(), [Annotation::Data(Value::from("doc"))]);
        let s = schema("S", vec![FieldSpec::new("x", declared)]);
        let err = from_raw(&s, &json(r#"{"x": 1}"#), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
    }

    // Missing data and defaults

    #[test]
    fn test_missing_required_field() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::int())]);
        let err = from_raw(&s, &json("{}"), &Config::default()).unwrap_err();
        match err {
            Error::MissingValue { path } => assert_eq!(path, "x"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_renamed_source_reports_key() {
        let s = schema("S", vec![from_field("type_", TypeDesc::int(), "type").build().unwrap()]);
        let err = from_raw(&s, &json("{}"), &Config::default()).unwrap_err();
        match err {
            Error::MissingKey { path, key } => {
                assert_eq!(path, "type_");
                assert_eq!(key, "type");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let s = schema(
            "S",
            vec![
                FieldSpec::builder("retries", TypeDesc::int()).default(3).build().unwrap(),
                from_field("tags", TypeDesc::list(TypeDesc::str()), "labels")
                    .default_factory(|| Value::List(vec![]))
                    .build()
                    .unwrap(),
            ],
        );
        let record = from_raw(&s, &json("{}"), &Config::default()).unwrap();
        assert_eq!(record.get("retries"), Some(&Value::Int(3)));
        assert_eq!(record.get("tags"), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_present_value_beats_default() {
        let s = schema(
            "S",
            vec![FieldSpec::builder("retries", TypeDesc::int()).default(3).build().unwrap()],
        );
        let record = from_raw(&s, &json(r#"{"retries": 5}"#), &Config::default()).unwrap();
        assert_eq!(record.get("retries"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_optional_field_missing_or_null() {
        let s = schema("S", vec![FieldSpec::new("note", TypeDesc::optional(TypeDesc::str()))]);
        let missing = from_raw(&s, &json("{}"), &Config::default()).unwrap();
        assert_eq!(missing.get("note"), Some(&Value::Null));

        let null = from_raw(&s, &json(r#"{"note": null}"#), &Config::default()).unwrap();
        assert_eq!(null.get("note"), Some(&Value::Null));

        let present = from_raw(&s, &json(r#"{"note": "hi"}"#), &Config::default()).unwrap();
        assert_eq!(present.get("note"), Some(&Value::from("hi")));
    }

    #[test]
    fn test_non_init_field_is_not_read() {
        let s = schema(
            "S",
            vec![
                FieldSpec::new("x", TypeDesc::int()),
                FieldSpec::builder("cache", TypeDesc::int())
                    .default(0)
                    .init(false)
                    .build()
                    .unwrap(),
            ],
        );
        let record = from_raw(&s, &json(r#"{"x": 1, "cache": 99}"#), &Config::default()).unwrap();
        assert_eq!(record.get("cache"), Some(&Value::Int(0)));
    }

    // Type checking

    #[test]
    fn test_wrong_type() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::int())]);
        let err = from_raw(&s, &json(r#"{"x": "1"}"#), &Config::default()).unwrap_err();
        match err {
            Error::WrongType { path, expected, actual } => {
                assert_eq!(path, "x");
                assert_eq!(expected, "int");
                assert_eq!(actual, "str");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_types_disabled() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::int())]);
        let config = Config::builder().check_types(false).build();
        let record = from_raw(&s, &json(r#"{"x": "1"}"#), &config).unwrap();
        assert_eq!(record.get("x"), Some(&Value::from("1")));
    }

    #[test]
    fn test_transforms_run_before_type_check() {
        let s = schema(
            "S",
            vec![
                FieldSpec::new("x", TypeDesc::int()),
                FieldSpec::new("names", TypeDesc::list(TypeDesc::str())),
            ],
        );
        let config = Config::builder()
            .transform_arc(TypeDesc::int(), built_in::to_int())
            .transform_arc(TypeDesc::str(), built_in::to_str())
            .build();
        let record = from_raw(&s, &json(r#"{"x": "42", "names": [1, 2]}"#), &config).unwrap();
        assert_eq!(record.get("x"), Some(&Value::Int(42)));
        assert_eq!(
            record.get("names"),
            Some(&Value::List(vec![Value::from("1"), Value::from("2")]))
        );
    }

    #[test]
    fn test_failing_transform_is_reported() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::int())]);
        let config = Config::builder()
            .transform(TypeDesc::int(), |_| Err(anyhow::anyhow!("nope").into()))
            .build();
        let err = from_raw(&s, &json(r#"{"x": 1}"#), &config).unwrap_err();
        assert!(matches!(err, Error::Transform { .. }));
    }

    #[test]
    fn test_literal_field() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::literal(["a", "b"]))]);
        let config = Config::builder().check_types(false).build();

        let record = from_raw(&s, &json(r#"{"x": "a"}"#), &config).unwrap();
        assert_eq!(record.get("x"), Some(&Value::from("a")));

        let err = from_raw(&s, &json(r#"{"x": "zzz"}"#), &config).unwrap_err();
        match err {
            Error::InvalidValue { path, value, .. } => {
                assert_eq!(path, "x");
                assert_eq!(value, "\"zzz\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_integer_beyond_i64_fails_int_field() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::int())]);
        let err = from_raw(&s, &json(r#"{"x": 18446744073709551615}"#), &Config::default()).unwrap_err();
        match err {
            Error::WrongType { path, actual, .. } => {
                assert_eq!(path, "x");
                assert_eq!(actual, "float");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_enum_field() {
        let s = schema("S", vec![FieldSpec::new("status", status())]);
        let record = from_raw(&s, &json(r#"{"status": "closed"}"#), &Config::default()).unwrap();
        match record.get("status") {
            Some(Value::Enum(member)) => assert_eq!(member.member, "Closed"),
            other => panic!("unexpected value: {other:?}"),
        }

        let err = from_raw(&s, &json(r#"{"status": "lost"}"#), &Config::default()).unwrap_err();
        match err {
            Error::InvalidValue { path, .. } => assert_eq!(path, "status"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_lists_become_tuples_and_sets() {
        let s = schema(
            "S",
            vec![
                FieldSpec::new("pair", price_type()),
                FieldSpec::new("ids", TypeDesc::tuple([TypeDesc::int()])),
                FieldSpec::new("tags", TypeDesc::set(TypeDesc::str())),
            ],
        );
        let record = from_raw(
            &s,
            &json(r#"{"pair": [1.5, "SEK"], "ids": [1, 2, 3], "tags": ["a", "b", "a"]}"#),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(
            record.get("pair"),
            Some(&Value::Tuple(vec![Value::Float(1.5), Value::from("SEK")]))
        );
        assert_eq!(
            record.get("ids"),
            Some(&Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
        assert_eq!(
            record.get("tags"),
            Some(&Value::Set(vec![Value::from("a"), Value::from("b")].into_iter().collect()))
        );
    }

    #[test]
    fn test_fixed_tuple_wrong_arity_fails_type_check() {
        let s = schema("S", vec![FieldSpec::new("pair", price_type())]);
        let err = from_raw(&s, &json(r#"{"pair": [1.5]}"#), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::WrongType { .. }));
    }

    // Nested records

    fn customer() -> RecordSchema {
        schema(
            "Customer",
            vec![
                FieldSpec::new("name", TypeDesc::str()),
                from_field("email", TypeDesc::optional(TypeDesc::str()), "mail").build().unwrap(),
            ],
        )
    }

    #[test]
    fn test_nested_record() {
        let order = schema("Order", vec![FieldSpec::new("customer", customer().into_type())]);
        let record = from_raw(
            &order,
            &json(r#"{"customer": {"name": "Ada", "mail": "ada@example.com"}}"#),
            &Config::default(),
        )
        .unwrap();
        let nested = record.get("customer").and_then(Value::as_record).unwrap();
        assert_eq!(nested.name, "Customer");
        assert_eq!(nested.get("email"), Some(&Value::from("ada@example.com")));
    }

    #[test]
    fn test_nested_error_path() {
        let order = schema("Order", vec![FieldSpec::new("customer", customer().into_type())]);
        let err = from_raw(&order, &json(r#"{"customer": {}}"#), &Config::default()).unwrap_err();
        match err {
            Error::MissingValue { path } => assert_eq!(path, "customer.name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_of_records() {
        let team = schema("Team", vec![FieldSpec::new("members", TypeDesc::list(customer().into_type()))]);
        let record = from_raw(
            &team,
            &json(r#"{"members": [{"name": "Ada"}, {"name": "Bob"}]}"#),
            &Config::default(),
        )
        .unwrap();
        match record.get("members") {
            Some(Value::List(items)) => {
                assert_eq!(items.len(), 2);
                assert!(items.iter().all(|item| item.as_record().is_some()));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_nested_record_wrong_shape() {
        let order = schema("Order", vec![FieldSpec::new("customer", customer().into_type())]);
        let err = from_raw(&order, &json(r#"{"customer": "Ada"}"#), &Config::default()).unwrap_err();
        match err {
            Error::WrongType { path, expected, .. } => {
                assert_eq!(path, "customer");
                assert_eq!(expected, "Customer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // Unions

    #[test]
    fn test_union_picks_matching_alternative() {
        let s = schema("S", vec![FieldSpec::new("v", TypeDesc::union([TypeDesc::int(), TypeDesc::str()]))]);
        let record = from_raw(&s, &json(r#"{"v": "a"}"#), &Config::default()).unwrap();
        assert_eq!(record.get("v"), Some(&Value::from("a")));
    }

    #[test]
    fn test_union_no_match() {
        let s = schema("S", vec![FieldSpec::new("v", TypeDesc::union([TypeDesc::int(), TypeDesc::str()]))]);
        let err = from_raw(&s, &json(r#"{"v": 1.5}"#), &Config::default()).unwrap_err();
        match err {
            Error::UnionMatch { path, .. } => assert_eq!(path, "v"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_union_of_records() {
        let a = schema("A", vec![FieldSpec::new("a", TypeDesc::int())]);
        let b = schema("B", vec![FieldSpec::new("b", TypeDesc::str())]);
        let s = schema("S", vec![FieldSpec::new("v", TypeDesc::union([a.into_type(), b.into_type()]))]);
        let record = from_raw(&s, &json(r#"{"v": {"b": "x"}}"#), &Config::default()).unwrap();
        let chosen = record.get("v").and_then(Value::as_record).unwrap();
        assert_eq!(chosen.name, "B");
    }

    #[test]
    fn test_strict_unions_match_rejects_ambiguity() {
        let s = schema("S", vec![FieldSpec::new("v", TypeDesc::union([TypeDesc::int(), TypeDesc::float()]))]);

        let relaxed = from_raw(&s, &json(r#"{"v": 1}"#), &Config::default()).unwrap();
        assert_eq!(relaxed.get("v"), Some(&Value::Int(1)));

        let config = Config::builder().strict_unions_match(true).build();
        let err = from_raw(&s, &json(r#"{"v": 1}"#), &config).unwrap_err();
        assert!(matches!(err, Error::UnionMatch { .. }));

        let unambiguous = from_raw(&s, &json(r#"{"v": 1.5}"#), &config).unwrap();
        assert_eq!(unambiguous.get("v"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn test_optional_union() {
        let s = schema(
            "S",
            vec![FieldSpec::new(
                "v",
                TypeDesc::optional(TypeDesc::union([TypeDesc::int(), TypeDesc::str()])),
            )],
        );
        let record = from_raw(&s, &json(r#"{"v": "x"}"#), &Config::default()).unwrap();
        assert_eq!(record.get("v"), Some(&Value::from("x")));
        let record = from_raw(&s, &json(r#"{"v": null}"#), &Config::default()).unwrap();
        assert_eq!(record.get("v"), Some(&Value::Null));
    }

    fn plus_one(value: &Value) -> crate::Result<Value> {
        Ok(Value::Int(value.as_i64().unwrap_or_default() + 1))
    }

    fn times_ten(value: &Value) -> crate::Result<Value> {
        Ok(Value::Int(value.as_i64().unwrap_or_default() * 10))
    }

    #[test]
    fn test_union_transform_applies_once() {
        let int_or_str = TypeDesc::union([TypeDesc::int(), TypeDesc::str()]);
        let s = schema("S", vec![FieldSpec::new("x", int_or_str.clone())]);
        let config = Config::builder()
            .transform(int_or_str, plus_one)
            .transform(TypeDesc::int(), times_ten)
            .build();
        let record = from_raw(&s, &json(r#"{"x": 1}"#), &config).unwrap();
        assert_eq!(record.get("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_union_alternative_transform_applies_once() {
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::union([TypeDesc::int(), TypeDesc::str()]))]);
        let config = Config::builder().transform(TypeDesc::int(), times_ten).build();
        let record = from_raw(&s, &json(r#"{"x": 1}"#), &config).unwrap();
        assert_eq!(record.get("x"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_transform_on_optional_union_applies_once() {
        let declared = TypeDesc::optional(TypeDesc::union([TypeDesc::int(), TypeDesc::str()]));
        let s = schema(
            "S",
            vec![
                FieldSpec::new("x", declared.clone()),
                FieldSpec::new("items", TypeDesc::list(declared.clone())),
            ],
        );
        let config = Config::builder()
            .transform(declared, plus_one)
            .transform(TypeDesc::int(), times_ten)
            .build();
        let record = from_raw(&s, &json(r#"{"x": 1, "items": [1, 2]}"#), &config).unwrap();
        assert_eq!(record.get("x"), Some(&Value::Int(2)));
        assert_eq!(
            record.get("items"),
            Some(&Value::List(vec![Value::Int(2), Value::Int(3)]))
        );
    }

    // Strict mode

    #[test]
    fn test_strict_mode_rejects_unconsumed_keys() {
        let s = schema(
            "S",
            vec![
                FieldSpec::new("x", TypeDesc::int()),
                composite_field("price", price_type(), ["amount", "currency"]).build().unwrap(),
            ],
        );
        let config = Config::builder().strict(true).build();
        let data = json(r#"{"x": 1, "amount": 1.0, "currency": "SEK"}"#);
        assert!(from_raw(&s, &data, &config).is_ok());

        let mut extra = data.clone();
        extra.insert("extra", 1);
        match from_raw(&s, &extra, &config).unwrap_err() {
            Error::UnexpectedData { keys } => assert_eq!(keys, vec!["extra".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(from_raw(&s, &extra, &Config::default()).is_ok());
    }

    #[test]
    fn test_options_from_yaml() {
        let options = ConfigOptions::from_yaml_str("strict: true\ncheck_types: false\n").unwrap();
        let config = Config::builder().options(options).build();
        let s = schema("S", vec![FieldSpec::new("x", TypeDesc::int())]);
        assert!(from_raw(&s, &json(r#"{"x": "1"}"#), &config).is_ok());
        assert!(from_raw(&s, &json(r#"{"x": 1, "y": 2}"#), &config).is_err());
    }

    // Serde factory

    #[derive(Debug, Deserialize, PartialEq)]
    enum Status {
        Open,
        Closed,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Customer {
        name: String,
        email: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Order {
        id: i64,
        status: Status,
        price: (f64, String),
        customer: Customer,
    }

    #[test]
    fn test_from_raw_into_serde_type() {
        let order = schema(
            "Order",
            vec![
                from_field("id", TypeDesc::int(), "order_id").build().unwrap(),
                FieldSpec::new("status", status()),
                composite_field("price", price_type(), ["amount", "currency"]).build().unwrap(),
                FieldSpec::new("customer", customer().into_type()),
            ],
        );
        let data = json(
            r#"{
                "order_id": 7,
                "status": "open",
                "amount": 100,
                "currency": "SEK",
                "customer": {"name": "Ada"}
            }"#,
        );

        let converted: Order = from_raw_into(&order, &data, &Config::default()).unwrap();
        assert_eq!(
            converted,
            Order {
                id: 7,
                status: Status::Open,
                price: (100.0, "SEK".to_string()),
                customer: Customer {
                    name: "Ada".to_string(),
                    email: None,
                },
            }
        );
    }
}
