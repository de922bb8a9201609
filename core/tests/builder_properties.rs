//! End-to-end properties of the builder algebra, exercised through the
//! public surface only.

use fluent_schema_core::{
    AnySchema, Items, TypeTag, TypeValue, list, merge_schemas, number, object,
    omit_from_schema, pick_from_schema, shape, string,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

#[test]
fn test_nullable_is_idempotent() {
    let once = string().nullable();
    let twice = string().nullable().nullable();
    assert_eq!(once.node().kind, twice.node().kind);
}

#[test]
fn test_enum_then_nullable_gains_null_sentinel() {
    let schema = string().enum_values(["a", "b"]).nullable();
    assert_eq!(
        schema.node().kind,
        Some(TypeValue::Many(vec![TypeTag::Null, TypeTag::String]))
    );
    assert_eq!(
        schema.node().enumeration,
        Some(vec![json!("a"), json!("b"), Value::Null])
    );
}

#[test]
fn test_required_tracking_round_trip() {
    let required = object().prop("x", string());
    assert_eq!(required.node().required, Some(vec!["x".to_string()]));

    let optional = object().prop("x", string().optional());
    assert_eq!(optional.node().required, None);
}

#[test]
fn test_partial_strips_objects_but_not_array_items() {
    let schema = shape(
        [
            ("a", shape([("b", string().erase())], false).erase()),
            ("arr", list(shape([("c", string().erase())], false)).erase()),
        ],
        false,
    );
    let partial = schema.partial();
    let props = partial.node().properties.clone().unwrap();

    assert_eq!(partial.node().required, None);
    assert_eq!(props["a"].required, None);

    let Some(Items::One(item)) = props["arr"].items.clone() else {
        panic!("arr should keep its items schema");
    };
    assert_eq!(item.required, Some(vec!["c".to_string()]));
}

#[test]
fn test_merge_schemas_gates_required_on_base_flag() {
    let base = shape([("a", string().erase())], false).optional();
    let overlay = shape([("b", string().erase())], false);

    let merged = merge_schemas(&base, &overlay);
    let props = merged.node().properties.clone().unwrap();
    assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(
        merged.node().required,
        Some(vec!["a".to_string()]),
        "overlay's required entries must be dropped when the base is optional"
    );
}

#[test]
fn test_identical_construction_sequences_serialize_identically() {
    let build = || {
        shape(
            [
                ("z", string().min_length(1).erase()),
                ("a", number().optional().erase()),
            ],
            false,
        )
        .title("doc")
    };
    assert_eq!(
        serde_json::to_string(&build()).unwrap(),
        serde_json::to_string(&build()).unwrap()
    );
}

#[test]
fn test_property_insertion_order_survives_serialization() {
    let schema = object()
        .prop("zulu", string())
        .prop("alpha", string())
        .prop("mike", string());
    let serialized = serde_json::to_string(&schema).unwrap();
    let zulu = serialized.find("zulu").unwrap();
    let alpha = serialized.find("alpha").unwrap();
    let mike = serialized.find("mike").unwrap();
    assert!(zulu < alpha && alpha < mike);
}

fn builder_for(choice: u8) -> AnySchema {
    match choice {
        0 => string().erase(),
        1 => number().erase(),
        2 => object().erase(),
        _ => fluent_schema_core::any(),
    }
}

proptest! {
    #[test]
    fn prop_nullable_idempotent_for_every_base_type(choice in 0u8..4) {
        let once = builder_for(choice).nullable();
        let twice = builder_for(choice).nullable().nullable();
        prop_assert_eq!(once.node(), twice.node());
    }

    #[test]
    fn prop_pick_and_omit_partition_the_property_set(
        names in proptest::collection::btree_set("[a-z]{1,6}", 1..6),
        picks in proptest::collection::vec(any::<bool>(), 6),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let props: Vec<(String, AnySchema)> = names
            .iter()
            .map(|name| (name.clone(), string().erase()))
            .collect();
        let schema = shape(props, false);

        let chosen: Vec<&str> = names
            .iter()
            .zip(picks.iter())
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name.as_str())
            .collect();

        let picked = pick_from_schema(&schema, &chosen);
        let omitted = omit_from_schema(&schema, &chosen);

        let picked_keys: Vec<String> =
            picked.node().properties.clone().unwrap().into_keys().collect();
        let omitted_keys: Vec<String> =
            omitted.node().properties.clone().unwrap().into_keys().collect();

        prop_assert!(picked_keys.iter().all(|key| !omitted_keys.contains(key)));

        let mut union: Vec<String> = picked_keys.into_iter().chain(omitted_keys).collect();
        union.sort();
        let mut expected = names.clone();
        expected.sort();
        prop_assert_eq!(union, expected);
    }
}
