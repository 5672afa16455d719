use filterstate::encode::{encode, EncodeOptions};
use filterstate::error::FilterError;
use filterstate::hydrate::hydrate;
use filterstate::merge::merge;
use filterstate::model::{
    BooleanFilter, MultiSelectFilter, RangeFilter, RangeType, SelectFilter, TransformerFilter,
};
use filterstate::params::RawParams;
use filterstate::registry::Registry;
use filterstate::state::TableOptions;
use serde_json::{json, Value};

fn registry() -> Registry {
    Registry::builder()
        .filter("k_bool", BooleanFilter::new("flag", "on"))
        .filter("k_range", RangeFilter::new("amount", RangeType::Number))
        .filter("k_select", SelectFilter::new("kind"))
        .filter("k_multi", MultiSelectFilter::new("labels"))
        .filter("k_custom", TransformerFilter::new("geo"))
        .build()
}

fn params(value: Value) -> RawParams {
    RawParams::from_json(value).unwrap()
}

fn options(filters: Value) -> TableOptions {
    serde_json::from_value(json!({ "filters": filters })).unwrap()
}

fn filters_of(options: &TableOptions) -> Value {
    serde_json::to_value(&options.filters).unwrap()
}

#[test]
fn merge_with_empty_params_after_merge_is_stable() {
    let registry = registry();
    let inputs = [
        json!({"k_bool": "true"}),
        json!({"k_range": {"min": "1", "max": "2"}, "k_multi": ["x"]}),
        json!({"k_select": ["[\"a\"]"], "k_custom": {"lat": 1}}),
    ];
    for input in inputs {
        let once = merge(&TableOptions::default(), &params(input), &registry).unwrap();
        let twice = merge(&once, &RawParams::new(), &registry).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn boolean_activates_encodes_and_deactivates() {
    let registry = registry();
    let on = merge(&TableOptions::default(), &params(json!({"k_bool": "true"})), &registry).unwrap();

    let live = hydrate(&on.filters, &registry).unwrap();
    let wire = encode(&live, &EncodeOptions::default());
    assert_eq!(Value::Object(wire), json!({"k_bool": "on"}));

    let off = merge(&on, &params(json!({"k_bool": "false"})), &registry).unwrap();
    assert!(off.filters.is_empty());
}

#[test]
fn multi_select_of_only_empty_strings_clears() {
    let previous = options(json!({"k_multi": {"selected": ["a", "b"]}}));
    let merged = merge(&previous, &params(json!({"k_multi": ["", ""]})), &registry()).unwrap();
    assert!(!merged.filters.contains_key("k_multi"));
}

#[test]
fn multi_select_drops_blanks_and_keeps_order() {
    let merged = merge(
        &TableOptions::default(),
        &params(json!({"k_multi": ["a", "", "b"]})),
        &registry(),
    )
    .unwrap();
    assert_eq!(filters_of(&merged), json!({"k_multi": {"selected": ["a", "b"]}}));
}

#[test]
fn range_strings_pass_through_merge() {
    let merged = merge(
        &TableOptions::default(),
        &params(json!({"k_range": {"min": "1", "max": "10"}})),
        &registry(),
    )
    .unwrap();
    assert_eq!(filters_of(&merged), json!({"k_range": {"min": "1", "max": "10"}}));
}

#[test]
fn select_bracket_form_sets_id() {
    let merged = merge(
        &TableOptions::default(),
        &params(json!({"k_select": ["[42]"]})),
        &registry(),
    )
    .unwrap();
    assert_eq!(filters_of(&merged), json!({"k_select": {"id": [42]}}));
}

#[test]
fn list_for_select_key_changes_nothing() {
    let previous = options(json!({"k_select": {"id": [7]}}));
    let merged = merge(&previous, &params(json!({"k_select": ["a", "b"]})), &registry()).unwrap();
    assert_eq!(merged, previous);
}

#[test]
fn encoder_omits_empty_multi_select_and_transformer() {
    let registry = registry();
    let state = options(json!({
        "k_multi": {"selected": []},
        "k_custom": {}
    }));
    let live = hydrate(&state.filters, &registry).unwrap();
    assert_eq!(live.len(), 2);
    assert!(encode(&live, &EncodeOptions::default()).is_empty());
}

#[test]
fn malformed_bracket_is_a_parse_error() {
    let err = merge(
        &TableOptions::default(),
        &params(json!({"k": ["[not valid]"]})),
        &registry(),
    )
    .unwrap_err();
    assert!(matches!(err, FilterError::MalformedValue { .. }));
}

#[test]
fn transformer_maps_shaped_like_other_payloads_reach_the_wire() {
    let registry = registry();
    for data in [
        json!({"min": "1", "max": "10"}),
        json!({"id": [4]}),
        json!({"selected": ["north", "east"]}),
    ] {
        let merged = merge(
            &TableOptions::default(),
            &params(json!({ "k_custom": data.clone() })),
            &registry,
        )
        .unwrap();

        // Stored state goes through JSON between requests.
        let stored: TableOptions =
            serde_json::from_value(serde_json::to_value(&merged).unwrap()).unwrap();

        let live = hydrate(&stored.filters, &registry).unwrap();
        assert_eq!(live.len(), 1, "transformer dropped for {data}");
        let wire = encode(&live, &EncodeOptions::default());
        assert_eq!(Value::Object(wire), json!({ "k_custom": data }));
    }
}

#[test]
fn range_defaults_fill_blank_bounds_on_the_wire() {
    let registry = Registry::builder()
        .filter(
            "k_range",
            RangeFilter::new("amount", RangeType::Number).defaults(Some(json!(0)), None),
        )
        .build();
    let merged = merge(
        &TableOptions::default(),
        &params(json!({"k_range": {"min": "", "max": "50"}})),
        &registry,
    )
    .unwrap();
    let live = hydrate(&merged.filters, &registry).unwrap();
    let wire = encode(&live, &EncodeOptions::default());
    assert_eq!(Value::Object(wire), json!({"k_range": {"min": 0, "max": 50}}));
}
