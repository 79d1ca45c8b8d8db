#![allow(missing_docs)]

use wrapreg::wrap::{
	DecodeOptions, GAUGE_STEP_LINE, Registry, SchemaManifest, TypeDescriptor, Value, WrapError, deserialize, deserialize_tagged, read_tree, register_builtins, serialize,
	serialize_tagged,
};
use wrapreg_testkit::{compressed_fixture, fixture_json, fixture_path};

fn gauge_registry() -> Registry {
	let mut builder = Registry::builder();
	register_builtins(&mut builder).expect("builtins register");
	SchemaManifest::load(fixture_path("gauge_schema.json"))
		.expect("manifest loads")
		.register_into(&mut builder)
		.expect("manifest registers");
	builder.build().expect("registry builds")
}

fn gauge() -> TypeDescriptor {
	TypeDescriptor::parse_qualified("plotly.graph_objs.indicator.Gauge").expect("descriptor parses")
}

#[test]
fn gauge_fixture_round_trips_to_identical_tree() {
	let registry = gauge_registry();
	let tree = fixture_json("gauge.json");

	let object = deserialize(&registry, &gauge(), &tree).expect("fixture deserializes");
	assert_eq!(serialize(&object).expect("object serializes"), tree);
}

#[test]
fn gauge_fixture_wraps_every_step_line() {
	let registry = gauge_registry();
	let object = deserialize(&registry, &gauge(), &fixture_json("gauge.json")).expect("fixture deserializes");

	let steps = object.get("steps").and_then(Value::as_list).expect("steps list");
	assert_eq!(steps.len(), 3);
	let first = steps.get(0).and_then(Value::as_object).expect("first step object");
	let line = first.get("line").and_then(Value::as_object).expect("line object");
	assert_eq!(line.descriptor(), Some(&GAUGE_STEP_LINE));
	assert!(line.is_empty());
}

#[test]
fn compressed_fixture_decodes_like_plain() {
	let registry = gauge_registry();
	let (_, plain) = read_tree(fixture_path("gauge.json")).expect("plain reads");
	let (compression, packed) = read_tree(compressed_fixture("gauge.json")).expect("packed reads");

	assert_eq!(compression.as_str(), "zstd");
	assert_eq!(
		deserialize(&registry, &gauge(), &packed).expect("packed deserializes"),
		deserialize(&registry, &gauge(), &plain).expect("plain deserializes")
	);
}

#[test]
fn tagged_fixture_round_trips() {
	let registry = gauge_registry();
	let tree = fixture_json("gauge_tagged.json");
	let object = deserialize_tagged(&registry, &tree, &DecodeOptions::default()).expect("envelope deserializes");
	assert_eq!(serialize_tagged(&object).expect("object serializes"), tree);
}

#[test]
fn bad_fixture_is_rejected() {
	let registry = gauge_registry();
	let err = deserialize(&registry, &gauge(), &fixture_json("bad_gauge.json")).expect_err("line declares no width");
	assert!(matches!(err, WrapError::UnknownField { ref path, .. } if path == "steps[1].line.width"));
}
