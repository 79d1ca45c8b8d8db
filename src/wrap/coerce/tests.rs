use serde_json::json;

use crate::wrap::test_support::{GAUGE, STEP, gauge_registry, sample_step};
use crate::wrap::{GAUGE_STEP_LINE, Value, WrapError, WrappedList, WrappedObject};

#[test]
fn assign_tree_wraps_nested_objects_into_declared_type() {
	let registry = gauge_registry();
	let mut step = registry.construct(&STEP).expect("step constructs");

	registry.assign_tree(&mut step, "line", &json!({})).expect("line assigns");
	let line = step.get("line").and_then(Value::as_object).expect("line is wrapped");
	assert_eq!(line.descriptor(), Some(&GAUGE_STEP_LINE));
}

#[test]
fn assign_tree_wraps_sequences_into_lists() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");

	registry
		.assign_tree(&mut gauge, "steps", &json!([{"color": "green"}, {"color": "red", "range": [0, 50.5]}]))
		.expect("steps assign");

	let steps = gauge.get("steps").and_then(Value::as_list).expect("steps is a list");
	assert_eq!(steps.len(), 2);
	let second = steps.get(1).and_then(Value::as_object).expect("second step is wrapped");
	assert_eq!(second.descriptor(), Some(&STEP));
	let range = second.get("range").and_then(Value::as_list).expect("range is a list");
	assert_eq!(range.items(), &[Value::I64(0), Value::F64(50.5)]);
}

#[test]
fn assign_stores_primitives() {
	let registry = gauge_registry();
	let mut step = registry.construct(&STEP).expect("step constructs");

	registry.assign(&mut step, "color", "orange").expect("color assigns");
	registry.assign(&mut step, "thickness", 0.75).expect("thickness assigns");
	assert_eq!(step.get("color"), Some(&Value::from("orange")));
	assert_eq!(step.get("thickness"), Some(&Value::F64(0.75)));
}

#[test]
fn null_is_accepted_for_any_kind() {
	let registry = gauge_registry();
	let mut step = registry.construct(&STEP).expect("step constructs");
	registry.assign(&mut step, "line", Value::Null).expect("null line assigns");
	registry.assign_tree(&mut step, "range", &json!(null)).expect("null range assigns");
	assert_eq!(step.get("line"), Some(&Value::Null));
}

#[test]
fn mismatched_scalar_leaves_object_unchanged() {
	let registry = gauge_registry();
	let mut step = registry.construct(&STEP).expect("step constructs");
	registry.assign(&mut step, "color", "red").expect("color assigns");

	let err = registry.assign(&mut step, "color", 12_i64).expect_err("number into string should fail");
	match err {
		WrapError::FieldTypeMismatch { path, expected, got } => {
			assert_eq!(path, "color");
			assert_eq!(expected, "string");
			assert_eq!(got, "integer");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(step.get("color"), Some(&Value::from("red")));
}

#[test]
fn nested_mismatch_reports_full_path_and_assigns_nothing() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");
	let before = gauge.clone();

	let err = registry
		.assign_tree(&mut gauge, "steps", &json!([{"color": "green"}, {"range": [0, "high"]}]))
		.expect_err("string in number list should fail");
	match err {
		WrapError::FieldTypeMismatch { path, expected, got } => {
			assert_eq!(path, "steps[1].range[1]");
			assert_eq!(expected, "number");
			assert_eq!(got, "string");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(gauge, before);
}

#[test]
fn wrong_typed_object_is_rejected() {
	let registry = gauge_registry();
	let mut step = registry.construct(&STEP).expect("step constructs");
	let err = registry
		.assign(&mut step, "line", WrappedObject::new(STEP))
		.expect_err("step in line field should fail");
	assert!(matches!(err, WrapError::FieldTypeMismatch { ref got, .. } if got.contains("Step")));
}

#[test]
fn prewrapped_list_elements_are_checked() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");

	let good: WrappedList = vec![Value::from(sample_step("green", 0.0, 50.0))].into();
	registry.assign(&mut gauge, "steps", good).expect("steps assign");

	let bad: WrappedList = vec![Value::from(sample_step("green", 0.0, 50.0)), Value::from("red")].into();
	let err = registry.assign(&mut gauge, "steps", bad).expect_err("string step should fail");
	assert!(matches!(err, WrapError::FieldTypeMismatch { ref path, .. } if path == "steps[1]"));
}

#[test]
fn undeclared_field_is_rejected_on_strict_type() {
	let registry = gauge_registry();
	let mut line = registry.construct(&GAUGE_STEP_LINE).expect("line constructs");
	let err = registry.assign(&mut line, "width", 2_i64).expect_err("line declares no fields");
	assert!(matches!(err, WrapError::UnknownField { ref path, .. } if path == "width"));
	assert!(line.is_empty());
}

#[test]
fn undeclared_field_is_kept_as_dynamic_data_on_open_type() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");

	registry
		.assign_tree(&mut gauge, "meta", &json!({"owner": "ops", "tags": ["a", {"b": 1}]}))
		.expect("extra field assigns");
	let meta = gauge.get("meta").and_then(Value::as_object).expect("meta is wrapped");
	assert_eq!(meta.descriptor(), None);
	let tags = meta.get("tags").and_then(Value::as_list).expect("tags is a list");
	assert!(tags.get(1).and_then(Value::as_object).is_some());
}

#[test]
fn typed_object_cannot_hide_in_dynamic_field() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");
	let err = registry
		.assign(&mut gauge, "meta", WrappedObject::new(GAUGE_STEP_LINE))
		.expect_err("typed object in any field should fail");
	assert!(matches!(err, WrapError::FieldTypeMismatch { ref expected, .. } if expected == "any"));
}

#[test]
fn integral_float_narrows_to_integer() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");

	registry.assign(&mut gauge, "tickcount", 5.0).expect("integral float assigns");
	assert_eq!(gauge.get("tickcount"), Some(&Value::I64(5)));

	let err = registry.assign(&mut gauge, "tickcount", 5.5).expect_err("fractional float should fail");
	assert!(matches!(err, WrapError::FieldTypeMismatch { .. }));
}

#[test]
fn untyped_objects_accept_any_field() {
	let registry = gauge_registry();
	let mut object = WrappedObject::untyped();
	registry.assign_tree(&mut object, "anything", &json!([1, "two", null])).expect("untyped assigns");
	assert_eq!(object.get("anything").and_then(Value::as_list).map(WrappedList::len), Some(3));
}

#[test]
fn small_unsigned_values_are_stored_as_signed() {
	let registry = gauge_registry();
	let mut gauge = registry.construct(&GAUGE).expect("gauge constructs");

	registry.assign(&mut gauge, "tickcount", Value::U64(5)).expect("u64 assigns");
	assert_eq!(gauge.get("tickcount"), Some(&Value::I64(5)));

	registry.assign(&mut gauge, "tickcount", Value::U64(u64::MAX)).expect("large u64 assigns");
	assert_eq!(gauge.get("tickcount"), Some(&Value::U64(u64::MAX)));

	registry.assign(&mut gauge, "meta", Value::U64(9)).expect("u64 assigns to dynamic field");
	assert_eq!(gauge.get("meta"), Some(&Value::I64(9)));
}
