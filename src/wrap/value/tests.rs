use crate::wrap::{FieldPath, TypeDescriptor, Value, WrappedList, WrappedObject};

const STEP: TypeDescriptor = TypeDescriptor::new_static("Step", "plotly.graph_objs.indicator.gauge");
const LINE: TypeDescriptor = TypeDescriptor::new_static("Line", "plotly.graph_objs.indicator.gauge.step");

#[test]
fn set_raw_replaces_existing_field_in_place() {
	let mut step = WrappedObject::new(STEP);
	assert_eq!(step.set_raw("color", "red"), None);
	step.set_raw("thickness", 0.5);

	let previous = step.set_raw("color", "blue");
	assert_eq!(previous, Some(Value::from("red")));
	assert_eq!(step.len(), 2);
	assert_eq!(step.get("color").and_then(Value::as_str), Some("blue"));
	assert_eq!(step.fields()[0].name.as_ref(), "color");
}

#[test]
fn remove_drops_field() {
	let mut step = WrappedObject::new(STEP).with_field("color", "red");
	assert_eq!(step.remove("color"), Some(Value::from("red")));
	assert_eq!(step.remove("color"), None);
	assert!(step.is_empty());
}

#[test]
fn equality_ignores_field_order() {
	let a = WrappedObject::new(STEP).with_field("color", "red").with_field("thickness", 0.5);
	let b = WrappedObject::new(STEP).with_field("thickness", 0.5).with_field("color", "red");
	assert_eq!(a, b);
}

#[test]
fn equality_compares_descriptor() {
	let typed = WrappedObject::new(LINE);
	let untyped = WrappedObject::untyped();
	assert_ne!(typed, untyped);
	assert_eq!(untyped.type_label(), "<untyped>");
	assert_eq!(typed.type_label(), "plotly.graph_objs.indicator.gauge.step.Line");
}

#[test]
fn equality_detects_extra_field() {
	let a = WrappedObject::new(STEP).with_field("color", "red");
	let b = WrappedObject::new(STEP).with_field("color", "red").with_field("thickness", 0.5);
	assert_ne!(a, b);
	assert_ne!(b, a);
}

#[test]
fn large_unsigned_values_stay_unsigned() {
	assert_eq!(Value::from(7_u64), Value::I64(7));
	assert_eq!(Value::from(u64::MAX), Value::U64(u64::MAX));
	assert_eq!(Value::from(u64::MAX).kind_name(), "integer");
}

#[test]
fn lookup_walks_objects_and_lists() {
	let line = WrappedObject::new(LINE).with_field("width", 2_i64);
	let step = WrappedObject::new(STEP).with_field("line", line);
	let steps: WrappedList = vec![Value::Null, Value::from(step)].into();
	let gauge = WrappedObject::untyped().with_field("steps", steps);

	let path = FieldPath::parse("steps[1].line.width").expect("path parses");
	assert_eq!(gauge.lookup(&path), Some(&Value::I64(2)));

	let missing = FieldPath::parse("steps[5].line").expect("path parses");
	assert_eq!(gauge.lookup(&missing), None);

	let wrong_shape = FieldPath::parse("steps.line").expect("path parses");
	assert_eq!(gauge.lookup(&wrong_shape), None);
}

#[test]
fn list_preserves_push_order() {
	let mut list = WrappedList::new();
	list.push("a");
	list.push(1_i64);
	list.push(true);

	let kinds: Vec<&str> = list.iter().map(Value::kind_name).collect();
	assert_eq!(kinds, vec!["string", "integer", "bool"]);
}

#[test]
fn lookup_reaches_keys_through_quoted_selectors() {
	let meta = WrappedObject::untyped().with_field("line-width", 3_i64);
	let gauge = WrappedObject::untyped().with_field("meta", meta);

	let path = FieldPath::parse(r#"meta["line-width"]"#).expect("path parses");
	assert_eq!(gauge.lookup(&path), Some(&Value::I64(3)));
}
