use crate::wrap::{
	ExtraFields, FieldKind, GAUGE_STEP_LINE, Registry, RegistryBuilder, TypeDef, TypeDescriptor, TypeSchema, Value, WrappedList, WrappedObject, register_builtins,
};

pub(crate) const STEP: TypeDescriptor = TypeDescriptor::new_static("Step", "plotly.graph_objs.indicator.gauge");
pub(crate) const GAUGE: TypeDescriptor = TypeDescriptor::new_static("Gauge", "plotly.graph_objs.indicator");

pub(crate) fn step_schema() -> TypeSchema {
	TypeSchema::marker()
		.field("color", FieldKind::STRING)
		.field("thickness", FieldKind::NUMBER)
		.field("range", FieldKind::list(FieldKind::NUMBER))
		.field("line", FieldKind::Object(GAUGE_STEP_LINE))
		.field("name", FieldKind::STRING)
}

pub(crate) fn gauge_schema() -> TypeSchema {
	TypeSchema::marker()
		.field("shape", FieldKind::STRING)
		.field("steps", FieldKind::list(FieldKind::Object(STEP)))
		.field("tickcount", FieldKind::INTEGER)
		.field("visible", FieldKind::BOOL)
		.with_extra(ExtraFields::Keep)
}

pub(crate) fn new_gauge() -> WrappedObject {
	WrappedObject::new(GAUGE).with_field("shape", "angular").with_field("steps", WrappedList::new())
}

pub(crate) fn gauge_builder() -> RegistryBuilder {
	let mut builder = Registry::builder();
	register_builtins(&mut builder).expect("builtins register");
	builder.register(TypeDef::with_schema(STEP, step_schema())).expect("step registers");
	builder.register(TypeDef::new(GAUGE, gauge_schema(), new_gauge)).expect("gauge registers");
	builder
}

pub(crate) fn gauge_registry() -> Registry {
	gauge_builder().build().expect("registry builds")
}

pub(crate) fn sample_step(color: &str, from: f64, to: f64) -> WrappedObject {
	let range: WrappedList = vec![Value::F64(from), Value::F64(to)].into();
	WrappedObject::new(STEP)
		.with_field("color", color)
		.with_field("range", range)
		.with_field("line", WrappedObject::new(GAUGE_STEP_LINE))
}
