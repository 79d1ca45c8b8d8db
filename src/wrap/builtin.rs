use crate::wrap::{RegistryBuilder, Result, TypeDef, TypeDescriptor};

/// Styling line of one gauge step in an indicator trace. Declares no fields.
pub const GAUGE_STEP_LINE: TypeDescriptor = TypeDescriptor::new_static("Line", "plotly.graph_objs.indicator.gauge.step");

/// Register every built-in declaration.
pub fn register_builtins(builder: &mut RegistryBuilder) -> Result<()> {
	builder.register(TypeDef::marker(GAUGE_STEP_LINE))
}
