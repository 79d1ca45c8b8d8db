use wrapreg::wrap::Value;

/// Output truncation and formatting limits for wrapped values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for lists.
	pub max_list_items: usize,
	/// Maximum recursive print depth for nested lists/objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 80,
			max_string_len: 200,
			max_list_items: 16,
			max_print_depth: 8,
		}
	}
}

/// Render one wrapped value tree as indented text.
pub fn render_value(value: &Value, options: PrintOptions) -> String {
	let mut out = String::new();
	write_value(&mut out, value, 0, 0, options);
	out
}

fn write_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Null => out.push_str(&format!("{pad}null\n")),
		Value::Bool(v) => out.push_str(&format!("{pad}{v}\n")),
		Value::I64(v) => out.push_str(&format!("{pad}{v}\n")),
		Value::U64(v) => out.push_str(&format!("{pad}{v}\n")),
		Value::F64(v) => out.push_str(&format!("{pad}{v}\n")),
		Value::String(v) => out.push_str(&format!("{pad}\"{}\"\n", truncate(v, options.max_string_len))),
		Value::List(items) => {
			if depth >= options.max_print_depth {
				out.push_str(&format!("{pad}[... {} items]\n", items.len()));
				return;
			}
			out.push_str(&format!("{pad}[\n"));
			for item in items.iter().take(options.max_list_items) {
				write_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_list_items {
				out.push_str(&format!("{pad}  ... {} more\n", items.len() - options.max_list_items));
			}
			out.push_str(&format!("{pad}]\n"));
		}
		Value::Object(item) => {
			let label = item.type_label();
			if depth >= options.max_print_depth {
				out.push_str(&format!("{pad}{label} {{ ... }}\n"));
				return;
			}
			out.push_str(&format!("{pad}{label} {{\n"));
			for (name, field) in item.iter().take(options.max_fields_per_object) {
				out.push_str(&format!("{pad}  {name} = "));
				if matches!(field, Value::Object(_) | Value::List(_)) {
					out.push('\n');
					write_value(out, field, indent + 4, depth + 1, options);
				} else {
					write_value(out, field, 0, depth + 1, options);
				}
			}
			if item.len() > options.max_fields_per_object {
				out.push_str(&format!("{pad}  ... {} more fields\n", item.len() - options.max_fields_per_object));
			}
			out.push_str(&format!("{pad}}}\n"));
		}
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests {
	use wrapreg::wrap::{GAUGE_STEP_LINE, Value, WrappedList, WrappedObject};

	use super::{PrintOptions, render_value};

	#[test]
	fn nested_objects_render_with_type_labels() {
		let line = WrappedObject::new(GAUGE_STEP_LINE);
		let range: WrappedList = vec![Value::I64(0), Value::F64(50.5)].into();
		let step = WrappedObject::untyped().with_field("color", "red").with_field("range", range).with_field("line", line);

		let text = render_value(&Value::Object(step), PrintOptions::default());
		let expected = "<untyped> {\n  color = \"red\"\n  range = \n    [\n      0\n      50.5\n    ]\n  line = \n    plotly.graph_objs.indicator.gauge.step.Line {\n    }\n}\n";
		assert_eq!(text, expected);
	}

	#[test]
	fn long_lists_and_strings_are_truncated() {
		let items: WrappedList = (0..5).map(Value::I64).collect();
		let options = PrintOptions {
			max_list_items: 2,
			max_string_len: 3,
			..PrintOptions::default()
		};

		let text = render_value(&Value::List(items), options);
		assert!(text.contains("... 3 more"), "unexpected render: {text}");

		let text = render_value(&Value::from("abcdef"), options);
		assert_eq!(text, "\"abc...\"\n");
	}

	#[test]
	fn depth_limit_collapses_nested_values() {
		let inner = WrappedObject::untyped().with_field("x", 1_i64);
		let outer = WrappedObject::untyped().with_field("inner", inner);
		let options = PrintOptions {
			max_print_depth: 1,
			..PrintOptions::default()
		};

		let text = render_value(&Value::Object(outer), options);
		assert!(text.contains("<untyped> { ... }"), "unexpected render: {text}");
	}
}
