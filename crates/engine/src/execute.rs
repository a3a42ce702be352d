// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_type::{Error, Result};
use serde_json::{Map, Value};
use tracing::trace;

use crate::{Context, MAX_DEPTH, Object, Query, SelectionSet};

/// Resolve every top-level selection of `query` against `root`.
///
/// Results are keyed by alias when one is given. Nested selection sets pick
/// fields out of the resolver's JSON output; lists are projected element-wise
/// and `null` stays `null`. Projection stops with an error once it descends
/// more than [`MAX_DEPTH`] levels into a resolver's output.
pub fn execute(ctx: &Context, root: &Object, root_value: Option<&Value>, query: &Query) -> Result<Value> {
	let mut output = Map::new();

	for selection in &query.selection_set.selections {
		let field = root.field(&selection.name).ok_or_else(|| {
			Error::execution(format!("unknown field \"{}\" on type {}", selection.name, root.name()))
		})?;

		trace!("resolving {}.{}", root.name(), selection.name);
		let value = field.resolve(ctx, &selection.arguments, root_value)?;
		let value = project(value, selection.selection_set.as_ref(), &selection.name, 1)?;

		output.insert(selection.response_key().to_string(), value);
	}

	Ok(Value::Object(output))
}

fn project(value: Value, selection_set: Option<&SelectionSet>, path: &str, depth: usize) -> Result<Value> {
	let Some(selection_set) = selection_set else {
		return Ok(value);
	};
	if depth > MAX_DEPTH {
		return Err(Error::execution(format!("field \"{}\" is nested too deeply", path)));
	}

	match value {
		Value::Null => Ok(Value::Null),
		Value::Array(items) => items
			.into_iter()
			.map(|item| project(item, Some(selection_set), path, depth + 1))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array),
		Value::Object(fields) => {
			let mut projected = Map::new();
			for selection in &selection_set.selections {
				let child = fields.get(&selection.name).cloned().unwrap_or(Value::Null);
				let child_path = format!("{}.{}", path, selection.name);
				let child = project(child, selection.selection_set.as_ref(), &child_path, depth + 1)?;
				projected.insert(selection.response_key().to_string(), child);
			}
			Ok(Value::Object(projected))
		}
		_ => Err(Error::execution(format!("field \"{}\" is a scalar and cannot have a selection set", path))),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::{Variables, parse};

	fn root() -> Object {
		let mut object = Object::new("Query");
		object.field_func("channel", |_, args, _| {
			let id = args.get("id").cloned().unwrap_or(Value::Null);
			Ok::<_, String>(json!({
				"id": id,
				"name": "Table",
				"resource": {"id": "res_1", "name": "channel", "type": "ONE"},
				"variants": [{"id": "v1", "name": "small"}, {"id": "v2", "name": "large"}],
			}))
		});
		object.field_func("count", |_, _, _| Ok::<_, String>(3));
		object.field_func("missing", |_, _, _| Ok::<_, String>(Value::Null));
		object.field_func("event", |_, _, root| Ok::<_, String>(root.cloned().unwrap_or(Value::Null)));
		object.field_func("broken", |_, _, _| Err::<Value, _>("resolver failed"));
		object.field_func("deep", |_, _, _| {
			let mut value = json!({"id": 1});
			for _ in 0..MAX_DEPTH * 2 {
				value = Value::Array(vec![value]);
			}
			Ok::<_, String>(value)
		});
		object
	}

	fn run(text: &str, root_value: Option<&Value>) -> Result<Value> {
		let query = parse(text, &Variables::new())?;
		execute(&Context::new(), &root(), root_value, &query)
	}

	#[test]
	fn test_projection() {
		let value = run(r#"{ channel(id: "ch_1") { id resource { name } variants { id } } }"#, None).unwrap();
		assert_eq!(
			value,
			json!({
				"channel": {
					"id": "ch_1",
					"resource": {"name": "channel"},
					"variants": [{"id": "v1"}, {"id": "v2"}],
				}
			})
		);
	}

	#[test]
	fn test_aliases_and_unknown_nested_fields() {
		let value = run("{ total: count c: channel { label: name absent } }", None).unwrap();
		assert_eq!(value, json!({"total": 3, "c": {"label": "Table", "absent": null}}));
	}

	#[test]
	fn test_null_with_selection_set() {
		let value = run("{ missing { id } }", None).unwrap();
		assert_eq!(value, json!({"missing": null}));
	}

	#[test]
	fn test_scalar_with_selection_set() {
		let err = run("{ count { id } }", None).unwrap_err();
		assert_eq!(err, Error::execution("field \"count\" is a scalar and cannot have a selection set"));
	}

	#[test]
	fn test_root_value_reaches_resolver() {
		let payload = json!({"id": "ord_1", "status": "shipped"});
		let value = run("{ event { status } }", Some(&payload)).unwrap();
		assert_eq!(value, json!({"event": {"status": "shipped"}}));
	}

	#[test]
	fn test_resolver_error() {
		let err = run("{ count broken }", None).unwrap_err();
		assert_eq!(err, Error::execution("resolver failed"));
	}

	#[test]
	fn test_projection_depth_is_bounded() {
		let err = run("{ deep { id } }", None).unwrap_err();
		assert_eq!(err, Error::execution("field \"deep\" is nested too deeply"));
	}
}
