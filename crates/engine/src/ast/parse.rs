// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use async_graphql_parser::{
	Pos, Positioned, parse_query,
	types::{
		DocumentOperations, ExecutableDocument, Field, OperationDefinition, Selection as GraphqlSelection,
		SelectionSet as GraphqlSelectionSet,
	},
};
use async_graphql_value::{ConstValue, Name, Value as GraphqlValue};
use conduit_type::{Error, Result};
use serde_json::Value;

use crate::ast::{Arguments, MAX_DEPTH, OperationKind, Query, Selection, SelectionSet, Variables};

/// Parse a single operation, substituting `variables` into field arguments.
///
/// A variable that is neither supplied nor declared with a default is an error.
/// Text whose bracket nesting exceeds [`MAX_DEPTH`] is rejected before it reaches
/// the GraphQL parser.
pub fn parse(text: &str, variables: &Variables) -> Result<Query> {
	check_depth(text)?;
	let document = parse_query(text).map_err(syntax_error)?;
	let (name, operation) = single_operation(document)?;

	let mut lowering = Lowering {
		variables,
		defaults: HashMap::new(),
	};
	lowering.operation(name, operation)
}

fn syntax_error(err: async_graphql_parser::Error) -> Error {
	let (line, column) = err.positions().next().map(|pos| (pos.line, pos.column)).unwrap_or((1, 1));
	Error::parse(err.to_string(), line, column)
}

fn single_operation(document: ExecutableDocument) -> Result<(Option<String>, Positioned<OperationDefinition>)> {
	if let Some(fragment) = document.fragments.values().next() {
		return Err(at(fragment.pos, "fragments are not supported"));
	}

	match document.operations {
		DocumentOperations::Single(operation) => Ok((None, operation)),
		DocumentOperations::Multiple(operations) if operations.len() > 1 => {
			let message = "only one operation per request is supported";
			let last = operations.values().map(|operation| operation.pos).max_by_key(|pos| (pos.line, pos.column));
			Err(last.map_or_else(|| Error::parse(message, 1, 1), |pos| at(pos, message)))
		}
		DocumentOperations::Multiple(operations) => operations
			.into_iter()
			.next()
			.map(|(name, operation)| (Some(name.to_string()), operation))
			.ok_or_else(|| Error::parse("document contains no operation", 1, 1)),
	}
}

/// Reject nesting of `{`, `[` and `(` deeper than [`MAX_DEPTH`].
///
/// Strings, block strings and comments are skipped so brackets inside them do
/// not count.
fn check_depth(text: &str) -> Result<()> {
	let bytes = text.as_bytes();
	let mut depth = 0usize;
	let mut i = 0;

	while i < bytes.len() {
		match bytes[i] {
			b'#' => {
				while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
					i += 1;
				}
				continue;
			}
			b'"' if bytes[i..].starts_with(b"\"\"\"") => {
				i += 3;
				while i < bytes.len() && !bytes[i..].starts_with(b"\"\"\"") {
					i += if bytes[i..].starts_with(b"\\\"\"\"") { 4 } else { 1 };
				}
				i += 3;
				continue;
			}
			b'"' => {
				i += 1;
				while i < bytes.len() && bytes[i] != b'"' && bytes[i] != b'\n' {
					i += if bytes[i] == b'\\' { 2 } else { 1 };
				}
			}
			b'{' | b'[' | b'(' => {
				depth += 1;
				if depth > MAX_DEPTH {
					let (line, column) = position(text, i);
					return Err(Error::parse("query is nested too deeply", line, column));
				}
			}
			b'}' | b']' | b')' => depth = depth.saturating_sub(1),
			_ => {}
		}
		i += 1;
	}

	Ok(())
}

/// One-based line and column of the ASCII byte at `offset`.
fn position(text: &str, offset: usize) -> (usize, usize) {
	let before = &text[..offset];
	let line = before.matches('\n').count() + 1;
	let line_start = before.rfind('\n').map_or(0, |n| n + 1);
	(line, before[line_start..].chars().count() + 1)
}

fn at(pos: Pos, message: impl Into<String>) -> Error {
	Error::parse(message, pos.line, pos.column)
}

/// Converts the parser's document into the engine's [`Query`], resolving
/// variables as it goes.
struct Lowering<'a> {
	variables: &'a Variables,
	defaults: HashMap<String, ConstValue>,
}

impl Lowering<'_> {
	fn operation(&mut self, name: Option<String>, operation: Positioned<OperationDefinition>) -> Result<Query> {
		let operation = operation.node;
		if let Some(directive) = operation.directives.first() {
			return Err(at(directive.pos, "directives are not supported"));
		}

		for definition in operation.variable_definitions {
			let definition = definition.node;
			if let Some(default) = definition.default_value {
				self.defaults.insert(definition.name.node.to_string(), default.node);
			}
		}

		Ok(Query {
			kind: OperationKind::from(operation.ty),
			name,
			selection_set: self.selection_set(operation.selection_set)?,
		})
	}

	fn selection_set(&self, selection_set: Positioned<GraphqlSelectionSet>) -> Result<SelectionSet> {
		let items = selection_set.node.items;
		if items.is_empty() {
			return Err(at(selection_set.pos, "selection set must not be empty"));
		}

		let mut selections = Vec::with_capacity(items.len());
		for item in items {
			match item.node {
				GraphqlSelection::Field(field) => selections.push(self.field(field)?),
				GraphqlSelection::FragmentSpread(_) | GraphqlSelection::InlineFragment(_) => {
					return Err(at(item.pos, "fragments are not supported"));
				}
			}
		}

		Ok(SelectionSet {
			selections,
		})
	}

	fn field(&self, field: Positioned<Field>) -> Result<Selection> {
		let field = field.node;
		if let Some(directive) = field.directives.first() {
			return Err(at(directive.pos, "directives are not supported"));
		}

		let mut arguments = Arguments::new();
		for (name, value) in field.arguments {
			let value = self.value(value)?;
			if arguments.insert(name.node.to_string(), value).is_some() {
				return Err(at(name.pos, format!("duplicate argument '{}'", name.node)));
			}
		}

		// leaf fields come back with an empty selection set
		let selection_set = if field.selection_set.node.items.is_empty() {
			None
		} else {
			Some(self.selection_set(field.selection_set)?)
		};

		Ok(Selection {
			name: field.name.node.to_string(),
			alias: field.alias.map(|alias| alias.node.to_string()),
			arguments,
			selection_set,
		})
	}

	fn value(&self, value: Positioned<GraphqlValue>) -> Result<Value> {
		let pos = value.pos;
		let constant = value.node.into_const_with(|name| self.variable(name, pos))?;
		constant.into_json().map_err(|err| at(pos, err.to_string()))
	}

	fn variable(&self, name: Name, pos: Pos) -> Result<ConstValue> {
		if let Some(value) = self.variables.get(name.as_str()) {
			return ConstValue::from_json(value.clone()).map_err(|err| at(pos, err.to_string()));
		}
		self.defaults
			.get(name.as_str())
			.cloned()
			.ok_or_else(|| at(pos, format!("variable '${}' is not defined", name)))
	}
}
