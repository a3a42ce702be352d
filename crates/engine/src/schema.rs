// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schema made of three root objects, each a set of named resolvers.

use std::{
	collections::BTreeMap,
	fmt::{self, Debug, Display, Formatter},
	sync::Arc,
};

use conduit_type::{Error, Result};
use serde::Serialize;
use serde_json::Value;

use crate::{Arguments, Context, OperationKind};

/// Resolves a root field. `root` is the value the operation runs against: for
/// subscriptions this is the payload of the event that triggered re-execution.
pub type Resolver = Arc<dyn Fn(&Context, &Arguments, Option<&Value>) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
pub struct Field {
	name: String,
	resolver: Resolver,
}

impl Field {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn resolve(&self, ctx: &Context, arguments: &Arguments, root: Option<&Value>) -> Result<Value> {
		(self.resolver)(ctx, arguments, root)
	}
}

impl Debug for Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field").field("name", &self.name).finish_non_exhaustive()
	}
}

#[derive(Clone, Debug)]
pub struct Object {
	name: String,
	fields: BTreeMap<String, Field>,
}

impl Object {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: BTreeMap::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.get(name)
	}

	pub fn fields(&self) -> impl Iterator<Item = &Field> {
		self.fields.values()
	}

	/// Register a field backed by `f`. The return value is serialized to JSON;
	/// an error is reported to the client through its `Display` text.
	///
	/// Registering the same name twice replaces the earlier resolver.
	pub fn field_func<F, T, E>(&mut self, name: impl Into<String>, f: F) -> &mut Self
	where
		F: Fn(&Context, &Arguments, Option<&Value>) -> std::result::Result<T, E> + Send + Sync + 'static,
		T: Serialize,
		E: Display,
	{
		let name = name.into();
		let resolver: Resolver = Arc::new(move |ctx: &Context, arguments: &Arguments, root: Option<&Value>| {
			let value = f(ctx, arguments, root).map_err(|e| Error::execution(e.to_string()))?;
			serde_json::to_value(value).map_err(|e| Error::execution(e.to_string()))
		});
		self.fields.insert(
			name.clone(),
			Field {
				name,
				resolver,
			},
		);
		self
	}
}

#[derive(Clone, Debug)]
pub struct Schema {
	pub query: Object,
	pub mutation: Object,
	pub subscription: Object,
}

impl Schema {
	/// The root object an operation of `kind` executes against.
	pub fn root(&self, kind: OperationKind) -> &Object {
		match kind {
			OperationKind::Query => &self.query,
			OperationKind::Mutation => &self.mutation,
			OperationKind::Subscription => &self.subscription,
		}
	}
}

pub struct SchemaBuilder {
	query: Object,
	mutation: Object,
	subscription: Object,
}

impl SchemaBuilder {
	pub fn new() -> Self {
		Self {
			query: Object::new("Query"),
			mutation: Object::new("Mutation"),
			subscription: Object::new("Subscription"),
		}
	}

	pub fn query(&mut self) -> &mut Object {
		&mut self.query
	}

	pub fn mutation(&mut self) -> &mut Object {
		&mut self.mutation
	}

	pub fn subscription(&mut self) -> &mut Object {
		&mut self.subscription
	}

	pub fn build(self) -> Schema {
		Schema {
			query: self.query,
			mutation: self.mutation,
			subscription: self.subscription,
		}
	}
}

impl Default for SchemaBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_roots_by_kind() {
		let mut builder = SchemaBuilder::new();
		builder.query().field_func("a", |_, _, _| Ok::<_, String>(1));
		builder.mutation().field_func("b", |_, _, _| Ok::<_, String>(2));
		builder.subscription().field_func("c", |_, _, _| Ok::<_, String>(3));
		let schema = builder.build();

		assert_eq!(schema.root(OperationKind::Query).name(), "Query");
		assert!(schema.root(OperationKind::Query).field("a").is_some());
		assert!(schema.root(OperationKind::Mutation).field("b").is_some());
		assert!(schema.root(OperationKind::Subscription).field("c").is_some());
		assert!(schema.root(OperationKind::Subscription).field("a").is_none());
	}

	#[test]
	fn test_field_func_serializes_and_maps_errors() {
		#[derive(Serialize)]
		struct Channel {
			id: String,
		}

		let mut object = Object::new("Query");
		object.field_func("channel", |_, args, _| {
			Ok::<_, String>(Channel {
				id: args.get("id").and_then(Value::as_str).unwrap_or_default().to_string(),
			})
		});
		object.field_func("broken", |_, _, _| Err::<Value, _>("resolver failed"));

		let mut args = Arguments::new();
		args.insert("id".to_string(), json!("ch_1"));
		let value = object.field("channel").unwrap().resolve(&Context::new(), &args, None).unwrap();
		assert_eq!(value, json!({"id": "ch_1"}));

		let err = object.field("broken").unwrap().resolve(&Context::new(), &Arguments::new(), None).unwrap_err();
		assert_eq!(err, Error::execution("resolver failed"));
	}
}
