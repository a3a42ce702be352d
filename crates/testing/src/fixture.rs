// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A small order-tracking schema used across the server tests.
//!
//! - `order(id)` and `closeOrder(id)` on the Query and Mutation roots
//! - `orderUpdated` and `orderCreated` subscriptions that resolve to the
//!   notification payload
//! - `brokenFeed`, a subscription whose resolver always fails

use conduit_engine::{Arguments, Schema, SchemaBuilder};
use conduit_type::Error;
use serde_json::{Value, json};

pub const BROKEN_FEED_MESSAGE: &str = "feed unavailable";

fn id(args: &Arguments) -> Value {
	args.get("id").cloned().unwrap_or(Value::Null)
}

pub fn order_schema() -> Schema {
	let mut builder = SchemaBuilder::new();

	builder.query().field_func("order", |_ctx, args, _root| {
		Ok::<_, Error>(json!({"id": id(args), "status": "open", "total": 10}))
	});

	builder.mutation().field_func("closeOrder", |_ctx, args, _root| {
		Ok::<_, Error>(json!({"id": id(args), "status": "closed"}))
	});

	builder
		.subscription()
		.field_func("orderUpdated", |_ctx, _args, root| Ok::<_, Error>(root.cloned().unwrap_or(Value::Null)))
		.field_func("orderCreated", |_ctx, _args, root| Ok::<_, Error>(root.cloned().unwrap_or(Value::Null)))
		.field_func("brokenFeed", |_ctx, _args, _root| Err::<Value, _>(BROKEN_FEED_MESSAGE));

	builder.build()
}

/// Event types the fixture schema subscribes to.
pub const ORDER_EVENT_TYPES: [&str; 3] = ["orderUpdated", "orderCreated", "brokenFeed"];
