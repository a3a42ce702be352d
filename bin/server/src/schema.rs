// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Demo schema: an in-memory list of chat channels.
//!
//! `createChannel` publishes `channelCreated`, which subscribers receive as
//! the root value of their re-executed subscription.

use std::{
	collections::BTreeMap,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use conduit_engine::{Schema, SchemaBuilder};
use conduit_subscription::EventPublisher;
use conduit_type::Error;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

pub const CHANNEL_CREATED: &str = "channelCreated";

#[derive(Debug, Clone, Serialize)]
pub struct Channel {
	pub id: String,
	pub name: String,
}

#[derive(Default)]
struct Channels {
	next_id: AtomicU64,
	by_id: RwLock<BTreeMap<String, Channel>>,
}

impl Channels {
	fn create(&self, name: String) -> Channel {
		let id = format!("ch_{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
		let channel = Channel {
			id: id.clone(),
			name,
		};
		self.by_id.write().insert(id, channel.clone());
		channel
	}
}

pub fn channel_schema(publisher: EventPublisher) -> Schema {
	let channels = Arc::new(Channels::default());
	publisher.declare(CHANNEL_CREATED);

	let mut builder = SchemaBuilder::new();

	let store = channels.clone();
	builder.query().field_func("channel", move |_ctx, args, _root| {
		let id = args
			.get("id")
			.and_then(Value::as_str)
			.ok_or_else(|| Error::execution("argument \"id\" is required"))?;
		Ok::<_, Error>(store.by_id.read().get(id).cloned())
	});

	let store = channels.clone();
	builder.query().field_func("channels", move |_ctx, _args, _root| {
		Ok::<_, Error>(store.by_id.read().values().cloned().collect::<Vec<_>>())
	});

	let store = channels;
	builder.mutation().field_func("createChannel", move |_ctx, args, _root| {
		let name = args
			.get("name")
			.and_then(Value::as_str)
			.ok_or_else(|| Error::execution("argument \"name\" is required"))?;
		let channel = store.create(name.to_string());

		let payload = serde_json::to_value(&channel).map_err(|e| Error::internal(e.to_string()))?;
		let delivered = publisher.publish(CHANNEL_CREATED, payload)?;
		tracing::debug!("Channel {} created, {} subscriber(s) notified", channel.id, delivered);

		Ok::<_, Error>(channel)
	});

	builder
		.subscription()
		.field_func(CHANNEL_CREATED, |_ctx, _args, root| Ok::<_, Error>(root.cloned().unwrap_or(Value::Null)));

	builder.build()
}
