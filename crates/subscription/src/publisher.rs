// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use conduit_type::Result;
use serde_json::Value;

use crate::{EventType, SubscriptionRegistry};

/// Cloneable handle through which application code announces events.
///
/// Resolvers, background jobs or anything else that changes data hold one of
/// these; the gateway's sessions pick the notifications up from the registry.
#[derive(Clone)]
pub struct EventPublisher {
	registry: Arc<SubscriptionRegistry>,
}

impl EventPublisher {
	pub fn new(registry: Arc<SubscriptionRegistry>) -> Self {
		Self {
			registry,
		}
	}

	pub fn declare(&self, event_type: impl Into<EventType>) -> bool {
		self.registry.declare(event_type)
	}

	/// Notify subscribers of `event_type`, handing them `payload` as root value.
	pub fn publish(&self, event_type: &str, payload: Value) -> Result<usize> {
		self.registry.publish(event_type, Some(payload))
	}

	/// Notify subscribers of `event_type` without a payload.
	pub fn notify(&self, event_type: &str) -> Result<usize> {
		self.registry.publish(event_type, None)
	}

	pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
		&self.registry
	}
}
