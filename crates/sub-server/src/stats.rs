// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_subscription::EventType;
use serde::Serialize;

/// Observability row for one event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionStats {
	pub event_type: EventType,
	/// Sessions currently registered.
	pub subscribers: usize,
	/// Successful re-executions since start.
	pub reads: u64,
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use conduit_engine::SchemaBuilder;
	use conduit_subscription::{SessionId, SubscriptionRegistry};

	use crate::AppState;

	#[test]
	fn test_stats_merge_registry_and_counter() {
		let registry = Arc::new(SubscriptionRegistry::with_event_types(8, ["orderUpdated", "orderCreated"]));
		let state = AppState::standard(SchemaBuilder::new().build(), registry.clone());

		let _subscriber = registry.register("orderUpdated", SessionId::generate()).unwrap();
		state.counter().increment(&"orderUpdated".into());
		state.counter().increment(&"orderUpdated".into());
		registry.retire("orderCreated");
		state.counter().increment(&"orderCreated".into());

		let stats = state.subscription_stats();
		assert_eq!(stats.len(), 2);
		assert_eq!(stats[0].event_type.as_str(), "orderCreated");
		assert_eq!((stats[0].subscribers, stats[0].reads), (0, 1));
		assert_eq!(stats[1].event_type.as_str(), "orderUpdated");
		assert_eq!((stats[1].subscribers, stats[1].reads), (1, 2));
	}

	#[test]
	fn test_stats_serialize() {
		let row = super::SubscriptionStats {
			event_type: "tick".into(),
			subscribers: 3,
			reads: 7,
		};
		assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"event_type":"tick","subscribers":3,"reads":7}"#);
	}
}
