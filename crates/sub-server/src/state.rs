// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use conduit_engine::{QueryExecutor, Schema, StandardExecutor};
use conduit_subscription::{ResultReadCounter, SubscriptionRegistry};

use crate::{QueryConfig, SubscriptionStats};

/// Everything a request or session needs, shared by both servers.
///
/// Cloning is cheap; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
	executor: Arc<dyn QueryExecutor>,
	schema: Arc<Schema>,
	registry: Arc<SubscriptionRegistry>,
	counter: Arc<ResultReadCounter>,
	query_config: QueryConfig,
}

impl AppState {
	pub fn new(
		executor: Arc<dyn QueryExecutor>,
		schema: Arc<Schema>,
		registry: Arc<SubscriptionRegistry>,
		counter: Arc<ResultReadCounter>,
		query_config: QueryConfig,
	) -> Self {
		Self {
			executor,
			schema,
			registry,
			counter,
			query_config,
		}
	}

	/// State backed by the bundled executor and a fresh read counter.
	pub fn standard(schema: Schema, registry: Arc<SubscriptionRegistry>) -> Self {
		Self::new(
			Arc::new(StandardExecutor),
			Arc::new(schema),
			registry,
			Arc::new(ResultReadCounter::new()),
			QueryConfig::default(),
		)
	}

	pub fn with_query_config(mut self, query_config: QueryConfig) -> Self {
		self.query_config = query_config;
		self
	}

	pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
		&self.executor
	}

	pub fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
		&self.registry
	}

	pub fn counter(&self) -> &Arc<ResultReadCounter> {
		&self.counter
	}

	pub fn query_config(&self) -> &QueryConfig {
		&self.query_config
	}

	/// Per event type subscriber and read counts, sorted by event type.
	pub fn subscription_stats(&self) -> Vec<SubscriptionStats> {
		let reads = self.counter.snapshot();
		let mut event_types = self.registry.event_types();
		for event_type in reads.keys() {
			if !event_types.contains(event_type) {
				event_types.push(event_type.clone());
			}
		}
		event_types.sort();

		event_types
			.into_iter()
			.map(|event_type| SubscriptionStats {
				subscribers: self.registry.subscriber_count(&event_type),
				reads: reads.get(&event_type).copied().unwrap_or(0),
				event_type,
			})
			.collect()
	}
}
