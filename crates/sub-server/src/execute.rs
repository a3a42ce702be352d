// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The parse → validate → execute pipeline shared by both transports.
//!
//! Every engine call runs on the blocking pool and is bounded by
//! [`QueryConfig::timeout`](crate::QueryConfig).

use std::{sync::Arc, time::Duration};

use conduit_engine::{Context, OperationKind, Query};
use conduit_subscription::{EventType, SessionId};
use conduit_type::{Error, Result};
use serde_json::Value;
use tokio::{task::spawn_blocking, time::timeout};
use tracing::{debug, error};

use crate::{AppState, GraphqlRequest};

/// A subscription that passed validation and is ready to be re-executed.
#[derive(Debug, Clone)]
pub struct PreparedSubscription {
	query: Arc<Query>,
	event_type: EventType,
}

impl PreparedSubscription {
	/// Name (never the alias) of the single selected field.
	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	pub fn query(&self) -> &Query {
		&self.query
	}
}

/// Run a query or mutation and return its data.
///
/// Mutations execute against the Mutation root, queries against the Query
/// root. A subscription operation is refused.
pub async fn execute_operation(state: &AppState, request: GraphqlRequest) -> Result<Value> {
	let executor = state.executor().clone();
	let schema = state.schema().clone();

	run_blocking(state.query_config().timeout, move || {
		let ctx = Context::new();
		let variables = request.variables.unwrap_or_default();
		let query = executor.parse(&request.query, &variables)?;

		if query.kind == OperationKind::Subscription {
			return Err(Error::SubscriptionOverHttp);
		}

		let root = schema.root(query.kind);
		executor.validate(&ctx, root, &query.selection_set)?;
		executor.execute(&ctx, root, None, &query)
	})
	.await
}

/// Parse and validate a subscription request without registering anything.
pub async fn prepare_subscription(state: &AppState, request: GraphqlRequest) -> Result<PreparedSubscription> {
	let executor = state.executor().clone();
	let schema = state.schema().clone();

	run_blocking(state.query_config().timeout, move || {
		let ctx = Context::new();
		let variables = request.variables.unwrap_or_default();
		let query = executor.parse(&request.query, &variables)?;

		if query.kind != OperationKind::Subscription {
			return Err(Error::NotASubscription);
		}

		let selections = &query.selection_set.selections;
		if selections.len() != 1 {
			return Err(Error::SubscriptionFieldCount(selections.len()));
		}

		executor.validate(&ctx, &schema.subscription, &query.selection_set)?;

		let event_type = EventType::new(selections[0].name.clone());
		Ok(PreparedSubscription {
			query: Arc::new(query),
			event_type,
		})
	})
	.await
}

/// Re-execute `subscription` after a notification, with `root_value` as the
/// value its top-level resolver sees.
pub async fn execute_subscription(
	state: &AppState,
	subscription: &PreparedSubscription,
	session_id: SessionId,
	root_value: Option<Value>,
) -> Result<Value> {
	let executor = state.executor().clone();
	let schema = state.schema().clone();
	let query = subscription.query.clone();

	run_blocking(state.query_config().timeout, move || {
		let ctx = Context::with_session(session_id.to_string());
		executor.execute(&ctx, &schema.subscription, root_value.as_ref(), &query)
	})
	.await
}

async fn run_blocking<F, T>(limit: Duration, f: F) -> Result<T>
where
	F: FnOnce() -> Result<T> + Send + 'static,
	T: Send + 'static,
{
	match timeout(limit, spawn_blocking(f)).await {
		Ok(Ok(result)) => result,
		Ok(Err(err)) => {
			error!("Query task failed: {}", err);
			Err(Error::internal(format!("query task failed: {}", err)))
		}
		Err(_) => {
			debug!("Query execution exceeded {:?}", limit);
			Err(Error::Timeout)
		}
	}
}
