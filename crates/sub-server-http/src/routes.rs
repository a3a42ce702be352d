// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use axum::{
	Router,
	routing::{any, get},
};
use conduit_sub_server::AppState;
use tower_http::trace::TraceLayer;

use crate::handlers::{handle_graphql, handle_subscriptions, health};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/graphql", any(handle_graphql))
		.route("/v1/subscriptions", get(handle_subscriptions))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use axum::{
		body::{Body, to_bytes},
		http::{Request, StatusCode},
	};
	use conduit_engine::MAX_DEPTH;
	use conduit_subscription::SubscriptionRegistry;
	use conduit_testing::fixture;
	use serde_json::{Value, json};
	use tower::ServiceExt;

	use super::*;

	fn app() -> Router {
		let registry = Arc::new(SubscriptionRegistry::default());
		router(AppState::standard(fixture::order_schema(), registry))
	}

	async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
		let response = app
			.oneshot(Request::builder().method(method).uri(uri).body(Body::from(body.to_string())).unwrap())
			.await
			.unwrap();

		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, serde_json::from_slice(&bytes).unwrap())
	}

	#[tokio::test]
	async fn test_health() {
		let (status, body) = send(app(), "GET", "/health", "").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"status": "ok"}));
	}

	#[tokio::test]
	async fn test_query() {
		let (status, body) =
			send(app(), "POST", "/graphql", r#"{"query": "{ order(id: \"ord_1\") { id status } }"}"#).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"data": {"order": {"id": "ord_1", "status": "open"}}}));
	}

	#[tokio::test]
	async fn test_mutation_with_variables() {
		let body = json!({
			"query": "mutation ($id: ID!) { closeOrder(id: $id) { status } }",
			"variables": {"id": "ord_7"}
		});
		let (status, body) = send(app(), "POST", "/graphql", &body.to_string()).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"data": {"closeOrder": {"status": "closed"}}}));
	}

	#[tokio::test]
	async fn test_get_is_rejected_with_envelope() {
		let (status, body) = send(app(), "GET", "/graphql", "").await;
		assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(body, json!({"errors": ["request must be a POST"]}));
	}

	#[tokio::test]
	async fn test_empty_body() {
		let (status, body) = send(app(), "POST", "/graphql", "").await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, json!({"errors": ["request must include a query"]}));
	}

	#[tokio::test]
	async fn test_malformed_body() {
		let (status, body) = send(app(), "POST", "/graphql", "{\"query\":").await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
		assert!(body.get("data").is_none());
	}

	#[tokio::test]
	async fn test_parse_error_is_200() {
		let (status, body) = send(app(), "POST", "/graphql", r#"{"query": "{ order("}"#).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
	}

	#[tokio::test]
	async fn test_deeply_nested_query_is_an_error_envelope() {
		let depth = 200_000;
		let query = format!("{{ order(id: {}1{}) {{ id }} }}", "[".repeat(depth), "]".repeat(depth));
		let (status, body) = send(app(), "POST", "/graphql", &json!({"query": query}).to_string()).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(
			body,
			json!({"errors": [format!("query is nested too deeply at line 1, column {}", 13 + MAX_DEPTH - 2)]})
		);
	}

	#[tokio::test]
	async fn test_unknown_field() {
		let (status, body) = send(app(), "POST", "/graphql", r#"{"query": "{ nope }"}"#).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"errors": ["unknown field \"nope\" on type Query"]}));
	}

	#[tokio::test]
	async fn test_subscription_over_http() {
		let (status, body) = send(app(), "POST", "/graphql", r#"{"query": "subscription { orderUpdated }"}"#).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"errors": ["subscriptions must be made over a websocket connection"]}));
	}

	#[tokio::test]
	async fn test_subscription_stats() {
		let registry = Arc::new(SubscriptionRegistry::with_event_types(8, ["orderUpdated"]));
		let state = AppState::standard(fixture::order_schema(), registry);
		state.counter().increment(&"orderUpdated".into());

		let (status, body) = send(router(state), "GET", "/v1/subscriptions", "").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!([{"event_type": "orderUpdated", "subscribers": 0, "reads": 1}]));
	}
}
