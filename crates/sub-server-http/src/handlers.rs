// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP endpoint handlers.

use axum::{
	Json,
	body::Bytes,
	extract::State,
	http::{Method, StatusCode},
	response::IntoResponse,
};
use conduit_sub_server::{AppState, Response, SubscriptionStats, decode_request, execute_operation};
use conduit_type::Error;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// Health check endpoint.
///
/// ```json
/// {"status": "ok"}
/// ```
pub async fn health() -> impl IntoResponse {
	(
		StatusCode::OK,
		Json(HealthResponse {
			status: "ok",
		}),
	)
}

/// Execute a query or mutation.
///
/// Mounted for every method so that a non-POST request receives the error
/// envelope rather than a bare 405.
///
/// # Request Body
///
/// ```json
/// {
///   "query": "query ($id: ID) { order(id: $id) { id total } }",
///   "variables": {"id": "ord_1"}
/// }
/// ```
///
/// # Response
///
/// ```json
/// {"data": {"order": {"id": "ord_1", "total": 10}}}
/// ```
pub async fn handle_graphql(
	State(state): State<AppState>,
	method: Method,
	body: Bytes,
) -> Result<Json<Response>, AppError> {
	if method != Method::POST {
		return Err(Error::MethodNotAllowed.into());
	}

	let request = decode_request(&body)?;
	let data = execute_operation(&state, request).await?;

	Ok(Json(Response::data(data)))
}

/// Subscriber and read counts per event type.
pub async fn handle_subscriptions(State(state): State<AppState>) -> Json<Vec<SubscriptionStats>> {
	Json(state.subscription_stats())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_health_response_serialization() {
		let response = HealthResponse {
			status: "ok",
		};
		let json = serde_json::to_string(&response).unwrap();
		assert_eq!(json, r#"{"status":"ok"}"#);
	}
}
