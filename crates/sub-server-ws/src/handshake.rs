// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_sub_server::Response as Envelope;
use conduit_type::Error;
use serde_json::json;
use tokio_tungstenite::tungstenite::{
	handshake::server::{ErrorResponse, Request, Response},
	http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
};

/// Handshake callback accepting upgrades on `path` only.
pub(crate) fn require_path(path: String) -> impl FnOnce(&Request, Response) -> Result<Response, ErrorResponse> {
	move |request: &Request, response: Response| {
		if request.uri().path() == path {
			return Ok(response);
		}

		tracing::debug!("Rejecting upgrade on {}, expected {}", request.uri().path(), path);
		Err(reject(StatusCode::NOT_FOUND, &Error::UpgradeFailed))
	}
}

fn reject(status: StatusCode, err: &Error) -> ErrorResponse {
	let body = Envelope::from(err).to_json().unwrap_or_else(|_| json!({"errors": [err.to_string()]}).to_string());

	let mut response = ErrorResponse::new(Some(body));
	*response.status_mut() = status;
	response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	response
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request(uri: &str) -> Request {
		Request::builder().uri(uri).body(()).unwrap()
	}

	#[test]
	fn test_matching_path_is_accepted() {
		let callback = require_path("/subscriptions".to_string());
		assert!(callback(&request("/subscriptions"), Response::new(())).is_ok());
	}

	#[test]
	fn test_query_string_is_ignored() {
		let callback = require_path("/subscriptions".to_string());
		assert!(callback(&request("/subscriptions?client=a"), Response::new(())).is_ok());
	}

	#[test]
	fn test_other_path_is_rejected() {
		let callback = require_path("/subscriptions".to_string());
		let rejected = callback(&request("/graphql"), Response::new(())).unwrap_err();
		assert_eq!(rejected.status(), StatusCode::NOT_FOUND);
		assert_eq!(rejected.body().as_deref(), Some(r#"{"errors":["could not establish websocket connection"]}"#));
	}
}
