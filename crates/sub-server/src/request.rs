// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_engine::Variables;
use conduit_type::{Error, Result};
use serde::{Deserialize, Serialize};

/// Body of a query, mutation or subscription request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
	pub query: String,
	#[serde(default)]
	pub variables: Option<Variables>,
}

impl GraphqlRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			variables: None,
		}
	}

	pub fn with_variables(mut self, variables: Variables) -> Self {
		self.variables = Some(variables);
		self
	}
}

/// Decode a request body. An empty body or an empty query text is reported
/// as [`Error::MissingBody`], anything that is not the expected JSON object as
/// [`Error::MalformedBody`].
pub fn decode_request(body: &[u8]) -> Result<GraphqlRequest> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Err(Error::MissingBody);
	}

	let request: GraphqlRequest = serde_json::from_slice(body)?;
	if request.query.trim().is_empty() {
		return Err(Error::MissingBody);
	}
	Ok(request)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_decode_with_variables() {
		let request = decode_request(br#"{"query": "{ a }", "variables": {"id": 1}}"#).unwrap();
		assert_eq!(request.query, "{ a }");
		assert_eq!(request.variables.unwrap().get("id"), Some(&json!(1)));
	}

	#[test]
	fn test_decode_null_variables() {
		let request = decode_request(br#"{"query": "{ a }", "variables": null}"#).unwrap();
		assert!(request.variables.is_none());
	}

	#[test]
	fn test_empty_body() {
		assert_eq!(decode_request(b""), Err(Error::MissingBody));
		assert_eq!(decode_request(b"  \n"), Err(Error::MissingBody));
		assert_eq!(decode_request(br#"{"query": " "}"#), Err(Error::MissingBody));
	}

	#[test]
	fn test_malformed_body() {
		assert!(matches!(decode_request(b"{not json"), Err(Error::MalformedBody(_))));
		assert!(matches!(decode_request(br#"{"variables": {}}"#), Err(Error::MalformedBody(_))));
	}
}
