// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_type::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The reply envelope shared by every transport.
///
/// Exactly one of `data` and `errors` is populated; the other is left out of
/// the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<Vec<String>>,
}

impl Response {
	pub fn data(data: Value) -> Self {
		Self {
			data: Some(data),
			errors: None,
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			data: None,
			errors: Some(vec![message.into()]),
		}
	}

	pub fn from_result(result: Result<Value>) -> Self {
		match result {
			Ok(data) => Self::data(data),
			Err(err) => Self::from(&err),
		}
	}

	pub fn is_error(&self) -> bool {
		self.errors.is_some()
	}

	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).map_err(|err| Error::internal(format!("failed to encode response: {}", err)))
	}
}

impl From<&Error> for Response {
	fn from(err: &Error) -> Self {
		Self::error(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_data_omits_errors() {
		let json = Response::data(json!({"ping": "pong"})).to_json().unwrap();
		assert_eq!(json, r#"{"data":{"ping":"pong"}}"#);
	}

	#[test]
	fn test_error_omits_data() {
		let json = Response::from(&Error::MethodNotAllowed).to_json().unwrap();
		assert_eq!(json, r#"{"errors":["request must be a POST"]}"#);
	}

	#[test]
	fn test_from_result() {
		let response = Response::from_result(Err(Error::execution("boom")));
		assert!(response.is_error());
		assert_eq!(response.errors, Some(vec!["boom".to_string()]));
		assert!(response.data.is_none());
	}
}
