// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Serialize;

/// Coarse classification of an [`Error`].
///
/// Transports use the class to pick a status code and to decide whether a
/// subscription session may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
	/// The request never reached the engine: bad method, body, or upgrade.
	Transport,
	/// The query text or its selection set was rejected.
	Request,
	/// The engine failed while producing a result.
	Execution,
	/// A configuration or programming fault inside the gateway.
	Internal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("request must be a POST")]
	MethodNotAllowed,

	#[error("request must include a query")]
	MissingBody,

	#[error("{0}")]
	MalformedBody(String),

	#[error("could not establish websocket connection")]
	UpgradeFailed,

	#[error("{message} at line {line}, column {column}")]
	Parse {
		message: String,
		line: usize,
		column: usize,
	},

	#[error("{0}")]
	Validation(String),

	#[error("subscriptions must be made over a websocket connection")]
	SubscriptionOverHttp,

	#[error("request must be a subscription")]
	NotASubscription,

	#[error("subscription must select exactly one field, found {0}")]
	SubscriptionFieldCount(usize),

	#[error("{0}")]
	Execution(String),

	#[error("query execution timed out")]
	Timeout,

	#[error("unknown event type: {0}")]
	UnknownEventType(String),

	#[error("{0}")]
	Internal(String),
}

impl Error {
	pub fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
		Error::Parse {
			message: message.into(),
			line,
			column,
		}
	}

	pub fn validation(message: impl Into<String>) -> Self {
		Error::Validation(message.into())
	}

	pub fn execution(message: impl Into<String>) -> Self {
		Error::Execution(message.into())
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Error::Internal(message.into())
	}

	/// Stable machine-readable code for this error.
	pub fn code(&self) -> &'static str {
		match self {
			Error::MethodNotAllowed => "TRANSPORT_001",
			Error::MissingBody => "TRANSPORT_002",
			Error::MalformedBody(_) => "TRANSPORT_003",
			Error::UpgradeFailed => "TRANSPORT_004",
			Error::Parse {
				..
			} => "QUERY_001",
			Error::Validation(_) => "QUERY_002",
			Error::SubscriptionOverHttp => "QUERY_003",
			Error::NotASubscription => "SUBSCRIPTION_001",
			Error::SubscriptionFieldCount(_) => "SUBSCRIPTION_002",
			Error::UnknownEventType(_) => "SUBSCRIPTION_003",
			Error::Execution(_) => "EXECUTE_001",
			Error::Timeout => "EXECUTE_002",
			Error::Internal(_) => "INTERNAL_001",
		}
	}

	pub fn class(&self) -> ErrorClass {
		match self {
			Error::MethodNotAllowed | Error::MissingBody | Error::MalformedBody(_) | Error::UpgradeFailed => {
				ErrorClass::Transport
			}
			Error::Parse {
				..
			}
			| Error::Validation(_)
			| Error::SubscriptionOverHttp
			| Error::NotASubscription
			| Error::SubscriptionFieldCount(_) => ErrorClass::Request,
			Error::Execution(_) | Error::Timeout => ErrorClass::Execution,
			Error::UnknownEventType(_) | Error::Internal(_) => ErrorClass::Internal,
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::MalformedBody(err.to_string())
	}
}
