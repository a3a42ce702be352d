// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Borrow,
	fmt::{self, Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of a class of server-side events a client can subscribe to.
///
/// A subscription's event type is the name of the single field it selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for EventType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Deref for EventType {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Borrow<str> for EventType {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for EventType {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for EventType {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// "An event of this type occurred; recompute."
///
/// The optional payload becomes the root value of the re-executed query.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
	pub event_type: EventType,
	pub payload: Option<Value>,
}

impl Notification {
	pub fn new(event_type: impl Into<EventType>, payload: Option<Value>) -> Self {
		Self {
			event_type: event_type.into(),
			payload,
		}
	}
}
