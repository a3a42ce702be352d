// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use conduit_sub_server::config::duration_ms;
use conduit_subscription::DEFAULT_SUBSCRIBER_BUFFER;
use serde::Deserialize;

pub const DEFAULT_WS_BIND_ADDR: &str = "0.0.0.0:8091";
pub const DEFAULT_SUBSCRIPTION_PATH: &str = "/subscriptions";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WsConfig {
	/// Address and port to bind to, e.g. `"0.0.0.0:8091"`.
	pub bind_addr: String,
	/// Request path a client must upgrade on.
	pub path: String,
	/// Connections beyond this are dropped at accept.
	pub max_connections: usize,
	/// Notifications buffered per session before new ones are dropped.
	pub subscriber_buffer: usize,
	/// How long a client may take to send its subscription request.
	#[serde(rename = "request_timeout_ms", with = "duration_ms")]
	pub request_timeout: Duration,
	/// How long shutdown waits for sessions to finish.
	#[serde(rename = "shutdown_timeout_ms", with = "duration_ms")]
	pub shutdown_timeout: Duration,
}

impl WsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
		self.bind_addr = bind_addr.into();
		self
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	pub fn with_max_connections(mut self, max_connections: usize) -> Self {
		self.max_connections = max_connections;
		self
	}

	pub fn with_subscriber_buffer(mut self, subscriber_buffer: usize) -> Self {
		self.subscriber_buffer = subscriber_buffer;
		self
	}

	pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
		self.request_timeout = request_timeout;
		self
	}

	pub fn with_shutdown_timeout(mut self, shutdown_timeout: Duration) -> Self {
		self.shutdown_timeout = shutdown_timeout;
		self
	}
}

impl Default for WsConfig {
	fn default() -> Self {
		Self {
			bind_addr: DEFAULT_WS_BIND_ADDR.to_string(),
			path: DEFAULT_SUBSCRIPTION_PATH.to_string(),
			max_connections: 10_000,
			subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
			request_timeout: Duration::from_secs(10),
			shutdown_timeout: Duration::from_secs(30),
		}
	}
}
