// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, path::Path};

use conduit_sub_server::QueryConfig;
use conduit_sub_server_http::HttpConfig;
use conduit_sub_server_ws::WsConfig;
use conduit_sub_tracing::TracingBuilder;
use conduit_type::{Error, Result};
use serde::Deserialize;

/// Everything the server reads from its optional JSON config file.
///
/// ```json
/// {
///   "http": {"bind_addr": "0.0.0.0:8090"},
///   "ws": {"bind_addr": "0.0.0.0:8091", "path": "/subscriptions"},
///   "query": {"timeout_ms": 30000},
///   "tracing": {"level": "info", "json": false}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub ws: WsConfig,
	pub query: QueryConfig,
	pub tracing: TracingBuilder,
}

impl ServerConfig {
	/// Load from `path`, or fall back to defaults when no path is given.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let Some(path) = path else {
			return Ok(Self::default());
		};

		let text = fs::read_to_string(path)
			.map_err(|e| Error::internal(format!("failed to read config {}: {}", path.display(), e)))?;
		serde_json::from_str(&text)
			.map_err(|e| Error::internal(format!("invalid config {}: {}", path.display(), e)))
	}
}
