// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

pub const DEFAULT_HTTP_BIND_ADDR: &str = "0.0.0.0:8090";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
	/// Address and port to bind to, e.g. `"0.0.0.0:8090"`.
	pub bind_addr: String,
}

impl HttpConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
		self.bind_addr = bind_addr.into();
		self
	}
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			bind_addr: DEFAULT_HTTP_BIND_ADDR.to_string(),
		}
	}
}
