// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_type::{Error, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG`, when set and valid, takes precedence over the configured level.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingBuilder {
	level: String,
	json: bool,
	target: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Filter directive used when `RUST_LOG` is unset, e.g. `"info"` or
	/// `"conduit_sub_server_ws=debug,info"`.
	pub fn with_level(mut self, level: impl Into<String>) -> Self {
		self.level = level.into();
		self
	}

	pub fn with_json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_target(mut self, target: bool) -> Self {
		self.target = target;
		self
	}

	pub fn filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
	}

	/// Install the subscriber. Fails if one is already installed.
	pub fn init(self) -> Result<()> {
		let filter = self.filter();
		let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(self.target);

		let result = if self.json {
			builder.json().try_init()
		} else {
			builder.try_init()
		};

		result.map_err(|e| Error::internal(format!("failed to install tracing subscriber: {}", e)))?;
		tracing::debug!("Tracing initialised at {}", self.level);
		Ok(())
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			json: false,
			target: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_partial() {
		let builder: TracingBuilder = serde_json::from_str(r#"{"level": "debug"}"#).unwrap();
		assert_eq!(builder.level, "debug");
		assert!(!builder.json);
		assert!(builder.target);
	}

	#[test]
	fn test_second_init_fails() {
		let _ = TracingBuilder::new().with_level("warn").init();
		assert!(TracingBuilder::new().init().is_err());
	}
}
