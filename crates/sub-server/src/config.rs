// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use serde::Deserialize;

/// Default upper bound on a single engine call.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Limits applied to every parse/validate/execute round trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
	#[serde(rename = "timeout_ms", with = "duration_ms")]
	pub timeout: Duration,
}

impl QueryConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

impl Default for QueryConfig {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_QUERY_TIMEOUT,
		}
	}
}

/// Reads a [`Duration`] written as whole milliseconds.
pub mod duration_ms {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer};

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_timeout() {
		assert_eq!(QueryConfig::default().timeout, Duration::from_secs(30));
	}

	#[test]
	fn test_deserialize_millis() {
		let config: QueryConfig = serde_json::from_str(r#"{"timeout_ms": 250}"#).unwrap();
		assert_eq!(config.timeout, Duration::from_millis(250));

		let config: QueryConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.timeout, DEFAULT_QUERY_TIMEOUT);
	}
}
