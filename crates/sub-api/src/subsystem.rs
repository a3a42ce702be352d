// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	fmt::{self, Display, Formatter},
};

use async_trait::async_trait;

/// Health of a running subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
	Healthy,
	Warning {
		description: String,
	},
	Failed {
		description: String,
	},
}

impl HealthStatus {
	pub fn is_healthy(&self) -> bool {
		matches!(self, HealthStatus::Healthy)
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, HealthStatus::Failed { .. })
	}
}

impl Display for HealthStatus {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			HealthStatus::Healthy => f.write_str("healthy"),
			HealthStatus::Warning {
				description,
			} => write!(f, "warning: {}", description),
			HealthStatus::Failed {
				description,
			} => write!(f, "failed: {}", description),
		}
	}
}

/// A long-running component with an explicit start/shutdown lifecycle.
///
/// `start` must be idempotent and return once the component is accepting
/// work; the work itself runs on spawned tasks. `shutdown` stops accepting
/// new work and waits, bounded, for in-flight work to drain.
#[async_trait]
pub trait Subsystem: Send + Sync + Any {
	fn name(&self) -> &'static str;

	async fn start(&mut self) -> conduit_type::Result<()>;

	async fn shutdown(&mut self) -> conduit_type::Result<()>;

	fn is_running(&self) -> bool;

	fn health_status(&self) -> HealthStatus;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}
