// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod config;
mod schema;

use std::{path::PathBuf, sync::Arc};

use conduit_engine::StandardExecutor;
use conduit_sub_api::Subsystem;
use conduit_sub_server::AppState;
use conduit_sub_server_http::HttpSubsystem;
use conduit_sub_server_ws::WsSubsystem;
use conduit_subscription::{EventPublisher, ResultReadCounter, SubscriptionRegistry};
use conduit_type::Error;

use crate::{config::ServerConfig, schema::channel_schema};

#[tokio::main]
async fn main() -> conduit_type::Result<()> {
	let config_path = std::env::args().nth(1).map(PathBuf::from);
	let config = ServerConfig::load(config_path.as_deref())?;
	config.tracing.clone().init()?;

	let registry = Arc::new(SubscriptionRegistry::new(config.ws.subscriber_buffer));
	let publisher = EventPublisher::new(registry.clone());
	let schema = channel_schema(publisher);

	let state = AppState::new(
		Arc::new(StandardExecutor),
		Arc::new(schema),
		registry,
		Arc::new(ResultReadCounter::new()),
		config.query.clone(),
	);

	let mut http = HttpSubsystem::new(config.http.clone(), state.clone());
	let mut ws = WsSubsystem::new(config.ws.clone(), state);

	http.start().await?;
	ws.start().await?;
	tracing::info!("{} and {} subsystems started", http.name(), ws.name());

	tokio::signal::ctrl_c().await.map_err(|e| Error::internal(format!("failed to listen for ctrl-c: {}", e)))?;
	tracing::info!("Shutting down");

	ws.shutdown().await?;
	http.shutdown().await?;
	tracing::info!("Stopped");
	Ok(())
}
