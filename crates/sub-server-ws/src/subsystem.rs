// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! WebSocket server subsystem.
//!
//! `WsSubsystem` owns the accept loop: it limits concurrent sessions with a
//! semaphore, hands every connection its own task and, on shutdown, signals
//! all sessions and waits for them to drain.

use std::{
	any::Any,
	net::SocketAddr,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use async_trait::async_trait;
use conduit_sub_api::{HealthStatus, Subsystem};
use conduit_sub_server::AppState;
use conduit_type::Error;
use parking_lot::RwLock;
use tokio::{
	net::TcpListener,
	spawn,
	sync::{Semaphore, watch},
	time::{Instant, sleep},
};

use crate::{WsConfig, handler::handle_connection};

/// WebSocket server subsystem.
///
/// # Example
///
/// ```ignore
/// let mut ws = WsSubsystem::new(WsConfig::default(), state);
///
/// ws.start().await?;
/// // Server is now accepting subscriptions
///
/// ws.shutdown().await?;
/// // Every session was told to stop and the server has drained
/// ```
pub struct WsSubsystem {
	config: Arc<WsConfig>,
	/// Actual bound address (available after start).
	actual_addr: RwLock<Option<SocketAddr>>,
	state: AppState,
	running: Arc<AtomicBool>,
	active_connections: Arc<AtomicUsize>,
	shutdown_tx: Option<watch::Sender<bool>>,
	connection_semaphore: Arc<Semaphore>,
}

impl WsSubsystem {
	pub fn new(config: WsConfig, state: AppState) -> Self {
		let max_connections = config.max_connections;
		Self {
			config: Arc::new(config),
			actual_addr: RwLock::new(None),
			state,
			running: Arc::new(AtomicBool::new(false)),
			active_connections: Arc::new(AtomicUsize::new(0)),
			shutdown_tx: None,
			connection_semaphore: Arc::new(Semaphore::new(max_connections)),
		}
	}

	pub fn bind_addr(&self) -> &str {
		&self.config.bind_addr
	}

	/// Get the actual bound address (available after start).
	pub fn local_addr(&self) -> Option<SocketAddr> {
		*self.actual_addr.read()
	}

	pub fn port(&self) -> Option<u16> {
		self.local_addr().map(|a| a.port())
	}

	/// URL clients subscribe on, once started.
	pub fn url(&self) -> Option<String> {
		self.local_addr().map(|addr| format!("ws://{}{}", addr, self.config.path))
	}

	/// Get the current number of active connections.
	pub fn active_connections(&self) -> usize {
		self.active_connections.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Subsystem for WsSubsystem {
	fn name(&self) -> &'static str {
		"WebSocket"
	}

	async fn start(&mut self) -> conduit_type::Result<()> {
		// Idempotent: if already started, return success
		if self.shutdown_tx.is_some() {
			return Ok(());
		}

		let addr = self.config.bind_addr.clone();
		let listener = TcpListener::bind(&addr)
			.await
			.map_err(|e| Error::internal(format!("failed to bind WebSocket server to {}: {}", addr, e)))?;

		let actual_addr =
			listener.local_addr().map_err(|e| Error::internal(format!("failed to get local address: {}", e)))?;
		*self.actual_addr.write() = Some(actual_addr);
		tracing::info!("WebSocket server bound to {}{}", actual_addr, self.config.path);

		let (tx, mut rx) = watch::channel(false);
		let state = self.state.clone();
		let config = self.config.clone();
		let running = self.running.clone();
		let active_connections = self.active_connections.clone();
		let semaphore = self.connection_semaphore.clone();
		running.store(true, Ordering::SeqCst);

		spawn(async move {
			loop {
				tokio::select! {
					biased;

					result = rx.changed() => {
						if result.is_err() || *rx.borrow() {
							tracing::info!("WebSocket server shutting down");
							break;
						}
					}

					accept = listener.accept() => {
						match accept {
							Ok((stream, peer)) => {
								let permit = match semaphore.clone().try_acquire_owned() {
									Ok(p) => p,
									Err(_) => {
										tracing::warn!("Connection limit reached, rejecting {}", peer);
										continue;
									}
								};

								let conn_state = state.clone();
								let conn_config = config.clone();
								let shutdown_rx = rx.clone();
								let active = active_connections.clone();

								active.fetch_add(1, Ordering::SeqCst);
								tracing::debug!("Accepted connection from {}", peer);

								spawn(async move {
									handle_connection(stream, conn_state, conn_config, shutdown_rx).await;
									active.fetch_sub(1, Ordering::SeqCst);
									drop(permit);
								});
							}
							Err(e) => {
								tracing::warn!("Accept error: {}", e);
							}
						}
					}
				}
			}

			running.store(false, Ordering::SeqCst);
			tracing::info!("WebSocket server stopped");
		});

		self.shutdown_tx = Some(tx);
		Ok(())
	}

	async fn shutdown(&mut self) -> conduit_type::Result<()> {
		let Some(tx) = self.shutdown_tx.take() else {
			return Ok(());
		};
		let _ = tx.send(true);

		let deadline = Instant::now() + self.config.shutdown_timeout;
		while self.active_connections() > 0 || self.is_running() {
			if Instant::now() > deadline {
				tracing::warn!(
					"WebSocket shutdown timeout with {} connections still active",
					self.active_connections()
				);
				break;
			}
			sleep(Duration::from_millis(10)).await;
		}
		tracing::debug!("WebSocket server shutdown completed");

		Ok(())
	}

	fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	fn health_status(&self) -> HealthStatus {
		if !self.running.load(Ordering::SeqCst) {
			return HealthStatus::Failed {
				description: "Not running".to_string(),
			};
		}

		let active = self.active_connections.load(Ordering::SeqCst);
		let max = self.config.max_connections;

		// Warn if connections are at 90% capacity
		if active > max * 90 / 100 {
			HealthStatus::Warning {
				description: format!("High connection count: {}/{}", active, max),
			}
		} else {
			HealthStatus::Healthy
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
