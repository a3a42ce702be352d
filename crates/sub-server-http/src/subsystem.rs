// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP server subsystem.
//!
//! `HttpSubsystem` binds the listener on start, serves the router on a
//! spawned task and drains in-flight requests on shutdown.

use std::{
	any::Any,
	net::SocketAddr,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};

use async_trait::async_trait;
use conduit_sub_api::{HealthStatus, Subsystem};
use conduit_sub_server::AppState;
use conduit_type::Error;
use parking_lot::RwLock;
use tokio::{net::TcpListener, sync::oneshot, time::timeout};

use crate::{HttpConfig, routes::router};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP server subsystem.
///
/// # Example
///
/// ```ignore
/// let mut http = HttpSubsystem::new(HttpConfig::default(), state);
///
/// http.start().await?;
/// // Server is now accepting connections
///
/// http.shutdown().await?;
/// // Server has gracefully stopped
/// ```
pub struct HttpSubsystem {
	config: HttpConfig,
	/// Actual bound address (available after start).
	actual_addr: RwLock<Option<SocketAddr>>,
	state: AppState,
	running: Arc<AtomicBool>,
	shutdown_tx: Option<oneshot::Sender<()>>,
	shutdown_complete_rx: Option<oneshot::Receiver<()>>,
}

impl HttpSubsystem {
	pub fn new(config: HttpConfig, state: AppState) -> Self {
		Self {
			config,
			actual_addr: RwLock::new(None),
			state,
			running: Arc::new(AtomicBool::new(false)),
			shutdown_tx: None,
			shutdown_complete_rx: None,
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
}

#[async_trait]
impl Subsystem for HttpSubsystem {
	fn name(&self) -> &'static str {
		"Http"
	}

	async fn start(&mut self) -> conduit_type::Result<()> {
		// Idempotent: if already started, return success
		if self.shutdown_tx.is_some() {
			return Ok(());
		}

		let addr = self.config.bind_addr.clone();
		let listener = TcpListener::bind(&addr)
			.await
			.map_err(|e| Error::internal(format!("failed to bind HTTP server to {}: {}", addr, e)))?;

		let actual_addr =
			listener.local_addr().map_err(|e| Error::internal(format!("failed to get local address: {}", e)))?;
		*self.actual_addr.write() = Some(actual_addr);
		tracing::info!("HTTP server bound to {}", actual_addr);

		let (shutdown_tx, shutdown_rx) = oneshot::channel();
		let (complete_tx, complete_rx) = oneshot::channel();

		let state = self.state.clone();
		let running = self.running.clone();
		running.store(true, Ordering::SeqCst);

		tokio::spawn(async move {
			let app = router(state);
			let server = axum::serve(listener, app).with_graceful_shutdown(async {
				shutdown_rx.await.ok();
				tracing::info!("HTTP server received shutdown signal");
			});

			if let Err(e) = server.await {
				tracing::error!("HTTP server error: {}", e);
			}

			running.store(false, Ordering::SeqCst);
			let _ = complete_tx.send(());
			tracing::info!("HTTP server stopped");
		});

		self.shutdown_tx = Some(shutdown_tx);
		self.shutdown_complete_rx = Some(complete_rx);
		Ok(())
	}

	async fn shutdown(&mut self) -> conduit_type::Result<()> {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(());
		}

		if let Some(rx) = self.shutdown_complete_rx.take() {
			match timeout(SHUTDOWN_TIMEOUT, rx).await {
				Ok(_) => tracing::debug!("HTTP server shutdown completed"),
				Err(_) => tracing::warn!("HTTP server shutdown timed out"),
			}
		}

		Ok(())
	}

	fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	fn health_status(&self) -> HealthStatus {
		if self.running.load(Ordering::SeqCst) {
			HealthStatus::Healthy
		} else {
			HealthStatus::Failed {
				description: "Not running".to_string(),
			}
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
