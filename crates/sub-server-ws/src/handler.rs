// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use conduit_sub_server::AppState;
use tokio::{net::TcpStream, sync::watch};
use tracing::{debug, warn};

use crate::{
	WsConfig,
	session::{Session, Termination},
};

/// Serve one accepted connection as a subscription session.
pub async fn handle_connection(
	stream: TcpStream,
	state: AppState,
	config: Arc<WsConfig>,
	shutdown: watch::Receiver<bool>,
) -> Termination {
	if let Err(e) = stream.set_nodelay(true) {
		warn!("Failed to set TCP_NODELAY: {}", e);
	}

	let peer = stream.peer_addr().ok();
	let session = Session::new(state, config);
	let session_id = session.id();
	debug!("Session {} opened for {:?}", session_id, peer);

	let termination = session.run(stream, shutdown).await;
	debug!("Session {} closed for {:?}: {}", session_id, peer, termination);
	termination
}
