// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! One subscription over one WebSocket connection.
//!
//! A session moves `Connecting → Registered → Listening → Terminated` and
//! reaches `Terminated` exactly once, whatever ends it. Nothing touches the
//! registry or the socket after that.

use std::{
	fmt::{self, Display, Formatter},
	sync::Arc,
};

use conduit_sub_server::{
	AppState, PreparedSubscription, Response, decode_request, execute_subscription, prepare_subscription,
};
use conduit_subscription::{SessionId, Subscriber};
use conduit_type::Error;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde_json::json;
use tokio::{
	io::{AsyncRead, AsyncWrite},
	sync::{oneshot, watch},
	time::timeout,
};
use tokio_tungstenite::{
	accept_hdr_async,
	tungstenite::{Error as WsError, Message},
};
use tracing::{debug, error, warn};

use crate::{WsConfig, handshake::require_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	Connecting,
	Registered,
	Listening,
	Terminated,
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
	/// The WebSocket handshake did not complete.
	UpgradeFailed,
	/// The subscription request was refused before registration.
	Rejected(Error),
	/// The client closed the connection or sent a frame after subscribing.
	Unsubscribed,
	/// Reading from or writing to the client failed.
	Disconnected,
	/// Re-executing the subscription failed.
	InternalError(Error),
	/// The event type was retired by the publisher.
	Retired,
	/// The server is shutting down.
	Shutdown,
}

impl Display for Termination {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Termination::UpgradeFailed => f.write_str("upgrade failed"),
			Termination::Rejected(err) => write!(f, "rejected: {}", err),
			Termination::Unsubscribed => f.write_str("unsubscribed"),
			Termination::Disconnected => f.write_str("disconnected"),
			Termination::InternalError(err) => write!(f, "internal error: {}", err),
			Termination::Retired => f.write_str("event type retired"),
			Termination::Shutdown => f.write_str("server shutdown"),
		}
	}
}

/// What the client did after subscribing.
#[derive(Debug)]
enum ClientEvent {
	Closed,
	Errored(String),
}

/// First frame of a connection.
enum Opening {
	Request(Vec<u8>),
	Closed,
	Errored(String),
}

pub struct Session {
	id: SessionId,
	app: AppState,
	config: Arc<WsConfig>,
	state: SessionState,
	delivered: u64,
}

impl Session {
	pub fn new(app: AppState, config: Arc<WsConfig>) -> Self {
		Self {
			id: SessionId::generate(),
			app,
			config,
			state: SessionState::Connecting,
			delivered: 0,
		}
	}

	pub fn id(&self) -> SessionId {
		self.id
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	/// Drive the session over `stream` until it terminates.
	///
	/// The upgrade handshake and the subscription request each have
	/// `request_timeout` to arrive.
	pub async fn run<S>(mut self, stream: S, mut shutdown: watch::Receiver<bool>) -> Termination
	where
		S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
	{
		let callback = require_path(self.config.path.clone());
		let handshake = timeout(self.config.request_timeout, accept_hdr_async(stream, callback));
		let ws = tokio::select! {
			biased;

			_ = shutdown.wait_for(|stop| *stop) => return self.terminate(Termination::Shutdown),

			accepted = handshake => match accepted {
				Ok(Ok(ws)) => ws,
				Ok(Err(err)) => {
					warn!("Session {} upgrade failed: {}", self.id, err);
					return self.terminate(Termination::UpgradeFailed);
				}
				Err(_) => {
					debug!("Session {} sent no upgrade request within {:?}", self.id, self.config.request_timeout);
					return self.terminate(Termination::UpgradeFailed);
				}
			},
		};
		let (mut sink, mut stream) = ws.split();

		let body = match timeout(self.config.request_timeout, next_request(&mut stream)).await {
			Ok(Opening::Request(body)) => body,
			Ok(Opening::Closed) => return self.terminate(Termination::Unsubscribed),
			Ok(Opening::Errored(reason)) => {
				debug!("Session {} read failed before subscribing: {}", self.id, reason);
				return self.terminate(Termination::Disconnected);
			}
			Err(_) => return self.reject(&mut sink, Error::MissingBody).await,
		};

		let subscription = match self.prepare(&body).await {
			Ok(subscription) => subscription,
			Err(err) => return self.reject(&mut sink, err).await,
		};

		let mut subscriber = match self.app.registry().register(subscription.event_type(), self.id) {
			Ok(subscriber) => subscriber,
			Err(err) => return self.reject(&mut sink, err).await,
		};
		self.transition(SessionState::Registered);

		let (closed_tx, mut closed_rx) = oneshot::channel();
		let reader = tokio::spawn(watch_client(stream, closed_tx));
		self.transition(SessionState::Listening);

		let termination = if *shutdown.borrow() {
			Termination::Shutdown
		} else {
			self.listen(&mut sink, &mut subscriber, &subscription, &mut shutdown, &mut closed_rx).await
		};

		subscriber.unregister();
		reader.abort();
		let _ = sink.close().await;

		self.terminate(termination)
	}

	async fn prepare(&self, body: &[u8]) -> conduit_type::Result<PreparedSubscription> {
		let request = decode_request(body)?;
		prepare_subscription(&self.app, request).await
	}

	async fn listen<W>(
		&mut self,
		sink: &mut W,
		subscriber: &mut Subscriber,
		subscription: &PreparedSubscription,
		shutdown: &mut watch::Receiver<bool>,
		closed: &mut oneshot::Receiver<ClientEvent>,
	) -> Termination
	where
		W: Sink<Message, Error = WsError> + Unpin,
	{
		loop {
			tokio::select! {
				biased;

				changed = shutdown.changed() => {
					if changed.is_err() || *shutdown.borrow() {
						return Termination::Shutdown;
					}
				}

				event = &mut *closed => {
					return match event {
						Ok(ClientEvent::Closed) => Termination::Unsubscribed,
						Ok(ClientEvent::Errored(reason)) => {
							debug!("Session {} read failed: {}", self.id, reason);
							Termination::Disconnected
						}
						Err(_) => Termination::Disconnected,
					};
				}

				notification = subscriber.recv() => {
					let Some(notification) = notification else {
						return Termination::Retired;
					};

					match execute_subscription(&self.app, subscription, self.id, notification.payload).await {
						Ok(data) => {
							self.app.counter().increment(subscription.event_type());
							if let Err(err) = write(sink, &Response::data(data)).await {
								debug!("Session {} write failed: {}", self.id, err);
								return Termination::Disconnected;
							}
							self.delivered += 1;
						}
						Err(err) => {
							error!("Session {} failed to execute {}: {}", self.id, subscription.event_type(), err);
							let _ = write(sink, &Response::from(&err)).await;
							return Termination::InternalError(err);
						}
					}
				}
			}
		}
	}

	async fn reject<W>(mut self, sink: &mut W, err: Error) -> Termination
	where
		W: Sink<Message, Error = WsError> + Unpin,
	{
		debug!("Session {} rejected: {}", self.id, err);
		let _ = write(sink, &Response::from(&err)).await;
		let _ = sink.close().await;
		self.terminate(Termination::Rejected(err))
	}

	fn transition(&mut self, next: SessionState) {
		debug!("Session {} {:?} -> {:?}", self.id, self.state, next);
		self.state = next;
	}

	fn terminate(&mut self, termination: Termination) -> Termination {
		self.transition(SessionState::Terminated);
		debug!("Session {} terminated after {} result(s): {}", self.id, self.delivered, termination);
		termination
	}
}

async fn write<W>(sink: &mut W, response: &Response) -> Result<(), WsError>
where
	W: Sink<Message, Error = WsError> + Unpin,
{
	let text = response.to_json().unwrap_or_else(|err| {
		error!("{}", err);
		json!({"errors": [err.to_string()]}).to_string()
	});
	sink.send(Message::text(text)).await
}

async fn next_request<R>(stream: &mut R) -> Opening
where
	R: Stream<Item = Result<Message, WsError>> + Unpin,
{
	while let Some(frame) = stream.next().await {
		match frame {
			Ok(Message::Text(text)) => return Opening::Request(text.as_bytes().to_vec()),
			Ok(Message::Binary(data)) => return Opening::Request(data.to_vec()),
			Ok(Message::Close(_)) => return Opening::Closed,
			Ok(_) => continue,
			Err(err) => return Opening::Errored(err.to_string()),
		}
	}
	Opening::Closed
}

/// Read the client stream until it signals the end of the subscription.
/// Control frames are skipped; any data frame counts as unsubscribe.
async fn watch_client<R>(mut stream: R, closed: oneshot::Sender<ClientEvent>)
where
	R: Stream<Item = Result<Message, WsError>> + Unpin,
{
	let event = loop {
		match stream.next().await {
			Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
			Some(Ok(_)) | None => break ClientEvent::Closed,
			Some(Err(err)) => break ClientEvent::Errored(err.to_string()),
		}
	};
	let _ = closed.send(event);
}
