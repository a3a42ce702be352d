// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! WebSocket subscription subsystem for the gateway.
//!
//! Every accepted connection becomes a subscription session:
//!
//! 1. The upgrade request must target the configured path.
//! 2. The first client frame carries the request body, `{"query": ..., "variables": ...}`,
//!    which must be a subscription selecting exactly one field.
//! 3. The session registers for the event type named by that field and, for
//!    each notification, re-executes the query and sends one envelope:
//!
//! ```json
//! {"data": {"orderUpdated": {"id": "ord_1", "status": "shipped"}}}
//! ```
//!
//! 4. Any client frame, a close or a transport error ends the session, as do
//!    an execution error (after one `{"errors": [...]}` envelope), the event
//!    type being retired and server shutdown. The session always unregisters.
//!
//! # Example
//!
//! ```ignore
//! use conduit_sub_server_ws::{WsConfig, WsSubsystem};
//!
//! let mut ws = WsSubsystem::new(WsConfig::default(), state);
//! ws.start().await?;
//! ```

pub mod config;
pub mod handler;
mod handshake;
pub mod session;
pub mod subsystem;

pub use config::WsConfig;
pub use handler::handle_connection;
pub use session::{Session, SessionState, Termination};
pub use subsystem::WsSubsystem;
