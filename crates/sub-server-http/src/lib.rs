// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP server subsystem for the gateway.
//!
//! An Axum server answering queries and mutations with the shared response
//! envelope. Subscriptions are served by the WebSocket subsystem.
//!
//! # Endpoints
//!
//! - `POST /graphql` - Execute a query or mutation
//! - `GET /health` - Health check
//! - `GET /v1/subscriptions` - Subscriber and read counts per event type
//!
//! # Example
//!
//! ```ignore
//! use conduit_sub_server::AppState;
//! use conduit_sub_server_http::{HttpConfig, HttpSubsystem};
//!
//! let state = AppState::standard(schema, registry);
//! let mut http = HttpSubsystem::new(HttpConfig::default(), state);
//! http.start().await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod subsystem;

pub use config::HttpConfig;
pub use error::AppError;
pub use handlers::HealthResponse;
pub use routes::router;
pub use subsystem::HttpSubsystem;
