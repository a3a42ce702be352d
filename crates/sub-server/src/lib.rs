// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared infrastructure for the gateway's HTTP and WebSocket servers.
//!
//! Both transports decode the same request body, run it through the same
//! [`QueryExecutor`](conduit_engine::QueryExecutor) pipeline and answer with the
//! same [`Response`] envelope. The process root builds one [`AppState`] and
//! hands a clone to each server.

pub mod config;
pub mod execute;
pub mod request;
pub mod response;
pub mod state;
pub mod stats;

pub use config::QueryConfig;
pub use execute::{PreparedSubscription, execute_operation, execute_subscription, prepare_subscription};
pub use request::{GraphqlRequest, decode_request};
pub use response::Response;
pub use state::AppState;
pub use stats::SubscriptionStats;
