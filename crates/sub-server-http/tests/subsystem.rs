// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use conduit_sub_api::{HealthStatus, Subsystem};
use conduit_sub_server::AppState;
use conduit_sub_server_http::{HttpConfig, HttpSubsystem};
use conduit_subscription::SubscriptionRegistry;
use conduit_testing::{fixture, wait_for};
use tokio::{
	io::{AsyncReadExt, AsyncWriteExt},
	net::TcpStream,
};

fn subsystem() -> HttpSubsystem {
	let state = AppState::standard(fixture::order_schema(), Arc::new(SubscriptionRegistry::default()));
	HttpSubsystem::new(HttpConfig::new().with_bind_addr("127.0.0.1:0"), state)
}

#[tokio::test]
async fn test_start_serve_shutdown() {
	let mut http = subsystem();
	assert!(!http.is_running());
	assert!(http.health_status().is_failed());

	http.start().await.unwrap();
	assert!(http.is_running());
	assert_eq!(http.health_status(), HealthStatus::Healthy);
	let addr = http.local_addr().unwrap();

	let body = r#"{"query": "{ order(id: \"ord_1\") { id } }"}"#;
	let mut stream = TcpStream::connect(addr).await.unwrap();
	let request = format!(
		"POST /graphql HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
		body.len(),
		body
	);
	stream.write_all(request.as_bytes()).await.unwrap();

	let mut response = String::new();
	stream.read_to_string(&mut response).await.unwrap();
	assert!(response.starts_with("HTTP/1.1 200"));
	assert!(response.ends_with(r#"{"data":{"order":{"id":"ord_1"}}}"#));

	http.shutdown().await.unwrap();
	wait_for(|| !http.is_running(), "HTTP server should stop").await;
}

#[tokio::test]
async fn test_start_is_idempotent() {
	let mut http = subsystem();
	http.start().await.unwrap();
	let addr = http.local_addr();

	http.start().await.unwrap();
	assert_eq!(http.local_addr(), addr);

	http.shutdown().await.unwrap();
	assert!(!http.is_running());
}
