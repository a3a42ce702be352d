// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Poll-based waiting for tests.
//!
//! Sessions and servers change state on their own tasks; tests wait for the
//! observable effect instead of sleeping for a fixed time.

use std::{
	future::Future,
	time::{Duration, Instant},
};

use tokio::time::sleep;

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default poll interval (1 millisecond)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Wait for a condition to become true, polling at regular intervals
///
/// # Panics
/// Panics if the condition doesn't become true within the timeout period
pub async fn wait_for_condition<F>(condition: F, timeout: Duration, poll_interval: Duration, timeout_message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();

	while !condition() {
		if start.elapsed() > timeout {
			panic!("Timeout after {:?}: {}", timeout, timeout_message);
		}
		sleep(poll_interval).await;
	}
}

/// Wait for a condition with default timeout and poll interval
pub async fn wait_for<F>(condition: F, message: &str)
where
	F: Fn() -> bool,
{
	wait_for_condition(condition, DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL, message).await;
}

/// Like [`wait_for`], for conditions that have to await to be checked.
pub async fn wait_for_async<F, Fut>(condition: F, message: &str)
where
	F: Fn() -> Fut,
	Fut: Future<Output = bool>,
{
	let start = Instant::now();

	while !condition().await {
		if start.elapsed() > DEFAULT_TIMEOUT {
			panic!("Timeout after {:?}: {}", DEFAULT_TIMEOUT, message);
		}
		sleep(DEFAULT_POLL_INTERVAL).await;
	}
}

#[cfg(test)]
pub mod tests {
	use std::{
		sync::{
			Arc,
			atomic::{AtomicUsize, Ordering},
		},
		thread,
	};

	use super::*;

	#[tokio::test]
	async fn test_wait_for_immediate() {
		wait_for(|| true, "Should not timeout").await;
	}

	#[tokio::test]
	async fn test_wait_for_becomes_true() {
		let counter = Arc::new(AtomicUsize::new(0));
		let counter_clone = counter.clone();

		thread::spawn(move || {
			thread::sleep(Duration::from_millis(50));
			counter_clone.store(5, Ordering::SeqCst);
		});

		wait_for(|| counter.load(Ordering::SeqCst) == 5, "Counter should reach 5").await;
	}

	#[tokio::test]
	async fn test_wait_for_async() {
		let counter = Arc::new(AtomicUsize::new(0));
		wait_for_async(
			|| {
				let counter = counter.clone();
				async move { counter.fetch_add(1, Ordering::SeqCst) >= 3 }
			},
			"Counter should pass 3",
		)
		.await;
	}

	#[tokio::test]
	#[should_panic(expected = "Timeout after")]
	async fn test_wait_for_timeout() {
		wait_for_condition(
			|| false,
			Duration::from_millis(10),
			Duration::from_millis(1),
			"Condition never becomes true",
		)
		.await;
	}
}
