// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tokio::sync::mpsc::{Sender, error::TrySendError};

use crate::Notification;

/// Result of attempting to hand a notification to one subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
	/// Notification was queued for the session.
	Delivered,
	/// The session's buffer is full. The notification is dropped for this session.
	BackPressure,
	/// The session has gone away. The subscriber should be pruned.
	Disconnected,
}

impl DeliveryResult {
	/// Never waits: a slow session must not stall the publisher.
	pub(crate) fn try_deliver(sender: &Sender<Notification>, notification: Notification) -> Self {
		match sender.try_send(notification) {
			Ok(()) => DeliveryResult::Delivered,
			Err(TrySendError::Full(_)) => DeliveryResult::BackPressure,
			Err(TrySendError::Closed(_)) => DeliveryResult::Disconnected,
		}
	}
}

#[cfg(test)]
mod tests {
	use tokio::sync::mpsc;

	use super::*;

	#[test]
	fn test_try_deliver_outcomes() {
		let (tx, mut rx) = mpsc::channel(1);

		assert_eq!(DeliveryResult::try_deliver(&tx, Notification::new("a", None)), DeliveryResult::Delivered);
		assert_eq!(DeliveryResult::try_deliver(&tx, Notification::new("a", None)), DeliveryResult::BackPressure);

		assert!(rx.try_recv().is_ok());
		rx.close();
		assert_eq!(DeliveryResult::try_deliver(&tx, Notification::new("a", None)), DeliveryResult::Disconnected);
	}
}
