// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Registry mapping event types to their notification channels.

use std::{collections::HashMap, sync::Arc};

use conduit_type::{Error, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{DeliveryResult, EventType, Notification, SessionId};

/// Per-session buffer used when none is configured.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 64;

/// The live subscribers of one event type.
pub struct NotificationChannel {
	event_type: EventType,
	subscribers: DashMap<SessionId, mpsc::Sender<Notification>>,
}

impl NotificationChannel {
	fn new(event_type: EventType) -> Self {
		Self {
			event_type,
			subscribers: DashMap::new(),
		}
	}

	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	pub fn subscriber_count(&self) -> usize {
		self.subscribers.len()
	}

	/// Fan `notification` out to every subscriber. Returns how many accepted it.
	fn deliver(&self, notification: &Notification) -> usize {
		let mut delivered = 0;
		let mut disconnected = Vec::new();

		for entry in self.subscribers.iter() {
			match DeliveryResult::try_deliver(entry.value(), notification.clone()) {
				DeliveryResult::Delivered => delivered += 1,
				DeliveryResult::BackPressure => {
					warn!("Subscriber buffer full for session {} on {}, dropping notification", entry.key(), self.event_type);
				}
				DeliveryResult::Disconnected => disconnected.push(*entry.key()),
			}
		}

		// removal must happen after iteration releases the shard locks
		for session_id in disconnected {
			self.subscribers.remove(&session_id);
			debug!("Pruned disconnected session {} from {}", session_id, self.event_type);
		}

		delivered
	}
}

/// Receive side of one session's subscription.
///
/// Removes itself from its notification channel when unregistered or dropped,
/// whichever comes first.
pub struct Subscriber {
	session_id: SessionId,
	channel: Arc<NotificationChannel>,
	receiver: mpsc::Receiver<Notification>,
	registered: bool,
}

impl Subscriber {
	pub fn session_id(&self) -> SessionId {
		self.session_id
	}

	pub fn event_type(&self) -> &EventType {
		&self.channel.event_type
	}

	/// Wait for the next notification. `None` once the event type is retired.
	pub async fn recv(&mut self) -> Option<Notification> {
		self.receiver.recv().await
	}

	pub fn try_recv(&mut self) -> Option<Notification> {
		self.receiver.try_recv().ok()
	}

	/// Remove this session from the registry. Returns `false` if it was already
	/// gone, e.g. because the event type was retired.
	pub fn unregister(mut self) -> bool {
		self.deregister()
	}

	fn deregister(&mut self) -> bool {
		if !self.registered {
			return false;
		}
		self.registered = false;

		let removed = self.channel.subscribers.remove(&self.session_id).is_some();
		debug!("Unregistered session {} from {}", self.session_id, self.channel.event_type);
		removed
	}
}

impl Drop for Subscriber {
	fn drop(&mut self) {
		self.deregister();
	}
}

/// Directory of event types and their notification channels.
///
/// The key set is owned by the event publisher: it must [`declare`] an event
/// type before any session can register for it. Registration and publication
/// only take the read lock.
///
/// [`declare`]: SubscriptionRegistry::declare
pub struct SubscriptionRegistry {
	channels: RwLock<HashMap<EventType, Arc<NotificationChannel>>>,
	buffer: usize,
}

impl SubscriptionRegistry {
	/// Create a registry whose subscribers buffer up to `buffer` notifications.
	pub fn new(buffer: usize) -> Self {
		Self {
			channels: RwLock::new(HashMap::new()),
			buffer: buffer.max(1),
		}
	}

	/// Create a registry with `event_types` already declared.
	pub fn with_event_types<I, E>(buffer: usize, event_types: I) -> Self
	where
		I: IntoIterator<Item = E>,
		E: Into<EventType>,
	{
		let registry = Self::new(buffer);
		for event_type in event_types {
			registry.declare(event_type);
		}
		registry
	}

	/// Make `event_type` available for registration. Returns `false` if it was
	/// already declared; existing subscribers are kept.
	pub fn declare(&self, event_type: impl Into<EventType>) -> bool {
		let event_type = event_type.into();
		let mut channels = self.channels.write();
		if channels.contains_key(&event_type) {
			return false;
		}

		debug!("Declared event type {}", event_type);
		channels.insert(event_type.clone(), Arc::new(NotificationChannel::new(event_type)));
		true
	}

	/// Remove `event_type`. Its subscribers see their channel close.
	pub fn retire(&self, event_type: &str) -> bool {
		let Some(channel) = self.channels.write().remove(event_type) else {
			return false;
		};

		channel.subscribers.clear();
		debug!("Retired event type {}", event_type);
		true
	}

	pub fn is_declared(&self, event_type: &str) -> bool {
		self.channels.read().contains_key(event_type)
	}

	pub fn event_types(&self) -> Vec<EventType> {
		let mut event_types: Vec<_> = self.channels.read().keys().cloned().collect();
		event_types.sort();
		event_types
	}

	/// Register `session_id` for notifications of `event_type`.
	///
	/// Fails with [`Error::UnknownEventType`] if the event type was never declared.
	pub fn register(&self, event_type: &str, session_id: SessionId) -> Result<Subscriber> {
		let (sender, receiver) = mpsc::channel(self.buffer);

		let channel = {
			let channels = self.channels.read();
			let channel = channels
				.get(event_type)
				.cloned()
				.ok_or_else(|| Error::UnknownEventType(event_type.to_string()))?;
			// insert under the read lock so a concurrent retire cannot orphan us
			channel.subscribers.insert(session_id, sender);
			channel
		};

		debug!("Registered session {} for {}", session_id, event_type);

		Ok(Subscriber {
			session_id,
			channel,
			receiver,
			registered: true,
		})
	}

	/// Remove `session_id` from `event_type`. Returns `true` if it was registered.
	pub fn unregister(&self, event_type: &str, session_id: SessionId) -> bool {
		let channels = self.channels.read();
		match channels.get(event_type) {
			Some(channel) => channel.subscribers.remove(&session_id).is_some(),
			None => false,
		}
	}

	/// Notify every subscriber of `event_type`. Returns how many were notified.
	///
	/// Never blocks on a subscriber: a full buffer drops the notification for
	/// that subscriber, a closed one is pruned.
	pub fn publish(&self, event_type: &str, payload: Option<Value>) -> Result<usize> {
		let channel = self
			.channels
			.read()
			.get(event_type)
			.cloned()
			.ok_or_else(|| Error::UnknownEventType(event_type.to_string()))?;

		let notification = Notification::new(channel.event_type.clone(), payload);
		let delivered = channel.deliver(&notification);
		debug!("Published {} to {} subscriber(s)", event_type, delivered);
		Ok(delivered)
	}

	pub fn subscriber_count(&self, event_type: &str) -> usize {
		self.channels.read().get(event_type).map(|channel| channel.subscriber_count()).unwrap_or(0)
	}
}

impl Default for SubscriptionRegistry {
	fn default() -> Self {
		Self::new(DEFAULT_SUBSCRIBER_BUFFER)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn test_register_publish_receive() {
		let registry = SubscriptionRegistry::with_event_types(8, ["orderUpdated"]);
		let mut subscriber = registry.register("orderUpdated", SessionId::generate()).unwrap();
		assert_eq!(registry.subscriber_count("orderUpdated"), 1);

		let delivered = registry.publish("orderUpdated", Some(json!({"id": "ord_1"}))).unwrap();
		assert_eq!(delivered, 1);

		let notification = subscriber.recv().await.unwrap();
		assert_eq!(notification.event_type.as_str(), "orderUpdated");
		assert_eq!(notification.payload, Some(json!({"id": "ord_1"})));
	}

	#[test]
	fn test_register_unknown_event_type() {
		let registry = SubscriptionRegistry::default();
		let err = registry.register("orderUpdated", SessionId::generate()).err().unwrap();
		assert_eq!(err, Error::UnknownEventType("orderUpdated".to_string()));
		assert_eq!(err.to_string(), "unknown event type: orderUpdated");
	}

	#[test]
	fn test_publish_unknown_event_type() {
		let registry = SubscriptionRegistry::default();
		assert!(registry.publish("orderUpdated", None).is_err());
	}

	#[test]
	fn test_register_releases_lock() {
		let registry = SubscriptionRegistry::with_event_types(8, ["orderUpdated"]);
		let _subscriber = registry.register("orderUpdated", SessionId::generate()).unwrap();

		assert!(registry.channels.try_write().is_some());
		assert!(registry.declare("orderCreated"));
	}

	#[test]
	fn test_drop_unregisters() {
		let registry = SubscriptionRegistry::with_event_types(8, ["orderUpdated"]);
		let subscriber = registry.register("orderUpdated", SessionId::generate()).unwrap();
		assert_eq!(registry.subscriber_count("orderUpdated"), 1);

		drop(subscriber);
		assert_eq!(registry.subscriber_count("orderUpdated"), 0);
		assert_eq!(registry.publish("orderUpdated", None).unwrap(), 0);
	}

	#[test]
	fn test_explicit_unregister_happens_once() {
		let registry = SubscriptionRegistry::with_event_types(8, ["orderUpdated"]);
		let session_id = SessionId::generate();
		let subscriber = registry.register("orderUpdated", session_id).unwrap();

		assert!(subscriber.unregister());
		assert!(!registry.unregister("orderUpdated", session_id));
		assert_eq!(registry.subscriber_count("orderUpdated"), 0);
	}

	#[test]
	fn test_registry_unregister() {
		let registry = SubscriptionRegistry::with_event_types(8, ["orderUpdated"]);
		let session_id = SessionId::generate();
		let subscriber = registry.register("orderUpdated", session_id).unwrap();

		assert!(registry.unregister("orderUpdated", session_id));
		assert!(!subscriber.unregister());
	}

	#[test]
	fn test_fan_out_to_all_subscribers() {
		let registry = SubscriptionRegistry::with_event_types(8, ["orderUpdated", "orderCreated"]);
		let mut first = registry.register("orderUpdated", SessionId::generate()).unwrap();
		let mut second = registry.register("orderUpdated", SessionId::generate()).unwrap();
		let mut other = registry.register("orderCreated", SessionId::generate()).unwrap();

		assert_eq!(registry.publish("orderUpdated", None).unwrap(), 2);
		assert!(first.try_recv().is_some());
		assert!(second.try_recv().is_some());
		assert!(other.try_recv().is_none());
	}

	#[test]
	fn test_full_buffer_drops_notification() {
		let registry = SubscriptionRegistry::with_event_types(1, ["tick"]);
		let mut subscriber = registry.register("tick", SessionId::generate()).unwrap();

		assert_eq!(registry.publish("tick", Some(json!(1))).unwrap(), 1);
		assert_eq!(registry.publish("tick", Some(json!(2))).unwrap(), 0);
		assert_eq!(registry.subscriber_count("tick"), 1);

		assert_eq!(subscriber.try_recv().unwrap().payload, Some(json!(1)));
		assert!(subscriber.try_recv().is_none());
	}

	#[tokio::test]
	async fn test_retire_closes_subscribers() {
		let registry = SubscriptionRegistry::with_event_types(8, ["tick"]);
		let mut subscriber = registry.register("tick", SessionId::generate()).unwrap();

		assert!(registry.retire("tick"));
		assert!(!registry.is_declared("tick"));
		assert!(subscriber.recv().await.is_none());
		assert!(!subscriber.unregister());
	}

	#[test]
	fn test_declare_is_idempotent() {
		let registry = SubscriptionRegistry::default();
		assert!(registry.declare("b"));
		assert!(registry.declare("a"));
		assert!(!registry.declare("a"));
		assert_eq!(registry.event_types(), vec![EventType::from("a"), EventType::from("b")]);
	}
}
