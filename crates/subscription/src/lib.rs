// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Subscription bookkeeping shared by the gateway and event publishers.
//!
//! An event publisher declares every [`EventType`] it will ever emit. Sessions
//! then [`register`](SubscriptionRegistry::register) for one of those types and
//! receive a [`Subscriber`], the receive side of a per-session channel. Each
//! [`publish`](SubscriptionRegistry::publish) fans a [`Notification`] out to all
//! live subscribers of that type. Dropping the `Subscriber` removes it from the
//! registry, so a terminated session can never be notified again.
//!
//! [`ResultReadCounter`] counts successful re-executions per event type.

pub mod counter;
pub mod delivery;
pub mod event;
pub mod publisher;
pub mod registry;
pub mod session;

pub use counter::ResultReadCounter;
pub use delivery::DeliveryResult;
pub use event::{EventType, Notification};
pub use publisher::EventPublisher;
pub use registry::{DEFAULT_SUBSCRIBER_BUFFER, NotificationChannel, Subscriber, SubscriptionRegistry};
pub use session::SessionId;
