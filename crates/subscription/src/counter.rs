// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

use crate::EventType;

/// Counts, per event type, how many times a subscription result was computed
/// and sent. Counts only ever grow.
///
/// All event types share one lock; with many sessions on a single hot event
/// type this lock is the contention point.
#[derive(Debug, Default)]
pub struct ResultReadCounter {
	reads: Mutex<HashMap<EventType, u64>>,
}

impl ResultReadCounter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record one successful re-execution and return the new count.
	pub fn increment(&self, event_type: &EventType) -> u64 {
		let mut reads = self.reads.lock();
		match reads.get_mut(event_type.as_str()) {
			Some(count) => {
				*count += 1;
				*count
			}
			None => {
				reads.insert(event_type.clone(), 1);
				1
			}
		}
	}

	pub fn get(&self, event_type: &str) -> u64 {
		self.reads.lock().get(event_type).copied().unwrap_or(0)
	}

	pub fn snapshot(&self) -> BTreeMap<EventType, u64> {
		self.reads.lock().iter().map(|(event_type, count)| (event_type.clone(), *count)).collect()
	}
}
