// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use uuid::Uuid;

/// Identity of one subscription session, minted when the connection is accepted.
///
/// Used for registry bookkeeping and diagnostics only; it carries no authority.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
	/// Time-ordered, so ids sort by connection time in logs.
	pub fn generate() -> Self {
		Self(Uuid::now_v7())
	}
}

impl Display for SessionId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl From<Uuid> for SessionId {
	fn from(value: Uuid) -> Self {
		Self(value)
	}
}

impl From<SessionId> for Uuid {
	fn from(value: SessionId) -> Self {
		value.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_is_unique() {
		let first = SessionId::generate();
		let second = SessionId::generate();
		assert_ne!(first, second);
	}
}
