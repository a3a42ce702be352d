// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Per-request context handed to every resolver.
#[derive(Debug, Clone, Default)]
pub struct Context {
	session: Option<String>,
}

impl Context {
	pub fn new() -> Self {
		Self::default()
	}

	/// Context for a re-execution on behalf of a subscription session.
	pub fn with_session(session: impl Into<String>) -> Self {
		Self {
			session: Some(session.into()),
		}
	}

	pub fn session(&self) -> Option<&str> {
		self.session.as_deref()
	}
}
