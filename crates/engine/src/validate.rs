// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use conduit_type::{Error, Result};

use crate::{Object, SelectionSet};

/// Check that every top-level selection names a field of `root` and that no two
/// selections share a response key.
///
/// Nested selection sets are projected over resolver output at execution time and
/// are not checked here.
pub fn validate(root: &Object, selection_set: &SelectionSet) -> Result<()> {
	if selection_set.selections.is_empty() {
		return Err(Error::validation("selection set must not be empty"));
	}

	let mut keys = HashSet::with_capacity(selection_set.selections.len());
	for selection in &selection_set.selections {
		if root.field(&selection.name).is_none() {
			return Err(Error::validation(format!(
				"unknown field \"{}\" on type {}",
				selection.name,
				root.name()
			)));
		}
		if !keys.insert(selection.response_key()) {
			return Err(Error::validation(format!("duplicate response key \"{}\"", selection.response_key())));
		}
	}

	Ok(())
}
