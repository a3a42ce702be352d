// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod parse;

use std::fmt::{self, Display, Formatter};

use async_graphql_parser::types::OperationType;
use serde_json::{Map, Value};

/// Deepest bracket nesting accepted in query text, and the deepest value the
/// executor projects a selection set through.
pub const MAX_DEPTH: usize = 64;

/// Arguments attached to a selected field, after variable substitution.
pub type Arguments = Map<String, Value>;

/// Variables supplied next to the query text.
pub type Variables = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
	Query,
	Mutation,
	Subscription,
}

impl From<OperationType> for OperationKind {
	fn from(ty: OperationType) -> Self {
		match ty {
			OperationType::Query => OperationKind::Query,
			OperationType::Mutation => OperationKind::Mutation,
			OperationType::Subscription => OperationKind::Subscription,
		}
	}
}

impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			OperationKind::Query => f.write_str("query"),
			OperationKind::Mutation => f.write_str("mutation"),
			OperationKind::Subscription => f.write_str("subscription"),
		}
	}
}

/// A parsed operation. Variables are already substituted into the arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	pub kind: OperationKind,
	pub name: Option<String>,
	pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
	pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
	pub name: String,
	pub alias: Option<String>,
	pub arguments: Arguments,
	pub selection_set: Option<SelectionSet>,
}

impl Selection {
	/// The key this selection occupies in the result object.
	pub fn response_key(&self) -> &str {
		self.alias.as_deref().unwrap_or(&self.name)
	}
}
