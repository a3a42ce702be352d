// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_type::Result;
use serde_json::Value;

use crate::{
	Context, Object, Query, SelectionSet, Variables, ast::parse::parse, execute::execute, validate::validate,
};

/// The three engine entry points the gateway depends on.
///
/// Implementations must be callable from many connections at once; the gateway
/// holds one executor behind an `Arc` for the lifetime of the process.
pub trait QueryExecutor: Send + Sync {
	fn parse(&self, text: &str, variables: &Variables) -> Result<Query>;

	fn validate(&self, ctx: &Context, root: &Object, selection_set: &SelectionSet) -> Result<()>;

	fn execute(&self, ctx: &Context, root: &Object, root_value: Option<&Value>, query: &Query) -> Result<Value>;
}

/// Executor backed by this crate's parser, validator and resolver walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardExecutor;

impl QueryExecutor for StandardExecutor {
	fn parse(&self, text: &str, variables: &Variables) -> Result<Query> {
		parse(text, variables)
	}

	fn validate(&self, _ctx: &Context, root: &Object, selection_set: &SelectionSet) -> Result<()> {
		validate(root, selection_set)
	}

	fn execute(&self, ctx: &Context, root: &Object, root_value: Option<&Value>, query: &Query) -> Result<Value> {
		execute(ctx, root, root_value, query)
	}
}
