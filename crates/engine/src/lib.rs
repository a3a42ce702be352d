// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Query execution engine used by the Conduit gateway.
//!
//! The gateway only talks to the engine through [`QueryExecutor`], which exposes
//! the three steps of handling an operation:
//!
//! - `parse` turns query text plus variables into a [`Query`]
//! - `validate` checks a selection set against a root [`Object`]
//! - `execute` resolves the selection set to a JSON value
//!
//! [`StandardExecutor`] implements the trait on top of `async-graphql-parser`
//! for a GraphQL subset: one operation per document, aliases, arguments,
//! variables with defaults and nested selection sets projected over resolver
//! output. Fragments and directives are rejected. Bracket nesting deeper than
//! [`MAX_DEPTH`] is a parse error.
//!
//! # Example
//!
//! ```ignore
//! use conduit_engine::{Context, QueryExecutor, SchemaBuilder, StandardExecutor};
//!
//! let mut builder = SchemaBuilder::new();
//! builder.query().field_func("answer", |_ctx, _args, _root| Ok::<_, String>(42));
//! let schema = builder.build();
//!
//! let executor = StandardExecutor;
//! let query = executor.parse("{ answer }", &Default::default())?;
//! executor.validate(&Context::new(), schema.root(query.kind), &query.selection_set)?;
//! let value = executor.execute(&Context::new(), schema.root(query.kind), None, &query)?;
//! ```

pub mod ast;
pub mod context;
pub mod execute;
pub mod executor;
pub mod schema;
pub mod validate;

pub use ast::{Arguments, MAX_DEPTH, OperationKind, Query, Selection, SelectionSet, Variables, parse::parse};
pub use context::Context;
pub use executor::{QueryExecutor, StandardExecutor};
pub use schema::{Field, Object, Resolver, Schema, SchemaBuilder};
