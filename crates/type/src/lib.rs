// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared error and result types for the Conduit gateway.
//!
//! Every crate in the workspace reports failures through [`Error`]. Each variant
//! carries a stable machine code (see [`Error::code`]) and renders a
//! human-readable message through `Display`; the message is what clients see in
//! the `errors` array of a response envelope.

pub mod error;

pub use error::{Error, ErrorClass};

pub type Result<T> = std::result::Result<T, Error>;
