// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide log output for the gateway.

pub mod builder;

pub use builder::TracingBuilder;
