// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared helpers for the workspace's tests.

pub mod fixture;
pub mod util;

pub use util::wait::{wait_for, wait_for_async, wait_for_condition};
