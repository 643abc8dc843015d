// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ailog-analysis: Stateless aggregation over read-back log entries.
//!
//! Pure functions from a slice of entries to summary records: usage and
//! cost rollups per agent and per model. No I/O and no heuristics;
//! callers read entries back from the store and hand them in.

pub mod usage;

pub use usage::{summarize, AgentUsage, ModelUsage, UsageSummary};
