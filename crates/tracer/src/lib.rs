// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ailog-tracer: In-memory registry of agent handoff spans.
//!
//! Tracks each agent-to-agent handoff as a short-lived span with explicit
//! lifecycle transitions (started → completed/failed/escalated) and
//! answers lookups and aggregates over the retained spans. Intended for
//! single-session analysis: spans are retained until an explicit clear,
//! with no eviction or TTL.

pub mod registry;

pub use registry::{HandoffTracer, PerformanceSummary};
