// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ailog-core: Shared data model for the AI activity ledger.
//!
//! Defines the log entry written by the activity store, the handoff trace
//! span tracked by the tracer, prefixed short-ID newtypes, and a clock
//! abstraction so time-dependent behavior stays testable.

pub mod clock;
pub mod decision;
pub mod entry;
pub mod id;
pub mod trace;

pub use clock::{Clock, FakeClock, SystemClock};
pub use decision::Decision;
pub use entry::{
    AgentContext, AgentResponse, EntryMetadata, LogEntry, Outcome, TokenUsage, ToolInvocation,
    ToolResult, UserPrompt,
};
pub use id::{SessionId, SpanId, TraceId};
pub use trace::{HandoffStatus, HandoffTrace};
