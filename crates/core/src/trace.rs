// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handoff trace spans.
//!
//! One `HandoffTrace` records a single agent-to-agent hop. Spans sharing a
//! `trace_id` belong to the same multi-hop chain for one unit of work.
//! Serialized camelCase to match the trace export format consumed by
//! external reporting tools.

use crate::id::{SpanId, TraceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One agent-to-agent handoff attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffTrace {
    /// Chain this hop belongs to
    pub trace_id: TraceId,
    /// This single hop; unique among all retained spans
    pub span_id: SpanId,
    /// External correlation key (e.g. a ticket id)
    pub story_ref: String,
    pub from_agent: String,
    pub to_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub status: HandoffStatus,
    /// Byte length of the serialized metadata at start time; a lightweight
    /// proxy for payload size, not an exact measurement
    pub context_size: usize,
    /// Populated only when the handoff fails
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
    /// Merge-extended by terminal transitions: new keys added, existing
    /// keys overwritten
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Lifecycle status of a handoff span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffStatus {
    /// In flight; the only non-terminal status
    Started,
    Completed,
    Failed,
    Escalated,
}

impl HandoffStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started)
    }
}

impl fmt::Display for HandoffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Escalated => write!(f, "escalated"),
        }
    }
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
