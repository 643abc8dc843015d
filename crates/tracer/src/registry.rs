// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handoff trace registry.
//!
//! A keyed store of handoff spans with no internal locking; callers
//! using it from multiple threads must serialize access externally. No
//! operation blocks or raises: terminal operations on an unknown span
//! log a warning and leave the registry unchanged.

use ailog_core::{Clock, HandoffStatus, HandoffTrace, SpanId, SystemClock, TraceId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate statistics over all retained spans.
///
/// All rates are 0 when the registry is empty; `avg_duration_ms` averages
/// completed spans only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_handoffs: usize,
    pub success_rate: f64,
    pub avg_duration_ms: f64,
    pub failure_rate: f64,
    pub escalation_rate: f64,
}

/// Registry of handoff spans for one analysis session.
///
/// Constructed explicitly and passed by the caller; there is no global
/// singleton instance.
pub struct HandoffTracer<C: Clock = SystemClock> {
    clock: C,
    /// All retained spans, in start order
    spans: IndexMap<SpanId, HandoffTrace>,
    /// story_ref → the single in-flight span for that story
    active: HashMap<String, SpanId>,
}

impl HandoffTracer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for HandoffTracer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> HandoffTracer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, spans: IndexMap::new(), active: HashMap::new() }
    }

    /// Start a new handoff span and record it as the story's active span.
    ///
    /// Starting a second handoff for the same story before the first
    /// closes silently supersedes the active-span pointer; the earlier
    /// span is retained for history and stays `started` until (unless) a
    /// terminal call arrives for it.
    pub fn start_handoff(
        &mut self,
        story_ref: impl Into<String>,
        from_agent: impl Into<String>,
        to_agent: impl Into<String>,
        layer: Option<String>,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> HandoffTrace {
        let story_ref = story_ref.into();
        let span_id = SpanId::new();

        // Byte length of the serialized metadata; a proxy for payload
        // size, not an exact measurement.
        let context_size =
            serde_json::to_string(&metadata).map(|s| s.len()).unwrap_or_default();

        let trace = HandoffTrace {
            trace_id: TraceId::new(),
            span_id: span_id.clone(),
            story_ref: story_ref.clone(),
            from_agent: from_agent.into(),
            to_agent: to_agent.into(),
            layer,
            start_time: self.clock.now(),
            end_time: None,
            duration_ms: None,
            status: HandoffStatus::Started,
            context_size,
            validation_errors: Vec::new(),
            metadata,
        };

        self.spans.insert(span_id.clone(), trace.clone());
        self.active.insert(story_ref, span_id);
        trace
    }

    /// Mark a handoff as completed.
    pub fn complete_handoff(
        &mut self,
        span_id: &SpanId,
        extra: serde_json::Map<String, serde_json::Value>,
    ) {
        self.finish(span_id, HandoffStatus::Completed, Vec::new(), extra);
    }

    /// Mark a handoff as failed, recording the validation errors.
    pub fn fail_handoff(
        &mut self,
        span_id: &SpanId,
        errors: Vec<String>,
        extra: serde_json::Map<String, serde_json::Value>,
    ) {
        self.finish(span_id, HandoffStatus::Failed, errors, extra);
    }

    /// Escalate a handoff, recording the reason in the span metadata.
    pub fn escalate_handoff(
        &mut self,
        span_id: &SpanId,
        reason: impl Into<String>,
        mut extra: serde_json::Map<String, serde_json::Value>,
    ) {
        extra.insert(
            "escalation_reason".to_string(),
            serde_json::Value::String(reason.into()),
        );
        self.finish(span_id, HandoffStatus::Escalated, Vec::new(), extra);
    }

    /// Shared terminal transition.
    ///
    /// Only the span-not-found case is guarded: a second terminal call on
    /// the same span overwrites its end state again rather than erroring.
    fn finish(
        &mut self,
        span_id: &SpanId,
        status: HandoffStatus,
        errors: Vec<String>,
        extra: serde_json::Map<String, serde_json::Value>,
    ) {
        let now = self.clock.now();
        let Some(trace) = self.spans.get_mut(span_id) else {
            tracing::warn!(%span_id, status = %status, "trace not found for span");
            return;
        };

        trace.end_time = Some(now);
        trace.duration_ms =
            Some((now - trace.start_time).num_milliseconds().max(0) as u64);
        trace.status = status;
        if !errors.is_empty() {
            trace.validation_errors = errors;
        }
        // merge-extend: new keys added, existing keys overwritten
        for (key, value) in extra {
            trace.metadata.insert(key, value);
        }

        // Unconditional: a terminal call drops the story's active pointer
        // even when a superseding start has repointed it to a newer span.
        let story_ref = trace.story_ref.clone();
        self.active.remove(&story_ref);
    }

    /// Span by ID.
    pub fn get_trace(&self, span_id: &SpanId) -> Option<&HandoffTrace> {
        self.spans.get(span_id)
    }

    /// The current in-flight span for a story, if any.
    pub fn get_active_trace(&self, story_ref: &str) -> Option<&HandoffTrace> {
        self.active.get(story_ref).and_then(|span_id| self.spans.get(span_id))
    }

    /// All spans for a story (any status), start time ascending.
    pub fn story_traces(&self, story_ref: &str) -> Vec<&HandoffTrace> {
        let mut traces: Vec<&HandoffTrace> =
            self.spans.values().filter(|t| t.story_ref == story_ref).collect();
        traces.sort_by_key(|t| t.start_time);
        traces
    }

    /// All spans whose start time falls in `[start, end]` inclusive,
    /// start time ascending.
    pub fn traces_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&HandoffTrace> {
        let mut traces: Vec<&HandoffTrace> = self
            .spans
            .values()
            .filter(|t| t.start_time >= start && t.start_time <= end)
            .collect();
        traces.sort_by_key(|t| t.start_time);
        traces
    }

    /// Aggregate statistics over everything retained.
    pub fn performance_summary(&self) -> PerformanceSummary {
        let total = self.spans.len();
        if total == 0 {
            return PerformanceSummary {
                total_handoffs: 0,
                success_rate: 0.0,
                avg_duration_ms: 0.0,
                failure_rate: 0.0,
                escalation_rate: 0.0,
            };
        }

        let mut completed = 0usize;
        let mut failed = 0usize;
        let mut escalated = 0usize;
        let mut completed_duration_ms = 0u64;
        for trace in self.spans.values() {
            match trace.status {
                HandoffStatus::Completed => {
                    completed += 1;
                    completed_duration_ms += trace.duration_ms.unwrap_or_default();
                }
                HandoffStatus::Failed => failed += 1,
                HandoffStatus::Escalated => escalated += 1,
                HandoffStatus::Started => {}
            }
        }

        let avg_duration_ms = if completed > 0 {
            completed_duration_ms as f64 / completed as f64
        } else {
            0.0
        };

        PerformanceSummary {
            total_handoffs: total,
            success_rate: completed as f64 / total as f64,
            avg_duration_ms,
            failure_rate: failed as f64 / total as f64,
            escalation_rate: escalated as f64 / total as f64,
        }
    }

    /// All retained spans, start time ascending. Rendering to an export
    /// format is the consumer's concern.
    pub fn export_traces(&self) -> Vec<HandoffTrace> {
        let mut traces: Vec<HandoffTrace> = self.spans.values().cloned().collect();
        traces.sort_by_key(|t| t.start_time);
        traces
    }

    /// Reset to empty. For test isolation, not a production operation.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.active.clear();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
