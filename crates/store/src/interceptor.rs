// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interaction interceptor.
//!
//! Builds one [`LogEntry`] incrementally while an agent interaction is in
//! flight and appends it fully formed when the interaction ends. The
//! store never sees a partial entry.
//!
//! The interceptor owns no global state: callers construct one per
//! logical context and pass it where it is needed.

use crate::config::LoggingConfig;
use crate::log::ActivityLog;
use crate::pricing::PricingTable;
use crate::sanitize::Sanitizer;
use ailog_core::{
    AgentContext, AgentResponse, Clock, Decision, EntryMetadata, LogEntry, Outcome, SessionId,
    SystemClock, TokenUsage, ToolInvocation, ToolResult, UserPrompt,
};

/// Parameters for [`ActivityInterceptor::start_interaction`].
#[derive(Debug, Clone, Default)]
pub struct InteractionStart {
    pub agent_name: String,
    pub agent_mode: String,
    pub user_prompt: String,
    pub handoff_from: Option<String>,
    pub referenced_files: Vec<String>,
}

/// Parameters for [`ActivityInterceptor::end_interaction`].
#[derive(Debug, Clone)]
pub struct InteractionEnd {
    pub summary: String,
    pub actions: Vec<String>,
    pub files_modified: Vec<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub model: String,
    pub duration_ms: u64,
    pub outcome: Outcome,
    pub error_message: Option<String>,
}

/// The entry under construction between start and end.
#[derive(Debug)]
struct PendingInteraction {
    agent: AgentContext,
    user_prompt: UserPrompt,
    decision: Option<Decision>,
    tool_invocations: Vec<ToolInvocation>,
    current_files: Vec<String>,
}

/// Captures agent interactions and writes them to an [`ActivityLog`].
pub struct ActivityInterceptor<C: Clock = SystemClock> {
    config: LoggingConfig,
    session_id: SessionId,
    log: ActivityLog<C>,
    sanitizer: Option<Sanitizer>,
    pricing: PricingTable,
    clock: C,
    current: Option<PendingInteraction>,
}

impl ActivityInterceptor<SystemClock> {
    /// Build an interceptor writing to the configured log directory.
    pub fn new(config: LoggingConfig) -> Self {
        let log = ActivityLog::new(&config.log_directory);
        Self::with_parts(config, log, PricingTable::default(), SystemClock)
    }
}

impl<C: Clock> ActivityInterceptor<C> {
    /// Explicit wiring for tests and embedders.
    pub fn with_parts(
        config: LoggingConfig,
        log: ActivityLog<C>,
        pricing: PricingTable,
        clock: C,
    ) -> Self {
        let sanitizer = config
            .privacy
            .sanitize_sensitive_data
            .then(|| Sanitizer::new(&config.privacy.exclude_patterns));
        Self {
            config,
            session_id: SessionId::new(),
            log,
            sanitizer,
            pricing,
            clock,
            current: None,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Start tracking a new agent interaction.
    ///
    /// A still-pending interaction is discarded; entries reach the store
    /// only through [`end_interaction`](Self::end_interaction).
    pub fn start_interaction(&mut self, params: InteractionStart) {
        if !self.config.enabled {
            return;
        }
        if self.current.is_some() {
            tracing::warn!(
                agent = %params.agent_name,
                "starting interaction while one is pending; discarding the pending entry"
            );
        }

        let text = if self.config.capture.user_prompts {
            self.scrub(&params.user_prompt)
        } else {
            String::new()
        };
        let referenced_files =
            if self.config.capture.context_files { params.referenced_files } else { Vec::new() };

        self.current = Some(PendingInteraction {
            agent: AgentContext {
                name: params.agent_name,
                mode: params.agent_mode,
                handoff_from: params.handoff_from,
            },
            user_prompt: UserPrompt {
                text,
                intent: None,
                referenced_files: referenced_files.clone(),
            },
            decision: None,
            tool_invocations: Vec::new(),
            current_files: referenced_files,
        });
    }

    /// Attach a decision point to the pending interaction.
    pub fn log_decision(&mut self, decision: Decision) {
        if !self.config.enabled || !self.config.capture.decision_points {
            return;
        }
        match self.current.as_mut() {
            Some(pending) => pending.decision = Some(decision),
            None => tracing::warn!("decision logged with no pending interaction"),
        }
    }

    /// Record a tool call made during the pending interaction.
    pub fn log_tool_invocation(
        &mut self,
        tool: impl Into<String>,
        mut parameters: serde_json::Map<String, serde_json::Value>,
        result: Option<ToolResult>,
        duration_ms: Option<u64>,
    ) {
        if !self.config.enabled || !self.config.capture.tool_invocations {
            return;
        }
        let Some(pending) = self.current.as_mut() else {
            tracing::warn!("tool invocation logged with no pending interaction");
            return;
        };
        if let Some(sanitizer) = &self.sanitizer {
            sanitizer.scrub_params(&mut parameters);
        }
        pending.tool_invocations.push(ToolInvocation {
            tool: tool.into(),
            parameters,
            result,
            duration_ms,
        });
    }

    /// Complete the interaction and append the finished entry.
    pub fn end_interaction(&mut self, params: InteractionEnd) {
        if !self.config.enabled {
            return;
        }
        let Some(pending) = self.current.take() else {
            tracing::warn!("interaction ended with no pending interaction");
            return;
        };

        let cost_usd =
            self.pricing.cost_usd(params.input_tokens, params.output_tokens, &params.model);
        let agent_response = self.config.capture.agent_responses.then(|| AgentResponse {
            summary: params.summary,
            actions: params.actions,
            files_modified: params.files_modified,
            tool_invocations: pending.tool_invocations,
        });
        let error_message =
            if self.config.capture.errors { params.error_message } else { None };

        let entry = LogEntry {
            timestamp: self.clock.now(),
            session_id: self.session_id.clone(),
            agent: pending.agent,
            user_prompt: pending.user_prompt,
            agent_response,
            decision: pending.decision,
            tokens: TokenUsage::new(
                params.input_tokens,
                params.output_tokens,
                cost_usd,
                params.model,
            ),
            duration_ms: params.duration_ms,
            outcome: params.outcome,
            error_message,
            metadata: EntryMetadata {
                current_files: pending.current_files,
                ..Default::default()
            },
        };

        self.log.append(&entry);
    }

    fn scrub(&self, text: &str) -> String {
        match &self.sanitizer {
            Some(sanitizer) => sanitizer.scrub_text(text),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
