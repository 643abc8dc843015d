// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Usage and cost rollups.

use ailog_core::LogEntry;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate usage over a set of log entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageSummary {
    pub total_interactions: usize,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
    pub avg_duration_ms: f64,
    /// Entries with `outcome = error` over total
    pub error_rate: f64,
    /// Sorted by interaction count, busiest first
    pub by_agent: Vec<AgentUsage>,
    /// Sorted by interaction count, busiest first
    pub by_model: Vec<ModelUsage>,
}

/// Rollup for one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentUsage {
    pub agent: String,
    pub interactions: usize,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
}

/// Rollup for one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelUsage {
    pub model: String,
    pub interactions: usize,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
}

/// Summarize a set of entries. Pure: same input, same output.
pub fn summarize(entries: &[LogEntry]) -> UsageSummary {
    if entries.is_empty() {
        return UsageSummary::default();
    }

    let total = entries.len();
    let mut total_tokens = 0u64;
    let mut total_cost = 0.0f64;
    let mut total_duration_ms = 0u64;
    let mut errors = 0usize;
    let mut agents: HashMap<&str, AgentUsage> = HashMap::new();
    let mut models: HashMap<&str, ModelUsage> = HashMap::new();

    for entry in entries {
        total_tokens += entry.tokens.total;
        total_cost += entry.tokens.cost_usd;
        total_duration_ms += entry.duration_ms;
        if entry.outcome.is_error() {
            errors += 1;
        }

        let agent = agents.entry(&entry.agent.name).or_insert_with(|| AgentUsage {
            agent: entry.agent.name.clone(),
            interactions: 0,
            total_tokens: 0,
            total_cost_usd: 0.0,
        });
        agent.interactions += 1;
        agent.total_tokens += entry.tokens.total;
        agent.total_cost_usd = round6(agent.total_cost_usd + entry.tokens.cost_usd);

        let model = models.entry(&entry.tokens.model).or_insert_with(|| ModelUsage {
            model: entry.tokens.model.clone(),
            interactions: 0,
            total_tokens: 0,
            total_cost_usd: 0.0,
        });
        model.interactions += 1;
        model.total_tokens += entry.tokens.total;
        model.total_cost_usd = round6(model.total_cost_usd + entry.tokens.cost_usd);
    }

    let mut by_agent: Vec<AgentUsage> = agents.into_values().collect();
    by_agent.sort_by(|a, b| b.interactions.cmp(&a.interactions).then(a.agent.cmp(&b.agent)));

    let mut by_model: Vec<ModelUsage> = models.into_values().collect();
    by_model.sort_by(|a, b| b.interactions.cmp(&a.interactions).then(a.model.cmp(&b.model)));

    UsageSummary {
        total_interactions: total,
        total_tokens,
        total_cost_usd: round6(total_cost),
        avg_duration_ms: total_duration_ms as f64 / total as f64,
        error_rate: errors as f64 / total as f64,
        by_agent,
        by_model,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
#[path = "usage_tests.rs"]
mod tests;
