// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-model token pricing and cost calculation.
//!
//! `cost_usd` is a pure function of its inputs: no clock, no I/O, no
//! global state, so it is independently testable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// USD per million tokens for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    pub input: f64,
    pub output: f64,
}

/// Lookup table from normalized model name to price.
///
/// Unknown models fall back to the designated default model's pricing
/// rather than erroring.
#[derive(Debug, Clone)]
pub struct PricingTable {
    models: HashMap<String, ModelPrice>,
    default_model: String,
}

impl Default for PricingTable {
    /// Pricing per 1M tokens (as of Jan 2026)
    fn default() -> Self {
        let mut models = HashMap::new();
        models.insert("claude-sonnet-4.5".to_string(), ModelPrice { input: 3.00, output: 15.00 });
        models.insert("claude-opus-4".to_string(), ModelPrice { input: 15.00, output: 75.00 });
        models.insert("gpt-4-turbo".to_string(), ModelPrice { input: 10.00, output: 30.00 });
        models.insert("gpt-5-mini".to_string(), ModelPrice { input: 1.00, output: 3.00 });
        Self { models, default_model: "claude-sonnet-4.5".to_string() }
    }
}

impl PricingTable {
    pub fn new(models: HashMap<String, ModelPrice>, default_model: impl Into<String>) -> Self {
        Self { models, default_model: default_model.into() }
    }

    /// Price for a model, or the default model's price when unknown.
    pub fn price_for(&self, model: &str) -> ModelPrice {
        self.models
            .get(&normalize_model_key(model))
            .or_else(|| self.models.get(&self.default_model))
            .copied()
            .unwrap_or(ModelPrice { input: 0.0, output: 0.0 })
    }

    /// Cost in USD for one interaction, rounded to 6 decimal places.
    pub fn cost_usd(&self, input_tokens: u64, output_tokens: u64, model: &str) -> f64 {
        let price = self.price_for(model);
        let input_cost = input_tokens as f64 / 1_000_000.0 * price.input;
        let output_cost = output_tokens as f64 / 1_000_000.0 * price.output;
        round6(input_cost + output_cost)
    }
}

/// Lowercase with whitespace collapsed to `-`, matching table keys.
fn normalize_model_key(model: &str) -> String {
    model.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
