// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decision points captured during an interaction.
//!
//! The decision is a tagged variant: the `type` field on the wire selects
//! the variant and each variant carries its own typed payload. Workflow
//! data lives in named fields, never encoded inside the rationale string.

use serde::{Deserialize, Serialize};

/// A decision made (or requested) during an agent interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Decision {
    /// A workflow quality gate with a pass/fail outcome.
    Gate {
        gate: String,
        passed: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rationale: Option<String>,
    },
    /// Options were presented and one was (possibly) chosen.
    OptionSelection {
        #[serde(default)]
        options_presented: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selected_option: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rationale: Option<String>,
    },
    /// Work was handed to another agent.
    Handoff {
        to_agent: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        story_ref: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rationale: Option<String>,
    },
    /// An explicit approve/reject checkpoint.
    Approval {
        approved: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rationale: Option<String>,
    },
}

impl Decision {
    /// Wire name of the variant (`type` field value).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gate { .. } => "gate",
            Self::OptionSelection { .. } => "option-selection",
            Self::Handoff { .. } => "handoff",
            Self::Approval { .. } => "approval",
        }
    }

    pub fn rationale(&self) -> Option<&str> {
        match self {
            Self::Gate { rationale, .. }
            | Self::OptionSelection { rationale, .. }
            | Self::Handoff { rationale, .. }
            | Self::Approval { rationale, .. } => rationale.as_deref(),
        }
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
