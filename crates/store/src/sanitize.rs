// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort redaction of sensitive-looking text.
//!
//! Scans free-form fields for configured key patterns (`API_KEY`,
//! `PASSWORD`, ...) followed by a separator and a value token, and
//! replaces the value with a fixed marker. This is pattern matching over
//! text, not a security boundary: values that don't match the shape are
//! stored as-is.

use regex::Regex;

/// What redacted values are replaced with.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Compiled redaction rules for a set of key-name patterns.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    rules: Vec<Regex>,
    /// Uppercased key patterns, for matching object keys directly
    key_patterns: Vec<String>,
}

impl Sanitizer {
    /// Compile one case-insensitive rule per pattern, matching
    /// `<pattern> [:=] <value-token>`. Invalid patterns are skipped with
    /// a warning.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let rules = patterns
            .iter()
            .filter_map(|pattern| {
                let pattern = pattern.as_ref();
                let source = format!(r#"(?i)({}\s*[:=]\s*)[^\s,}}"]+"#, regex::escape(pattern));
                match Regex::new(&source) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!(
                            pattern = %pattern,
                            error = %e,
                            "skipping invalid exclude pattern"
                        );
                        None
                    }
                }
            })
            .collect();
        let key_patterns = patterns.iter().map(|p| p.as_ref().to_uppercase()).collect();
        Self { rules, key_patterns }
    }

    fn key_is_sensitive(&self, key: &str) -> bool {
        let key = key.to_uppercase();
        self.key_patterns.iter().any(|pattern| key.contains(pattern))
    }

    /// Redact matching values in a text field.
    pub fn scrub_text(&self, text: &str) -> String {
        let mut scrubbed = text.to_string();
        for rule in &self.rules {
            scrubbed = rule.replace_all(&scrubbed, format!("${{1}}{REDACTION_MARKER}")).into_owned();
        }
        scrubbed
    }

    /// Redact inside a JSON value, recursively: string contents are
    /// scrubbed, and any value stored under a sensitive-looking key is
    /// replaced wholesale.
    pub fn scrub_value(&self, value: &mut serde_json::Value) {
        match value {
            serde_json::Value::String(s) => {
                *s = self.scrub_text(s);
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    self.scrub_value(item);
                }
            }
            serde_json::Value::Object(map) => {
                for (key, item) in map.iter_mut() {
                    if self.key_is_sensitive(key) {
                        *item = serde_json::Value::String(REDACTION_MARKER.to_string());
                    } else {
                        self.scrub_value(item);
                    }
                }
            }
            _ => {}
        }
    }

    /// Redact matching values inside a parameters map.
    pub fn scrub_params(&self, params: &mut serde_json::Map<String, serde_json::Value>) {
        for (key, value) in params.iter_mut() {
            if self.key_is_sensitive(key) {
                *value = serde_json::Value::String(REDACTION_MARKER.to_string());
            } else {
                self.scrub_value(value);
            }
        }
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
