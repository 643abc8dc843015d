// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ailog-store: Append-only, date-partitioned activity log store.
//!
//! One JSONL partition file per calendar day, named so that lexical
//! filename sort equals chronological order. Storage failures are logged
//! and swallowed: telemetry must never break the workflow it observes.

pub mod config;
pub mod interceptor;
pub mod log;
pub mod pricing;
pub mod sanitize;

pub use config::{CaptureFlags, ConfigError, LoggingConfig, PrivacyConfig};
pub use interceptor::{ActivityInterceptor, InteractionEnd, InteractionStart};
pub use log::{ActivityLog, StoreError};
pub use pricing::{ModelPrice, PricingTable};
pub use sanitize::{Sanitizer, REDACTION_MARKER};
