//! Log pipeline specs: interceptor → store → read-back → analysis.

use ailog_analysis::summarize;
use ailog_core::{FakeClock, Outcome};
use ailog_store::{
    ActivityInterceptor, ActivityLog, InteractionEnd, InteractionStart, LoggingConfig,
    PricingTable, REDACTION_MARKER,
};
use std::time::Duration;
use tempfile::tempdir;

fn clock_at(epoch_ms: u64) -> FakeClock {
    let clock = FakeClock::new();
    clock.set_epoch_ms(epoch_ms);
    clock
}

fn run_interaction(
    interceptor: &mut ActivityInterceptor<FakeClock>,
    agent: &str,
    prompt: &str,
    input_tokens: u64,
    output_tokens: u64,
    outcome: Outcome,
) {
    interceptor.start_interaction(InteractionStart {
        agent_name: agent.to_string(),
        agent_mode: "default".to_string(),
        user_prompt: prompt.to_string(),
        handoff_from: None,
        referenced_files: vec![],
    });
    interceptor.end_interaction(InteractionEnd {
        summary: format!("{agent} finished"),
        actions: vec!["responded".to_string()],
        files_modified: vec![],
        input_tokens,
        output_tokens,
        model: "claude-sonnet-4.5".to_string(),
        duration_ms: 1200,
        outcome,
        error_message: None,
    });
}

#[test]
fn intercepted_interactions_survive_the_round_trip() {
    let dir = tempdir().unwrap();
    // 2023-11-14T22:13:20Z
    let clock = clock_at(1_700_000_000_000);
    let log = ActivityLog::with_clock(dir.path(), clock.clone());
    let mut interceptor = ActivityInterceptor::with_parts(
        LoggingConfig::default(),
        log.clone(),
        PricingTable::default(),
        clock.clone(),
    );

    run_interaction(&mut interceptor, "ba", "analyze the story", 1000, 1000, Outcome::Success);
    clock.advance(Duration::from_secs(60));
    run_interaction(&mut interceptor, "dev-lead", "implement it", 1000, 1000, Outcome::Success);
    clock.advance(Duration::from_secs(60));
    run_interaction(&mut interceptor, "qa", "verify it", 1000, 1000, Outcome::Error);

    let entries = log.read_all(None, None);
    assert_eq!(entries.len(), 3);

    // pricing: 1000 in + 1000 out on sonnet-4.5 = 0.003 + 0.015
    for entry in &entries {
        assert_eq!(entry.tokens.cost_usd, 0.018);
        assert_eq!(entry.tokens.total, 2000);
        assert_eq!(entry.session_id, *interceptor.session_id());
    }

    // everything landed in the same write-day partition
    assert!(dir.path().join("activity-2023-11-14.jsonl").exists());
}

#[test]
fn range_query_selects_a_window() {
    let dir = tempdir().unwrap();
    let clock = clock_at(1_700_000_000_000);
    let log = ActivityLog::with_clock(dir.path(), clock.clone());
    let mut interceptor = ActivityInterceptor::with_parts(
        LoggingConfig::default(),
        log.clone(),
        PricingTable::default(),
        clock.clone(),
    );

    run_interaction(&mut interceptor, "ba", "one", 10, 10, Outcome::Success);
    clock.advance(Duration::from_secs(3600));
    run_interaction(&mut interceptor, "ba", "two", 10, 10, Outcome::Success);
    clock.advance(Duration::from_secs(3600));
    run_interaction(&mut interceptor, "ba", "three", 10, 10, Outcome::Success);

    let all = log.read_all(None, None);
    let middle = log.read_all(Some(all[1].timestamp), Some(all[1].timestamp));
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].user_prompt.text, "two");
}

#[test]
fn secrets_never_reach_the_partition_file() {
    let dir = tempdir().unwrap();
    let clock = clock_at(1_700_000_000_000);
    let log = ActivityLog::with_clock(dir.path(), clock.clone());
    let mut interceptor = ActivityInterceptor::with_parts(
        LoggingConfig::default(),
        log,
        PricingTable::default(),
        clock,
    );

    run_interaction(
        &mut interceptor,
        "dev-lead",
        "deploy with API_KEY: abc123 please",
        10,
        10,
        Outcome::Success,
    );

    let raw =
        std::fs::read_to_string(dir.path().join("activity-2023-11-14.jsonl")).unwrap();
    assert!(!raw.contains("abc123"));
    assert!(raw.contains(REDACTION_MARKER));
}

#[test]
fn read_back_entries_feed_the_usage_summary() {
    let dir = tempdir().unwrap();
    let clock = clock_at(1_700_000_000_000);
    let log = ActivityLog::with_clock(dir.path(), clock.clone());
    let mut interceptor = ActivityInterceptor::with_parts(
        LoggingConfig::default(),
        log.clone(),
        PricingTable::default(),
        clock.clone(),
    );

    run_interaction(&mut interceptor, "dev-lead", "a", 1000, 1000, Outcome::Success);
    run_interaction(&mut interceptor, "dev-lead", "b", 1000, 1000, Outcome::Success);
    run_interaction(&mut interceptor, "qa", "c", 1000, 1000, Outcome::Error);

    let summary = summarize(&log.read_all(None, None));
    assert_eq!(summary.total_interactions, 3);
    assert_eq!(summary.total_tokens, 6000);
    assert_eq!(summary.total_cost_usd, 0.054);
    assert_eq!(summary.error_rate, 1.0 / 3.0);
    assert_eq!(summary.by_agent[0].agent, "dev-lead");
    assert_eq!(summary.by_agent[0].interactions, 2);
    assert_eq!(summary.by_model.len(), 1);
}

#[test]
fn config_fallback_still_produces_a_working_pipeline() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-config.toml");
    let mut config = LoggingConfig::load_or_default(&missing);
    assert!(config.enabled);

    // point the defaulted config at the temp dir and log through it
    config.log_directory = dir.path().join("logs");
    let clock = clock_at(1_700_000_000_000);
    let log = ActivityLog::with_clock(&config.log_directory, clock.clone());
    let mut interceptor =
        ActivityInterceptor::with_parts(config, log.clone(), PricingTable::default(), clock);

    run_interaction(&mut interceptor, "ba", "hello", 10, 10, Outcome::Success);
    assert_eq!(log.read_all(None, None).len(), 1);
}
