//! Handoff tracing specs.

use ailog_core::{FakeClock, HandoffStatus};
use ailog_tracer::HandoffTracer;
use std::time::Duration;

fn tracer() -> (HandoffTracer<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    clock.set_epoch_ms(1_700_000_000_000);
    (HandoffTracer::with_clock(clock.clone()), clock)
}

fn no_meta() -> serde_json::Map<String, serde_json::Value> {
    serde_json::Map::new()
}

#[test]
fn handoff_lifecycle_end_to_end() {
    let (mut tracer, clock) = tracer();

    let span = tracer.start_handoff("US-1", "ba", "dev-lead", None, no_meta());
    assert_eq!(tracer.get_active_trace("US-1").unwrap().status, HandoffStatus::Started);

    clock.advance(Duration::from_millis(2500));
    tracer.complete_handoff(&span.span_id, no_meta());

    assert!(tracer.get_active_trace("US-1").is_none());
    let closed = tracer.get_trace(&span.span_id).unwrap();
    assert_eq!(closed.status, HandoffStatus::Completed);
    assert_eq!(closed.duration_ms, Some(2500));
}

#[test]
fn superseded_span_is_retained_but_no_longer_active() {
    let (mut tracer, clock) = tracer();

    let a = tracer.start_handoff("US-1", "ba", "dev-lead", None, no_meta());
    clock.advance(Duration::from_millis(50));
    let b = tracer.start_handoff("US-1", "ba", "dev-lead", None, no_meta());

    // B owns the active pointer now
    assert_eq!(tracer.get_active_trace("US-1").unwrap().span_id, b.span_id);

    // both hops remain queryable, in start order
    let story = tracer.story_traces("US-1");
    assert_eq!(story.len(), 2);
    assert_eq!(story[0].span_id, a.span_id);
    assert_eq!(story[1].span_id, b.span_id);

    // A is never closed: it stays started for the registry's lifetime
    assert_eq!(tracer.get_trace(&a.span_id).unwrap().status, HandoffStatus::Started);
}

#[test]
fn chains_of_handoffs_aggregate_into_the_summary() {
    let (mut tracer, clock) = tracer();

    // ba → dev-lead → qa for one story, with a failed QA handoff retried
    let hop1 = tracer.start_handoff("US-7", "ba", "dev-lead", Some("planning".into()), no_meta());
    clock.advance(Duration::from_millis(100));
    tracer.complete_handoff(&hop1.span_id, no_meta());

    let hop2 = tracer.start_handoff("US-7", "dev-lead", "qa", Some("review".into()), no_meta());
    clock.advance(Duration::from_millis(100));
    tracer.fail_handoff(&hop2.span_id, vec!["missing test evidence".into()], no_meta());

    let hop3 = tracer.start_handoff("US-7", "dev-lead", "qa", Some("review".into()), no_meta());
    clock.advance(Duration::from_millis(300));
    tracer.complete_handoff(&hop3.span_id, no_meta());

    let summary = tracer.performance_summary();
    assert_eq!(summary.total_handoffs, 3);
    assert_eq!(summary.success_rate, 2.0 / 3.0);
    assert_eq!(summary.failure_rate, 1.0 / 3.0);
    assert_eq!(summary.avg_duration_ms, 200.0);

    let exported = tracer.export_traces();
    assert_eq!(exported.len(), 3);
    assert!(exported.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[test]
fn exported_traces_serialize_camel_case_for_reporting_tools() {
    let (mut tracer, _clock) = tracer();
    let span = tracer.start_handoff("US-1", "ba", "dev-lead", None, no_meta());
    tracer.escalate_handoff(&span.span_id, "needs human review", no_meta());

    let exported = tracer.export_traces();
    let value = serde_json::to_value(&exported[0]).unwrap();
    assert_eq!(value["storyRef"], "US-1");
    assert_eq!(value["status"], "escalated");
    assert_eq!(value["metadata"]["escalation_reason"], "needs human review");
    assert!(value["spanId"].as_str().unwrap().starts_with("spn-"));
    assert!(value["traceId"].as_str().unwrap().starts_with("trc-"));
}

#[test]
fn unknown_span_operations_never_panic_or_mutate() {
    let (mut tracer, _clock) = tracer();
    tracer.start_handoff("US-1", "ba", "dev-lead", None, no_meta());

    let ghost = ailog_core::SpanId::from_string("spn-ghost");
    tracer.complete_handoff(&ghost, no_meta());
    tracer.fail_handoff(&ghost, vec!["x".into()], no_meta());
    tracer.escalate_handoff(&ghost, "x", no_meta());

    assert_eq!(tracer.export_traces().len(), 1);
    assert!(tracer.get_active_trace("US-1").is_some());
}
