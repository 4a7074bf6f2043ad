// Dispatch contract: exactly one sink call per enabled emit, payload unchanged.
use std::sync::Arc;

use serde_json::json;
use sevlog::test_support::RecordingSink;
use sevlog::{
    ATTRIBUTION, Logger, Marker, MessageSource, ResolvedMessage, Severity, SinkError,
    StructuredMessage,
};

fn recording_logger() -> (Arc<RecordingSink>, Logger) {
    let sink = Arc::new(RecordingSink::new());
    let logger = Logger::with_sink(sink.clone(), "test::dispatch");
    (sink, logger)
}

#[test]
fn test_exactly_one_dispatch_per_emit() {
    let (sink, logger) = recording_logger();

    logger.info("one").unwrap();
    logger.error("two").unwrap();

    assert_eq!(sink.dispatch_count(), 2);
    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].level_name, "INFO");
    assert_eq!(records[0].rank, 400);
    assert_eq!(records[1].level_name, "ERROR");
    assert_eq!(records[1].rank, 200);
}

#[test]
fn test_template_and_args_forwarded_unmodified() {
    let (sink, logger) = recording_logger();

    logger
        .error(MessageSource::template("x={}", [json!(5)]))
        .unwrap();

    let records = sink.records();
    assert_eq!(
        records[0].message,
        ResolvedMessage::Template {
            template: "x={}".to_string(),
            args: vec![json!(5)],
        }
    );
}

#[test]
fn test_cause_reference_passes_through_unchanged() {
    let (sink, logger) = recording_logger();

    let cause = std::io::Error::other("connection reset");
    logger.fatal_cause("shutting down", &cause).unwrap();

    let records = sink.records();
    assert_eq!(records[0].cause.as_deref(), Some("connection reset"));
    assert_eq!(
        records[0].cause_addr,
        Some(std::ptr::from_ref(&cause) as *const () as usize)
    );
}

#[test]
fn test_absent_cause_stays_absent() {
    let (sink, logger) = recording_logger();

    logger.warn("no cause attached").unwrap();

    let records = sink.records();
    assert_eq!(records[0].cause, None);
    assert_eq!(records[0].cause_addr, None);
}

#[test]
fn test_marker_passes_through() {
    let (sink, logger) = recording_logger();

    let marker = Marker::from_static("AUDIT");
    logger.at(Severity::Warn).marker(&marker).log("tagged").unwrap();
    logger.warn("untagged").unwrap();

    let records = sink.records();
    assert_eq!(records[0].marker.as_deref(), Some("AUDIT"));
    assert_eq!(records[1].marker, None);
}

#[test]
fn test_denied_marker_suppresses_dispatch() {
    let (sink, logger) = recording_logger();
    sink.deny_marker("NOISY");

    let noisy = Marker::from_static("NOISY");
    logger.at(Severity::Error).marker(&noisy).log("dropped").unwrap();
    logger.error("kept").unwrap();

    assert_eq!(sink.dispatch_count(), 1);
    assert_eq!(sink.records()[0].marker, None);
}

#[test]
fn test_builder_carries_marker_and_cause_together() {
    let (sink, logger) = recording_logger();

    let marker = Marker::from_static("SQL");
    let cause = std::io::Error::other("syntax error");
    logger
        .at(Severity::Error)
        .marker(&marker)
        .cause(&cause)
        .log(MessageSource::template("query {} failed", [json!("q1")]))
        .unwrap();

    let records = sink.records();
    assert_eq!(records[0].marker.as_deref(), Some("SQL"));
    assert_eq!(records[0].cause.as_deref(), Some("syntax error"));
}

#[test]
fn test_attribution_identifies_the_facade() {
    let (sink, logger) = recording_logger();

    logger.info("attributed").unwrap();

    assert_eq!(sink.records()[0].attribution, ATTRIBUTION);
    assert!(ATTRIBUTION.ends_with("::Logger"));
}

#[test]
fn test_supplier_array_substitutes_positionally() {
    let (sink, logger) = recording_logger();

    logger
        .info(MessageSource::lazy_args(
            "a={} b={}",
            vec![Box::new(|| json!("first")), Box::new(|| json!("second"))],
        ))
        .unwrap();

    let records = sink.records();
    assert_eq!(
        records[0].message,
        ResolvedMessage::Template {
            template: "a={} b={}".to_string(),
            args: vec![json!("first"), json!("second")],
        }
    );
}

#[test]
fn test_structured_message_passes_through_unchanged() {
    let (sink, logger) = recording_logger();

    let message = StructuredMessage::new("request done")
        .with_field("status", 200)
        .with_field("path", "/api/health");
    logger.info(message.clone()).unwrap();

    let records = sink.records();
    assert_eq!(records[0].message, ResolvedMessage::Structured(message));
}

#[test]
fn test_plain_values_go_through_the_bound_factory() {
    use sevlog::domain::MessageFactory;

    struct TaggingFactory;
    impl MessageFactory for TaggingFactory {
        fn create(&self, value: serde_json::Value) -> StructuredMessage {
            StructuredMessage::new(format!("tagged:{value}"))
        }
    }

    let sink = Arc::new(RecordingSink::new());
    let logger = Logger::with_sink_and_factory(
        sink.clone(),
        "test::factory",
        Arc::new(TaggingFactory),
    );

    logger.info(json!(42)).unwrap();

    let records = sink.records();
    let ResolvedMessage::Structured(message) = &records[0].message else {
        panic!("expected structured message");
    };
    assert_eq!(message.body(), "tagged:42");
}

#[test]
fn test_dispatch_failure_propagates_to_the_caller() {
    let (sink, logger) = recording_logger();
    sink.set_fail_dispatch(true);

    let result = logger.error("will fail");
    assert!(matches!(result, Err(SinkError::Dispatch { .. })));

    // A negative gate short-circuits before the failing dispatch.
    sink.set_threshold(Severity::Fatal.rank());
    assert!(logger.error("gated before dispatch").is_ok());
}

#[test]
fn test_all_six_levels_carry_their_fixed_ranks() {
    let (sink, logger) = recording_logger();

    logger.fatal("f").unwrap();
    logger.error("e").unwrap();
    logger.warn("w").unwrap();
    logger.info("i").unwrap();
    logger.debug("d").unwrap();
    logger.function("fn").unwrap();

    let observed: Vec<(String, u32)> = sink
        .records()
        .into_iter()
        .map(|record| (record.level_name, record.rank))
        .collect();
    assert_eq!(
        observed,
        vec![
            ("FATAL".to_string(), 100),
            ("ERROR".to_string(), 200),
            ("WARN".to_string(), 300),
            ("INFO".to_string(), 400),
            ("DEBUG".to_string(), 500),
            ("FUNCTION".to_string(), 550),
        ]
    );
}
