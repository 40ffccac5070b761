#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::write_input;
use statsdelta_core::errors::DeltaError;
use statsdelta_core::logging_facility::test_capture::init_test_capture;
use statsdelta_core::pipeline::{
    OP_COMPUTE_DELTAS, OP_EMIT_DELTAS, OP_LOAD_STORE, OP_RUN,
};
use statsdelta_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_KEY_COUNT, FIELD_ROW_COUNT, FIELD_SIDE,
};
use statsdelta_core::{log_op_end, log_op_error, log_op_start, run, DeltaRequest};
use tempfile::TempDir;

#[test]
fn test_log_op_start_records_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, side = "from");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].fields.get(FIELD_SIDE), Some(&"from".to_string()));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, row_count = 7u64);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
    assert_eq!(events[0].fields.get(FIELD_ROW_COUNT), Some(&"7".to_string()));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DeltaError::DuplicateKey {
        key: "7".to_string(),
        line: 3,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");

    let event = &events[0];
    assert_eq!(event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(event.level, tracing::Level::ERROR);
    assert_eq!(event.fields.get(FIELD_ERR_CODE), Some(&"ERR_DUPLICATE_KEY".to_string()));
    assert_eq!(event.fields.get(FIELD_ERR_KIND), Some(&"DuplicateKey".to_string()));
}

#[test]
fn test_successful_run_logs_every_stage() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let request = DeltaRequest::new(
        write_input(dir.path(), "from.csv", "id,v\n1,1\n2,2\n"),
        write_input(dir.path(), "to.csv", "id,v\n1,1\n3,3\n"),
        "id",
    );

    run(&request, Vec::new()).unwrap();

    for op in [OP_RUN, OP_LOAD_STORE, OP_COMPUTE_DELTAS, OP_EMIT_DELTAS] {
        capture.assert_event_exists(op, EVENT_START);
        capture.assert_event_exists(op, EVENT_END);
    }

    let compute_end = capture
        .events_for(OP_COMPUTE_DELTAS)
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && e.fields.get("added").map(String::as_str) == Some("1")
                && e.fields.get("deleted").map(String::as_str) == Some("1")
        });
    assert!(compute_end.is_some(), "compute_deltas end event carries counts");

    let load_end = capture.events_for(OP_LOAD_STORE).into_iter().find(|e| {
        e.event.as_deref() == Some(EVENT_END)
            && e.fields.get(FIELD_SIDE).map(String::as_str) == Some("from")
            && e.fields.get(FIELD_KEY_COUNT).map(String::as_str) == Some("2")
    });
    assert!(load_end.is_some(), "load_store end event carries side and key count");
}

#[test]
fn test_failed_run_logs_error_with_code() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let request = DeltaRequest::new(
        write_input(dir.path(), "from.csv", "id,v\n1,abc\n"),
        write_input(dir.path(), "to.csv", "id,v\n1,2\n"),
        "id",
    );

    run(&request, Vec::new()).unwrap_err();

    let errors: Vec<_> = capture
        .events_for(OP_COMPUTE_DELTAS)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert!(!errors.is_empty(), "compute_deltas should log end_error");
    assert_eq!(
        errors[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_INVALID_NUMBER".to_string())
    );
    capture.assert_event_exists(OP_RUN, EVENT_END_ERROR);
}
