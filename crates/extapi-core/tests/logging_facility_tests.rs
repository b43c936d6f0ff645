#![allow(clippy::unwrap_used, clippy::expect_used)]

use extapi_core::errors::ExtApiError;
use extapi_core::logging_facility::test_capture::init_test_capture;
use extapi_core::{log_op_end, log_op_error, log_op_start};
use extapi_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CONFIGURATION, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, configuration = "float_32");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field(FIELD_CONFIGURATION), Some("float_32"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, hit_count = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(events[0].field("hit_count"), Some("3"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExtApiError::UnknownBuiltin {
        name: "Colour".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_UNKNOWN_BUILTIN"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("UnknownBuiltin"));
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });
    assert_eq!(starts, 1);
    assert_eq!(ends, 1);
    capture.assert_event_exists(op_name, EVENT_END);
}

#[test]
fn test_events_carry_component() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(
        events[0].component.as_deref(),
        Some(module_path!()),
        "component should be the emitting module"
    );
}
