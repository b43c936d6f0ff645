#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use extapi_core::logging_facility::test_capture::init_test_capture;
use extapi_core::ModelRegistry;
use extapi_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CLASS_COUNT, FIELD_CONFIGURATION,
    FIELD_DOCUMENT_DIGEST, FIELD_ERR_CODE, FIELD_HIT_COUNT, FIELD_METHOD_COUNT,
};
use extapi_engine::commands::engine_query::{apply_query, ApiQuery};
use extapi_engine::commands::install::install_model;

// The capture is process-global, so each test filters on an op it alone emits.

#[test]
fn test_install_emits_start_and_end_with_digest() {
    let capture = init_test_capture();
    let registry = ModelRegistry::new();
    let summary = install_model(&registry, common::MINI_API.as_bytes()).unwrap();

    let events = capture.events_for_op("install_model");
    let end = events
        .iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && e.field(FIELD_DOCUMENT_DIGEST) == Some(summary.digest.as_str())
        })
        .expect("end event with this document's digest");
    assert_eq!(end.field(FIELD_CLASS_COUNT), Some("9"));
    assert_eq!(end.field(FIELD_METHOD_COUNT), Some("13"));
    assert!(events
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_START)));
}

#[test]
fn test_route_end_carries_hit_count() {
    let capture = init_test_capture();
    let registry = common::installed_registry();
    apply_query(&registry, ApiQuery::Route { text: "move and slide".into() }).unwrap();

    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some("route")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_HIT_COUNT).is_some()
    });
    assert!(ends >= 1);
}

#[test]
fn test_failed_query_emits_error_code() {
    let capture = init_test_capture();
    let registry = common::installed_registry();
    apply_query(
        &registry,
        ApiQuery::BuiltinDetails {
            name: "Basis".into(),
        },
    )
    .unwrap_err();

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("builtin_details")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_UNKNOWN_BUILTIN")
    });
    assert_eq!(errors, 1);
}

#[test]
fn test_layout_start_carries_configuration() {
    let capture = init_test_capture();
    let registry = common::installed_registry();
    apply_query(
        &registry,
        ApiQuery::ResolveLayout {
            builtin: "Rect2".into(),
            configuration: "float_64".into(),
        },
    )
    .unwrap();

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("resolve_layout")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_CONFIGURATION) == Some("float_64")
    });
    assert_eq!(starts, 1);
}
