#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use extapi_core::{EntityKind, ExtApiError};

#[test]
fn test_summary_matches_document() {
    let summary = common::mini_snapshot().summary();

    assert_eq!(summary.version, "Godot Engine v4.4.stable.official");
    assert_eq!(summary.counts.classes, 9);
    assert_eq!(summary.counts.builtins, 8);
    assert_eq!(summary.counts.methods, 13);
    assert_eq!(summary.counts.enums, 5);
    assert_eq!(summary.counts.utility_functions, 3);
    assert_eq!(summary.counts.singletons, 1);
    assert_eq!(summary.counts.native_structures, 2);
    assert_eq!(summary.counts.global_constants, 0);
    let names: Vec<_> = summary.configurations.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["float_32", "float_64"]);
    assert_eq!(summary.digest.len(), 64);
}

#[test]
fn test_method_by_hash() {
    let snapshot = common::mini_snapshot();
    let method = snapshot.lookup_method_by_hash(3863233950).unwrap();
    assert_eq!(method.qualified_name, "Node.add_child");
    assert_eq!(method.parameters.len(), 3);

    let builtin_method = snapshot.lookup_method_by_hash(466405837).unwrap();
    assert_eq!(builtin_method.qualified_name, "Vector2.length");
}

#[test]
fn test_method_by_compatibility_hash() {
    let snapshot = common::mini_snapshot();
    let method = snapshot.lookup_method_by_hash(3070154285).unwrap();
    assert_eq!(method.qualified_name, "Node.add_child");
}

#[test]
fn test_unknown_hash_is_not_found() {
    let snapshot = common::mini_snapshot();
    assert_eq!(
        snapshot.lookup_method_by_hash(42).unwrap_err(),
        ExtApiError::NotFound {
            what: "method hash".to_string(),
            key: "42".to_string(),
        }
    );
}

#[test]
fn test_virtual_method_without_hash_is_named_only() {
    let snapshot = common::mini_snapshot();
    let ready = snapshot
        .lookup_entity_by_name(EntityKind::Method, "Node._ready")
        .unwrap();
    assert_eq!(ready.name(), "_ready");
    assert_eq!(ready.kind(), EntityKind::Method);
}

#[test]
fn test_lookup_by_qualified_name_per_kind() {
    let snapshot = common::mini_snapshot();

    let cases = [
        (EntityKind::Class, "CharacterBody2D"),
        (EntityKind::Builtin, "Transform2D"),
        (EntityKind::Method, "Node2D.set_position"),
        (EntityKind::Enum, "Node.ProcessMode"),
        (EntityKind::Enum, "Vector3.Axis"),
        (EntityKind::Enum, "Corner"),
        (EntityKind::Utility, "randf"),
    ];
    for (kind, name) in cases {
        let entity = snapshot
            .lookup_entity_by_name(kind, name)
            .unwrap_or_else(|e| panic!("{} {} should resolve: {}", kind, name, e));
        assert_eq!(entity.kind(), kind);
        assert_eq!(entity.qualified_name(), name);
    }
}

#[test]
fn test_kinds_have_separate_namespaces() {
    let snapshot = common::mini_snapshot();
    // Engine is a class and a singleton, never a builtin
    assert!(snapshot
        .lookup_entity_by_name(EntityKind::Class, "Engine")
        .is_ok());
    assert!(matches!(
        snapshot.lookup_entity_by_name(EntityKind::Builtin, "Engine"),
        Err(ExtApiError::NotFound { .. })
    ));
}

#[test]
fn test_case_insensitive_fallback() {
    let snapshot = common::mini_snapshot();
    assert!(snapshot
        .lookup_entity_by_name(EntityKind::Class, "httprequest")
        .is_err());
    let entity = snapshot
        .find_entity_ignore_case(EntityKind::Class, "httprequest")
        .unwrap();
    assert_eq!(entity.qualified_name(), "HTTPRequest");
}

#[test]
fn test_entity_record_serializes_with_kind_tag() {
    let snapshot = common::mini_snapshot();
    let record = snapshot
        .lookup_entity_by_name(EntityKind::Method, "Node.get_child_count")
        .unwrap()
        .to_record();
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["kind"], "method");
    assert_eq!(value["qualified_name"], "Node.get_child_count");
    assert_eq!(record.kind(), EntityKind::Method);
}

#[test]
fn test_snapshot_load_is_deterministic() {
    let first = common::mini_snapshot();
    let second = common::mini_snapshot();
    assert_eq!(first.model(), second.model());
    assert_eq!(first.digest(), second.digest());
}
