#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use extapi_core::ExtApiError;

fn offsets(snapshot: &extapi_core::ModelSnapshot, builtin: &str, config: &str) -> Vec<u32> {
    snapshot
        .resolve_layout(builtin, config)
        .expect("layout should resolve")
        .fields
        .iter()
        .map(|f| f.offset)
        .collect()
}

#[test]
fn test_color_layout_follows_real_size() {
    let snapshot = common::mini_snapshot();

    let single = snapshot.resolve_layout("Color", "float_32").unwrap();
    assert_eq!(single.size, 16);
    assert_eq!(single.alignment, 4);
    assert_eq!(offsets(&snapshot, "Color", "float_32"), vec![0, 4, 8, 12]);

    let double = snapshot.resolve_layout("Color", "float_64").unwrap();
    assert_eq!(double.size, 32);
    assert_eq!(double.alignment, 8);
    assert_eq!(offsets(&snapshot, "Color", "float_64"), vec![0, 8, 16, 24]);
}

#[test]
fn test_declared_meta_narrows_int_fields() {
    let snapshot = common::mini_snapshot();
    let layout = snapshot.resolve_layout("Vector2i", "float_64").unwrap();
    assert_eq!(layout.size, 8);
    assert_eq!(layout.field("y").unwrap().offset, 4);
    assert_eq!(layout.field("y").unwrap().ty, "int32");
}

#[test]
fn test_nested_builtins() {
    let snapshot = common::mini_snapshot();

    assert_eq!(offsets(&snapshot, "Transform2D", "float_32"), vec![0, 8, 16]);
    assert_eq!(offsets(&snapshot, "Transform2D", "float_64"), vec![0, 16, 32]);
    assert_eq!(snapshot.resolve_field_offset("Plane", "d", "float_32"), Ok(12));
    assert_eq!(snapshot.resolve_field_offset("Plane", "d", "float_64"), Ok(24));
    assert_eq!(snapshot.resolve_field_offset("Rect2", "size", "float_64"), Ok(16));
}

#[test]
fn test_opaque_builtin_uses_declared_size() {
    let snapshot = common::mini_snapshot();
    let layout = snapshot.resolve_layout("String", "float_64").unwrap();
    assert!(layout.is_opaque());
    assert_eq!(layout.size, 8);
    assert_eq!(layout.alignment, 8);
}

#[test]
fn test_unknown_configuration_lists_alternatives() {
    let snapshot = common::mini_snapshot();
    let expected = ExtApiError::UnknownConfiguration {
        configuration: "double_64".to_string(),
        available: vec!["float_32".to_string(), "float_64".to_string()],
    };
    assert_eq!(
        snapshot.resolve_layout("Color", "double_64").unwrap_err(),
        expected
    );
    assert_eq!(
        snapshot
            .resolve_field_offset("Color", "r", "double_64")
            .unwrap_err(),
        expected
    );
}

#[test]
fn test_error_precedence() {
    let snapshot = common::mini_snapshot();

    // builtin before configuration
    assert!(matches!(
        snapshot.resolve_layout("Colour", "double_64"),
        Err(ExtApiError::UnknownBuiltin { .. })
    ));
    // configuration before field
    assert!(matches!(
        snapshot.resolve_field_offset("Color", "q", "double_64"),
        Err(ExtApiError::UnknownConfiguration { .. })
    ));
    assert_eq!(
        snapshot.resolve_field_offset("Color", "q", "float_32"),
        Err(ExtApiError::UnknownField {
            builtin: "Color".to_string(),
            field: "q".to_string(),
        })
    );
}

#[test]
fn test_repeated_resolution_is_cached_and_identical() {
    let snapshot = common::mini_snapshot();
    let first = snapshot.resolve_layout("Transform2D", "float_32").unwrap();
    let populated = snapshot.layout_cache().populated();
    let second = snapshot.resolve_layout("Transform2D", "float_32").unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(snapshot.layout_cache().populated(), populated);
}

#[test]
fn test_concurrent_resolution_agrees() {
    let snapshot = std::sync::Arc::new(common::mini_snapshot());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let snapshot = std::sync::Arc::clone(&snapshot);
            std::thread::spawn(move || {
                let config = if i % 2 == 0 { "float_32" } else { "float_64" };
                let layout = snapshot.resolve_layout("Plane", config).unwrap();
                (config, layout.size)
            })
        })
        .collect();

    for handle in handles {
        let (config, size) = handle.join().expect("thread should not panic");
        let expected = if config == "float_32" { 16 } else { 32 };
        assert_eq!(size, expected);
    }
}

#[test]
fn test_derived_members_have_no_storage() {
    let snapshot = common::mini_snapshot();

    for (config, size) in [("float_32", 16), ("float_64", 32)] {
        let layout = snapshot.resolve_layout("Color", config).unwrap();
        let names: Vec<&str> = layout.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["r", "g", "b", "a"]);
        assert_eq!(layout.size, size);
    }
    assert_eq!(
        snapshot.resolve_layout("Color", "float_32").unwrap().fields[0].ty,
        "float"
    );
    assert_eq!(
        snapshot.resolve_field_offset("Color", "r8", "float_32"),
        Err(ExtApiError::UnknownField {
            builtin: "Color".to_string(),
            field: "r8".to_string(),
        })
    );
    assert!(snapshot
        .resolve_field_offset("Color", "v", "float_64")
        .is_err());
}

#[test]
fn test_fields_follow_declared_offset_order() {
    let snapshot = common::mini_snapshot();

    for (config, size_offset, size) in [("float_32", 8, 16), ("float_64", 16, 32)] {
        let layout = snapshot.resolve_layout("Rect2", config).unwrap();
        let names: Vec<&str> = layout.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["position", "size"]);
        assert_eq!(offsets(&snapshot, "Rect2", config), vec![0, size_offset]);
        assert_eq!(layout.size, size);
        assert!(matches!(
            snapshot.resolve_field_offset("Rect2", "end", config),
            Err(ExtApiError::UnknownField { .. })
        ));
    }
}
