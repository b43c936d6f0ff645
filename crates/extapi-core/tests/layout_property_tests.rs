#![allow(clippy::unwrap_used, clippy::expect_used)]

use extapi_core::ModelSnapshot;
use proptest::prelude::*;
use serde_json::json;

const PRIMITIVES: &[&str] = &[
    "bool", "uint8", "int16", "int32", "float", "int", "double", "real",
];

fn document(field_types: &[&str], real_size: u32) -> Vec<u8> {
    let members: Vec<_> = field_types
        .iter()
        .enumerate()
        .map(|(i, ty)| json!({"name": format!("f{}", i), "type": ty}))
        .collect();
    let doc = json!({
        "build_configurations": [
            {"name": "generated", "real_size": real_size, "pointer_size": 8}
        ],
        "builtin_classes": [
            {"name": "Generated", "members": members}
        ]
    });
    serde_json::to_vec(&doc).expect("serializable")
}

fn field_types() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(PRIMITIVES), 1..12)
}

proptest! {
    #[test]
    fn prop_layout_is_packed_and_aligned(types in field_types(), wide in any::<bool>()) {
        let real_size = if wide { 8 } else { 4 };
        let snapshot = ModelSnapshot::from_bytes(&document(&types, real_size)).unwrap();
        let layout = snapshot.resolve_layout("Generated", "generated").unwrap();

        prop_assert_eq!(layout.fields.len(), types.len());
        let mut previous_end = 0;
        for field in &layout.fields {
            prop_assert_eq!(field.offset % field.alignment, 0);
            prop_assert!(field.offset >= previous_end);
            previous_end = field.end();
        }
        prop_assert!(previous_end <= layout.size);
        prop_assert_eq!(layout.size % layout.alignment, 0);
        let widest = layout.fields.iter().map(|f| f.alignment).max().unwrap();
        prop_assert_eq!(layout.alignment, widest);
    }

    #[test]
    fn prop_layout_is_deterministic(types in field_types()) {
        let bytes = document(&types, 4);
        let first = ModelSnapshot::from_bytes(&bytes).unwrap();
        let second = ModelSnapshot::from_bytes(&bytes).unwrap();
        let a = first.resolve_layout("Generated", "generated").unwrap();
        let b = second.resolve_layout("Generated", "generated").unwrap();
        prop_assert_eq!(&*a, &*b);
    }
}
