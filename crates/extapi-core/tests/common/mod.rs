use std::sync::Arc;

use extapi_core::{ModelRegistry, ModelSnapshot};

/// Raw bytes of the trimmed-down extension API document
pub const MINI_API: &str = include_str!("../fixtures/mini_api.json");

/// Snapshot of the fixture document
#[allow(dead_code)]
pub fn mini_snapshot() -> ModelSnapshot {
    ModelSnapshot::from_bytes(MINI_API.as_bytes()).expect("fixture document should load")
}

/// Registry with the fixture document installed
#[allow(dead_code)]
pub fn mini_registry() -> (ModelRegistry, Arc<ModelSnapshot>) {
    let registry = ModelRegistry::new();
    let snapshot = registry
        .install_document(MINI_API.as_bytes())
        .expect("fixture document should install");
    (registry, snapshot)
}

/// Fixture document with a JSON edit applied
#[allow(dead_code)]
pub fn mini_api_with(edit: impl FnOnce(&mut serde_json::Value)) -> Vec<u8> {
    let mut doc: serde_json::Value =
        serde_json::from_str(MINI_API).expect("fixture should be valid JSON");
    edit(&mut doc);
    serde_json::to_vec(&doc).expect("edited document should serialize")
}
