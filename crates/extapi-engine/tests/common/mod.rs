use extapi_core::ModelRegistry;
use extapi_engine::commands::install::install_model;

pub const MINI_API: &str = include_str!("../../../extapi-core/tests/fixtures/mini_api.json");

/// Registry with the fixture document installed through the engine
#[allow(dead_code)]
pub fn installed_registry() -> ModelRegistry {
    let registry = ModelRegistry::new();
    install_model(&registry, MINI_API.as_bytes()).expect("fixture document should install");
    registry
}
