//! Result types for the query surface that have no direct core counterpart.

use serde::Serialize;

use extapi_core::{EntityKind, ModelSnapshot, RouteHit};

/// A routed entity, detached from the snapshot it was ranked in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEntity {
    pub kind: EntityKind,
    pub qualified_name: String,
    pub score: f64,
}

impl RoutedEntity {
    pub fn from_hit(snapshot: &ModelSnapshot, hit: &RouteHit) -> Self {
        let entity = snapshot.model().entity(hit.entity);
        Self {
            kind: entity.kind(),
            qualified_name: entity.qualified_name().to_string(),
            score: hit.score,
        }
    }
}

/// Offset of a single builtin field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOffset {
    pub builtin: String,
    pub field: String,
    pub configuration: String,
    pub offset: u32,
}
