//! Immutable model snapshot: model, indices and layout cache
//!
//! A snapshot is built once from document bytes and never mutated, except
//! for its layout cache, which only ever gains entries.

use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};

use extapi_core_types::EntityKind;

use crate::errors::{ExtApiError, Result};
use crate::index::ModelIndex;
use crate::layout::{LayoutCache, LayoutResolver, LayoutResult};
use crate::loader::parse_document;
use crate::model::{ApiModel, Configuration, Entity, MethodEntity};
use crate::router::{QueryRouter, RouteHit};

/// SHA-256 of the raw document, hex encoded
pub fn document_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub classes: usize,
    pub builtins: usize,
    pub methods: usize,
    pub enums: usize,
    pub utility_functions: usize,
    pub singletons: usize,
    pub native_structures: usize,
    pub global_constants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub version: String,
    pub digest: String,
    pub counts: EntityCounts,
    pub configurations: Vec<Configuration>,
}

#[derive(Debug)]
pub struct ModelSnapshot {
    model: ApiModel,
    index: ModelIndex,
    layouts: LayoutCache,
    digest: String,
}

impl ModelSnapshot {
    /// Parse, validate and index a document
    ///
    /// # Errors
    ///
    /// `MalformedDocument` from the loader, `IndexConflict` from indexing.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model = parse_document(bytes)?;
        Self::from_model(model, document_digest(bytes))
    }

    /// Index an already validated model
    ///
    /// # Errors
    ///
    /// `IndexConflict` on duplicate hashes or qualified names.
    pub fn from_model(model: ApiModel, digest: String) -> Result<Self> {
        let index = ModelIndex::build(&model)?;
        let layouts = LayoutCache::for_model(&model);
        Ok(Self {
            model,
            index,
            layouts,
            digest,
        })
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn model(&self) -> &ApiModel {
        &self.model
    }

    pub fn index(&self) -> &ModelIndex {
        &self.index
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn layout_cache(&self) -> &LayoutCache {
        &self.layouts
    }

    pub fn layout_resolver(&self) -> LayoutResolver<'_> {
        LayoutResolver::new(&self.model, self.index.builtin_ids(), &self.layouts)
    }

    pub fn router(&self) -> QueryRouter<'_> {
        QueryRouter::new(&self.model, &self.index)
    }

    pub fn lookup_method_by_hash(&self, hash: u64) -> Result<&MethodEntity> {
        self.index
            .method_by_hash(hash)
            .map(|id| self.model.method(id))
            .ok_or_else(|| ExtApiError::not_found("method hash", hash.to_string()))
    }

    /// Case-sensitive lookup by qualified name
    pub fn lookup_entity_by_name(&self, kind: EntityKind, name: &str) -> Result<Entity<'_>> {
        self.index
            .get(kind, name)
            .map(|entity| self.model.entity(entity))
            .ok_or_else(|| ExtApiError::not_found(kind.as_str(), name))
    }

    /// Lookup by qualified name with a case-insensitive fallback
    pub fn find_entity_ignore_case(&self, kind: EntityKind, name: &str) -> Result<Entity<'_>> {
        self.index
            .get_ignore_case(kind, name)
            .map(|entity| self.model.entity(entity))
            .ok_or_else(|| ExtApiError::not_found(kind.as_str(), name))
    }

    pub fn resolve_layout(&self, builtin: &str, configuration: &str) -> Result<Arc<LayoutResult>> {
        self.layout_resolver().resolve(builtin, configuration)
    }

    pub fn resolve_field_offset(
        &self,
        builtin: &str,
        field: &str,
        configuration: &str,
    ) -> Result<u32> {
        self.layout_resolver()
            .offset_of(builtin, field, configuration)
    }

    pub fn route(&self, query: &str) -> Result<Vec<RouteHit>> {
        self.router().route(query)
    }

    pub fn summary(&self) -> ModelSummary {
        let model = &self.model;
        ModelSummary {
            version: model.version.clone(),
            digest: self.digest.clone(),
            counts: EntityCounts {
                classes: model.count(EntityKind::Class),
                builtins: model.count(EntityKind::Builtin),
                methods: model.count(EntityKind::Method),
                enums: model.count(EntityKind::Enum),
                utility_functions: model.count(EntityKind::Utility),
                singletons: model.singletons.len(),
                native_structures: model.native_structures.len(),
                global_constants: model.global_constants.len(),
            },
            configurations: model.configurations.clone(),
        }
    }
}
