//! Engine-level read-only query surface.
//!
//! `apply_query` is the single entry point for every read against the
//! installed model. It loads the current snapshot once, so a query never
//! observes two different documents even if a reload lands mid-call.

use std::time::Instant;

use serde::Serialize;

use extapi_core::errors::{ExError, ExtApiError};
use extapi_core::model::{GlobalConstant, NativeStructure, Singleton};
use extapi_core::queries::{
    self, BuiltinDetails, ClassDetails, EnumListing, MethodSummary, UtilityListing, UtilityQuery,
};
use extapi_core::{
    log_op_end, log_op_error, log_op_start, EntityKind, EntityRecord, LayoutResult,
    ModelRegistry, ModelSnapshot, ModelSummary,
};

use crate::commands::results::{FieldOffset, RoutedEntity};
use crate::Result;

// ---------------------------------------------------------------------------
// ApiQuery
// ---------------------------------------------------------------------------

/// Utility function selector, owned counterpart of [`UtilityQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtilitySelector {
    ByName(String),
    ByCategory(String),
    All,
}

impl UtilitySelector {
    fn as_query(&self) -> UtilityQuery<'_> {
        match self {
            UtilitySelector::ByName(name) => UtilityQuery::ByName(name),
            UtilitySelector::ByCategory(category) => UtilityQuery::ByCategory(category),
            UtilitySelector::All => UtilityQuery::All,
        }
    }
}

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiQuery {
    // ── Model ────────────────────────────────────────────────────────────────
    /// Version, digest, counts and configurations of the installed document.
    Summary,
    /// Entity by kind and qualified name.
    EntityByName {
        kind: EntityKind,
        name: String,
        /// Fall back to a case-insensitive match
        ignore_case: bool,
    },
    /// Free-text ranking across all entity kinds.
    Route { text: String },

    // ── Methods ──────────────────────────────────────────────────────────────
    MethodByHash { hash: u64 },
    MethodsByName {
        name: String,
        owner: Option<String>,
    },

    // ── Layout ───────────────────────────────────────────────────────────────
    ResolveLayout {
        builtin: String,
        configuration: String,
    },
    FieldOffset {
        builtin: String,
        field: String,
        configuration: String,
    },

    // ── Classes / builtins ───────────────────────────────────────────────────
    ClassDetails { name: String },
    ClassAncestry { name: String },
    BuiltinDetails { name: String },
    BuiltinNames,

    // ── Globals ──────────────────────────────────────────────────────────────
    EnumLookup { name: String },
    Utilities(UtilitySelector),
    Singletons,
    NativeStructures,
    GlobalConstant { name: String },
    GlobalConstantNames,
}

impl ApiQuery {
    /// Operation name used in log events and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            ApiQuery::Summary => "summary",
            ApiQuery::EntityByName { .. } => "entity_by_name",
            ApiQuery::Route { .. } => "route",
            ApiQuery::MethodByHash { .. } => "method_by_hash",
            ApiQuery::MethodsByName { .. } => "methods_by_name",
            ApiQuery::ResolveLayout { .. } => "resolve_layout",
            ApiQuery::FieldOffset { .. } => "resolve_field_offset",
            ApiQuery::ClassDetails { .. } => "class_details",
            ApiQuery::ClassAncestry { .. } => "class_ancestry",
            ApiQuery::BuiltinDetails { .. } => "builtin_details",
            ApiQuery::BuiltinNames => "builtin_names",
            ApiQuery::EnumLookup { .. } => "enum_lookup",
            ApiQuery::Utilities(_) => "utilities",
            ApiQuery::Singletons => "singletons",
            ApiQuery::NativeStructures => "native_structures",
            ApiQuery::GlobalConstant { .. } => "global_constant",
            ApiQuery::GlobalConstantNames => "global_constant_names",
        }
    }

    /// Build configuration targeted by layout queries
    pub fn configuration(&self) -> Option<&str> {
        match self {
            ApiQuery::ResolveLayout { configuration, .. }
            | ApiQuery::FieldOffset { configuration, .. } => Some(configuration),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ApiQueryResult
// ---------------------------------------------------------------------------

/// All possible results from `apply_query`.
///
/// Serializes as the bare payload, without a variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiQueryResult {
    Summary(ModelSummary),
    Entity(EntityRecord),
    Routed(Vec<RoutedEntity>),
    Method(MethodSummary),
    Methods(Vec<MethodSummary>),
    Layout(LayoutResult),
    FieldOffset(FieldOffset),
    Class(ClassDetails),
    Builtin(BuiltinDetails),
    Enum(EnumListing),
    Utilities(UtilityListing),
    Singletons(Vec<Singleton>),
    NativeStructures(Vec<NativeStructure>),
    GlobalConstant(GlobalConstant),
    /// Name lists: ancestry, builtin names, constant names
    Names(Vec<String>),
}

impl ApiQueryResult {
    /// Pretty-printed JSON payload
    ///
    /// # Errors
    ///
    /// `Serialization` when the payload cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExError::from(ExtApiError::from(e)).with_op("render_result"))
    }
}

// ---------------------------------------------------------------------------
// apply_query
// ---------------------------------------------------------------------------

/// Answer a read-only query against the current snapshot
///
/// # Errors
///
/// `NoModelInstalled` before the first install, otherwise the error of the
/// underlying lookup, with the operation name attached.
pub fn apply_query(registry: &ModelRegistry, query: ApiQuery) -> Result<ApiQueryResult> {
    let op = query.op_name();
    match query.configuration() {
        Some(configuration) => {
            log_op_start!(op, configuration = configuration);
        }
        None => {
            log_op_start!(op);
        }
    }
    let start = Instant::now();

    let result = registry
        .current()
        .and_then(|snapshot| execute(&snapshot, &query))
        .map_err(|e| ExError::from(e).with_op(op));

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(ApiQueryResult::Routed(hits)) => {
            log_op_end!(op, duration_ms = elapsed, hit_count = hits.len());
        }
        Ok(_) => {
            log_op_end!(op, duration_ms = elapsed);
        }
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!(op, e_clone, duration_ms = elapsed);
        }
    }
    result
}

fn execute(
    snapshot: &ModelSnapshot,
    query: &ApiQuery,
) -> std::result::Result<ApiQueryResult, ExtApiError> {
    let result = match query {
        ApiQuery::Summary => ApiQueryResult::Summary(snapshot.summary()),
        ApiQuery::EntityByName {
            kind,
            name,
            ignore_case,
        } => {
            let entity = if *ignore_case {
                snapshot.find_entity_ignore_case(*kind, name)?
            } else {
                snapshot.lookup_entity_by_name(*kind, name)?
            };
            ApiQueryResult::Entity(entity.to_record())
        }
        ApiQuery::Route { text } => ApiQueryResult::Routed(
            snapshot
                .route(text)?
                .iter()
                .map(|hit| RoutedEntity::from_hit(snapshot, hit))
                .collect(),
        ),
        ApiQuery::MethodByHash { hash } => {
            ApiQueryResult::Method(queries::method_by_hash(snapshot, *hash)?)
        }
        ApiQuery::MethodsByName { name, owner } => ApiQueryResult::Methods(
            queries::methods_by_name(snapshot, name, owner.as_deref()),
        ),
        ApiQuery::ResolveLayout {
            builtin,
            configuration,
        } => {
            let layout = snapshot.resolve_layout(builtin, configuration)?;
            ApiQueryResult::Layout(LayoutResult::clone(&layout))
        }
        ApiQuery::FieldOffset {
            builtin,
            field,
            configuration,
        } => {
            let offset = snapshot.resolve_field_offset(builtin, field, configuration)?;
            ApiQueryResult::FieldOffset(FieldOffset {
                builtin: builtin.clone(),
                field: field.clone(),
                configuration: configuration.clone(),
                offset,
            })
        }
        ApiQuery::ClassDetails { name } => {
            ApiQueryResult::Class(queries::class_details(snapshot, name)?)
        }
        ApiQuery::ClassAncestry { name } => {
            ApiQueryResult::Names(queries::class_ancestry(snapshot, name)?)
        }
        ApiQuery::BuiltinDetails { name } => {
            ApiQueryResult::Builtin(queries::builtin_details(snapshot, name)?)
        }
        ApiQuery::BuiltinNames => ApiQueryResult::Names(queries::builtin_names(snapshot)),
        ApiQuery::EnumLookup { name } => {
            ApiQueryResult::Enum(queries::enum_lookup(snapshot, name)?)
        }
        ApiQuery::Utilities(selector) => {
            ApiQueryResult::Utilities(queries::utilities(snapshot, selector.as_query())?)
        }
        ApiQuery::Singletons => ApiQueryResult::Singletons(queries::singletons(snapshot)),
        ApiQuery::NativeStructures => {
            ApiQueryResult::NativeStructures(queries::native_structures(snapshot))
        }
        ApiQuery::GlobalConstant { name } => {
            ApiQueryResult::GlobalConstant(queries::global_constant(snapshot, name)?)
        }
        ApiQuery::GlobalConstantNames => {
            ApiQueryResult::Names(queries::global_constant_names(snapshot))
        }
    };
    Ok(result)
}
