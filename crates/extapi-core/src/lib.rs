//! extapi core - queryable model of a Godot `extension_api.json`
//!
//! - Loader: raw document bytes to a validated arena model
//! - Index: hash, qualified-name and token lookups
//! - Layout: per-configuration size, alignment and field offsets of builtins
//! - Router: free-text query ranking
//! - Registry: atomically swapped current snapshot
//!
//! The core performs no I/O; callers hand it document bytes.

pub mod errors;
pub mod index;
pub mod layout;
pub mod loader;
pub mod logging_facility;
pub mod model;
pub mod queries;
pub mod registry;
pub mod render;
pub mod router;
pub mod snapshot;

// Used by the logging macros
#[doc(hidden)]
pub use extapi_core_types as core_types;

pub use errors::{ExError, ExErrorKind, ExtApiError, Result};
pub use extapi_core_types::EntityKind;
pub use layout::{FieldLayout, LayoutResult};
pub use loader::parse_document;
pub use model::{ApiModel, Entity, EntityRecord, EntityRef};
pub use registry::ModelRegistry;
pub use router::RouteHit;
pub use snapshot::{ModelSnapshot, ModelSummary};
