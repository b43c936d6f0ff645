//! Read-only queries over a snapshot, shaped for display
//!
//! Name arguments are matched exactly first and then case-insensitively.

pub mod builtin_queries;
pub mod class_queries;
pub mod global_queries;
pub mod method_queries;

use serde::Serialize;

use crate::model::EnumEntity;

pub use builtin_queries::{builtin_details, builtin_names, BuiltinDetails, MemberListing};
pub use class_queries::{class_ancestry, class_details, ClassDetails};
pub use global_queries::{
    enum_lookup, global_constant, global_constant_names, native_structures, singletons,
    utilities, UtilityListing, UtilityQuery, UtilitySummary,
};
pub use method_queries::{method_by_hash, methods_by_name, MethodSummary};

/// Enum with its value names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumListing {
    pub name: String,
    pub is_bitfield: bool,
    pub values: Vec<String>,
}

impl From<&EnumEntity> for EnumListing {
    fn from(entity: &EnumEntity) -> Self {
        Self {
            name: entity.qualified_name.clone(),
            is_bitfield: entity.is_bitfield,
            values: entity.values.iter().map(|v| v.name.clone()).collect(),
        }
    }
}
