//! Document loader: raw JSON bytes to a validated [`ApiModel`]
//!
//! Validation runs in a fixed order and reports the first violation as
//! `MalformedDocument`:
//!
//! 1. JSON syntax, types and required fields
//! 2. Configuration declarations
//! 3. Duplicate size/offset entries and duplicate member names
//! 4. Undeclared or cyclic class inheritance
//! 5. Singletons of undeclared classes
//! 6. Offset tables naming undeclared builtins
//! 7. Field types that are neither primitive nor a declared builtin
//! 8. Declared packing consistency
//!
//! Duplicate entity names and method hashes are left to the index builder.

mod build;
pub mod format;
pub mod validation;

use crate::errors::{ExtApiError, Result};
use crate::layout;
use crate::model::ApiModel;

use format::RawDocument;

/// Parse and validate a document. Pure function of its input.
pub fn parse_document(bytes: &[u8]) -> Result<ApiModel> {
    let raw: RawDocument = serde_json::from_slice(bytes)
        .map_err(|e| ExtApiError::malformed(format!("JSON parse error: {}", e)))?;

    let configurations = validation::resolve_configurations(&raw)?;
    validation::check_duplicates(&raw)?;
    validation::check_inheritance(&raw)?;
    validation::check_singletons(&raw)?;
    validation::check_offset_tables(&raw)?;

    let model = build::build_model(raw, configurations)?;
    validation::check_field_types(&model)?;
    layout::verify_model(&model)?;

    Ok(model)
}
