//! Model installation.

use std::time::Instant;

use extapi_core::errors::ExError;
use extapi_core::{log_op_end, log_op_error, log_op_start, ModelRegistry, ModelSummary};

use crate::Result;

/// Build a snapshot from document bytes and make it current
///
/// On failure the previously installed snapshot stays current.
///
/// # Errors
///
/// `MalformedDocument` or `IndexConflict`.
pub fn install_model(registry: &ModelRegistry, bytes: &[u8]) -> Result<ModelSummary> {
    log_op_start!("install_model", document_bytes = bytes.len());
    let start = Instant::now();

    let result = registry
        .install_document(bytes)
        .map(|snapshot| snapshot.summary())
        .map_err(|e| ExError::from(e).with_op("install_model"));

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(summary) => {
            log_op_end!(
                "install_model",
                duration_ms = elapsed,
                document_digest = %summary.digest,
                class_count = summary.counts.classes,
                method_count = summary.counts.methods
            );
        }
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("install_model", e_clone, duration_ms = elapsed);
        }
    }
    result
}
