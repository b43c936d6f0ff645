//! Subcommand arguments and the shared load-query-print path.

pub mod layout;
pub mod lookup;
pub mod model;

use std::path::Path;

use extapi_core::{ExError, ModelRegistry};
use extapi_engine::commands::engine_query::{apply_query, ApiQuery};
use extapi_engine::commands::install::install_model;

/// Load the document, run one query and print the result as JSON
pub fn execute(api: &Path, query: ApiQuery) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(api)
        .map_err(|e| format!("cannot read {}: {}", api.display(), e))?;

    let registry = ModelRegistry::new();
    install_model(&registry, &bytes)?;

    let result = apply_query(&registry, query)?;
    println!("{}", result.to_json()?);
    Ok(())
}

/// Follow-up line for errors the caller can correct by changing the request
pub fn hint(err: &ExError) -> Option<String> {
    if !err.kind().is_caller_error() {
        return None;
    }
    err.candidates()
        .filter(|c| !c.is_empty())
        .map(|c| format!("Available: {}", c.join(", ")))
}
