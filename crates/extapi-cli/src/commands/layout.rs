//! Layout commands
//!
//! Layout depends on the build configuration, so `--config` has no default.

use clap::Args;
use extapi_engine::commands::engine_query::ApiQuery;

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Builtin name, e.g. `Transform2D`
    pub builtin: String,

    /// Build configuration, e.g. `float_64`
    #[arg(long = "config")]
    pub configuration: String,
}

impl LayoutArgs {
    pub fn into_query(self) -> ApiQuery {
        ApiQuery::ResolveLayout {
            builtin: self.builtin,
            configuration: self.configuration,
        }
    }
}

#[derive(Debug, Args)]
pub struct OffsetArgs {
    pub builtin: String,

    pub field: String,

    #[arg(long = "config")]
    pub configuration: String,
}

impl OffsetArgs {
    pub fn into_query(self) -> ApiQuery {
        ApiQuery::FieldOffset {
            builtin: self.builtin,
            field: self.field,
            configuration: self.configuration,
        }
    }
}
