//! Whole-model commands: info, route, entity

use clap::Args;
use extapi_core::EntityKind;
use extapi_engine::commands::engine_query::ApiQuery;

pub fn summary() -> ApiQuery {
    ApiQuery::Summary
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Free-text query; words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl RouteArgs {
    pub fn into_query(self) -> ApiQuery {
        ApiQuery::Route {
            text: self.text.join(" "),
        }
    }
}

#[derive(Debug, Args)]
pub struct EntityArgs {
    /// class, builtin, method, enum or utility
    #[arg(long, value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Qualified name (`Node`, `Node.add_child`, `Vector3.Axis`)
    pub name: String,

    /// Fall back to a case-insensitive match
    #[arg(long)]
    pub ignore_case: bool,
}

impl EntityArgs {
    pub fn into_query(self) -> ApiQuery {
        ApiQuery::EntityByName {
            kind: self.kind,
            name: self.name,
            ignore_case: self.ignore_case,
        }
    }
}

fn parse_kind(s: &str) -> Result<EntityKind, String> {
    EntityKind::parse(s).ok_or_else(|| {
        let labels: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown kind '{}' (expected one of: {})", s, labels.join(", "))
    })
}
