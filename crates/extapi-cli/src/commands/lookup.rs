//! Named lookups and listings

use clap::Args;
use extapi_engine::commands::engine_query::{ApiQuery, UtilitySelector};

#[derive(Debug, Args)]
pub struct NameArg {
    pub name: String,
}

pub fn class(args: NameArg) -> ApiQuery {
    ApiQuery::ClassDetails { name: args.name }
}

pub fn ancestors(args: NameArg) -> ApiQuery {
    ApiQuery::ClassAncestry { name: args.name }
}

pub fn enumeration(args: NameArg) -> ApiQuery {
    ApiQuery::EnumLookup { name: args.name }
}

pub fn builtin(args: NameArg) -> ApiQuery {
    ApiQuery::BuiltinDetails { name: args.name }
}

pub fn builtins() -> ApiQuery {
    ApiQuery::BuiltinNames
}

pub fn singletons() -> ApiQuery {
    ApiQuery::Singletons
}

pub fn native_structures() -> ApiQuery {
    ApiQuery::NativeStructures
}

#[derive(Debug, Args)]
pub struct HashArg {
    pub hash: u64,
}

impl HashArg {
    pub fn into_query(self) -> ApiQuery {
        ApiQuery::MethodByHash { hash: self.hash }
    }
}

#[derive(Debug, Args)]
pub struct MethodsArgs {
    /// Unqualified method name
    pub name: String,

    /// Restrict to one class or builtin
    #[arg(long)]
    pub owner: Option<String>,
}

impl MethodsArgs {
    pub fn into_query(self) -> ApiQuery {
        ApiQuery::MethodsByName {
            name: self.name,
            owner: self.owner,
        }
    }
}

#[derive(Debug, Args)]
pub struct UtilityArgs {
    /// Function name; omit to list every function
    #[arg(conflicts_with = "category")]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,
}

impl UtilityArgs {
    pub fn into_query(self) -> ApiQuery {
        let selector = match (self.name, self.category) {
            (Some(name), _) => UtilitySelector::ByName(name),
            (None, Some(category)) => UtilitySelector::ByCategory(category),
            (None, None) => UtilitySelector::All,
        };
        ApiQuery::Utilities(selector)
    }
}

#[derive(Debug, Args)]
pub struct ConstantArgs {
    /// Constant name; omit to list every name
    pub name: Option<String>,
}

impl ConstantArgs {
    pub fn into_query(self) -> ApiQuery {
        match self.name {
            Some(name) => ApiQuery::GlobalConstant { name },
            None => ApiQuery::GlobalConstantNames,
        }
    }
}
