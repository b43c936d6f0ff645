use serde::Serialize;

use super::method::Parameter;

/// Free function declared under `utility_functions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilityFunction {
    pub name: String,
    pub category: Option<String>,
    pub return_type: Option<String>,
    pub is_vararg: bool,
    pub hash: Option<u64>,
    pub arguments: Vec<Parameter>,
}
