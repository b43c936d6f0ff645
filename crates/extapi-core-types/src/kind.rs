//! Entity kinds
//!
//! Every indexed entity lives in exactly one kind namespace. Qualified names
//! are unique per kind, not globally: a class and a builtin may share a name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace an entity is indexed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Engine-exposed object type
    Class,
    /// Composite value type with a configuration-dependent layout
    Builtin,
    /// Method owned by a class or a builtin
    Method,
    /// Global, class or builtin enum
    Enum,
    /// Free utility function
    Utility,
}

impl EntityKind {
    /// All kinds, in index order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Class,
        EntityKind::Builtin,
        EntityKind::Method,
        EntityKind::Enum,
        EntityKind::Utility,
    ];

    /// Stable lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Builtin => "builtin",
            EntityKind::Method => "method",
            EntityKind::Enum => "enum",
            EntityKind::Utility => "utility",
        }
    }

    /// Parse a label; accepts the stable labels case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let folded = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == folded)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_labels() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(EntityKind::parse(" Builtin "), Some(EntityKind::Builtin));
        assert_eq!(EntityKind::parse("banana"), None);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&EntityKind::Utility).unwrap();
        assert_eq!(json, "\"utility\"");
    }
}
