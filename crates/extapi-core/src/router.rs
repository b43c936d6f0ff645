//! Free-text query routing
//!
//! A query is case-folded and split on every character that is neither
//! alphanumeric nor `_`. Stop words are dropped. Each remaining token votes
//! for the entities it matches, keeping only its best match per entity:
//!
//! | match | weight |
//! |---|---|
//! | entity name (or a method hash, for numeric tokens) | 4.0 |
//! | alias: word part, owner, singleton, category | 2.0 |
//! | partial: token is a prefix of an index key | 1.0 × token length / key length |
//!
//! The summed votes are scaled by `1 + 1 / qualified name length`, so that a
//! shorter name wins among equal matches. Hits below [`MIN_RELEVANCE`] are
//! dropped; the rest are ordered by score, then by qualified name.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::errors::{ExtApiError, Result};
use crate::index::{MatchStrength, ModelIndex};
use crate::model::{ApiModel, EntityRef};

pub const MIN_RELEVANCE: f64 = 0.5;
pub const ROUTE_LIMIT: usize = 10;
/// Index keys examined per token for partial matches
pub const PARTIAL_FANOUT: usize = 256;

const EXACT_WEIGHT: f64 = 4.0;
const ALIAS_WEIGHT: f64 = 2.0;
const PARTIAL_WEIGHT: f64 = 1.0;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "of", "de", "do", "da", "in", "for", "is", "what", "which", "class",
    "classe", "method", "metodo", "método", "builtin", "function", "func", "enum", "type",
    "hash",
];

/// One ranked entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteHit {
    pub entity: EntityRef,
    pub score: f64,
}

/// Case-fold and split into tokens; stop words are kept
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn strength_weight(strength: MatchStrength) -> f64 {
    match strength {
        MatchStrength::Exact => EXACT_WEIGHT,
        MatchStrength::Alias => ALIAS_WEIGHT,
    }
}

pub struct QueryRouter<'a> {
    model: &'a ApiModel,
    index: &'a ModelIndex,
}

impl<'a> QueryRouter<'a> {
    pub fn new(model: &'a ApiModel, index: &'a ModelIndex) -> Self {
        Self { model, index }
    }

    /// Rank entities against free text
    ///
    /// # Errors
    ///
    /// `EmptyQuery` when the text holds no token at all. A query made only of
    /// stop words is not an error and yields no hits.
    pub fn route(&self, query: &str) -> Result<Vec<RouteHit>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Err(ExtApiError::EmptyQuery);
        }

        let mut totals: HashMap<EntityRef, f64> = HashMap::new();
        for token in tokens.iter().filter(|t| !is_stop_word(t)) {
            for (entity, weight) in self.token_votes(token) {
                *totals.entry(entity).or_insert(0.0) += weight;
            }
        }

        let mut hits: Vec<RouteHit> = totals
            .into_iter()
            .map(|(entity, votes)| {
                let name_len = self.model.entity(entity).qualified_name().chars().count();
                RouteHit {
                    entity,
                    score: votes * (1.0 + 1.0 / name_len.max(1) as f64),
                }
            })
            .filter(|hit| hit.score >= MIN_RELEVANCE)
            .collect();

        hits.sort_by(|a, b| self.rank(a, b));
        truncate_keeping_top_ties(&mut hits, ROUTE_LIMIT);
        Ok(hits)
    }

    /// Best weight per entity for a single token
    fn token_votes(&self, token: &str) -> HashMap<EntityRef, f64> {
        let mut votes: HashMap<EntityRef, f64> = HashMap::new();
        let mut vote = |entity: EntityRef, weight: f64| {
            let slot = votes.entry(entity).or_insert(0.0);
            if weight > *slot {
                *slot = weight;
            }
        };

        for posting in self.index.postings(token) {
            vote(posting.entity, strength_weight(posting.strength));
        }

        if let Ok(hash) = token.parse::<u64>() {
            if let Some(method) = self.index.method_by_hash(hash) {
                vote(EntityRef::Method(method), EXACT_WEIGHT);
            }
        }

        let token_len = token.chars().count() as f64;
        for (key, postings) in self.index.keys_with_prefix(token).take(PARTIAL_FANOUT) {
            let weight = PARTIAL_WEIGHT * token_len / key.chars().count() as f64;
            for posting in postings {
                vote(posting.entity, weight);
            }
        }

        votes
    }

    fn rank(&self, a: &RouteHit, b: &RouteHit) -> Ordering {
        let name_a = self.model.entity(a.entity).qualified_name();
        let name_b = self.model.entity(b.entity).qualified_name();
        b.score
            .total_cmp(&a.score)
            .then_with(|| name_a.cmp(name_b))
            .then_with(|| a.entity.kind().cmp(&b.entity.kind()))
    }
}

/// Keep at most `limit` hits, but never split the group tied for first place
fn truncate_keeping_top_ties(hits: &mut Vec<RouteHit>, limit: usize) {
    let Some(top) = hits.first().map(|h| h.score) else {
        return;
    };
    let top_ties = hits.iter().take_while(|h| h.score == top).count();
    hits.truncate(limit.max(top_ties));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuiltinEntity, ClassEntity, ClassId, MethodEntity, MethodId, MethodOwner, OwnerKind};

    fn model() -> ApiModel {
        let owner = MethodOwner {
            kind: OwnerKind::Class,
            name: "Node".into(),
        };
        let mut add_child = MethodEntity::new(owner, "add_child");
        add_child.hash = Some(3863233950);
        let mut node = ClassEntity::new("Node");
        node.methods = vec![MethodId(0)];
        ApiModel {
            classes: vec![node, ClassEntity::new("Node2D"), ClassEntity::new("HTTPRequest")],
            builtins: vec![BuiltinEntity::new("Color")],
            methods: vec![add_child],
            ..ApiModel::default()
        }
    }

    fn route(query: &str) -> Result<Vec<RouteHit>> {
        let model = model();
        let index = ModelIndex::build(&model).expect("builds");
        QueryRouter::new(&model, &index).route(query)
    }

    #[test]
    fn test_tokenize_keeps_underscores() {
        assert_eq!(tokenize("Node.add_child()"), vec!["node", "add_child"]);
        assert!(tokenize("  ?! ").is_empty());
    }

    #[test]
    fn test_blank_query_is_empty() {
        assert_eq!(route(""), Err(ExtApiError::EmptyQuery));
        assert_eq!(route("   "), Err(ExtApiError::EmptyQuery));
    }

    #[test]
    fn test_stop_words_only_yield_nothing() {
        assert_eq!(route("what is the class").expect("routes"), vec![]);
    }

    #[test]
    fn test_exact_name_ranks_first() {
        let hits = route("Node").expect("routes");
        assert_eq!(hits[0].entity, EntityRef::Class(ClassId(0)));
        assert!((hits[0].score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_token_matches_method_hash() {
        let hits = route("hash 3863233950").expect("routes");
        assert_eq!(hits[0].entity, EntityRef::Method(MethodId(0)));
    }

    #[test]
    fn test_partial_match_scores_by_coverage() {
        let hits = route("colo").expect("routes");
        assert_eq!(hits.len(), 1);
        // 1.0 * 4/5 * (1 + 1/5)
        assert!((hits[0].score - 0.96).abs() < 1e-9);
    }

    #[test]
    fn test_results_above_threshold() {
        for hit in route("node request").expect("routes") {
            assert!(hit.score >= MIN_RELEVANCE);
        }
    }

    #[test]
    fn test_truncation_keeps_top_tie_group() {
        let hit = |i: u32, score: f64| RouteHit {
            entity: EntityRef::Class(ClassId(i)),
            score,
        };
        let mut hits: Vec<RouteHit> = (0..12).map(|i| hit(i, 3.0)).collect();
        hits.push(hit(12, 1.0));
        truncate_keeping_top_ties(&mut hits, ROUTE_LIMIT);
        assert_eq!(hits.len(), 12);

        let mut hits: Vec<RouteHit> = (0..12).map(|i| hit(i, 12.0 - i as f64)).collect();
        truncate_keeping_top_ties(&mut hits, ROUTE_LIMIT);
        assert_eq!(hits.len(), ROUTE_LIMIT);
    }
}
