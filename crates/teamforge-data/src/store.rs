//! Read-only lookup of characters, moves, rankings and the type chart.
//!
//! The search core never touches global data. It is handed a [`KnowledgeStore`] at
//! construction time and only calls its read accessors, so tests can substitute
//! synthetic data sets (see [`crate::synthetic`]).

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{Character, MetaThreat, Move, Ranking, TypeChart};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("duplicate character key '{key}'")]
    DuplicateCharacter { key: String },
    #[display("duplicate move key '{key}'")]
    DuplicateMove { key: String },
}

/// Immutable lookups the search core depends on.
///
/// Implementations must be side-effect free; the evaluator calls them concurrently
/// from several threads.
pub trait KnowledgeStore: fmt::Debug + Send + Sync {
    /// Looks up a character by key.
    fn character_by_key(&self, key: &str) -> Option<&Character>;

    /// Returns every character matching `predicate`, in store order.
    fn filter_characters(&self, predicate: &dyn Fn(&Character) -> bool) -> Vec<&Character>;

    /// Looks up a move by key.
    fn move_by_key(&self, key: &str) -> Option<&Move>;

    /// Looks up ranking scores by character display name.
    fn rankings_for(&self, name: &str) -> Option<&Ranking>;

    /// Top-ranked threats, best first.
    fn meta_threats(&self) -> &[MetaThreat];

    /// Attack/defense multiplier matrix.
    fn type_chart(&self) -> &TypeChart;
}

/// Serialized form of a complete knowledge base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub characters: Vec<Character>,
    pub moves: Vec<Move>,
    #[serde(default)]
    pub rankings: Vec<Ranking>,
    #[serde(default)]
    pub meta_threats: Vec<MetaThreat>,
    #[serde(default = "TypeChart::standard")]
    pub type_chart: TypeChart,
}

/// [`KnowledgeStore`] backed by in-memory tables.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    base: KnowledgeBase,
    character_index: HashMap<String, usize>,
    move_index: HashMap<String, usize>,
    ranking_index: HashMap<String, usize>,
}

impl InMemoryStore {
    /// Indexes a knowledge base.
    ///
    /// Character and move keys must be unique. When several rankings share a name the
    /// first one wins.
    pub fn new(base: KnowledgeBase) -> Result<Self, StoreError> {
        let mut character_index = HashMap::with_capacity(base.characters.len());
        for (i, character) in base.characters.iter().enumerate() {
            if character_index.insert(character.key.clone(), i).is_some() {
                return Err(StoreError::DuplicateCharacter {
                    key: character.key.clone(),
                });
            }
        }

        let mut move_index = HashMap::with_capacity(base.moves.len());
        for (i, m) in base.moves.iter().enumerate() {
            if move_index.insert(m.key.clone(), i).is_some() {
                return Err(StoreError::DuplicateMove { key: m.key.clone() });
            }
        }

        let mut ranking_index = HashMap::with_capacity(base.rankings.len());
        for (i, ranking) in base.rankings.iter().enumerate() {
            ranking_index.entry(ranking.name.clone()).or_insert(i);
        }

        Ok(Self {
            base,
            character_index,
            move_index,
            ranking_index,
        })
    }

    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.base.characters
    }
}

impl KnowledgeStore for InMemoryStore {
    fn character_by_key(&self, key: &str) -> Option<&Character> {
        self.character_index
            .get(key)
            .map(|&i| &self.base.characters[i])
    }

    fn filter_characters(&self, predicate: &dyn Fn(&Character) -> bool) -> Vec<&Character> {
        self.base
            .characters
            .iter()
            .filter(|c| predicate(c))
            .collect()
    }

    fn move_by_key(&self, key: &str) -> Option<&Move> {
        self.move_index.get(key).map(|&i| &self.base.moves[i])
    }

    fn rankings_for(&self, name: &str) -> Option<&Ranking> {
        self.ranking_index.get(name).map(|&i| &self.base.rankings[i])
    }

    fn meta_threats(&self) -> &[MetaThreat] {
        &self.base.meta_threats
    }

    fn type_chart(&self) -> &TypeChart {
        &self.base.type_chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticKnowledgeBase;

    #[test]
    fn test_lookups() {
        let base = SyntheticKnowledgeBase::new(10).build();
        let first = base.characters[0].clone();
        let store = InMemoryStore::new(base).unwrap();

        assert_eq!(store.character_by_key(&first.key), Some(&first));
        assert!(store.character_by_key("missingno").is_none());
        assert!(store.move_by_key(&first.fast_moves[0]).is_some());
        assert!(store.rankings_for(&first.name).is_some());
        assert!(store.rankings_for("Nobody").is_none());
    }

    #[test]
    fn test_filter_preserves_order() {
        let store = InMemoryStore::new(SyntheticKnowledgeBase::new(12).build()).unwrap();
        let even = store.filter_characters(&|c| c.dex % 2 == 0);
        assert!(!even.is_empty());
        assert!(even.is_sorted_by_key(|c| c.dex));
    }

    #[test]
    fn test_duplicate_character_is_rejected() {
        let mut base = SyntheticKnowledgeBase::new(3).build();
        let dup = base.characters[0].clone();
        base.characters.push(dup);
        let err = InMemoryStore::new(base).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateCharacter { .. }));
    }

    #[test]
    fn test_missing_type_chart_defaults_to_standard() {
        let base: KnowledgeBase = serde_json::from_str(r#"{ "characters": [], "moves": [] }"#).unwrap();
        assert_eq!(base.type_chart, TypeChart::standard());
        assert!(base.meta_threats.is_empty());
    }
}
