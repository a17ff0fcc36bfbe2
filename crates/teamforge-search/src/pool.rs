//! Characters the search may put on a team.

use rand::{Rng, seq::IndexedRandom as _};
use teamforge_data::{Character, KnowledgeStore, Move, TypeChart};
use teamforge_evaluator::effectiveness::TypeEffectiveness;

/// Candidate characters together with the type chart used to judge them.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    characters: Vec<&'a Character>,
    effectiveness: TypeEffectiveness<'a>,
}

impl<'a> CandidatePool<'a> {
    #[must_use]
    pub fn new(characters: Vec<&'a Character>, chart: &'a TypeChart) -> Self {
        Self {
            characters,
            effectiveness: TypeEffectiveness::new(chart),
        }
    }

    /// Released characters with at least one known fast and one known charged move, in
    /// store order.
    #[must_use]
    pub fn from_store(store: &'a dyn KnowledgeStore) -> Self {
        let has_move = |keys: &[String], pred: fn(&Move) -> bool| {
            keys.iter()
                .any(|key| store.move_by_key(key).is_some_and(pred))
        };
        let characters = store.filter_characters(&|c: &Character| {
            c.released
                && has_move(&c.fast_moves, Move::is_fast)
                && has_move(&c.charged_moves, Move::is_charged)
        });
        Self::new(characters, store.type_chart())
    }

    #[must_use]
    pub fn characters(&self) -> &[&'a Character] {
        &self.characters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    #[must_use]
    pub fn effectiveness(&self) -> &TypeEffectiveness<'a> {
        &self.effectiveness
    }

    /// Draws one character uniformly, or `None` if the pool is empty.
    pub fn choose<R>(&self, rng: &mut R) -> Option<&'a Character>
    where
        R: Rng + ?Sized,
    {
        self.characters.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use teamforge_data::{InMemoryStore, synthetic::SyntheticKnowledgeBase};

    use super::*;

    #[test]
    fn test_from_store_filters_unusable_characters() {
        let mut base = SyntheticKnowledgeBase::new(6).build();
        base.characters[1].released = false;
        base.characters[2].charged_moves.clear();
        base.characters[3].fast_moves = vec!["no_such_move".to_owned()];
        let store = InMemoryStore::new(base).unwrap();
        let pool = CandidatePool::from_store(&store);
        let keys: Vec<_> = pool.characters().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["species_000", "species_004", "species_005"]);
    }
}
