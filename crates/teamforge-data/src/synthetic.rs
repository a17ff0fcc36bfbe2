//! Deterministic synthetic knowledge bases.
//!
//! Used by tests and by the `generate-demo-data` command. The generated data has no
//! relation to any real game; it only exercises every field the search core reads.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::{
    BaseStats, BuffEffect, BuffTarget, Character, ElementType, KnowledgeBase, MetaThreat, Move,
    MoveKind, Ranking, SHADOW_TAG, StatAllocation, TypeChart,
};

const META_THREAT_COUNT: usize = 50;

/// Builder for a synthetic [`KnowledgeBase`].
///
/// Every generated character has a distinct base species, one fast move and two charged
/// moves.
#[derive(Debug, Clone)]
pub struct SyntheticKnowledgeBase {
    count: usize,
    shared_type: Option<ElementType>,
    shadow_every: Option<usize>,
}

impl SyntheticKnowledgeBase {
    /// Creates a builder for `count` characters.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            shared_type: None,
            shadow_every: None,
        }
    }

    /// Gives every character the same single type.
    #[must_use]
    pub fn shared_type(mut self, ty: ElementType) -> Self {
        self.shared_type = Some(ty);
        self
    }

    /// Adds a shadow variant for every `every`-th character.
    #[must_use]
    pub fn with_shadow_variants(mut self, every: usize) -> Self {
        self.shadow_every = (every > 0).then_some(every);
        self
    }

    #[must_use]
    pub fn build(&self) -> KnowledgeBase {
        let moves = ElementType::ALL.iter().flat_map(|&ty| type_moves(ty)).collect();

        let mut characters = vec![];
        let mut rankings = vec![];
        for idx in 0..self.count {
            let seq = u32::try_from(idx).unwrap_or(u32::MAX);
            let character = self.character(idx, seq);
            let average = f64::from(40 + (seq * 41) % 60);
            rankings.push(ranking(&character.name, average));

            if self.shadow_every.is_some_and(|every| idx % every == 0) {
                let mut shadow = character.clone();
                shadow.key = character.shadow_variant_key();
                shadow.name = format!("{} (Shadow)", character.name);
                shadow.tags.insert(SHADOW_TAG.to_owned());
                rankings.push(ranking(&shadow.name, (average + 5.0).min(100.0)));
                characters.push(character);
                characters.push(shadow);
            } else {
                characters.push(character);
            }
        }

        let mut by_rank: Vec<(&Character, f64)> = characters
            .iter()
            .map(|c| {
                let average = rankings
                    .iter()
                    .find(|r| r.name == c.name)
                    .map_or(0.0, |r| r.average);
                (c, average)
            })
            .collect();
        by_rank.sort_by(|a, b| b.1.total_cmp(&a.1));
        let meta_threats = by_rank
            .iter()
            .take(META_THREAT_COUNT)
            .map(|(c, _)| MetaThreat {
                key: c.key.clone(),
                name: c.name.clone(),
                types: c.types.clone(),
            })
            .collect();

        KnowledgeBase {
            characters,
            moves,
            rankings,
            meta_threats,
            type_chart: TypeChart::standard(),
        }
    }

    fn character(&self, idx: usize, seq: u32) -> Character {
        let primary = self
            .shared_type
            .unwrap_or(ElementType::ALL[idx % ElementType::LEN]);
        let mut types = ArrayVec::new();
        types.push(primary);
        if self.shared_type.is_none() && idx % 3 != 0 {
            let secondary = ElementType::ALL[(idx * 7 + 5) % ElementType::LEN];
            if secondary != primary {
                types.push(secondary);
            }
        }
        let coverage = ElementType::ALL[(idx * 5 + 3) % ElementType::LEN];

        Character {
            key: format!("species_{seq:03}"),
            name: format!("Species {seq:03}"),
            dex: seq + 1,
            base_stats: BaseStats {
                attack: f64::from(120 + (seq * 37) % 140),
                defense: f64::from(90 + (seq * 53) % 130),
                stamina: f64::from(110 + (seq * 29) % 150),
            },
            types,
            defaults: [(
                1500,
                StatAllocation {
                    level: 40.0,
                    attack_iv: 0,
                    defense_iv: 15,
                    stamina_iv: 15,
                },
            )]
            .into_iter()
            .collect(),
            fast_moves: vec![format!("{primary}_strike")],
            charged_moves: vec![format!("{primary}_burst"), format!("{coverage}_beam")],
            tags: BTreeSet::new(),
            buddy_distance: 3,
            third_move_cost: 50_000,
            released: true,
        }
    }
}

fn type_moves(ty: ElementType) -> [Move; 3] {
    let spread = u32::try_from(ty.index()).unwrap_or(0);
    [
        Move {
            key: format!("{ty}_strike"),
            move_type: ty,
            power: 5.0,
            kind: MoveKind::Fast {
                energy_gain: 3 + spread % 3,
                turns: 1 + spread % 3,
            },
        },
        Move {
            key: format!("{ty}_burst"),
            move_type: ty,
            power: 60.0,
            kind: MoveKind::Charged {
                energy: 35 + 5 * (spread % 3),
                buffs: (spread % 2 == 0).then_some(BuffEffect {
                    attack_delta: 0,
                    defense_delta: -1,
                    target: BuffTarget::Opponent,
                    chance: 1.0,
                }),
            },
        },
        Move {
            key: format!("{ty}_beam"),
            move_type: ty,
            power: 100.0,
            kind: MoveKind::Charged {
                energy: 55,
                buffs: None,
            },
        },
    ]
}

fn ranking(name: &str, average: f64) -> Ranking {
    Ranking {
        name: name.to_owned(),
        scores: [
            ("lead".to_owned(), average),
            ("switch".to_owned(), (average - 5.0).max(0.0)),
            ("closer".to_owned(), (average + 5.0).min(100.0)),
        ]
        .into_iter()
        .collect(),
        average,
        overall: average,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{InMemoryStore, KnowledgeStore as _, base_species};

    #[test]
    fn test_distinct_base_species_and_moves_resolve() {
        let base = SyntheticKnowledgeBase::new(30).build();
        assert_eq!(base.characters.len(), 30);
        let species: HashSet<_> = base.characters.iter().map(|c| base_species(&c.key)).collect();
        assert_eq!(species.len(), 30);

        let store = InMemoryStore::new(base).unwrap();
        for c in store.characters() {
            assert_eq!(c.fast_moves.len(), 1);
            assert_eq!(c.charged_moves.len(), 2);
            for key in c.fast_moves.iter().chain(&c.charged_moves) {
                assert!(store.move_by_key(key).is_some(), "missing move {key}");
            }
            assert!(store.rankings_for(&c.name).is_some());
        }
        assert_eq!(store.meta_threats().len(), 30);
    }

    #[test]
    fn test_shared_type() {
        let base = SyntheticKnowledgeBase::new(20)
            .shared_type(ElementType::Steel)
            .build();
        assert!(
            base.characters
                .iter()
                .all(|c| c.types.as_slice() == [ElementType::Steel])
        );
    }

    #[test]
    fn test_shadow_variants_share_base_species() {
        let base = SyntheticKnowledgeBase::new(8)
            .with_shadow_variants(4)
            .build();
        assert_eq!(base.characters.len(), 10);
        let shadows: Vec<_> = base.characters.iter().filter(|c| c.is_shadow()).collect();
        assert_eq!(shadows.len(), 2);
        for shadow in shadows {
            assert!(
                base.characters
                    .iter()
                    .any(|c| !c.is_shadow() && c.base_species() == shadow.base_species())
            );
        }
        assert!(InMemoryStore::new(base).is_ok());
    }

    #[test]
    fn test_meta_threats_are_capped() {
        let base = SyntheticKnowledgeBase::new(80).build();
        assert_eq!(base.meta_threats.len(), META_THREAT_COUNT);
    }
}
