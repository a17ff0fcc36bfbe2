//! Resolved view of a team, shared by all fitness components.
//!
//! [`TeamAnalysis`] resolves every team key against the [`KnowledgeStore`] once, so each
//! component works with characters, moves and rankings directly. Keys the store does not
//! know are dropped from [`members`](TeamAnalysis::members) but still counted in
//! [`team_len`](TeamAnalysis::team_len). Per-member averages therefore treat an unknown
//! member as contributing zero.

use std::collections::BTreeSet;

use teamforge_data::{BulkClass, Character, ElementType, KnowledgeStore, Mode, Move, Ranking};

use crate::effectiveness::TypeEffectiveness;

/// One resolved team member.
#[derive(Debug, Clone)]
pub struct Member<'a> {
    /// Slot index in the team.
    pub index: usize,
    pub character: &'a Character,
    pub fast_moves: Vec<&'a Move>,
    pub charged_moves: Vec<&'a Move>,
    pub ranking: Option<&'a Ranking>,
    pub is_anchor: bool,
}

impl Member<'_> {
    #[must_use]
    pub fn types(&self) -> &[ElementType] {
        &self.character.types
    }

    #[must_use]
    pub fn bulk_class(&self) -> BulkClass {
        self.character.bulk_class()
    }

    #[must_use]
    pub fn is_shadow(&self) -> bool {
        self.character.is_shadow()
    }

    /// Ranking average, or zero when the store has no ranking for this member.
    #[must_use]
    pub fn ranking_average(&self) -> f64 {
        self.ranking.map_or(0.0, |r| r.average)
    }
}

/// A team resolved against a knowledge store.
#[derive(Debug, Clone)]
pub struct TeamAnalysis<'a> {
    store: &'a dyn KnowledgeStore,
    effectiveness: TypeEffectiveness<'a>,
    mode: Mode,
    team_len: usize,
    members: Vec<Member<'a>>,
}

impl<'a> TeamAnalysis<'a> {
    /// Resolves `team` against `store`. `anchors` holds locked slot indices.
    #[must_use]
    pub fn new(
        store: &'a dyn KnowledgeStore,
        mode: Mode,
        team: &[String],
        anchors: &BTreeSet<usize>,
    ) -> Self {
        let members = team
            .iter()
            .enumerate()
            .filter_map(|(index, key)| {
                let character = store.character_by_key(key)?;
                let fast_moves = character
                    .fast_moves
                    .iter()
                    .filter_map(|k| store.move_by_key(k))
                    .filter(|m| m.is_fast())
                    .collect();
                let charged_moves = character
                    .charged_moves
                    .iter()
                    .filter_map(|k| store.move_by_key(k))
                    .filter(|m| m.is_charged())
                    .collect();
                Some(Member {
                    index,
                    character,
                    fast_moves,
                    charged_moves,
                    ranking: store.rankings_for(&character.name),
                    is_anchor: anchors.contains(&index),
                })
            })
            .collect();

        Self {
            store,
            effectiveness: TypeEffectiveness::new(store.type_chart()),
            mode,
            team_len: team.len(),
            members,
        }
    }

    #[must_use]
    pub fn store(&self) -> &'a dyn KnowledgeStore {
        self.store
    }

    #[must_use]
    pub fn effectiveness(&self) -> &TypeEffectiveness<'a> {
        &self.effectiveness
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of keys in the team, resolved or not.
    #[must_use]
    pub fn team_len(&self) -> usize {
        self.team_len
    }

    /// Members whose keys resolved, in slot order.
    #[must_use]
    pub fn members(&self) -> &[Member<'a>] {
        &self.members
    }

    pub fn anchors(&self) -> impl Iterator<Item = &Member<'a>> {
        self.members.iter().filter(|m| m.is_anchor)
    }

    pub fn non_anchors(&self) -> impl Iterator<Item = &Member<'a>> {
        self.members.iter().filter(|m| !m.is_anchor)
    }

    /// Own type list of every resolved member.
    #[must_use]
    pub fn member_types(&self) -> Vec<&[ElementType]> {
        self.members.iter().map(Member::types).collect()
    }

    /// Distinct types of all charged moves on the team.
    #[must_use]
    pub fn charged_move_types(&self) -> Vec<ElementType> {
        let types: BTreeSet<_> = self
            .members
            .iter()
            .flat_map(|m| m.charged_moves.iter().map(|mv| mv.move_type))
            .collect();
        types.into_iter().collect()
    }

    /// `Σ f(member) / team_len`, or zero for an empty team.
    #[expect(clippy::cast_precision_loss)]
    pub fn per_member_mean<F>(&self, f: F) -> f64
    where
        F: FnMut(&Member<'a>) -> f64,
    {
        if self.team_len == 0 {
            return 0.0;
        }
        self.members.iter().map(f).sum::<f64>() / self.team_len as f64
    }
}
