//! Team representation used by the genetic search.

use std::collections::{BTreeSet, HashSet};

use arrayvec::ArrayVec;
use serde::Serialize;
use teamforge_data::{Mode, base_species};

/// Ordered character keys of one team.
pub type Team = ArrayVec<String, { Mode::MAX_TEAM_SIZE }>;

/// One candidate team: its keys, the locked slots and the fitness last assigned to it.
///
/// Apart from [`set_fitness`](Self::set_fitness), operators treat chromosomes as values
/// and build new ones instead of editing a parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chromosome {
    team: Team,
    anchors: BTreeSet<usize>,
    fitness: f64,
}

impl Chromosome {
    /// Creates an unevaluated chromosome (fitness 0).
    #[must_use]
    pub fn new(team: Team, anchors: BTreeSet<usize>) -> Self {
        Self {
            team,
            anchors,
            fitness: 0.0,
        }
    }

    #[must_use]
    pub fn team(&self) -> &[String] {
        &self.team
    }

    /// Slot indices locked by the user.
    #[must_use]
    pub fn anchors(&self) -> &BTreeSet<usize> {
        &self.anchors
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    #[must_use]
    pub fn is_anchor(&self, slot: usize) -> bool {
        self.anchors.contains(&slot)
    }

    /// Team size matches `mode` and base species are pairwise distinct.
    #[must_use]
    pub fn is_valid(&self, mode: Mode) -> bool {
        self.team.len() == mode.team_size() && self.has_unique_species()
    }

    #[must_use]
    pub fn has_unique_species(&self) -> bool {
        let mut seen = HashSet::new();
        self.team.iter().all(|key| seen.insert(base_species(key)))
    }

    /// Slot indices that operators may change.
    #[must_use]
    pub fn mutable_slots(&self) -> Vec<usize> {
        (0..self.team.len())
            .filter(|slot| !self.is_anchor(*slot))
            .collect()
    }

    /// Order-independent identity of the team, used to measure diversity.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut keys: Vec<&str> = self.team.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys.join(",")
    }

    pub(crate) fn replace(&mut self, slot: usize, key: String) {
        self.team[slot] = key;
    }
}
