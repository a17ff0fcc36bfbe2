//! Greedy randomized team construction.
//!
//! Anchors are placed first at their input indices. Every open slot is then filled one at
//! a time: up to [`SAMPLE_SIZE`] candidates with an unused base species are drawn from the
//! pool and the one with the best composite heuristic wins.
//!
//! | Rule | Points |
//! |---|---|
//! | each own type not yet on the team | +3 |
//! | each own type already present once | −2 |
//! | each own type present twice or more | −5 |
//! | glass cannon joining ≥2 glass cannons | −4 (−2 for a shadow form) |
//! | bulky candidate while no bulky member is placed, slot > 0 | +3 |
//! | shared weaknesses with placed members: 1 / 2 / ≥3 | −1 / −3 / −6 |
//!
//! Each placement updates the trackers before the next slot is considered, so a base
//! species can never be drawn twice.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use teamforge_data::{BulkClass, Character, ElementType};

use crate::{
    chromosome::{Chromosome, Team},
    pool::CandidatePool,
};

/// Candidates scored per open slot.
pub const SAMPLE_SIZE: usize = 20;
/// Draws allowed while gathering the sample.
pub const SAMPLE_DRAWS: usize = 100;
/// Rejection-sampling draws after an empty sample before giving up.
pub const FALLBACK_DRAWS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConstructionError {
    #[display(
        "no candidate with an unused base species for slot {slot} after {attempts} draws"
    )]
    PoolExhausted { slot: usize, attempts: usize },
}

/// Builds a random team of `team_size` members with `anchors` at the first slots.
///
/// # Errors
///
/// Returns [`ConstructionError::PoolExhausted`] if a slot cannot be filled.
pub fn random_chromosome<'a, R>(
    pool: &CandidatePool<'a>,
    team_size: usize,
    anchors: &[&'a Character],
    rng: &mut R,
) -> Result<Chromosome, ConstructionError>
where
    R: Rng + ?Sized,
{
    let mut builder = TeamBuilder::new(pool);
    for anchor in anchors.iter().take(team_size) {
        builder.place(anchor);
    }
    let anchor_slots: BTreeSet<usize> = (0..builder.team.len()).collect();

    for slot in builder.team.len()..team_size {
        let candidate = match builder.best_of_sample(slot, rng) {
            Some(candidate) => candidate,
            None => builder.fallback(slot, rng)?,
        };
        builder.place(candidate);
    }

    Ok(Chromosome::new(builder.team, anchor_slots))
}

struct TeamBuilder<'p, 'a> {
    pool: &'p CandidatePool<'a>,
    team: Team,
    used_species: HashSet<&'a str>,
    type_counts: [usize; ElementType::LEN],
    /// Placed members weak to each attacking type.
    weakness_counts: [usize; ElementType::LEN],
    glass_cannons: usize,
    has_bulky: bool,
}

impl<'p, 'a> TeamBuilder<'p, 'a> {
    fn new(pool: &'p CandidatePool<'a>) -> Self {
        Self {
            pool,
            team: Team::new(),
            used_species: HashSet::new(),
            type_counts: [0; ElementType::LEN],
            weakness_counts: [0; ElementType::LEN],
            glass_cannons: 0,
            has_bulky: false,
        }
    }

    fn is_unused(&self, character: &Character) -> bool {
        !self.used_species.contains(character.base_species())
    }

    fn weaknesses(&self, character: &Character) -> Vec<ElementType> {
        self.pool
            .effectiveness()
            .super_effective_types(&character.types)
    }

    fn place(&mut self, character: &'a Character) {
        self.used_species.insert(character.base_species());
        for ty in &character.types {
            self.type_counts[ty.index()] += 1;
        }
        for weakness in self.weaknesses(character) {
            self.weakness_counts[weakness.index()] += 1;
        }
        match character.bulk_class() {
            BulkClass::GlassCannon => self.glass_cannons += 1,
            BulkClass::Bulky => self.has_bulky = true,
            BulkClass::Balanced => {}
        }
        self.team.push(character.key.clone());
    }

    fn score(&self, candidate: &Character, slot: usize) -> i32 {
        let mut score = candidate
            .types
            .iter()
            .map(|ty| match self.type_counts[ty.index()] {
                0 => 3,
                1 => -2,
                _ => -5,
            })
            .sum::<i32>();

        match candidate.bulk_class() {
            BulkClass::GlassCannon if self.glass_cannons >= 2 => {
                score -= if candidate.is_shadow() { 2 } else { 4 };
            }
            BulkClass::Bulky if !self.has_bulky && slot > 0 => score += 3,
            _ => {}
        }

        let shared: usize = self
            .weaknesses(candidate)
            .iter()
            .map(|w| self.weakness_counts[w.index()])
            .sum();
        score -= match shared {
            0 => 0,
            1 => 1,
            2 => 3,
            _ => 6,
        };
        score
    }

    /// Highest-scoring sampled candidate; the earliest sampled wins ties.
    fn best_of_sample<R>(&self, slot: usize, rng: &mut R) -> Option<&'a Character>
    where
        R: Rng + ?Sized,
    {
        let mut sample = Vec::with_capacity(SAMPLE_SIZE);
        for _ in 0..SAMPLE_DRAWS {
            if sample.len() == SAMPLE_SIZE {
                break;
            }
            let Some(candidate) = self.pool.choose(rng) else {
                break;
            };
            if self.is_unused(candidate) {
                sample.push(candidate);
            }
        }

        let mut best: Option<(&'a Character, i32)> = None;
        for candidate in sample {
            let score = self.score(candidate, slot);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    fn fallback<R>(&self, slot: usize, rng: &mut R) -> Result<&'a Character, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        (0..FALLBACK_DRAWS)
            .filter_map(|_| self.pool.choose(rng))
            .find(|candidate| self.is_unused(candidate))
            .ok_or(ConstructionError::PoolExhausted {
                slot,
                attempts: FALLBACK_DRAWS,
            })
    }
}
