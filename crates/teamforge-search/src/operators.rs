//! Constraint-preserving genetic operators.
//!
//! Crossover and mutation never touch anchored slots and never introduce a base species
//! that is already on the team. When an operator cannot produce a valid child it falls
//! back to an unmodified copy of its (first) parent instead of failing.

use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom as _};
use teamforge_data::base_species;

use crate::{chromosome::Chromosome, pool::CandidatePool};

/// Mutation rate never goes above this when raised for low diversity.
pub const MAX_ADAPTIVE_MUTATION_RATE: f64 = 0.5;
/// Mutation rate never goes below this when lowered for high diversity.
pub const MIN_ADAPTIVE_MUTATION_RATE: f64 = 0.05;

/// Selects a parent by tournament: `tournament_size` uniform draws with replacement,
/// keeping the fittest.
///
/// Returns `None` only for an empty population.
pub fn tournament_select<'a, R>(
    population: &'a [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> Option<&'a Chromosome>
where
    R: Rng + ?Sized,
{
    (0..tournament_size.max(1))
        .filter_map(|_| population.choose(rng))
        .reduce(|best, c| if c.fitness() > best.fitness() { c } else { best })
}

/// Single-point crossover over the mutable slots.
///
/// The child starts as a copy of `parent_a`. From a random cut point on, each mutable
/// slot takes `parent_b`'s entry unless its base species is already used.
pub fn crossover<R>(parent_a: &Chromosome, parent_b: &Chromosome, rng: &mut R) -> Chromosome
where
    R: Rng + ?Sized,
{
    let mut child = parent_a.clone();
    let slots = parent_a.mutable_slots();
    let Some(&cut) = slots.choose(rng) else {
        return child;
    };

    let mut used: HashSet<&str> = parent_a
        .team()
        .iter()
        .enumerate()
        .filter(|(slot, _)| parent_a.is_anchor(*slot) || *slot < cut)
        .map(|(_, key)| base_species(key))
        .collect();

    for slot in slots.into_iter().filter(|slot| *slot >= cut) {
        let Some(key) = parent_b.team().get(slot) else {
            continue;
        };
        if used.insert(base_species(key)) {
            child.replace(slot, key.clone());
        } else {
            used.insert(base_species(&parent_a.team()[slot]));
        }
    }

    if child.has_unique_species() {
        child
    } else {
        parent_a.clone()
    }
}

/// With probability `mutation_rate`, replaces one random mutable slot with a pool member
/// whose base species is not on the team yet.
pub fn mutate<R>(
    chromosome: &Chromosome,
    pool: &CandidatePool<'_>,
    mutation_rate: f64,
    rng: &mut R,
) -> Chromosome
where
    R: Rng + ?Sized,
{
    if !rng.random_bool(mutation_rate.clamp(0.0, 1.0)) {
        return chromosome.clone();
    }
    let Some(&slot) = chromosome.mutable_slots().choose(rng) else {
        return chromosome.clone();
    };

    let used: HashSet<&str> = chromosome.team().iter().map(|k| base_species(k)).collect();
    let candidates: Vec<_> = pool
        .characters()
        .iter()
        .filter(|c| !used.contains(c.base_species()))
        .collect();
    let Some(replacement) = candidates.choose(rng) else {
        return chromosome.clone();
    };

    let mut child = chromosome.clone();
    child.replace(slot, replacement.key.clone());
    if child.has_unique_species() {
        child
    } else {
        chromosome.clone()
    }
}

/// `⌈fraction × population_size⌉`, at most `population_size`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn elite_count(fraction: f64, population_size: usize) -> usize {
    let count = (fraction.max(0.0) * population_size as f64).ceil() as usize;
    count.min(population_size)
}

/// Adjusts `base_rate` for population diversity: doubled (≤ 0.5) below 0.3, halved
/// (≥ 0.05) above 0.7.
#[must_use]
pub fn adaptive_mutation_rate(base_rate: f64, diversity: f64) -> f64 {
    if diversity < 0.3 {
        (base_rate * 2.0).min(MAX_ADAPTIVE_MUTATION_RATE)
    } else if diversity > 0.7 {
        (base_rate / 2.0).max(MIN_ADAPTIVE_MUTATION_RATE)
    } else {
        base_rate
    }
}
