use rand::Rng;

use crate::{
    operators::{crossover, mutate, tournament_select},
    pool::CandidatePool,
    population::Population,
};

/// Parameters for deriving one generation from the previous one.
///
/// The driver builds a fresh evolver every generation so the mutation rate can follow
/// population diversity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationEvolver {
    /// Number of fittest chromosomes copied unchanged (elitism).
    pub elite_count: usize,
    /// Draws per tournament (larger = stronger selection pressure).
    pub tournament_size: usize,
    /// Probability of crossing two parents instead of copying the first.
    pub crossover_rate: f64,
    /// Probability of mutating each child.
    pub mutation_rate: f64,
}

impl PopulationEvolver {
    /// Creates the next generation, the same size as `population`.
    ///
    /// 1. Copies the `elite_count` fittest chromosomes unchanged
    /// 2. Fills the rest with children: two tournament-selected parents, crossover with
    ///    probability `crossover_rate` (otherwise a copy of the first parent), then mutation
    ///
    /// `population` must already be evaluated.
    pub fn evolve<R>(
        &self,
        population: &Population,
        pool: &CandidatePool<'_>,
        rng: &mut R,
    ) -> Population
    where
        R: Rng + ?Sized,
    {
        let parents = population.chromosomes();
        let mut next = population.elites(self.elite_count);

        while next.len() < parents.len() {
            let (Some(p1), Some(p2)) = (
                tournament_select(parents, self.tournament_size, rng),
                tournament_select(parents, self.tournament_size, rng),
            ) else {
                break;
            };
            let child = if rng.random_bool(self.crossover_rate.clamp(0.0, 1.0)) {
                crossover(p1, p2, rng)
            } else {
                p1.clone()
            };
            next.push(mutate(&child, pool, self.mutation_rate, rng));
        }

        Population::new(next)
    }
}
