//! Population of chromosomes and population-level statistics.

use std::{collections::HashSet, num::NonZeroUsize, thread};

use rand::Rng;
use teamforge_data::{Character, KnowledgeStore};
use teamforge_evaluator::FitnessEvaluator;

use crate::{
    chromosome::Chromosome,
    construction::{self, ConstructionError},
    pool::CandidatePool,
    stats::FitnessStats,
};

/// One generation of candidate teams.
///
/// The population keeps insertion order; sort explicitly with
/// [`sort_by_fitness`](Self::sort_by_fitness) when ranking matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    #[must_use]
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    /// Builds `count` greedy random chromosomes.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ConstructionError`].
    pub fn random<'a, R>(
        pool: &CandidatePool<'a>,
        team_size: usize,
        anchors: &[&'a Character],
        count: usize,
        rng: &mut R,
    ) -> Result<Self, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let chromosomes = (0..count)
            .map(|_| construction::random_chromosome(pool, team_size, anchors, rng))
            .collect::<Result<_, _>>()?;
        Ok(Self { chromosomes })
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Assigns a fitness to every chromosome, in parallel.
    ///
    /// Order is left untouched. Returns only after every chromosome has been scored.
    pub fn evaluate(&mut self, evaluator: &FitnessEvaluator, store: &dyn KnowledgeStore) {
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = self.chromosomes.len().div_ceil(workers).max(1);
        thread::scope(|s| {
            for chunk in self.chromosomes.chunks_mut(chunk_size) {
                s.spawn(move || {
                    for chromosome in chunk {
                        let fitness =
                            evaluator.evaluate(store, chromosome.team(), chromosome.anchors());
                        chromosome.set_fitness(fitness);
                    }
                });
            }
        });
    }

    /// Sorts best first. Equal fitness keeps the current order.
    pub fn sort_by_fitness(&mut self) {
        self.chromosomes
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    /// Highest fitness; the earliest wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&Chromosome> {
        self.chromosomes
            .iter()
            .reduce(|best, c| if c.fitness() > best.fitness() { c } else { best })
    }

    /// Lowest fitness; the earliest wins ties.
    #[must_use]
    pub fn worst(&self) -> Option<&Chromosome> {
        self.chromosomes
            .iter()
            .reduce(|worst, c| if c.fitness() < worst.fitness() { c } else { worst })
    }

    /// The `count` fittest chromosomes, best first.
    #[must_use]
    pub fn elites(&self, count: usize) -> Vec<Chromosome> {
        let mut ranked: Vec<&Chromosome> = self.chromosomes.iter().collect();
        ranked.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        ranked.into_iter().take(count).cloned().collect()
    }

    /// Share of distinct team signatures, in \[0.0, 1.0\]. Zero for an empty population.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn diversity(&self) -> f64 {
        if self.chromosomes.is_empty() {
            return 0.0;
        }
        let signatures: HashSet<String> =
            self.chromosomes.iter().map(Chromosome::signature).collect();
        signatures.len() as f64 / self.chromosomes.len() as f64
    }

    /// True when the best and the ⌈30%⌉-th best fitness differ by less than `epsilon`.
    ///
    /// An empty population is converged.
    #[must_use]
    pub fn has_converged(&self, epsilon: f64) -> bool {
        let mut fitness: Vec<f64> = self.chromosomes.iter().map(Chromosome::fitness).collect();
        fitness.sort_by(|a, b| b.total_cmp(a));
        let top = (fitness.len() * 3).div_ceil(10);
        if top == 0 {
            return true;
        }
        fitness[0] - fitness[top - 1] < epsilon
    }

    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.chromosomes.iter().map(Chromosome::fitness))
    }
}
