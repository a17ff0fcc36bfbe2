//! The generation loop.
//!
//! ```text
//! validate anchors → build initial population → evaluate
//!     → repeat { evolve → evaluate } for `generations` rounds
//!     → best chromosome seen in any generation
//! ```
//!
//! Each generation is fully evaluated before the next one is derived from it. The
//! mutation rate fed to the operators follows population diversity when
//! [`SearchParams::adaptive_mutation`] is set.

use std::collections::HashSet;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use teamforge_data::{Character, KnowledgeStore, Mode};
use teamforge_evaluator::FitnessEvaluator;

use crate::{
    chromosome::Chromosome,
    construction::ConstructionError,
    evolver::PopulationEvolver,
    operators::{adaptive_mutation_rate, elite_count},
    pool::CandidatePool,
    population::Population,
    stats::FitnessStats,
};

/// Tunable search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub population_size: usize,
    /// Evolution rounds after the initial population.
    pub generations: usize,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    /// Base mutation rate, before diversity adjustment.
    pub mutation_rate: f64,
    /// Share of the population kept as elites (rounded up).
    pub elite_fraction: f64,
    pub convergence_epsilon: f64,
    /// Stop as soon as the population has converged.
    pub stop_on_convergence: bool,
    pub adaptive_mutation: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 150,
            generations: 75,
            tournament_size: 3,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_fraction: 0.1,
            convergence_epsilon: 0.01,
            stop_on_convergence: false,
            adaptive_mutation: true,
        }
    }
}

impl SearchParams {
    /// Checks that rates and fractions lie in `[0, 1]` and the convergence epsilon is a
    /// finite non-negative number.
    pub fn validate(&self) -> Result<(), SearchError> {
        let fractions = [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("elite_fraction", self.elite_fraction),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(SearchError::InvalidParams { field, value });
            }
        }
        if !self.convergence_epsilon.is_finite() || self.convergence_epsilon < 0.0 {
            return Err(SearchError::InvalidParams {
                field: "convergence_epsilon",
                value: self.convergence_epsilon,
            });
        }
        Ok(())
    }

    fn evolver(&self, mutation_rate: f64) -> PopulationEvolver {
        PopulationEvolver {
            elite_count: elite_count(self.elite_fraction, self.population_size),
            tournament_size: self.tournament_size,
            crossover_rate: self.crossover_rate,
            mutation_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SearchError {
    #[display("unknown anchor '{key}'")]
    #[from(ignore)]
    UnknownAnchor { key: String },
    #[display("anchor '{key}' repeats base species '{species}'")]
    #[from(ignore)]
    DuplicateAnchorSpecies { key: String, species: String },
    #[display("{count} anchors do not fit a team of {team_size}")]
    #[from(ignore)]
    TooManyAnchors { count: usize, team_size: usize },
    #[display("population size must be at least 1")]
    #[from(ignore)]
    EmptyPopulation,
    #[display("invalid search parameter {field} = {value}")]
    #[from(ignore)]
    InvalidParams { field: &'static str, value: f64 },
    #[display("failed to build the initial population")]
    Construction(ConstructionError),
}

/// Progress of one generation, passed to observers.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// 0 for the initial population.
    pub generation: usize,
    pub stats: FitnessStats,
    pub best_ever_fitness: f64,
    pub diversity: f64,
    /// Mutation rate used to derive the next generation.
    pub mutation_rate: f64,
    pub converged: bool,
}

/// Outcome of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub mode: Mode,
    pub team: Vec<String>,
    pub anchors: Vec<usize>,
    pub fitness: f64,
    /// Evolution rounds actually run.
    pub generations_run: usize,
    /// Whether the last evaluated population had converged.
    pub converged: bool,
}

/// Runs searches against one knowledge store.
#[derive(Debug)]
pub struct SearchDriver<'a> {
    store: &'a dyn KnowledgeStore,
    mode: Mode,
    pool: CandidatePool<'a>,
    evaluator: FitnessEvaluator,
    params: SearchParams,
}

impl<'a> SearchDriver<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KnowledgeStore, mode: Mode, params: SearchParams) -> Self {
        Self {
            store,
            mode,
            pool: CandidatePool::from_store(store),
            evaluator: FitnessEvaluator::new(mode),
            params,
        }
    }

    #[must_use]
    pub fn pool(&self) -> &CandidatePool<'a> {
        &self.pool
    }

    #[must_use]
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Searches for the best team containing `anchor_keys` at the first slots.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range parameters, invalid anchors, a zero population size, or when
    /// the pool cannot fill a team.
    pub fn search<R>(
        &self,
        anchor_keys: &[String],
        rng: &mut R,
    ) -> Result<SearchResult, SearchError>
    where
        R: Rng + ?Sized,
    {
        self.search_with_observer(anchor_keys, rng, |_| {})
    }

    /// Like [`search`](Self::search), calling `observer` after every evaluated generation.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub fn search_with_observer<R, F>(
        &self,
        anchor_keys: &[String],
        rng: &mut R,
        mut observer: F,
    ) -> Result<SearchResult, SearchError>
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationReport),
    {
        self.params.validate()?;
        let team_size = self.mode.team_size();
        let anchors = self.resolve_anchors(anchor_keys)?;
        if self.params.population_size == 0 {
            return Err(SearchError::EmptyPopulation);
        }
        let open_slots = team_size - anchors.len();
        if self.pool.len() < open_slots {
            warn!(
                "candidate pool has {} characters for {open_slots} open slots",
                self.pool.len()
            );
        }

        let mut population = Population::random(
            &self.pool,
            team_size,
            &anchors,
            self.params.population_size,
            rng,
        )?;
        population.evaluate(&self.evaluator, self.store);

        let mut best_ever: Option<Chromosome> = None;
        let mut generations_run = 0;
        let mut converged;
        let mut generation = 0;
        loop {
            if let Some(best) = population.best()
                && best_ever
                    .as_ref()
                    .is_none_or(|b| best.fitness() > b.fitness())
            {
                debug!(
                    "generation {generation}: new best {:.4} {:?}",
                    best.fitness(),
                    best.team()
                );
                best_ever = Some(best.clone());
            }

            let diversity = population.diversity();
            converged = population.has_converged(self.params.convergence_epsilon);
            let mutation_rate = if self.params.adaptive_mutation {
                adaptive_mutation_rate(self.params.mutation_rate, diversity)
            } else {
                self.params.mutation_rate
            };

            if let Some(stats) = population.fitness_stats() {
                info!(
                    "generation {generation}: best={:.4} mean={:.4} diversity={diversity:.2} \
                     mutation_rate={mutation_rate:.3}",
                    stats.max, stats.mean
                );
                observer(&GenerationReport {
                    generation,
                    stats,
                    best_ever_fitness: best_ever.as_ref().map_or(stats.max, Chromosome::fitness),
                    diversity,
                    mutation_rate,
                    converged,
                });
            }

            if generation == self.params.generations {
                break;
            }
            if converged && self.params.stop_on_convergence {
                debug!("generation {generation}: converged, stopping early");
                break;
            }

            generation += 1;
            population = self
                .params
                .evolver(mutation_rate)
                .evolve(&population, &self.pool, rng);
            population.evaluate(&self.evaluator, self.store);
            generations_run = generation;
        }

        let best = best_ever.ok_or(SearchError::EmptyPopulation)?;
        Ok(SearchResult {
            mode: self.mode,
            team: best.team().to_vec(),
            anchors: best.anchors().iter().copied().collect(),
            fitness: best.fitness(),
            generations_run,
            converged,
        })
    }

    fn resolve_anchors(&self, keys: &[String]) -> Result<Vec<&'a Character>, SearchError> {
        let team_size = self.mode.team_size();
        if keys.len() > team_size {
            return Err(SearchError::TooManyAnchors {
                count: keys.len(),
                team_size,
            });
        }
        let mut species = HashSet::new();
        keys.iter()
            .map(|key| {
                let character = self
                    .store
                    .character_by_key(key)
                    .ok_or_else(|| SearchError::UnknownAnchor { key: key.clone() })?;
                if !species.insert(character.base_species()) {
                    return Err(SearchError::DuplicateAnchorSpecies {
                        key: key.clone(),
                        species: character.base_species().to_owned(),
                    });
                }
                Ok(character)
            })
            .collect()
    }
}

/// Runs one search with a fresh [`SearchDriver`].
///
/// # Errors
///
/// See [`SearchDriver::search`].
pub fn search<R>(
    store: &dyn KnowledgeStore,
    mode: Mode,
    anchor_keys: &[String],
    params: SearchParams,
    rng: &mut R,
) -> Result<SearchResult, SearchError>
where
    R: Rng + ?Sized,
{
    SearchDriver::new(store, mode, params).search(anchor_keys, rng)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;
    use teamforge_data::{InMemoryStore, synthetic::SyntheticKnowledgeBase};

    use super::*;

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            SyntheticKnowledgeBase::new(30)
                .with_shadow_variants(5)
                .build(),
        )
        .unwrap()
    }

    fn small_params() -> SearchParams {
        SearchParams {
            population_size: 20,
            generations: 5,
            ..SearchParams::default()
        }
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|&k| k.to_owned()).collect()
    }

    #[test]
    fn test_anchor_validation() {
        let store = store();
        let driver = SearchDriver::new(&store, Mode::Ladder, small_params());
        let mut rng = Pcg64::seed_from_u64(0);

        assert_eq!(
            driver.search(&keys(&["missing"]), &mut rng).unwrap_err(),
            SearchError::UnknownAnchor {
                key: "missing".to_owned()
            }
        );
        assert_eq!(
            driver
                .search(&keys(&["species_000", "species_000_shadow"]), &mut rng)
                .unwrap_err(),
            SearchError::DuplicateAnchorSpecies {
                key: "species_000_shadow".to_owned(),
                species: "species_000".to_owned(),
            }
        );
        let four = keys(&["species_001", "species_002", "species_003", "species_004"]);
        assert_eq!(
            driver.search(&four, &mut rng).unwrap_err(),
            SearchError::TooManyAnchors {
                count: 4,
                team_size: 3
            }
        );
    }

    #[test]
    fn test_empty_population() {
        let store = store();
        let params = SearchParams {
            population_size: 0,
            ..small_params()
        };
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(
            search(&store, Mode::Ladder, &[], params, &mut rng).unwrap_err(),
            SearchError::EmptyPopulation
        );
    }

    #[test]
    fn test_invalid_params() {
        let store = store();
        let mut rng = Pcg64::seed_from_u64(0);
        let cases = [
            (
                SearchParams {
                    crossover_rate: f64::NAN,
                    ..small_params()
                },
                "crossover_rate",
            ),
            (
                SearchParams {
                    mutation_rate: 1.5,
                    ..small_params()
                },
                "mutation_rate",
            ),
            (
                SearchParams {
                    elite_fraction: -0.1,
                    ..small_params()
                },
                "elite_fraction",
            ),
            (
                SearchParams {
                    convergence_epsilon: f64::INFINITY,
                    ..small_params()
                },
                "convergence_epsilon",
            ),
        ];
        for (params, expected) in cases {
            let err = search(&store, Mode::Ladder, &[], params, &mut rng).unwrap_err();
            assert!(
                matches!(err, SearchError::InvalidParams { field, .. } if field == expected),
                "{err}"
            );
        }
        assert!(SearchParams::default().validate().is_ok());
    }

    #[test]
    fn test_driver_exposes_pool_and_params() {
        let store = store();
        let driver = SearchDriver::new(&store, Mode::Ladder, small_params());
        // 30 characters plus 6 shadow variants
        assert_eq!(driver.pool().len(), 36);
        assert_eq!(driver.params(), &small_params());
        assert_eq!(driver.evaluator().mode(), Mode::Ladder);
    }

    #[test]
    fn test_reported_mutation_rate() {
        // every team holds the same three members, so diversity is 1/10
        let store = InMemoryStore::new(
            SyntheticKnowledgeBase::new(3)
                .shared_type(teamforge_data::ElementType::Steel)
                .build(),
        )
        .unwrap();
        let params = SearchParams {
            population_size: 10,
            generations: 3,
            mutation_rate: 0.1,
            ..SearchParams::default()
        };

        let mut rng = Pcg64::seed_from_u64(4);
        let mut reports = vec![];
        SearchDriver::new(&store, Mode::Ladder, params.clone())
            .search_with_observer(&[], &mut rng, |r| reports.push(r.clone()))
            .unwrap();
        assert_eq!(reports.len(), 4);
        for report in &reports {
            assert!(report.diversity < 0.3);
            assert!((report.mutation_rate - 0.2).abs() < 1e-12);
        }

        let fixed = SearchParams {
            adaptive_mutation: false,
            ..params
        };
        let mut reports = vec![];
        SearchDriver::new(&store, Mode::Ladder, fixed)
            .search_with_observer(&[], &mut rng, |r| reports.push(r.clone()))
            .unwrap();
        assert_eq!(reports.len(), 4);
        for report in &reports {
            assert!((report.mutation_rate - 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reported_mutation_rate_follows_diversity() {
        let store = store();
        let params = SearchParams {
            mutation_rate: 0.3,
            ..small_params()
        };
        let mut rng = Pcg64::seed_from_u64(5);
        let mut reports = vec![];
        SearchDriver::new(&store, Mode::Tournament, params)
            .search_with_observer(&[], &mut rng, |r| reports.push(r.clone()))
            .unwrap();
        for report in &reports {
            let expected = adaptive_mutation_rate(0.3, report.diversity);
            assert!((report.mutation_rate - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_generations_still_evaluates() {
        let store = store();
        let params = SearchParams {
            generations: 0,
            ..small_params()
        };
        let mut rng = Pcg64::seed_from_u64(1);
        let mut reports = vec![];
        let result = SearchDriver::new(&store, Mode::Ladder, params)
            .search_with_observer(&[], &mut rng, |r| reports.push(r.clone()))
            .unwrap();
        assert_eq!(result.generations_run, 0);
        assert_eq!(reports.len(), 1);
        assert!(result.fitness > 0.0);
    }

    #[test]
    fn test_reports_every_generation() {
        let store = store();
        let mut rng = Pcg64::seed_from_u64(2);
        let mut reports = vec![];
        let result = SearchDriver::new(&store, Mode::Tournament, small_params())
            .search_with_observer(&[], &mut rng, |r| reports.push(r.clone()))
            .unwrap();
        assert_eq!(result.generations_run, 5);
        let generations: Vec<_> = reports.iter().map(|r| r.generation).collect();
        assert_eq!(generations, [0, 1, 2, 3, 4, 5]);
        // best-ever never decreases and ends at the result
        assert!(
            reports
                .windows(2)
                .all(|w| w[1].best_ever_fitness >= w[0].best_ever_fitness)
        );
        let last = reports.last().unwrap();
        assert!((last.best_ever_fitness - result.fitness).abs() < 1e-12);
        assert_eq!(result.team.len(), 6);
    }

    #[test]
    fn test_stop_on_convergence() {
        let store = InMemoryStore::new(
            SyntheticKnowledgeBase::new(3)
                .shared_type(teamforge_data::ElementType::Steel)
                .build(),
        )
        .unwrap();
        let params = SearchParams {
            population_size: 10,
            generations: 50,
            stop_on_convergence: true,
            ..SearchParams::default()
        };
        let mut rng = Pcg64::seed_from_u64(3);
        // every team holds the same three single-typed members
        let result = search(&store, Mode::Ladder, &[], params, &mut rng).unwrap();
        assert!(result.converged);
        assert_eq!(result.generations_run, 0);
    }
}
