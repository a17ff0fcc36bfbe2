//! Genetic search for high-fitness teams.
//!
//! # Algorithm Overview
//!
//! 1. **Construction** ([`construction`]) - every chromosome of the initial population is
//!    built greedily: anchors first, then the best of a random sample for each open slot
//! 2. **Evaluation** ([`population`]) - each chromosome is scored by the
//!    [`FitnessEvaluator`](teamforge_evaluator::FitnessEvaluator), in parallel
//! 3. **Elitism** - the fittest chromosomes are copied unchanged
//! 4. **Tournament Selection** ([`operators`]) - parents are the fittest of a few uniform
//!    draws
//! 5. **Crossover** - single cut point over the non-anchored slots, skipping entries whose
//!    base species is already on the team
//! 6. **Mutation** - one non-anchored slot swapped for a pool member of a new base species
//!
//! The [`driver`] repeats steps 2-6 for a fixed number of generations, adapts the mutation
//! rate to population diversity, and returns the best chromosome seen.
//!
//! # Invariants
//!
//! - Every chromosome has the mode's team size and pairwise distinct base species.
//! - Anchored slots are never changed by any operator.
//! - Operators that cannot keep these invariants return a copy of the parent.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//! use teamforge_data::{InMemoryStore, Mode, synthetic::SyntheticKnowledgeBase};
//! use teamforge_search::driver::{SearchParams, search};
//!
//! let store = InMemoryStore::new(SyntheticKnowledgeBase::new(30).build()).unwrap();
//! let params = SearchParams {
//!     population_size: 20,
//!     generations: 5,
//!     ..SearchParams::default()
//! };
//! let mut rng = Pcg64::seed_from_u64(42);
//! let result = search(&store, Mode::Ladder, &[], params, &mut rng).unwrap();
//! assert_eq!(result.team.len(), 3);
//! ```

pub mod chromosome;
pub mod construction;
pub mod driver;
pub mod evolver;
pub mod operators;
pub mod pool;
pub mod population;
pub mod stats;
