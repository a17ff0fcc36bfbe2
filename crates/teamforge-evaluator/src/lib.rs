//! Fitness evaluation for candidate teams.
//!
//! The evaluator turns a team (an ordered list of character keys plus the set of anchored
//! slots) into a single fitness number used by the genetic search.
//!
//! ```text
//! FitnessEvaluator (weighted sum, mode bonus, anchor bonus)
//!     ↓ uses
//! fitness components (coverage, synergy, balance, ...)
//!     ↓ use
//! TeamAnalysis (members resolved against the KnowledgeStore)
//!     ↓ uses
//! TypeEffectiveness (type chart lookups)
//! ```
//!
//! # Modules
//!
//! - [`effectiveness`] - multipliers, effectiveness categories, offensive and defensive coverage
//! - [`team_analysis`] - resolves team keys into characters, moves and rankings once per team
//! - [`fitness_component`] - the independent scoring criteria and their weights
//! - [`fitness_evaluator`] - combines the components into a total, with a per-term breakdown
//!
//! Keys unknown to the store never cause an error: they contribute nothing to any
//! component, which lowers per-member averages.

pub use self::fitness_evaluator::{ComponentScore, FitnessBreakdown, FitnessEvaluator};

pub mod effectiveness;
pub mod fitness_component;
pub mod fitness_evaluator;
pub mod team_analysis;
