//! Static game knowledge consumed by the team search.
//!
//! This crate holds the immutable records the search core reads: characters, moves,
//! rankings, meta threats and the type chart. It also defines the competitive [`Mode`]
//! (which fixes team size) and the [`KnowledgeStore`] trait through which the evaluator
//! and the search driver access all of it.
//!
//! # Modules
//!
//! - [`element`] - the 18 elemental types
//! - [`type_chart`] - attack/defense multiplier matrix
//! - [`character`] - character records, base species and bulk classification
//! - [`moves`] - fast and charged move records
//! - [`ranking`] - ranking records and meta threats
//! - [`store`] - the [`KnowledgeStore`] trait and [`InMemoryStore`]
//! - [`synthetic`] - deterministic synthetic data sets
//!
//! # Example
//!
//! ```
//! use teamforge_data::{InMemoryStore, KnowledgeStore, synthetic::SyntheticKnowledgeBase};
//!
//! let store = InMemoryStore::new(SyntheticKnowledgeBase::new(10).build()).unwrap();
//! let pool = store.filter_characters(&|c| c.released);
//! assert_eq!(pool.len(), 10);
//! ```

pub use self::{
    character::*, element::*, mode::*, moves::*, ranking::*, store::*, type_chart::TypeChart,
};

pub mod character;
pub mod element;
pub mod mode;
pub mod moves;
pub mod ranking;
pub mod store;
pub mod synthetic;
pub mod type_chart;
