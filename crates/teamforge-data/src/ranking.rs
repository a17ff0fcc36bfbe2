use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::ElementType;

/// Ranking scores for one character, looked up by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub name: String,
    /// Scores per contextual category (`lead`, `switch`, `closer`, ...), each in `[0, 100]`.
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    pub average: f64,
    pub overall: f64,
}

/// A top-ranked character the team should be able to answer offensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaThreat {
    pub key: String,
    pub name: String,
    pub types: ArrayVec<ElementType, 2>,
}
