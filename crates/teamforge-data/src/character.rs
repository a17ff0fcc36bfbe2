use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::ElementType;

/// Key suffixes that mark a form of a base species rather than a distinct species.
pub const FORM_SUFFIXES: [&str; 5] = ["_shadow", "_alolan", "_galarian", "_hisuian", "_paldean"];

/// Tag marking a shadow form.
pub const SHADOW_TAG: &str = "shadow";

/// Bulk ratio below which a character is a glass cannon.
pub const GLASS_CANNON_RATIO: f64 = 1.8;
/// Bulk ratio at or above which a character is bulky.
pub const BULKY_RATIO: f64 = 2.5;

/// Strips form and shadow suffixes from a character key.
///
/// Team uniqueness is enforced at this granularity: `marowak`, `marowak_alolan` and
/// `marowak_alolan_shadow` all share the base species `marowak`.
///
/// ```
/// use teamforge_data::base_species;
///
/// assert_eq!(base_species("marowak_alolan_shadow"), "marowak");
/// assert_eq!(base_species("azumarill"), "azumarill");
/// ```
#[must_use]
pub fn base_species(key: &str) -> &str {
    let mut species = key;
    while let Some(stripped) = FORM_SUFFIXES
        .iter()
        .find_map(|suffix| species.strip_suffix(suffix))
    {
        if stripped.is_empty() {
            break;
        }
        species = stripped;
    }
    species
}

/// Base attack, defense and stamina.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: f64,
    pub defense: f64,
    pub stamina: f64,
}

impl BaseStats {
    /// `(defense + stamina) / attack`; zero when attack is not positive.
    #[must_use]
    pub fn bulk_ratio(&self) -> f64 {
        if self.attack <= 0.0 {
            return 0.0;
        }
        (self.defense + self.stamina) / self.attack
    }
}

/// Default stat allocation for one CP bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatAllocation {
    pub level: f64,
    pub attack_iv: u8,
    pub defense_iv: u8,
    pub stamina_iv: u8,
}

/// Bulk classification derived from [`BaseStats::bulk_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BulkClass {
    #[display("glass cannon")]
    GlassCannon,
    #[display("balanced")]
    Balanced,
    #[display("bulky")]
    Bulky,
}

impl BulkClass {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < GLASS_CANNON_RATIO {
            Self::GlassCannon
        } else if ratio < BULKY_RATIO {
            Self::Balanced
        } else {
            Self::Bulky
        }
    }
}

/// An immutable character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub key: String,
    pub name: String,
    pub dex: u32,
    pub base_stats: BaseStats,
    pub types: ArrayVec<ElementType, 2>,
    /// Default allocation keyed by CP cap (e.g. `1500`).
    #[serde(default)]
    pub defaults: BTreeMap<u32, StatAllocation>,
    pub fast_moves: Vec<String>,
    pub charged_moves: Vec<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub buddy_distance: u32,
    #[serde(default)]
    pub third_move_cost: u32,
    #[serde(default = "default_released")]
    pub released: bool,
}

fn default_released() -> bool {
    true
}

impl Character {
    /// Returns the base species of this character's key.
    #[must_use]
    pub fn base_species(&self) -> &str {
        base_species(&self.key)
    }

    #[must_use]
    pub fn is_shadow(&self) -> bool {
        self.tags.contains(SHADOW_TAG) || self.key.ends_with("_shadow")
    }

    #[must_use]
    pub fn bulk_ratio(&self) -> f64 {
        self.base_stats.bulk_ratio()
    }

    #[must_use]
    pub fn bulk_class(&self) -> BulkClass {
        BulkClass::from_ratio(self.bulk_ratio())
    }

    /// Key of the shadow variant of this character.
    #[must_use]
    pub fn shadow_variant_key(&self) -> String {
        format!("{}_shadow", self.key)
    }
}
