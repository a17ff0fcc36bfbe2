//! Attack/defense multiplier matrix.
//!
//! The chart maps an `(attacking type, defending type)` pair to a multiplier. Only
//! non-neutral pairs need to be stored: any pair missing from the chart reads as
//! [`NEUTRAL`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ElementType;

/// Multiplier for a super-effective matchup.
pub const SUPER_EFFECTIVE: f64 = 1.6;
/// Multiplier for a neutral matchup.
pub const NEUTRAL: f64 = 1.0;
/// Multiplier for a resisted matchup.
pub const NOT_VERY_EFFECTIVE: f64 = 0.625;
/// Multiplier for a matchup the defender is immune to (double resistance).
pub const IMMUNE: f64 = 0.39;

/// Sparse `attacking → defending → multiplier` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeChart {
    entries: BTreeMap<ElementType, BTreeMap<ElementType, f64>>,
}

impl TypeChart {
    /// Creates an empty chart where every matchup is neutral.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard 18×18 chart.
    #[must_use]
    pub fn standard() -> Self {
        use ElementType::{
            Bug, Dark, Dragon, Electric, Fairy, Fighting, Fire, Flying, Ghost, Grass, Ground, Ice,
            Normal, Poison, Psychic, Rock, Steel, Water,
        };

        // (attacker, super effective against, resisted by, immune defenders)
        let rows: [(ElementType, &[ElementType], &[ElementType], &[ElementType]); 18] = [
            (Normal, &[], &[Rock, Steel], &[Ghost]),
            (
                Fire,
                &[Grass, Ice, Bug, Steel],
                &[Fire, Water, Rock, Dragon],
                &[],
            ),
            (Water, &[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
            (
                Electric,
                &[Water, Flying],
                &[Electric, Grass, Dragon],
                &[Ground],
            ),
            (
                Grass,
                &[Water, Ground, Rock],
                &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
                &[],
            ),
            (
                Ice,
                &[Grass, Ground, Flying, Dragon],
                &[Fire, Water, Ice, Steel],
                &[],
            ),
            (
                Fighting,
                &[Normal, Ice, Rock, Dark, Steel],
                &[Poison, Flying, Psychic, Bug, Fairy],
                &[Ghost],
            ),
            (
                Poison,
                &[Grass, Fairy],
                &[Poison, Ground, Rock, Ghost],
                &[Steel],
            ),
            (
                Ground,
                &[Fire, Electric, Poison, Rock, Steel],
                &[Grass, Bug],
                &[Flying],
            ),
            (
                Flying,
                &[Grass, Fighting, Bug],
                &[Electric, Rock, Steel],
                &[],
            ),
            (Psychic, &[Fighting, Poison], &[Psychic, Steel], &[Dark]),
            (
                Bug,
                &[Grass, Psychic, Dark],
                &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
                &[],
            ),
            (
                Rock,
                &[Fire, Ice, Flying, Bug],
                &[Fighting, Ground, Steel],
                &[],
            ),
            (Ghost, &[Psychic, Ghost], &[Dark], &[Normal]),
            (Dragon, &[Dragon], &[Steel], &[Fairy]),
            (Dark, &[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
            (
                Steel,
                &[Ice, Rock, Fairy],
                &[Fire, Water, Electric, Steel],
                &[],
            ),
            (Fairy, &[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
        ];

        let mut chart = Self::new();
        for (attacker, strong, weak, immune) in rows {
            for &defender in strong {
                chart.set(attacker, defender, SUPER_EFFECTIVE);
            }
            for &defender in weak {
                chart.set(attacker, defender, NOT_VERY_EFFECTIVE);
            }
            for &defender in immune {
                chart.set(attacker, defender, IMMUNE);
            }
        }
        chart
    }

    /// Sets the multiplier for one matchup.
    pub fn set(&mut self, attacker: ElementType, defender: ElementType, multiplier: f64) {
        self.entries
            .entry(attacker)
            .or_default()
            .insert(defender, multiplier);
    }

    /// Returns the multiplier for one matchup, or [`NEUTRAL`] if the chart has no entry.
    #[must_use]
    pub fn multiplier(&self, attacker: ElementType, defender: ElementType) -> f64 {
        self.entries
            .get(&attacker)
            .and_then(|row| row.get(&defender))
            .copied()
            .unwrap_or(NEUTRAL)
    }
}
