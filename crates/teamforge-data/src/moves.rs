use serde::{Deserialize, Serialize};

use crate::ElementType;

/// Who a buff or debuff applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffTarget {
    #[serde(rename = "self")]
    User,
    Opponent,
}

/// Stat stage changes a charged move may apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuffEffect {
    #[serde(default)]
    pub attack_delta: i8,
    #[serde(default)]
    pub defense_delta: i8,
    pub target: BuffTarget,
    /// Probability in `[0, 1]` that the effect applies.
    pub chance: f64,
}

/// Fast or charged move parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveKind {
    Fast {
        energy_gain: u32,
        turns: u32,
    },
    Charged {
        energy: u32,
        #[serde(default)]
        buffs: Option<BuffEffect>,
    },
}

/// An immutable move record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub key: String,
    #[serde(rename = "type")]
    pub move_type: ElementType,
    pub power: f64,
    #[serde(flatten)]
    pub kind: MoveKind,
}

impl Move {
    #[must_use]
    pub fn is_fast(&self) -> bool {
        matches!(self.kind, MoveKind::Fast { .. })
    }

    #[must_use]
    pub fn is_charged(&self) -> bool {
        matches!(self.kind, MoveKind::Charged { .. })
    }

    /// Energy cost of a charged move; `None` for fast moves.
    #[must_use]
    pub fn energy_cost(&self) -> Option<u32> {
        match self.kind {
            MoveKind::Charged { energy, .. } => Some(energy),
            MoveKind::Fast { .. } => None,
        }
    }

    /// Energy generated per turn by a fast move; `None` for charged moves.
    #[must_use]
    pub fn energy_per_turn(&self) -> Option<f64> {
        match self.kind {
            MoveKind::Fast { energy_gain, turns } if turns > 0 => {
                Some(f64::from(energy_gain) / f64::from(turns))
            }
            MoveKind::Fast { .. } | MoveKind::Charged { .. } => None,
        }
    }

    #[must_use]
    pub fn buffs(&self) -> Option<&BuffEffect> {
        match &self.kind {
            MoveKind::Charged { buffs, .. } => buffs.as_ref(),
            MoveKind::Fast { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fast_move() {
        let json = r#"{ "key": "counter", "type": "fighting", "power": 8, "kind": "fast", "energy_gain": 7, "turns": 2 }"#;
        let m: Move = serde_json::from_str(json).unwrap();
        assert!(m.is_fast());
        assert_eq!(m.move_type, ElementType::Fighting);
        assert!((m.energy_per_turn().unwrap() - 3.5).abs() < 1e-9);
        assert_eq!(m.energy_cost(), None);
    }

    #[test]
    fn test_deserialize_charged_move_with_buffs() {
        let json = r#"{
            "key": "power_up_punch", "type": "fighting", "power": 20, "kind": "charged", "energy": 35,
            "buffs": { "attack_delta": 1, "target": "self", "chance": 1.0 }
        }"#;
        let m: Move = serde_json::from_str(json).unwrap();
        assert!(m.is_charged());
        assert_eq!(m.energy_cost(), Some(35));
        let buffs = m.buffs().unwrap();
        assert_eq!(buffs.target, BuffTarget::User);
        assert_eq!(buffs.attack_delta, 1);
        assert_eq!(buffs.defense_delta, 0);
    }

    #[test]
    fn test_zero_turn_fast_move_has_no_rate() {
        let m = Move {
            key: "broken".to_owned(),
            move_type: ElementType::Normal,
            power: 1.0,
            kind: MoveKind::Fast {
                energy_gain: 5,
                turns: 0,
            },
        };
        assert_eq!(m.energy_per_turn(), None);
    }
}
