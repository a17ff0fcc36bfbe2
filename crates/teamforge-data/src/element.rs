use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the 18 elemental types.
///
/// Parsing via [`FromStr`](std::str::FromStr) is case-insensitive (`"fire"`, `"Fire"` and
/// `"FIRE"` all parse), and the serialized form is lowercase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    /// Number of elemental types.
    pub const LEN: usize = 18;

    /// All elemental types, in chart order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Returns the lowercase name used in data files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    /// Position of this type in [`ElementType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("fire".parse::<ElementType>().unwrap(), ElementType::Fire);
        assert_eq!("Fire".parse::<ElementType>().unwrap(), ElementType::Fire);
        assert_eq!("FAIRY".parse::<ElementType>().unwrap(), ElementType::Fairy);
        assert!("plasma".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_all_is_in_index_order() {
        for (i, ty) in ElementType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ElementType::Psychic).unwrap();
        assert_eq!(json, "\"psychic\"");
        let ty: ElementType = serde_json::from_str("\"dragon\"").unwrap();
        assert_eq!(ty, ElementType::Dragon);
    }
}
