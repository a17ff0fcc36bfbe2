use serde::{Deserialize, Serialize};

/// Competitive format a team is built for.
///
/// The format fixes the team size and which mode-specific fitness bonus applies.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Three-member teams for online ladder play.
    #[default]
    #[display("ladder")]
    Ladder,
    /// Six-member teams for tournaments, where three are brought to each match.
    #[display("tournament")]
    Tournament,
}

impl Mode {
    /// Largest team size over all modes.
    pub const MAX_TEAM_SIZE: usize = 6;

    /// Number of members a team of this mode must have.
    #[must_use]
    pub const fn team_size(self) -> usize {
        match self {
            Self::Ladder => 3,
            Self::Tournament => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_sizes() {
        assert_eq!(Mode::Ladder.team_size(), 3);
        assert_eq!(Mode::Tournament.team_size(), 6);
        assert!(Mode::Tournament.team_size() <= Mode::MAX_TEAM_SIZE);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("ladder".parse::<Mode>().unwrap(), Mode::Ladder);
        assert_eq!("Tournament".parse::<Mode>().unwrap(), Mode::Tournament);
        assert_eq!(Mode::Tournament.to_string(), "tournament");
    }
}
