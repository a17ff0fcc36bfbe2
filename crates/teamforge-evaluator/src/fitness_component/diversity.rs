use teamforge_data::ElementType;

use crate::{fitness_component::FitnessComponent, team_analysis::TeamAnalysis};

/// Penalizes own types repeated across members.
///
/// Starts at 1.0; −0.3 per type held by three or more members, −0.1 per type held by
/// exactly two.
#[derive(Debug, Clone, Copy)]
pub struct TypeDiversity;

impl FitnessComponent for TypeDiversity {
    fn id(&self) -> &'static str {
        "type_diversity"
    }

    fn name(&self) -> &'static str {
        "Type Diversity"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        if team.members().is_empty() {
            return 0.0;
        }
        let mut counts = [0_usize; ElementType::LEN];
        for member in team.members() {
            for ty in member.types() {
                counts[ty.index()] += 1;
            }
        }
        let penalty: f64 = counts
            .iter()
            .map(|&count| match count {
                0 | 1 => 0.0,
                2 => 0.1,
                _ => 0.3,
            })
            .sum();
        (1.0 - penalty).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType::*, Mode};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    const STATS: (f64, f64, f64) = (100.0, 100.0, 100.0);

    #[test]
    fn test_penalties() {
        let store = store(
            vec![
                character("a", &[Water, Fairy], STATS),
                character("b", &[Water, Ground], STATS),
                character("c", &[Water, Fairy], STATS),
                character("d", &[Steel], STATS),
            ],
            vec![],
            vec![],
        );
        let anchors = BTreeSet::new();
        let distinct = keys(&["a", "b", "d"]);
        let stacked = keys(&["a", "b", "c"]);
        let distinct = TypeDiversity.score(&TeamAnalysis::new(&store, Mode::Ladder, &distinct, &anchors));
        let stacked = TypeDiversity.score(&TeamAnalysis::new(&store, Mode::Ladder, &stacked, &anchors));
        // water shared by two
        assert!((distinct - 0.9).abs() < 1e-9);
        // water shared by three, fairy by two
        assert!((stacked - 0.6).abs() < 1e-9);
    }
}
