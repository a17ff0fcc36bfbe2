use teamforge_data::BulkClass;

use crate::{fitness_component::FitnessComponent, team_analysis::TeamAnalysis};

/// Rewards shadow forms on glass cannons and discourages them on bulky members.
///
/// A non-shadow glass cannon whose released shadow variant exists and is not already on
/// the team costs a little, since the shadow form would hit harder.
#[derive(Debug, Clone, Copy)]
pub struct ShadowPreference;

impl FitnessComponent for ShadowPreference {
    fn id(&self) -> &'static str {
        "shadow_preference"
    }

    fn name(&self) -> &'static str {
        "Shadow Preference"
    }

    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        if team.team_len() == 0 {
            return 0.0;
        }
        let store = team.store();
        let adjustment = team.per_member_mean(|member| {
            match (member.is_shadow(), member.bulk_class()) {
                (true, BulkClass::GlassCannon) => 0.5,
                (true, BulkClass::Bulky) => -0.3,
                (false, BulkClass::GlassCannon) => {
                    let shadow_key = member.character.shadow_variant_key();
                    let available = store
                        .character_by_key(&shadow_key)
                        .is_some_and(|c| c.released);
                    let taken = team
                        .members()
                        .iter()
                        .any(|m| m.character.key == shadow_key);
                    if available && !taken { -0.1 } else { 0.0 }
                }
                _ => 0.0,
            }
        });
        (0.5 + adjustment).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use teamforge_data::{ElementType::*, Mode, SHADOW_TAG};

    use super::*;
    use crate::fitness_component::test_util::{character, keys, store};

    const GLASS: (f64, f64, f64) = (200.0, 100.0, 100.0);
    const BULKY: (f64, f64, f64) = (100.0, 150.0, 150.0);

    fn fixture() -> teamforge_data::InMemoryStore {
        let mut shadow_glass = character("glass_shadow", &[Fire], GLASS);
        shadow_glass.tags.insert(SHADOW_TAG.to_owned());
        let mut shadow_bulky = character("wall_shadow", &[Water], BULKY);
        shadow_bulky.tags.insert(SHADOW_TAG.to_owned());
        store(
            vec![
                character("glass", &[Fire], GLASS),
                shadow_glass,
                character("wall", &[Water], BULKY),
                shadow_bulky,
                character("plain", &[Grass], BULKY),
            ],
            vec![],
            vec![],
        )
    }

    fn score(store: &teamforge_data::InMemoryStore, team: &[&str]) -> f64 {
        let team = keys(team);
        ShadowPreference.score(&TeamAnalysis::new(store, Mode::Ladder, &team, &BTreeSet::new()))
    }

    #[test]
    fn test_shadow_glass_cannon_rewarded() {
        let store = fixture();
        // 0.5 + 0.5 / 3
        assert!((score(&store, &["glass_shadow", "wall", "plain"]) - (0.5 + 0.5 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_bulky_penalized() {
        let store = fixture();
        assert!((score(&store, &["wall_shadow", "plain"]) - (0.5 - 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_untaken_shadow_variant() {
        let store = fixture();
        assert!((score(&store, &["glass", "plain"]) - 0.45).abs() < 1e-9);
        assert!((score(&store, &["glass", "glass_shadow"]) - 0.75).abs() < 1e-9);
    }
}
