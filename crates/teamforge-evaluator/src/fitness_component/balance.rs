use teamforge_data::BulkClass;

use crate::{fitness_component::FitnessComponent, team_analysis::TeamAnalysis};

/// Rewards a mix of bulky, balanced and glass-cannon members.
#[derive(Debug, Clone, Copy)]
pub struct StatBalance;

impl FitnessComponent for StatBalance {
    fn id(&self) -> &'static str {
        "stat_balance"
    }

    fn name(&self) -> &'static str {
        "Stat Balance"
    }

    #[expect(clippy::cast_precision_loss)]
    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let members = team.members();
        if members.is_empty() {
            return 0.0;
        }
        let count = |class| members.iter().filter(|m| m.bulk_class() == class).count();
        let glass = count(BulkClass::GlassCannon);
        let balanced = count(BulkClass::Balanced);
        let bulky = count(BulkClass::Bulky);

        let glass_share = glass as f64 / members.len() as f64;
        let mut score = 0.6;
        if glass_share > 0.5 {
            score -= 0.4;
        } else if glass_share > 0.4 {
            score -= 0.2;
        }
        if bulky == 0 {
            score -= 0.3;
        } else {
            score += 0.2;
        }
        if balanced >= 2 {
            score += 0.2;
        }
        f64::clamp(score, 0.0, 1.0)
    }
}
