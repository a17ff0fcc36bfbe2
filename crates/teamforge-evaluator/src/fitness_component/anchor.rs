use crate::{
    effectiveness::{is_resisted, is_super_effective},
    fitness_component::FitnessComponent,
    team_analysis::{Member, TeamAnalysis},
};

/// How well the free slots support the locked anchors.
///
/// Per anchor, `0.6 · defensive + 0.4 · offensive` over the anchor's weakness types:
///
/// - defensive: share of weaknesses some non-anchor teammate resists
/// - offensive: share of weaknesses some non-anchor teammate's charged move hits
///   super-effectively, treating the weakness type as a monotype defender
///
/// Averaged across anchors. A team without anchors scores 0.
#[derive(Debug, Clone, Copy)]
pub struct AnchorSynergy;

impl FitnessComponent for AnchorSynergy {
    fn id(&self) -> &'static str {
        "anchor_synergy"
    }

    fn name(&self) -> &'static str {
        "Anchor Synergy"
    }

    #[expect(clippy::cast_precision_loss)]
    fn score(&self, team: &TeamAnalysis<'_>) -> f64 {
        let scores: Vec<f64> = team.anchors().map(|anchor| anchor_score(team, anchor)).collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

#[expect(clippy::cast_precision_loss)]
fn anchor_score(team: &TeamAnalysis<'_>, anchor: &Member<'_>) -> f64 {
    let eff = team.effectiveness();
    let weaknesses = eff.super_effective_types(anchor.types());
    if weaknesses.is_empty() {
        return 1.0;
    }

    let resisted = weaknesses
        .iter()
        .filter(|&&attack| {
            team.non_anchors()
                .any(|m| is_resisted(eff.effectiveness(attack, m.types())))
        })
        .count();
    let answered = weaknesses
        .iter()
        .filter(|&&weakness| {
            team.non_anchors().any(|m| {
                m.charged_moves
                    .iter()
                    .any(|mv| is_super_effective(eff.effectiveness(mv.move_type, &[weakness])))
            })
        })
        .count();

    let total = weaknesses.len() as f64;
    0.6 * (resisted as f64 / total) + 0.4 * (answered as f64 / total)
}
