use std::{collections::BTreeSet, path::PathBuf};

use log::warn;
use teamforge_data::{KnowledgeStore as _, Mode, base_species};
use teamforge_evaluator::FitnessEvaluator;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Knowledge base JSON file (synthetic demo data when omitted)
    #[arg(long)]
    data: Option<PathBuf>,
    #[arg(long, default_value = "ladder")]
    mode: Mode,
    /// Comma-separated character keys, in slot order
    #[arg(long, value_delimiter = ',', required = true)]
    team: Vec<String>,
    /// Comma-separated anchored slot indices
    #[arg(long, value_delimiter = ',')]
    anchors: Vec<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg {
        data,
        mode,
        team,
        anchors,
        output,
    } = arg;
    let store = util::load_store(data.as_deref())?;

    if team.len() != mode.team_size() {
        warn!(
            "{mode} teams have {} members, got {}",
            mode.team_size(),
            team.len()
        );
    }
    for key in team {
        if store.character_by_key(key).is_none() {
            warn!("Unknown character '{key}' scores zero");
        }
    }
    let mut species = BTreeSet::new();
    for key in team {
        if !species.insert(base_species(key)) {
            warn!("Base species of '{key}' appears more than once");
        }
    }

    let anchors: BTreeSet<usize> = anchors.iter().copied().collect();
    let breakdown = FitnessEvaluator::new(*mode).breakdown(&store, team, &anchors);

    eprintln!("Fitness: {:.4}", breakdown.total);
    for component in breakdown
        .components
        .iter()
        .chain([&breakdown.mode_bonus])
        .chain(&breakdown.anchor_synergy)
    {
        eprintln!(
            "  {:<22} {:.3} × {:.2} = {:.4}",
            component.name,
            component.score,
            component.weight,
            component.contribution()
        );
    }

    util::save_json(&breakdown, output.as_deref())?;
    Ok(())
}
