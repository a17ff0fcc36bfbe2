use std::path::PathBuf;

use anyhow::ensure;
use serde::Serialize;
use teamforge_data::{ElementType, KnowledgeBase, TypeChart};
use teamforge_evaluator::effectiveness::{EffectivenessCategory, TypeEffectiveness};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MatchupArg {
    /// Knowledge base JSON file providing the type chart (standard chart when omitted)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Attacking type
    #[arg(long)]
    attack: ElementType,
    /// Defending type (one or two)
    #[arg(long, required = true, num_args = 1..=2)]
    defense: Vec<ElementType>,
}

#[derive(Debug, Clone, Serialize)]
struct MatchupReport {
    attack: ElementType,
    defense: Vec<ElementType>,
    multiplier: f64,
    category: EffectivenessCategory,
    weaknesses: Vec<ElementType>,
    resistances: Vec<ElementType>,
}

pub(crate) fn run(arg: &MatchupArg) -> anyhow::Result<()> {
    let MatchupArg {
        data,
        attack,
        defense,
    } = arg;
    ensure!(
        (1..=2).contains(&defense.len()),
        "a defender has one or two types"
    );

    let chart = match data {
        Some(path) => util::read_json::<KnowledgeBase>("knowledge base", path)?.type_chart,
        None => TypeChart::standard(),
    };
    let effectiveness = TypeEffectiveness::new(&chart);
    let multiplier = effectiveness.effectiveness(*attack, defense);
    let category = EffectivenessCategory::from_multiplier(multiplier);

    let defense_label = defense
        .iter()
        .map(|ty| ty.as_str())
        .collect::<Vec<_>>()
        .join("/");
    eprintln!("{attack} → {defense_label}: {multiplier}× ({category})");

    let report = MatchupReport {
        attack: *attack,
        defense: defense.clone(),
        multiplier,
        category,
        weaknesses: effectiveness.super_effective_types(defense),
        resistances: effectiveness.resistant_types(defense),
    };
    util::save_json(&report, None)?;
    Ok(())
}
