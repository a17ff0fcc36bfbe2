use std::{collections::BTreeSet, path::PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use serde::Serialize;
use teamforge_data::{ElementType, KnowledgeStore as _, Mode};
use teamforge_evaluator::FitnessBreakdown;
use teamforge_search::driver::{SearchDriver, SearchParams};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Knowledge base JSON file (synthetic demo data when omitted)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Competitive format: ladder (3 members) or tournament (6 members)
    #[arg(long, default_value = "ladder")]
    mode: Mode,
    /// Character key locked into the team, in slot order (repeatable)
    #[arg(long = "anchor")]
    anchors: Vec<String>,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    tournament_size: Option<usize>,
    #[arg(long)]
    crossover_rate: Option<f64>,
    /// Base mutation rate
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Share of each generation kept as elites
    #[arg(long)]
    elite_fraction: Option<f64>,
    #[arg(long)]
    convergence_epsilon: Option<f64>,
    /// Stop once the population has converged
    #[arg(long)]
    stop_on_convergence: bool,
    /// Keep the mutation rate fixed instead of following diversity
    #[arg(long)]
    no_adaptive_mutation: bool,
    /// Random seed (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SearchArg {
    fn params(&self) -> SearchParams {
        let defaults = SearchParams::default();
        SearchParams {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            generations: self.generations.unwrap_or(defaults.generations),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            elite_fraction: self.elite_fraction.unwrap_or(defaults.elite_fraction),
            convergence_epsilon: self
                .convergence_epsilon
                .unwrap_or(defaults.convergence_epsilon),
            stop_on_convergence: self.stop_on_convergence,
            adaptive_mutation: !self.no_adaptive_mutation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SearchReport {
    searched_at: DateTime<Utc>,
    mode: Mode,
    seed: u64,
    params: SearchParams,
    members: Vec<MemberReport>,
    anchors: Vec<usize>,
    fitness: f64,
    generations_run: usize,
    converged: bool,
    breakdown: FitnessBreakdown,
}

#[derive(Debug, Clone, Serialize)]
struct MemberReport {
    key: String,
    name: String,
    types: Vec<ElementType>,
}

pub(crate) fn run(arg: &SearchArg) -> anyhow::Result<()> {
    let store = util::load_store(arg.data.as_deref())?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg64::seed_from_u64(seed);

    let driver = SearchDriver::new(&store, arg.mode, arg.params());
    let params = driver.params();
    eprintln!(
        "Searching {} team from {} candidates (population {}, {} generations, seed {seed})",
        arg.mode,
        driver.pool().len(),
        params.population_size,
        params.generations
    );
    let result = driver
        .search(&arg.anchors, &mut rng)
        .context("Team search failed")?;

    let anchors: BTreeSet<usize> = result.anchors.iter().copied().collect();
    let breakdown = driver.evaluator().breakdown(&store, &result.team, &anchors);
    let members = result
        .team
        .iter()
        .map(|key| {
            let character = store.character_by_key(key);
            MemberReport {
                key: key.clone(),
                name: character.map_or_else(|| key.clone(), |c| c.name.clone()),
                types: character.map(|c| c.types.to_vec()).unwrap_or_default(),
            }
        })
        .collect::<Vec<_>>();

    eprintln!();
    eprintln!("Best team (fitness {:.4}):", result.fitness);
    for (slot, member) in members.iter().enumerate() {
        let lock = if anchors.contains(&slot) { " [anchor]" } else { "" };
        let types = member
            .types
            .iter()
            .map(|ty| ty.as_str())
            .collect::<Vec<_>>()
            .join("/");
        eprintln!("  {slot}: {} ({types}){lock}", member.name);
    }
    for component in &breakdown.components {
        eprintln!(
            "    {:<22} {:.3} × {:.2}",
            component.name, component.score, component.weight
        );
    }
    eprintln!(
        "    {:<22} {:.3} × {:.2}",
        breakdown.mode_bonus.name, breakdown.mode_bonus.score, breakdown.mode_bonus.weight
    );
    if let Some(anchor) = &breakdown.anchor_synergy {
        eprintln!(
            "    {:<22} {:.3} × {:.2}",
            anchor.name, anchor.score, anchor.weight
        );
    }
    eprintln!(
        "  Generations: {} (converged: {})",
        result.generations_run, result.converged
    );

    let report = SearchReport {
        searched_at: Utc::now(),
        mode: result.mode,
        seed,
        params: params.clone(),
        members,
        anchors: result.anchors,
        fitness: result.fitness,
        generations_run: result.generations_run,
        converged: result.converged,
        breakdown,
    };
    util::save_json(&report, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}
