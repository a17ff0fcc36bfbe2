use clap::{Parser, Subcommand};

use self::{
    generate_demo_data::GenerateDemoDataArg, matchup::MatchupArg, score::ScoreArg,
    search::SearchArg,
};

mod generate_demo_data;
mod matchup;
mod score;
mod search;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Search for the best team with the genetic algorithm
    Search(#[clap(flatten)] SearchArg),
    /// Show the fitness breakdown of a given team
    Score(#[clap(flatten)] ScoreArg),
    /// Show the type multiplier of one attack type against a defender
    Matchup(#[clap(flatten)] MatchupArg),
    /// Write a synthetic knowledge base
    GenerateDemoData(#[clap(flatten)] GenerateDemoDataArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.command {
        Command::Search(arg) => search::run(&arg)?,
        Command::Score(arg) => score::run(&arg)?,
        Command::Matchup(arg) => matchup::run(&arg)?,
        Command::GenerateDemoData(arg) => generate_demo_data::run(&arg)?,
    }
    Ok(())
}
