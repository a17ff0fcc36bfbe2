use std::path::PathBuf;

use teamforge_data::{ElementType, synthetic::SyntheticKnowledgeBase};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateDemoDataArg {
    /// Number of characters to generate
    #[arg(long, default_value_t = 120)]
    count: usize,
    /// Add a shadow variant for every N-th character (0 disables)
    #[arg(long, default_value_t = 4)]
    shadow_every: usize,
    /// Give every character this single type
    #[arg(long)]
    shared_type: Option<ElementType>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateDemoDataArg) -> anyhow::Result<()> {
    let GenerateDemoDataArg {
        count,
        shadow_every,
        shared_type,
        output,
    } = arg;

    let mut builder = SyntheticKnowledgeBase::new(*count).with_shadow_variants(*shadow_every);
    if let Some(ty) = shared_type {
        builder = builder.shared_type(*ty);
    }
    let base = builder.build();

    util::save_json(&base, output.as_deref())?;

    eprintln!("Knowledge base generated");
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Characters: {}", base.characters.len());
    eprintln!("  Moves: {}", base.moves.len());
    eprintln!("  Meta threats: {}", base.meta_threats.len());
    Ok(())
}
