//! Rules command - write a rules preset as JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use checkers_core::Rules;

#[derive(Args)]
pub struct RulesArgs {
    /// Preset to write (classic, casual)
    #[arg(long, default_value = "classic")]
    pub preset: String,

    /// Output file; prints to stdout when absent
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run rules command
pub fn run(args: RulesArgs) -> Result<()> {
    let rules = Rules::preset(&args.preset)
        .with_context(|| format!("Unknown rules preset: {}", args.preset))?;

    match &args.output {
        Some(path) => {
            rules
                .save(path)
                .with_context(|| format!("Failed to write rules: {}", path.display()))?;
            tracing::info!("Wrote {} rules to {}", rules.name, path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&rules)?),
    }

    Ok(())
}
