use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pitch_architect::{
    catalog, fallback, synthesis, Hyperparameters, ProfileEngine, ScriptAnalyzer, TacticCategory,
};

#[derive(Parser)]
#[command(
    name = "pitch-architect",
    about = "Find persuasion tactics in video scripts",
    version
)]
struct Cli {
    /// Hyperparameter overrides (defaults to ./pitch-architect.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze each script (reads stdin if no files are given)
    Analyze { files: Vec<PathBuf> },
    /// Find tactics and tones shared across scripts
    Synthesize {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Build a reference profile for a topic
    Profile {
        #[arg(long)]
        topic: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the analysis in the hosted-LLM response shape
    Fallback { files: Vec<PathBuf> },
    /// List the tactic catalog
    Tactics {
        #[arg(long)]
        category: Option<TacticCategory>,
    },
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<String>> {
    if files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(vec![input]);
    }
    files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_hyperparameters(path: Option<&PathBuf>) -> Result<Hyperparameters> {
    let hp = match path {
        Some(path) => Hyperparameters::load(path)?,
        None => Hyperparameters::discover(&std::env::current_dir()?)?,
    };
    Ok(hp)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let hp = load_hyperparameters(cli.config.as_ref())?;
    let analyzer = ScriptAnalyzer::new(hp.clone());

    match cli.command {
        Command::Analyze { files } => {
            for script in read_inputs(&files)? {
                print_json(&analyzer.analyze(&script))?;
            }
        }
        Command::Synthesize { files } => {
            let analyses: Vec<_> = read_inputs(&files)?
                .iter()
                .map(|s| analyzer.analyze(s))
                .collect();
            print_json(&synthesis::synthesize_with(&analyses, &hp))?;
        }
        Command::Profile { topic, files } => {
            let scripts = read_inputs(&files)?;
            let engine = ProfileEngine::new(analyzer);
            let profile = engine.create_reference_profile_with_progress(&topic, &scripts, |p| {
                tracing::info!(stage = p.stage, fraction = p.fraction, "profile progress");
            })?;
            print_json(&profile)?;
        }
        Command::Fallback { files } => {
            for script in read_inputs(&files)? {
                print_json(&fallback::from_analysis(&analyzer.analyze(&script)))?;
            }
        }
        Command::Tactics { category } => {
            let tactics: Vec<_> = match category {
                Some(c) => catalog::by_category(c).collect(),
                None => catalog::all().iter().collect(),
            };
            print_json(&tactics)?;
        }
    }
    Ok(())
}
