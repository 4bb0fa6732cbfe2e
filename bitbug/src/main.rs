use evostrat::logging::Stats;
use evostrat::{Generation, GenerationEvent, RunConfig, Strategy, Termination};
use evostrat_bits::{BitConfig, BitGenome, PercentSet};

use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

#[derive(Parser)]
#[command(name = "bitbug")]
#[command(about = "Evolves bit strings towards all ones", long_about = None)]
struct Cli {
    /// RON file holding the run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of bits per genome
    #[arg(short, long, default_value = "16")]
    bits: NonZeroUsize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run once, printing every generation
    Run,
    /// Run repeatedly, reporting how often the population improved
    Trend {
        /// Number of independent runs
        #[arg(long, default_value = "100")]
        trials: usize,
    },
}

type BitStrategy = Strategy<BitGenome, PercentSet>;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let run_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    let genetic_config = BitConfig { length: cli.bits };

    match cli.command {
        Commands::Run => run(run_config, genetic_config, cli.seed),
        Commands::Trend { trials } => trend(run_config, genetic_config, cli.seed, trials),
    }
}

fn load_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: RunConfig =
        ron::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    log::info!("loaded run configuration from {}: {:?}", path.display(), config);
    Ok(config)
}

fn build_strategy(
    run_config: RunConfig,
    genetic_config: BitConfig,
    seed: Option<u64>,
) -> Result<BitStrategy> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(Strategy::with_rng(run_config, genetic_config, PercentSet, rng)?)
}

fn run(run_config: RunConfig, genetic_config: BitConfig, seed: Option<u64>) -> Result<()> {
    let mut strategy = build_strategy(run_config, genetic_config, seed)?;

    let termination = strategy.evolve_with(
        &mut |event: GenerationEvent, generation: &Generation<BitGenome>| {
            if event == GenerationEvent::Evolved {
                println!("Size: {}", generation.len());
                match (generation.best_fit(), generation.average_fitness()) {
                    (Some(best), Some(average)) => println!(
                        "Generation complete: G{} : best {} ({}) avg: {:.2}",
                        generation.index(),
                        best.fitness().unwrap_or_default(),
                        best.genome(),
                        average
                    ),
                    _ => println!("Generation complete: G{} : empty", generation.index()),
                }
            }
            ControlFlow::Continue(())
        },
    )?;

    println!("Terminated by {:?}; final population:", termination);
    for individual in strategy.population().sorted_by_fitness()?.into_iter().rev() {
        println!("{}", individual);
    }
    if let Some(champion) = strategy.champion() {
        println!("Champion: {}", champion);
    }
    println!("Done evolving.");
    Ok(())
}

fn trend(
    run_config: RunConfig,
    genetic_config: BitConfig,
    seed: Option<u64>,
    trials: usize,
) -> Result<()> {
    let outcomes = (0..trials)
        .into_par_iter()
        .map(|trial| -> Result<_> {
            let mut strategy = build_strategy(
                run_config,
                genetic_config,
                seed.map(|s| s.wrapping_add(trial as u64)),
            )?;
            let termination = strategy.evolve()?;
            let generations = strategy.generations();
            log::debug!(
                "trial {} terminated by {:?} after {} generations",
                trial,
                termination,
                generations.len()
            );
            let first = generations.first().and_then(Generation::average_fitness);
            let last = generations.last().and_then(Generation::average_fitness);
            Ok((termination, first, last, generations.len()))
        })
        .collect::<Result<Vec<(Termination, Option<f32>, Option<f32>, usize)>>>()?;

    let improved = outcomes
        .iter()
        .filter(|(_, first, last, _)| matches!((first, last), (Some(f), Some(l)) if l > f))
        .count();
    let reached = outcomes
        .iter()
        .filter(|(t, ..)| *t == Termination::FitnessThreshold)
        .count();

    println!(
        "{}% of {} runs improved their average fitness; {} reached the threshold",
        improved as f32 * 100.0 / trials.max(1) as f32,
        trials,
        reached
    );
    println!(
        "Generation count {:?}",
        Stats::from(outcomes.iter().map(|(.., count)| *count as f32))
    );
    Ok(())
}
