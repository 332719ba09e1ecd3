//! BOOM Logic Minimizer - Command Line Interface
//!
//! Reads a single-output PLA truth table, minimizes it and writes the cover
//! back as PLA text.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use boom_logic::graph::Centrality;
use boom_logic::{
    DataSet, LiteralFrequency, Minimizer, MinimizerConfig, PLAReader, PLAWriter, PlaProblem,
    ScoringStrategy, Social,
};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    /// Run the BOOM minimization pipeline (default)
    Minimize,
    /// Print statistics about the truth table
    Stats,
    /// Echo the truth table as an explicit onset/offset PLA
    Echo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Literal frequency over the uncovered onset
    Frequency,
    /// Frequency blended with co-occurrence graph centrality
    Social,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CentralityKind {
    Degree,
    Betweenness,
}

impl From<CentralityKind> for Centrality {
    fn from(val: CentralityKind) -> Self {
        match val {
            CentralityKind::Degree => Centrality::Degree,
            CentralityKind::Betweenness => Centrality::Betweenness,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "boom")]
#[command(author, version, about = "BOOM heuristic two-level logic minimizer", long_about = None)]
struct Args {
    /// Input PLA file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// What to do with the table
    #[arg(short = 'D', long = "do", value_enum, default_value = "minimize")]
    command: Command,

    /// Number of coverage-directed search iterations
    #[arg(short = 'i', long, default_value_t = MinimizerConfig::default().iterations)]
    iterations: usize,

    /// Seed for the random tie-break (entropy if omitted)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Worker threads for search iterations
    #[arg(short = 'j', long, default_value_t = 1)]
    threads: usize,

    /// Literal scoring strategy
    #[arg(long, value_enum, default_value = "frequency")]
    strategy: StrategyKind,

    /// Weight of the social score in [0, 1] (social strategy only)
    #[arg(long, default_value_t = 0.5)]
    interactivity: f64,

    /// Graph centrality used by the social strategy
    #[arg(long, value_enum, default_value = "degree")]
    centrality: CentralityKind,

    /// Resolve rows that appear in both the onset and the offset
    #[arg(long)]
    clean: bool,

    /// Maximum work-list pops per stage
    #[arg(long)]
    node_budget: Option<usize>,

    /// Output file (writes to stdout if not specified)
    #[arg(short = 'O', long = "out-file")]
    output_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn write_output<T: PLAWriter>(value: &T, output_file: Option<&PathBuf>) {
    let result = match output_file {
        Some(path) => value
            .to_pla_file(path)
            .map(|()| info!(path = %path.display(), "wrote output")),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            value
                .write_pla(&mut lock)
                .and_then(|()| lock.flush().map_err(Into::into))
        }
    };
    if let Err(e) = result {
        fail(format_args!("Error writing output: {}", e));
    }
}

fn print_stats(problem: &PlaProblem) {
    let distinct = |rows: &DataSet| rows.iter().collect::<HashSet<_>>().len();
    let conflicts = problem
        .onset()
        .iter()
        .filter(|m| problem.offset().iter().any(|o| o == *m))
        .collect::<HashSet<_>>()
        .len();
    println!("PLA Statistics:");
    println!("  Inputs:              {}", problem.n_variables());
    println!(
        "  Onset rows:          {} ({} distinct)",
        problem.onset().len(),
        distinct(problem.onset())
    );
    println!(
        "  Offset rows:         {} ({} distinct)",
        problem.offset().len(),
        distinct(problem.offset())
    );
    println!("  Conflicting minterms: {}", conflicts);
}

fn main() {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let mut problem = match PlaProblem::from_pla_file(&args.input) {
        Ok(problem) => problem,
        Err(e) => fail(format_args!(
            "Error reading PLA file '{}': {}",
            args.input.display(),
            e
        )),
    };
    info!(
        inputs = problem.n_variables(),
        onset = problem.onset().len(),
        offset = problem.offset().len(),
        "loaded {}",
        args.input.display()
    );

    if args.clean {
        match problem.clean() {
            Ok((cleaned, report)) => {
                info!(
                    removed_from_onset = report.removed_from_onset.len(),
                    removed_from_offset = report.removed_from_offset.len(),
                    "cleaned conflicting rows"
                );
                problem = cleaned;
            }
            Err(e) => fail(format_args!("Error cleaning data: {}", e)),
        }
    }

    match args.command {
        Command::Stats => print_stats(&problem),
        Command::Echo => write_output(&problem, args.output_file.as_ref()),
        Command::Minimize => {
            let config = MinimizerConfig {
                iterations: args.iterations,
                seed: args.seed,
                threads: args.threads.max(1),
                node_budget: args.node_budget,
                validate: true,
            };

            let strategy: Box<dyn ScoringStrategy> = match args.strategy {
                StrategyKind::Frequency => Box::new(LiteralFrequency),
                StrategyKind::Social => match Social::new(
                    problem.onset(),
                    problem.offset(),
                    args.interactivity,
                    args.centrality.into(),
                    Social::DEFAULT_RESOLUTION,
                ) {
                    Ok(social) => Box::new(social),
                    Err(e) => fail(format_args!("Error building social strategy: {}", e)),
                },
            };
            info!(strategy = strategy.name(), iterations = config.iterations, "minimizing");

            let solution = match Minimizer::with_config(strategy, config)
                .minimize(problem.onset(), problem.offset())
            {
                Ok(solution) => solution,
                Err(e) => fail(format_args!("Error minimizing: {}", e)),
            };
            info!(
                implicants = solution.implicants.len(),
                primes = solution.prime_implicants.len(),
                cover = solution.cover.len(),
                literals = solution.cover.literal_count(),
                "minimization finished"
            );

            write_output(&problem.cover(solution.cover), args.output_file.as_ref());
        }
    }
}
