//! The external CLI surface (spec §6): three mutually exclusive modes, run
//! evolution, run a fixed-strategy comparison, and render charts from an exported
//! history. `clap` derive, grounded on `noahbclarkson-krypto`'s `args.rs`.
use clap::{Parser, Subcommand};
use genovolve::config::Config;
use genovolve::evolve::Evolve;
use genovolve::grammar::parser::parse as parse_grammar;
use genovolve::grammar::Grammar;
use genovolve::history::History;
use genovolve::market;
use genovolve::GeError;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "genovolve", about = "Grammatical evolution of trading strategies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the evolutionary loop to completion.
    Run {
        #[arg(long, default_value = "config.yaml")]
        config: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        history_out: Option<PathBuf>,
    },
    /// Evaluate a single fixed strategy string against the market simulator,
    /// without any evolution. Thin glue over `market::run_generation` (spec §1:
    /// "benchmark/comparison drivers... straightforward glue").
    Compare {
        #[arg(long, default_value = "config.yaml")]
        config: PathBuf,
        #[arg(long)]
        strategy: String,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Render a chart from a previously exported history JSON file. Out of the
    /// algorithmic core (spec §1); left as a documented stub.
    Chart {
        #[arg(long)]
        history: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            seed,
            history_out,
        } => {
            if let Err(e) = run(&config, seed, history_out.as_deref()) {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
        Command::Compare {
            config,
            strategy,
            seed,
        } => compare(&config, &strategy, seed),
        Command::Chart { history } => chart(&history),
    }
}

fn load_grammar(config: &Config) -> Result<Grammar, GeError> {
    let file = File::open(&config.bnf_file_path)?;
    let grammar = parse_grammar(BufReader::new(file))?;
    grammar.validate()?;
    Ok(grammar)
}

fn run(config_path: &PathBuf, seed: u64, history_out: Option<&std::path::Path>) -> Result<(), GeError> {
    let config = Config::load(config_path).unwrap_or_else(|e| {
        log::warn!("failed to load {:?}, using defaults: {}", config_path, e);
        Config::default()
    });
    let grammar = load_grammar(&config)?;

    let mut evolve = Evolve::builder()
        .with_grammar(grammar)
        .with_market_config(config.market.clone())
        .with_config(config.to_evolve_config())
        .with_seed(seed)
        .build()
        .expect("invalid evolve configuration");

    evolve.call();

    let (total, avg) = evolve.timing_summary();
    log::info!(
        "finished {} generations in {:?} (avg {:?}/generation), best fitness {:.2}",
        evolve.state.current_generation,
        total,
        avg,
        evolve.state.best_fitness,
    );

    if let Some(path) = history_out {
        let file = File::create(path).expect("cannot create history output file");
        evolve.history.write_to(file).expect("failed to write history json");
    }

    Ok(())
}

fn compare(config_path: &PathBuf, strategy: &str, seed: u64) {
    let config = Config::load(config_path).unwrap_or_default();
    let strategies = vec![strategy.to_string()];
    let report = market::run_generation(&strategies, &config.market, seed);
    for result in report.results {
        println!(
            "strategy={:?} active_return={:.4} mean_sharpe={:.4}",
            result.strategy, result.active_return, result.mean_sharpe
        );
    }
}

fn chart(history_path: &PathBuf) {
    let file = File::open(history_path).expect("cannot open history file");
    let history: History = serde_json::from_reader(BufReader::new(file)).expect("malformed history json");
    println!(
        "history: {} rounds, {} generations (chart rendering is out of scope for this core)",
        history.prices.len(),
        history.generations.len()
    );
}

