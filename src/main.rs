use clap::{Parser, Subcommand};
use penney_ante::card::Sequence;
use penney_ante::game::scoring::{score, Variant};
use penney_ante::simulation::engine::{generate_batch, load_or_run};
use penney_ante::simulation::{Deck, DeckStore};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "penney-ante")]
#[command(about = "Penney's Ante Monte Carlo Simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding deck batches and results.json
    #[arg(short, long, env = "PENNEY_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle a new batch of decks into the data directory
    Generate {
        /// Number of decks to generate
        #[arg(short = 'n', long, default_value = "100000")]
        count: usize,

        /// Seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Score every stored deck for all sequence pairings and save results.json
    Simulate {
        /// Re-run even if results.json already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Print the win/tie grids (simulating first if needed)
    Show,

    /// Score a single deck for one pairing
    Score {
        /// Deck as a string of 0 (black) and 1 (red)
        deck: String,

        /// Player's sequence, e.g. BRR or 011
        player: Sequence,

        /// Opponent's sequence
        opponent: Sequence,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = DeckStore::new(&cli.data_dir);

    match cli.command {
        Commands::Generate { count, seed } => generate(&store, count, seed),
        Commands::Simulate { force } => simulate(&store, force),
        Commands::Show => simulate(&store, false),
        Commands::Score { deck, player, opponent } => score_one(&deck, player, opponent),
    }
}

fn generate(store: &DeckStore, count: usize, seed: Option<u64>) {
    println!("\n=== Penney's Ante Deck Generator ===\n");
    println!("Decks: {}", count);
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    match generate_batch(store, count, seed, true) {
        Ok(path) => println!("✓ Saved {} decks to {}", count, path.display()),
        Err(e) => {
            eprintln!("✗ Failed to generate decks: {}", e);
            std::process::exit(1);
        }
    }
}

fn simulate(store: &DeckStore, force: bool) {
    let results = match load_or_run(store, force, true) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("✗ Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== Penney's Ante Results ===\n");
    println!("Decks simulated: {}", results.decks);
    println!("Generated at: {}", results.generated_at.to_rfc3339());
    for variant in Variant::ALL {
        println!();
        print!("{}", results.format_grid(variant));
    }
    println!("\nRows: opponent's sequence. Columns: my sequence.");
}

fn score_one(deck: &str, player: Sequence, opponent: Sequence) {
    let deck: Deck = match deck.parse() {
        Ok(deck) => deck,
        Err(e) => {
            eprintln!("✗ Invalid deck: {}", e);
            std::process::exit(1);
        }
    };

    let result = match score(&deck, player, opponent) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== {} (me) vs {} (opponent), {} cards ===\n", player, opponent, deck.len());
    println!("{:10} {:>6} {:>10}", "Variant", "Me", "Opponent");
    println!("{:-<28}", "");
    for variant in Variant::ALL {
        let (mine, theirs) = result.scores(variant);
        println!("{:10} {:>6} {:>10}  {:?}", variant.name(), mine, theirs, result.outcome(variant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_args() {
        let cli = Cli::parse_from(["penney-ante", "generate", "-n", "50", "--seed", "420"]);
        match cli.command {
            Commands::Generate { count, seed } => {
                assert_eq!(count, 50);
                assert_eq!(seed, Some(420));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn parses_sequences_in_either_notation() {
        let cli = Cli::parse_from(["penney-ante", "score", "0101", "BRB", "101"]);
        match cli.command {
            Commands::Score { player, opponent, .. } => {
                assert_eq!(player.digits(), "010");
                assert_eq!(opponent.label(), "RBR");
            }
            _ => panic!("expected score"),
        }
    }

    #[test]
    fn rejects_bad_sequence() {
        assert!(Cli::try_parse_from(["penney-ante", "score", "0101", "BR", "101"]).is_err());
    }

    #[test]
    fn data_dir_is_global() {
        let cli = Cli::parse_from(["penney-ante", "simulate", "--force", "--data-dir", "/tmp/decks"]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/decks"));
        assert!(matches!(cli.command, Commands::Simulate { force: true }));
    }
}
