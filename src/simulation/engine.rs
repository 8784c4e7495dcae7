use crate::game::scoring::ScoreError;
use crate::rng::DeckRng;
use crate::simulation::deck::{batch_deck, Deck};
use crate::simulation::results::SimulationResults;
use crate::simulation::store::{DeckStore, StoreError};
use crate::simulation::tally::Tally;
use chrono::Utc;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Scoring error: {0}")]
    ScoreError(#[from] ScoreError),
    #[error("No decks found in {}", .0.display())]
    NoDecks(PathBuf),
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} ({per_sec})")
    {
        bar.set_style(style);
    }
    bar
}

/// Shuffle `count` decks and save them as a new batch file
/// Without a seed, the drawn seed is logged so the batch can be replayed
pub fn generate_batch(
    store: &DeckStore,
    count: usize,
    seed: Option<u64>,
    show_progress: bool,
) -> Result<PathBuf, SimulationError> {
    let start = Instant::now();
    let batch_seed = DeckRng::new(seed).seed();
    if seed.is_none() {
        info!(seed = batch_seed, "Drew batch seed");
    }

    let bar = progress_bar(count, show_progress);
    bar.set_message("Generating decks");

    let decks: Vec<Deck> = (0..count)
        .into_par_iter()
        .progress_with(bar.clone())
        .map(|index| batch_deck(batch_seed, index))
        .collect();
    bar.finish_and_clear();

    let path = store.save_batch(&decks)?;
    info!(
        decks = count,
        seed = batch_seed,
        path = %path.display(),
        elapsed = ?start.elapsed(),
        "Generated deck batch"
    );
    Ok(path)
}

/// Play every ordered pair of distinct sequences on every deck
/// Each rayon worker folds into its own tally; partial tallies are summed
pub fn tally_decks(decks: &[Deck], bar: &ProgressBar) -> Result<Tally, ScoreError> {
    decks
        .par_iter()
        .progress_with(bar.clone())
        .try_fold(Tally::new, |mut tally, deck| -> Result<Tally, ScoreError> {
            tally.record_deck(deck)?;
            Ok(tally)
        })
        .try_reduce(Tally::new, |a, b| Ok(a.merge(b)))
}

/// Simulate over every stored batch and save the finalized results
pub fn run_simulations(
    store: &DeckStore,
    show_progress: bool,
) -> Result<SimulationResults, SimulationError> {
    let start = Instant::now();
    let mut tally = Tally::new();

    for path in store.batch_paths()? {
        let decks = DeckStore::load_batch(&path)?;
        info!(file = %path.display(), decks = decks.len(), "Running simulations");

        let bar = progress_bar(decks.len(), show_progress);
        bar.set_message(path.display().to_string());
        let batch = tally_decks(&decks, &bar)?;
        bar.finish_and_clear();

        tally = tally.merge(batch);
    }

    if tally.decks == 0 {
        return Err(SimulationError::NoDecks(store.dir().to_path_buf()));
    }

    let results = SimulationResults::from_tally(&tally, Utc::now());
    let path = store.save_results(&results)?;
    info!(
        decks = tally.decks,
        path = %path.display(),
        elapsed = ?start.elapsed(),
        "Saved results"
    );
    Ok(results)
}

/// Saved results if present, otherwise run the simulations first
pub fn load_or_run(
    store: &DeckStore,
    force: bool,
    show_progress: bool,
) -> Result<SimulationResults, SimulationError> {
    if !force && store.has_results() {
        debug!(path = %store.results_path().display(), "Using saved results");
        return Ok(store.load_results()?);
    }
    run_simulations(store, show_progress)
}
