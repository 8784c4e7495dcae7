//! Finalized win/tie percentages
//!
//! Grids are stored the way the heatmaps read them: rows are the opponent's
//! sequence in index order (BBB first), columns are the player's sequence in
//! reverse index order (RRR first). The diagonal is `null`.

use crate::card::Sequence;
use crate::game::scoring::Variant;
use crate::simulation::tally::{CountGrid, Tally, GRID_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Whole-number percentages, `None` where the pairing is illegal
pub type PercentGrid = [[Option<f64>; GRID_SIZE]; GRID_SIZE];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub cards: PercentGrid,
    pub cards_ties: PercentGrid,
    pub tricks: PercentGrid,
    pub tricks_ties: PercentGrid,
    /// Number of decks simulated
    #[serde(rename = "N")]
    pub decks: u64,
    pub generated_at: DateTime<Utc>,
}

/// Convert counts to rounded percentages and flip the columns
fn finalize_grid(counts: &CountGrid, decks: u64) -> PercentGrid {
    let mut grid = [[None; GRID_SIZE]; GRID_SIZE];
    for (o, row) in counts.iter().enumerate() {
        for (p, count) in row.iter().enumerate() {
            if o == p {
                continue;
            }
            let fraction = if decks == 0 { 0.0 } else { *count as f64 / decks as f64 };
            grid[o][GRID_SIZE - 1 - p] = Some((fraction * 100.0).round_ties_even());
        }
    }
    grid
}

impl SimulationResults {
    pub fn from_tally(tally: &Tally, generated_at: DateTime<Utc>) -> Self {
        SimulationResults {
            cards: finalize_grid(&tally.cards.wins, tally.decks),
            cards_ties: finalize_grid(&tally.cards.ties, tally.decks),
            tricks: finalize_grid(&tally.tricks.wins, tally.decks),
            tricks_ties: finalize_grid(&tally.tricks.ties, tally.decks),
            decks: tally.decks,
            generated_at,
        }
    }

    /// (wins, ties) grids for a variant
    pub fn grids(&self, variant: Variant) -> (&PercentGrid, &PercentGrid) {
        match variant {
            Variant::Cards => (&self.cards, &self.cards_ties),
            Variant::Tricks => (&self.tricks, &self.tricks_ties),
        }
    }

    /// Player's (win, tie) percentage against an opponent
    pub fn lookup(&self, variant: Variant, opponent: Sequence, player: Sequence) -> Option<(f64, f64)> {
        let (wins, ties) = self.grids(variant);
        let column = GRID_SIZE - 1 - player.index();
        let win = wins[opponent.index()][column]?;
        let tie = ties[opponent.index()][column]?;
        Some((win, tie))
    }

    /// Plain text table, cells formatted as "win (tie)"
    pub fn format_grid(&self, variant: Variant) -> String {
        let (wins, ties) = self.grids(variant);
        let mut out = String::new();

        let _ = writeln!(
            out,
            "My chance of winning by {} (from {} random decks) [win (tie)]",
            variant.name(),
            self.decks
        );
        let _ = write!(out, "{:>10}", "Opp \\ Me");
        for column in 0..GRID_SIZE {
            let label = Sequence::from_index(GRID_SIZE - 1 - column)
                .map(|s| s.label())
                .unwrap_or_default();
            let _ = write!(out, "{:>9}", label);
        }
        let _ = writeln!(out);

        for (o, opponent) in Sequence::all().enumerate() {
            let _ = write!(out, "{:>10}", opponent.label());
            for column in 0..GRID_SIZE {
                let cell = match (wins[o][column], ties[o][column]) {
                    (Some(win), Some(tie)) => format!("{} ({})", win as i64, tie as i64),
                    _ => String::new(),
                };
                let _ = write!(out, "{:>9}", cell);
            }
            let _ = writeln!(out);
        }
        out
    }
}
