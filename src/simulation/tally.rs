use crate::card::Sequence;
use crate::game::scoring::{score, Outcome, ScoreError, ScoreResult, Variant};
use crate::simulation::deck::Deck;

/// Rows and columns of a result grid
pub const GRID_SIZE: usize = Sequence::COUNT;

/// Counts indexed `[opponent][player]`
pub type CountGrid = [[u64; GRID_SIZE]; GRID_SIZE];

/// Win and tie counts for one scoring variant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTally {
    pub wins: CountGrid,
    pub ties: CountGrid,
}

impl VariantTally {
    fn record(&mut self, opponent: Sequence, player: Sequence, outcome: Outcome) {
        let (o, p) = (opponent.index(), player.index());
        match outcome {
            Outcome::Win => self.wins[o][p] += 1,
            Outcome::Tie => self.ties[o][p] += 1,
            Outcome::Loss => {}
        }
    }

    fn merge(&mut self, other: &VariantTally) {
        for o in 0..GRID_SIZE {
            for p in 0..GRID_SIZE {
                self.wins[o][p] += other.wins[o][p];
                self.ties[o][p] += other.ties[o][p];
            }
        }
    }
}

/// Running win/tie counters for every sequence pairing
/// Workers keep their own tally and merge at the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub cards: VariantTally,
    pub tricks: VariantTally,
    /// Decks folded in so far
    pub decks: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(&self, variant: Variant) -> &VariantTally {
        match variant {
            Variant::Cards => &self.cards,
            Variant::Tricks => &self.tricks,
        }
    }

    fn variant_mut(&mut self, variant: Variant) -> &mut VariantTally {
        match variant {
            Variant::Cards => &mut self.cards,
            Variant::Tricks => &mut self.tricks,
        }
    }

    /// Fold one game into both variants
    pub fn record(&mut self, opponent: Sequence, player: Sequence, result: &ScoreResult) {
        for variant in Variant::ALL {
            self.variant_mut(variant)
                .record(opponent, player, result.outcome(variant));
        }
    }

    /// Play every ordered pair of distinct sequences on one deck
    pub fn record_deck(&mut self, deck: &Deck) -> Result<(), ScoreError> {
        for opponent in Sequence::all() {
            for player in Sequence::all().filter(|p| *p != opponent) {
                let result = score(deck, player, opponent)?;
                self.record(opponent, player, &result);
            }
        }
        self.decks += 1;
        Ok(())
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.cards.merge(&other.cards);
        self.tricks.merge(&other.tricks);
        self.decks += other.decks;
        self
    }
}
