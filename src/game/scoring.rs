//! Single-pass deck scanner
//!
//! Deals the deck one card at a time and awards the pile to whichever
//! player's sequence shows up in the last three cards. Both the cards and
//! the tricks variant are scored from the same pass.

use crate::card::{Sequence, SEQUENCE_LEN};
use crate::simulation::deck::Deck;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Player and opponent both called {0}")]
    IdenticalSequences(Sequence),
    #[error("Deck has {len} cards, need at least 3")]
    DeckTooShort { len: usize },
}

/// Which side of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    Player,
    Opponent,
}

/// Scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Each match awards the whole pile
    Cards,
    /// Each match awards one point
    Tricks,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Cards, Variant::Tricks];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Cards => "cards",
            Variant::Tricks => "tricks",
        }
    }
}

/// Game result from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Scores of one deck under both variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScoreResult {
    pub p1_cards: u32,
    pub p2_cards: u32,
    pub p1_tricks: u32,
    pub p2_tricks: u32,
}

impl ScoreResult {
    /// (player, opponent) scores for a variant
    pub fn scores(&self, variant: Variant) -> (u32, u32) {
        match variant {
            Variant::Cards => (self.p1_cards, self.p2_cards),
            Variant::Tricks => (self.p1_tricks, self.p2_tricks),
        }
    }

    pub fn outcome(&self, variant: Variant) -> Outcome {
        let (player, opponent) = self.scores(variant);
        match player.cmp(&opponent) {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal => Outcome::Tie,
            Ordering::Less => Outcome::Loss,
        }
    }

    /// Same game seen from the other seat
    pub fn swapped(&self) -> ScoreResult {
        ScoreResult {
            p1_cards: self.p2_cards,
            p2_cards: self.p1_cards,
            p1_tricks: self.p2_tricks,
            p2_tricks: self.p1_tricks,
        }
    }
}

/// A pile claimed during the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trick {
    pub seat: Seat,
    /// Index of the first card of the matching window
    pub start: usize,
    /// Cards in the pile when it was claimed
    pub pile: u32,
}

/// Scan cursor and running totals
#[derive(Debug)]
struct ScanState {
    /// Index of the newest card in the current window
    position: usize,
    /// Cards dealt since the last claimed pile
    pile: u32,
    result: ScoreResult,
}

impl ScanState {
    fn new() -> Self {
        ScanState {
            position: SEQUENCE_LEN - 1,
            pile: (SEQUENCE_LEN - 1) as u32,
            result: ScoreResult::default(),
        }
    }

    /// Hand the pile to `seat` and skip past the matched cards
    fn award(&mut self, seat: Seat) -> Trick {
        let trick = Trick {
            seat,
            start: self.position + 1 - SEQUENCE_LEN,
            pile: self.pile,
        };

        match seat {
            Seat::Player => {
                self.result.p1_cards += self.pile;
                self.result.p1_tricks += 1;
            }
            Seat::Opponent => {
                self.result.p2_cards += self.pile;
                self.result.p2_tricks += 1;
            }
        }

        self.pile = (SEQUENCE_LEN - 1) as u32;
        self.position += SEQUENCE_LEN;
        trick
    }
}

/// Score a deck for both variants
pub fn score(deck: &Deck, player: Sequence, opponent: Sequence) -> Result<ScoreResult, ScoreError> {
    scan(deck, player, opponent, |_| {})
}

/// Score a deck, reporting every claimed pile to `on_trick`
///
/// The player's sequence is checked before the opponent's. A match consumes
/// its three cards so they never start the next window; cards still in the
/// pile when the deck runs out go to nobody.
pub fn scan<F>(
    deck: &Deck,
    player: Sequence,
    opponent: Sequence,
    mut on_trick: F,
) -> Result<ScoreResult, ScoreError>
where
    F: FnMut(Trick),
{
    if player == opponent {
        return Err(ScoreError::IdenticalSequences(player));
    }

    let cards = deck.cards();
    if cards.len() < SEQUENCE_LEN {
        return Err(ScoreError::DeckTooShort { len: cards.len() });
    }

    let mut state = ScanState::new();
    while state.position < cards.len() {
        state.pile += 1;
        let i = state.position;
        let window = Sequence::from_colors([cards[i - 2], cards[i - 1], cards[i]]);

        if window == player {
            on_trick(state.award(Seat::Player));
        } else if window == opponent {
            on_trick(state.award(Seat::Opponent));
        } else {
            state.position += 1;
        }
    }

    Ok(state.result)
}
