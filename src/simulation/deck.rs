use crate::card::Color;
use crate::rng::DeckRng;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cards of each color in a standard deck
pub const CARDS_PER_COLOR: usize = 26;
pub const DECK_SIZE: usize = 2 * CARDS_PER_COLOR;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Invalid deck format at line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },
    #[error("Invalid deck configuration: {0}")]
    InvalidConfiguration(String),
}

/// An ordered deck of colored cards, top of the deck first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deck {
    cards: Vec<Color>,
}

impl Deck {
    pub fn cards(&self) -> &[Color] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards of the given color
    pub fn count(&self, color: Color) -> usize {
        self.cards.iter().filter(|c| **c == color).count()
    }

    /// Parse one stored deck line ("0110...")
    pub fn parse_line(line: &str, line_num: usize) -> Result<Self, DeckError> {
        let cards = line
            .trim()
            .chars()
            .map(|symbol| match symbol {
                '0' => Ok(Color::Black),
                '1' => Ok(Color::Red),
                other => Err(DeckError::InvalidFormat {
                    line: line_num,
                    reason: format!("'{}' is not a card (expected 0 or 1)", other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cards.is_empty() {
            return Err(DeckError::InvalidFormat {
                line: line_num,
                reason: "Empty deck".to_string(),
            });
        }

        Ok(Deck { cards })
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self.cards.iter().map(|c| c.to_digit()).collect();
        f.write_str(&digits)
    }
}

impl FromStr for Deck {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Deck::parse_line(s, 1)
    }
}

/// Shuffle a standard 26/26 deck
/// A seed makes the shuffle reproducible; None uses fresh entropy
pub fn generate_deck(seed: Option<u64>) -> Deck {
    shuffled_deck(CARDS_PER_COLOR, &mut DeckRng::new(seed))
}

/// Shuffle a deck holding `per_color` cards of each color
pub fn generate_deck_with(per_color: usize, seed: Option<u64>) -> Result<Deck, DeckError> {
    if per_color == 0 {
        return Err(DeckError::InvalidConfiguration(
            "A deck needs at least one card of each color".to_string(),
        ));
    }
    Ok(shuffled_deck(per_color, &mut DeckRng::new(seed)))
}

fn shuffled_deck(per_color: usize, rng: &mut DeckRng) -> Deck {
    let mut cards = Vec::with_capacity(2 * per_color);
    cards.resize(per_color, Color::Black);
    cards.resize(2 * per_color, Color::Red);
    rng.shuffle(&mut cards);
    Deck { cards }
}

/// Standard deck `index` of the batch keyed by `seed`
/// Each index reads its own generator stream
pub fn batch_deck(seed: u64, index: usize) -> Deck {
    shuffled_deck(CARDS_PER_COLOR, &mut DeckRng::for_deck(seed, index as u64))
}

/// Generate `count` standard decks in parallel
/// Without a seed, one is drawn for the whole batch
pub fn generate_decks(count: usize, seed: Option<u64>) -> Vec<Deck> {
    let seed = DeckRng::new(seed).seed();
    (0..count)
        .into_par_iter()
        .map(|index| batch_deck(seed, index))
        .collect()
}

/// Parse a batch of decks, one per line, each exactly `deck_len` cards
/// Skips empty lines and comments with # or //
pub fn parse_decks(content: &str, deck_len: usize) -> Result<Vec<Deck>, DeckError> {
    let mut decks = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        let deck = Deck::parse_line(trimmed, line_num + 1)?;
        if deck.len() != deck_len {
            return Err(DeckError::InvalidFormat {
                line: line_num + 1,
                reason: format!("Expected {} cards, got {}", deck_len, deck.len()),
            });
        }
        decks.push(deck);
    }

    Ok(decks)
}
