use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of cards in a called sequence
pub const SEQUENCE_LEN: usize = 3;

/// Card colors in a Penney's Ante deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
}

impl Color {
    /// Storage digit: '0' for black, '1' for red
    pub fn to_digit(self) -> char {
        match self {
            Color::Black => '0',
            Color::Red => '1',
        }
    }

    /// Display letter: 'B' or 'R'
    pub fn to_char(self) -> char {
        match self {
            Color::Black => 'B',
            Color::Red => 'R',
        }
    }

    /// Parse either storage digits or display letters
    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol {
            '0' | 'B' | 'b' => Some(Color::Black),
            '1' | 'R' | 'r' => Some(Color::Red),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        self as u8
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Sequence must have exactly 3 cards, got {0}")]
    InvalidLength(usize),
    #[error("Invalid color symbol '{0}' (expected 0/1 or B/R)")]
    InvalidSymbol(char),
}

/// A three-card color pattern, packed as a 3-bit code with the oldest card
/// in the most significant bit. Black is 0, so the code doubles as the
/// index into the 8-sequence universe: BBB = 0 ... RRR = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(u8);

impl Sequence {
    /// Size of the sequence universe {B,R}^3
    pub const COUNT: usize = 1 << SEQUENCE_LEN;

    /// All sequences in index order
    pub fn all() -> impl Iterator<Item = Sequence> {
        (0..Self::COUNT as u8).map(Sequence)
    }

    pub fn from_index(index: usize) -> Option<Sequence> {
        (index < Self::COUNT).then_some(Sequence(index as u8))
    }

    /// Build a sequence from three colors, oldest first
    #[inline]
    pub fn from_colors(colors: [Color; SEQUENCE_LEN]) -> Sequence {
        Sequence((colors[0].bit() << 2) | (colors[1].bit() << 1) | colors[2].bit())
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn colors(self) -> [Color; SEQUENCE_LEN] {
        let color_at = |shift: u8| {
            if (self.0 >> shift) & 1 == 1 {
                Color::Red
            } else {
                Color::Black
            }
        };
        [color_at(2), color_at(1), color_at(0)]
    }

    /// Letter form, e.g. "BRB"
    pub fn label(self) -> String {
        self.colors().iter().map(|c| c.to_char()).collect()
    }

    /// Digit form, e.g. "010"
    pub fn digits(self) -> String {
        self.colors().iter().map(|c| c.to_digit()).collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.trim().chars().collect();
        if symbols.len() != SEQUENCE_LEN {
            return Err(SequenceError::InvalidLength(symbols.len()));
        }

        let mut colors = [Color::Black; SEQUENCE_LEN];
        for (slot, symbol) in colors.iter_mut().zip(symbols) {
            *slot = Color::from_symbol(symbol).ok_or(SequenceError::InvalidSymbol(symbol))?;
        }
        Ok(Sequence::from_colors(colors))
    }
}
