pub mod card;
pub mod game;
pub mod rng;
pub mod simulation;

#[cfg(test)]
mod integration_tests;

pub use card::{Color, Sequence};
pub use game::{score, ScoreResult};
pub use simulation::{generate_deck, Deck};
