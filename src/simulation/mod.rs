pub mod deck;
pub mod engine;
pub mod results;
pub mod store;
pub mod tally;

pub use deck::{generate_deck, generate_deck_with, Deck, DeckError};
pub use engine::{generate_batch, load_or_run, run_simulations, SimulationError};
pub use results::SimulationResults;
pub use store::{DeckStore, StoreError};
pub use tally::Tally;
