pub mod scoring;

pub use scoring::{scan, score, Outcome, ScoreError, ScoreResult, Seat, Trick, Variant};
