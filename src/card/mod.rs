pub mod types;

pub use types::{Color, Sequence, SequenceError, SEQUENCE_LEN};
