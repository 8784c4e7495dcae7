use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 generator behind every deck shuffle
///
/// A generator is keyed by a 64-bit seed and reads one of 2^64 independent
/// streams of that key. Single decks use stream 0; deck `k` of a batch uses
/// stream `k`, so batches keyed by different seeds never share decks.
#[derive(Clone)]
pub struct DeckRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Generator on stream 0 of `seed`, or of a seed drawn from the
    /// thread-local entropy source
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        DeckRng {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator for deck `index` of the batch keyed by `seed`
    pub fn for_deck(seed: u64, index: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(index);
        DeckRng { rng, seed }
    }

    /// Key seed; replaying it reproduces the generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Unbiased Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(mut rng: DeckRng) -> Vec<u32> {
        let mut items: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut items);
        items
    }

    #[test]
    fn test_shuffle_reproducibility() {
        assert_eq!(
            shuffled(DeckRng::new(Some(420))),
            shuffled(DeckRng::new(Some(420))),
            "Same seed should produce same shuffle"
        );
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut items = shuffled(DeckRng::new(Some(7)));
        items.sort_unstable();
        assert_eq!(items, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn test_different_seeds_produce_different_shuffles() {
        assert_ne!(
            shuffled(DeckRng::new(Some(12345))),
            shuffled(DeckRng::new(Some(54321))),
            "Different seeds should produce different shuffles"
        );
    }

    #[test]
    fn test_drawn_seed_replays_generator() {
        let rng = DeckRng::new(None);
        let replay = DeckRng::new(Some(rng.seed()));
        assert_eq!(shuffled(rng), shuffled(replay));
    }

    #[test]
    fn test_deck_streams() {
        assert_eq!(shuffled(DeckRng::for_deck(5, 3)), shuffled(DeckRng::for_deck(5, 3)));
        assert_eq!(shuffled(DeckRng::for_deck(5, 0)), shuffled(DeckRng::new(Some(5))));
        assert_ne!(shuffled(DeckRng::for_deck(5, 0)), shuffled(DeckRng::for_deck(5, 1)));
        assert_eq!(DeckRng::for_deck(5, 9).seed(), 5);
    }

    #[test]
    fn test_shuffle_is_unbiased_on_small_input() {
        // Each of the 6 permutations of three elements should land near 1/6
        let mut counts = std::collections::HashMap::new();
        let trials = 60_000;
        for seed in 0..trials {
            let mut items = [0u8, 1, 2];
            DeckRng::new(Some(seed)).shuffle(&mut items);
            *counts.entry(items).or_insert(0usize) += 1;
        }

        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            let freq = count as f64 / trials as f64;
            assert!((freq - 1.0 / 6.0).abs() < 0.01, "{:?} appeared with frequency {}", perm, freq);
        }
    }
}
