//! Integration tests for the Penney's Ante simulator
//! Runs the generate -> store -> simulate -> results pipeline end to end

use crate::card::Sequence;
use crate::game::scoring::{score, Variant};
use crate::simulation::deck::{generate_deck, DECK_SIZE};
use crate::simulation::engine::{generate_batch, load_or_run};
use crate::simulation::store::DeckStore;
use crate::simulation::tally::GRID_SIZE;

fn seq(s: &str) -> Sequence {
    s.parse().expect("valid sequence")
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = DeckStore::new(dir.path());

    generate_batch(&store, 500, Some(420), false).expect("generate decks");
    let results = load_or_run(&store, false, false).expect("run simulations");

    assert_eq!(results.decks, 500);
    for variant in Variant::ALL {
        let (wins, ties) = results.grids(variant);
        for o in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                let is_diagonal = o == GRID_SIZE - 1 - column;
                assert_eq!(wins[o][column].is_none(), is_diagonal);
                if let (Some(win), Some(tie)) = (wins[o][column], ties[o][column]) {
                    assert!((0.0..=100.0).contains(&win));
                    assert!(win + tie <= 101.0, "win {} tie {} exceeds 100%", win, tie);
                }
            }
        }
    }
}

#[test]
fn test_color_swap_symmetry_in_results() {
    // Swapping every color maps a pairing onto its mirror; with 26/26 decks the
    // two should be close
    let dir = tempfile::tempdir().expect("temp dir");
    let store = DeckStore::new(dir.path());
    generate_batch(&store, 2000, Some(7), false).expect("generate decks");
    let results = load_or_run(&store, false, false).expect("run simulations");

    let (win, _) = results.lookup(Variant::Tricks, seq("BBR"), seq("RBB")).unwrap();
    let (mirror, _) = results.lookup(Variant::Tricks, seq("RRB"), seq("BRR")).unwrap();
    assert!((win - mirror).abs() <= 6.0, "{} vs {}", win, mirror);
}

#[test]
fn test_every_pairing_scores_a_standard_deck() {
    for seed in 0..20 {
        let deck = generate_deck(Some(seed));
        assert_eq!(deck.len(), DECK_SIZE);

        for a in Sequence::all() {
            for b in Sequence::all().filter(|b| *b != a) {
                let result = score(&deck, a, b).expect("distinct sequences");
                assert!(result.p1_cards + result.p2_cards <= DECK_SIZE as u32);
                assert!(result.p1_tricks + result.p2_tricks <= (DECK_SIZE / 3) as u32);
                assert!(result.p1_cards >= 3 * result.p1_tricks);
                assert!(result.p2_cards >= 3 * result.p2_tricks);
            }
        }
    }
}

#[test]
fn test_same_seed_produces_same_results() {
    let first_dir = tempfile::tempdir().expect("temp dir");
    let second_dir = tempfile::tempdir().expect("temp dir");
    let first_store = DeckStore::new(first_dir.path());
    let second_store = DeckStore::new(second_dir.path());

    generate_batch(&first_store, 100, Some(555), false).expect("generate decks");
    generate_batch(&second_store, 100, Some(555), false).expect("generate decks");

    let first = load_or_run(&first_store, false, false).expect("run simulations");
    let second = load_or_run(&second_store, false, false).expect("run simulations");

    assert_eq!(first.cards, second.cards);
    assert_eq!(first.tricks_ties, second.tricks_ties);
}
