//! Phrase selection for narrative recommendations
//!
//! Mood recommendations pick one of several equivalent phrasings. The choice
//! goes through [`PhraseChooser`] so the scores and percentages can be tested
//! on their own and so output can be replayed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one option out of a list of phrasings
pub trait PhraseChooser: Send + Sync {
    /// Index in `0..len`; only called with `len > 0`
    fn choose_index(&self, len: usize) -> usize;

    /// Pick one of `options`, or an empty string if there are none
    fn pick<'a>(&self, options: &[&'a str]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        let idx = self.choose_index(options.len()).min(options.len() - 1);
        options[idx]
    }
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl PhraseChooser for RandomChooser {
    fn choose_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Uniform choice from a seeded RNG, for reproducible output
#[derive(Debug)]
pub struct SeededChooser {
    rng: Mutex<StdRng>,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PhraseChooser for SeededChooser {
    fn choose_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..len)
    }
}

/// Replays a fixed sequence of indices, wrapping around at the end
#[derive(Debug)]
pub struct SequenceChooser {
    indices: Vec<usize>,
    position: AtomicUsize,
}

impl SequenceChooser {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            position: AtomicUsize::new(0),
        }
    }

    /// Always picks the first option
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl PhraseChooser for SequenceChooser {
    fn choose_index(&self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let pos = self.position.fetch_add(1, Ordering::SeqCst);
        self.indices[pos % self.indices.len()] % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn test_sequence_chooser_wraps() {
        let chooser = SequenceChooser::new(vec![2, 0]);
        assert_eq!(chooser.pick(&OPTIONS), "c");
        assert_eq!(chooser.pick(&OPTIONS), "a");
        assert_eq!(chooser.pick(&OPTIONS), "c");
    }

    #[test]
    fn test_sequence_chooser_clamps_to_len() {
        let chooser = SequenceChooser::new(vec![5]);
        assert_eq!(chooser.pick(&OPTIONS), "c");
    }

    #[test]
    fn test_pick_empty_options() {
        assert_eq!(SequenceChooser::first().pick(&[]), "");
        assert_eq!(RandomChooser.pick(&[]), "");
    }

    #[test]
    fn test_random_chooser_stays_in_range() {
        for _ in 0..100 {
            assert!(OPTIONS.contains(&RandomChooser.pick(&OPTIONS)));
        }
    }

    #[test]
    fn test_seeded_chooser_is_reproducible() {
        let a = SeededChooser::new(42);
        let b = SeededChooser::new(42);
        let picks_a: Vec<_> = (0..20).map(|_| a.pick(&OPTIONS)).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.pick(&OPTIONS)).collect();
        assert_eq!(picks_a, picks_b);
    }
}
