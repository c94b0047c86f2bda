//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm.
//! Each bag contains one of each piece (I, Z, S, O, T, L, J), shuffled.
//! Draws from the bag until empty, then shuffles a new bag.
//!
//! The bag only needs a shuffling capability, expressed as the [`Shuffle`]
//! trait. [`SimpleRng`] is the default, seeded implementation.

use crate::types::PieceKind;

/// Anything that can uniformly permute a bag of pieces
pub trait Shuffle {
    fn shuffle(&mut self, bag: &mut [PieceKind]);
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle_slice<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Shuffle for SimpleRng {
    fn shuffle(&mut self, bag: &mut [PieceKind]) {
        self.shuffle_slice(bag);
    }
}

/// 7-bag piece sequencer
#[derive(Debug, Clone)]
pub struct PieceBag<R = SimpleRng> {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index of the next piece to hand out
    cursor: usize,
    /// Source of shuffles
    rng: R,
}

impl PieceBag<SimpleRng> {
    /// Create a new bag sequence with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: Shuffle> PieceBag<R> {
    /// Create a bag sequence driven by `rng`; the first bag is shuffled immediately
    pub fn with_rng(rng: R) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            cursor: 0,
            rng,
        };
        bag.refill();
        bag
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Draw the next piece, starting a new bag when the current one runs out
    pub fn draw(&mut self) -> PieceKind {
        if self.cursor >= self.bag.len() {
            self.refill();
        }
        let piece = self.bag[self.cursor];
        self.cursor += 1;
        piece
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl<R: Shuffle + Clone> PieceBag<R> {
    /// The piece the next `draw()` will return, without consuming it
    ///
    /// When the bag is exhausted the next bag is previewed on a copy of the
    /// RNG, so the preview agrees with the following draw.
    pub fn peek(&self) -> PieceKind {
        if let Some(&piece) = self.remaining().first() {
            return piece;
        }
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }
}

impl<R: Shuffle> Iterator for PieceBag<R> {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

impl Default for PieceBag<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Leaves every bag in identity order
    #[derive(Debug, Clone, Default)]
    struct NoShuffle {
        calls: usize,
    }

    impl Shuffle for NoShuffle {
        fn shuffle(&mut self, _bag: &mut [PieceKind]) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);
        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort_by_key(|k| k.index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_bag_shuffles_once_per_cycle() {
        let mut bag = PieceBag::with_rng(NoShuffle::default());
        assert_eq!(bag.rng().calls, 1);

        let first: Vec<PieceKind> = bag.by_ref().take(7).collect();
        assert_eq!(first, PieceKind::ALL.to_vec());
        assert_eq!(bag.rng().calls, 1);
        assert!(bag.remaining().is_empty());

        assert_eq!(bag.draw(), PieceKind::I);
        assert_eq!(bag.rng().calls, 2);
    }

    #[test]
    fn test_peek_matches_draw() {
        let mut bag = PieceBag::new(7);
        for _ in 0..30 {
            let peeked = bag.peek();
            assert_eq!(peeked, bag.draw());
        }
    }

    #[test]
    fn test_seven_hundred_draws_are_balanced() {
        let bag = PieceBag::new(2024);
        let draws: Vec<PieceKind> = bag.take(700).collect();

        let mut counts = [0usize; 7];
        for kind in &draws {
            counts[kind.index()] += 1;
        }
        assert_eq!(counts, [100; 7]);

        for window in draws.chunks(7) {
            let mut sorted = window.to_vec();
            sorted.sort_by_key(|k| k.index());
            assert_eq!(sorted, PieceKind::ALL.to_vec());
        }
    }
}
