//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece kind, shuffled with Fisher-Yates, and is
//! drawn from its end until empty, then refilled. A caller-supplied seed
//! drives a small LCG so games are reproducible; without a seed the shuffle
//! uses an entropy-seeded `rand` generator.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::{PieceKind, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};

/// Simple LCG: `state = (a * state + c) mod 2^31`
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed) % LCG_MODULUS,
        }
    }

    /// Advance and return the raw 31-bit state
    pub fn next_u32(&mut self) -> u32 {
        // state < 2^31 and a < 2^31, so the product fits in u64.
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) % LCG_MODULUS;
        self.state as u32
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / LCG_MODULUS as f64
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64) as usize;
            slice.swap(i, j);
        }
    }
}

#[derive(Debug, Clone)]
enum RandomSource {
    Seeded(SimpleRng),
    Entropy(StdRng),
}

impl RandomSource {
    fn shuffle(&mut self, bag: &mut [PieceKind]) {
        match self {
            RandomSource::Seeded(rng) => rng.shuffle(bag),
            RandomSource::Entropy(rng) => bag.shuffle(rng),
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagGenerator {
    /// Remaining pieces of the current bag; drawn from the end.
    bag: ArrayVec<PieceKind, 7>,
    source: RandomSource,
}

impl BagGenerator {
    /// Seeded generator when `seed` is given, entropy-backed otherwise.
    pub fn new(seed: Option<u32>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Reproducible generator driven by the LCG
    pub fn seeded(seed: u32) -> Self {
        Self::with_source(RandomSource::Seeded(SimpleRng::new(seed)))
    }

    /// Non-reproducible generator
    pub fn from_entropy() -> Self {
        Self::with_source(RandomSource::Entropy(StdRng::from_entropy()))
    }

    fn with_source(source: RandomSource) -> Self {
        let mut generator = Self {
            bag: ArrayVec::new(),
            source,
        };
        generator.refill_bag();
        generator
    }

    /// Whether this generator replays the same sequence for the same seed.
    pub fn is_deterministic(&self) -> bool {
        matches!(self.source, RandomSource::Seeded(_))
    }

    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.source.shuffle(&mut self.bag);
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        match self.bag.pop() {
            Some(kind) => kind,
            None => unreachable!("bag refilled with all seven kinds"),
        }
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}
