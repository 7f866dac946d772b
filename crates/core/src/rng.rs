//! RNG module - uniform random piece selection
//!
//! Every draw picks one of the seven kinds with equal probability, independent
//! of earlier draws. There is no bag, so streaks and droughts are possible.
//! The generator is seeded so a given seed always yields the same sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Seeded source of piece kinds.
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: StdRng,
    seed: u64,
}

impl PieceSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draw the next piece kind.
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}
