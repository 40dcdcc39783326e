//! RNG module - seeded piece and tile-value generation.
//!
//! A simple LCG keeps games reproducible from a seed; the generator picks
//! one of the seven shapes uniformly and assigns each tile a starting
//! value of 2 or 4 (one in ten), as in 2048.

use crate::core::tile::Tile;
use crate::types::PieceKind;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Seeded source of new pieces.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick the next shape uniformly from the seven kinds.
    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }

    /// Starting value for a freshly spawned tile: 2, or 4 one time in ten.
    pub fn next_tile(&mut self) -> Tile {
        if self.rng.next_range(10) == 0 {
            Tile::new(4)
        } else {
            Tile::new(2)
        }
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn generator_produces_all_kinds_eventually() {
        let mut generator = PieceGenerator::new(7);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let kind = generator.next_kind();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 7, "all seven kinds should appear");
    }

    #[test]
    fn tile_values_are_two_or_four() {
        let mut generator = PieceGenerator::new(99);
        let mut saw_two = false;
        let mut saw_four = false;
        for _ in 0..500 {
            match generator.next_tile().number() {
                2 => saw_two = true,
                4 => saw_four = true,
                other => panic!("unexpected spawn value {other}"),
            }
        }
        assert!(saw_two);
        assert!(saw_four);
    }
}
