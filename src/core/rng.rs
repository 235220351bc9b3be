// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

/// 64-bit LCG. Each render worker owns one; nothing is shared between threads.
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator for one scanline. The stream depends only on the base seed
    /// and the row, never on which worker claimed the row.
    pub fn for_scanline(seed: u64, row: usize) -> Self {
        Self::new(splitmix64(seed ^ splitmix64(row as u64)))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> Float {
        ((self.next_u32() >> 8) as Float) * (1.0 / (1u32 << 24) as Float)
    }

    pub fn next_2d(&mut self) -> Vector2f {
        let u = self.next_f32();
        let v = self.next_f32();
        Vector2f::new(u, v)
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
