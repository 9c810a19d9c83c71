//! Seeded gradient noise for terrain synthesis.
//!
//! Classic permutation-table lattice noise: integer lattice coordinates are
//! hashed through a seed-shuffled permutation, corner gradients are blended
//! with the quintic fade curve. Identical seed, identical field.
//!
//! Contract: `sample` returns values in [0, 1]; every consumer in the crate
//! (elevation synthesis, biome influence sampling) assumes that range.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded 2D gradient noise source.
pub struct PerlinNoise {
    /// Permutation of [0, 256) duplicated to 512 to avoid index wrapping.
    p: [u8; 512],
}

impl PerlinNoise {
    /// Build the permutation table with a Fisher-Yates shuffle driven by an
    /// independent seeded stream (not by the noise function itself).
    pub fn new(seed: u64) -> Self {
        let mut permutation: Vec<u8> = (0..=255).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        permutation.shuffle(&mut rng);

        let mut p = [0u8; 512];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = permutation[i & 255];
        }

        Self { p }
    }

    /// Sample the noise field at (x, y). Returns a value in [0, 1].
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        // Hash the four lattice corners through the permutation.
        let a = self.p[xi] as usize + yi;
        let b = self.p[xi + 1] as usize + yi;

        let n00 = grad(self.p[a], xf, yf);
        let n10 = grad(self.p[b], xf - 1.0, yf);
        let n01 = grad(self.p[a + 1], xf, yf - 1.0);
        let n11 = grad(self.p[b + 1], xf - 1.0, yf - 1.0);

        let value = lerp(v, lerp(u, n00, n10), lerp(u, n01, n11));

        // Raw lattice value is signed; remap onto the [0, 1] contract.
        (((value + 1.0) * 0.5).clamp(0.0, 1.0)) as f32
    }

    /// Multi-octave fractal sum, normalized back into the range of a single
    /// sample regardless of octave count.
    pub fn fractal(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> f32 {
        debug_assert!(octaves > 0);

        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) as f64 * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        (total / max_value) as f32
    }
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Corner gradient from the classic 16-case hash (the z = 0 plane of the
/// reference 3D scheme).
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
