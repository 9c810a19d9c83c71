//! Elevation synthesis from fractal gradient noise.

use rayon::prelude::*;

use crate::noise::PerlinNoise;
use crate::tilemap::Tilemap;

/// Number of noise octaves
const OCTAVES: u32 = 4;
/// Amplitude decay per octave
const PERSISTENCE: f64 = 0.5;
/// Frequency multiplier per octave
const LACUNARITY: f64 = 2.0;

/// Generate the raw height field: per-cell fractal noise, clamped to [0, 1].
///
/// Coordinates are normalized by the map dimensions so the base octave spans
/// the whole map. Cells are independent, so rows are sampled in parallel.
pub fn generate_heightmap(noise: &PerlinNoise, width: usize, height: usize) -> Tilemap<f32> {
    let data: Vec<f32> = (0..width * height)
        .into_par_iter()
        .map(|i| {
            let x = (i % width) as f64 / width as f64;
            let y = (i / width) as f64 / height as f64;
            noise
                .fractal(x, y, OCTAVES, PERSISTENCE, LACUNARITY)
                .clamp(0.0, 1.0)
        })
        .collect();

    Tilemap::from_vec(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_match_request() {
        let noise = PerlinNoise::new(9);
        let map = generate_heightmap(&noise, 13, 7);
        assert_eq!(map.width, 13);
        assert_eq!(map.height, 7);
    }

    #[test]
    fn test_values_in_unit_range() {
        let noise = PerlinNoise::new(9);
        let map = generate_heightmap(&noise, 32, 32);
        for (_, _, &e) in map.iter() {
            assert!((0.0..=1.0).contains(&e));
        }
    }

    #[test]
    fn test_same_seed_same_heightmap() {
        let a = generate_heightmap(&PerlinNoise::new(33), 16, 16);
        let b = generate_heightmap(&PerlinNoise::new(33), 16, 16);
        assert_eq!(a, b);
    }
}
