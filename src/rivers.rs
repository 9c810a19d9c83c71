//! River tracing over the eroded height field.
//!
//! High cells become candidate sources; each traced river follows the
//! steepest descent until it bottoms out or reaches open water. Short paths
//! are discarded, accepted paths union into one shared cell set (overlapping
//! rivers simply share cells; there is no merge logic).

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::tilemap::Tilemap;

/// Parameters for river tracing
#[derive(Clone, Debug, PartialEq)]
pub struct RiverParams {
    /// Cells above this elevation are candidate sources
    pub source_min_elevation: f32,
    /// Paths shorter than this are discarded
    pub min_length: usize,
    /// Cap on accepted rivers per map
    pub max_rivers: usize,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            source_min_elevation: 0.7,
            min_length: 10,
            max_rivers: 15,
        }
    }
}

/// Trace rivers from high ground down to open water.
///
/// Source order is shuffled with a stream derived from the world seed, so
/// the traced set is reproducible per seed. `shallow_water_level` is the
/// elevation below which a river has reached the sea.
pub fn trace_rivers(
    elevation: &Tilemap<f32>,
    shallow_water_level: f32,
    params: &RiverParams,
    seed: u64,
) -> HashSet<(usize, usize)> {
    let mut sources: Vec<(usize, usize)> = elevation
        .iter()
        .filter(|&(_, _, &e)| e > params.source_min_elevation)
        .map(|(x, y, _)| (x, y))
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    sources.shuffle(&mut rng);

    let mut rivers = HashSet::new();
    let mut accepted = 0;

    for &(sx, sy) in &sources {
        if accepted >= params.max_rivers {
            break;
        }

        let path = trace_descent(elevation, sx, sy, shallow_water_level);
        if path.len() >= params.min_length {
            rivers.extend(path);
            accepted += 1;
        }
    }

    rivers
}

/// Walk the steepest descent from a source cell.
///
/// Records every visited cell. Stops at a local minimum (no strictly lower
/// neighbor) or just before stepping below the shallow-water level.
fn trace_descent(
    elevation: &Tilemap<f32>,
    sx: usize,
    sy: usize,
    shallow_water_level: f32,
) -> Vec<(usize, usize)> {
    let mut path = vec![(sx, sy)];
    let (mut x, mut y) = (sx, sy);

    loop {
        let current = *elevation.get(x, y);

        let mut next: Option<(usize, usize, f32)> = None;
        for (nx, ny) in elevation.neighbors(x, y) {
            let e = *elevation.get(nx, ny);
            if e < current && next.map_or(true, |(_, _, best)| e < best) {
                next = Some((nx, ny, e));
            }
        }

        match next {
            None => break,
            Some((nx, ny, e)) => {
                if e < shallow_water_level {
                    break;
                }
                x = nx;
                y = ny;
                path.push((x, y));
            }
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 20x1 ramp descending to the right, reaching water near the end.
    fn ramp() -> Tilemap<f32> {
        let mut map = Tilemap::new_with(20, 1, 0.0f32);
        for x in 0..20 {
            map.set(x, 0, 0.9 - 0.05 * x as f32);
        }
        map
    }

    #[test]
    fn test_descent_follows_ramp_and_stops_at_water() {
        let map = ramp();
        let path = trace_descent(&map, 0, 0, 0.075);

        // Walks right until the next step would drop below the water level.
        assert_eq!(path[0], (0, 0));
        assert!(path.len() > 10);
        for &(x, _) in &path {
            assert!(*map.get(x, 0) >= 0.075);
        }
        let &(last_x, _) = path.last().unwrap();
        assert!(*map.get(last_x + 1, 0) < 0.075);
    }

    #[test]
    fn test_descent_stops_at_local_minimum() {
        let mut map = Tilemap::new_with(5, 1, 0.5f32);
        map.set(0, 0, 0.9);
        map.set(1, 0, 0.8);
        map.set(2, 0, 0.4);

        let path = trace_descent(&map, 0, 0, 0.075);
        assert_eq!(path, vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_short_paths_are_discarded() {
        // Single high cell surrounded by a local minimum: path length 1.
        let mut map = Tilemap::new_with(3, 3, 0.9f32);
        map.set(1, 1, 0.95);

        let rivers = trace_rivers(&map, 0.075, &RiverParams::default(), 1);
        assert!(rivers.is_empty());
    }

    #[test]
    fn test_accepted_river_on_ramp() {
        let map = ramp();
        let params = RiverParams::default();

        let rivers = trace_rivers(&map, 0.075, &params, 99);

        assert!(!rivers.is_empty());
        assert!(rivers.len() >= params.min_length);
        for &(x, y) in &rivers {
            assert!(*map.get(x, y) >= 0.075, "river cell below water level");
        }
    }

    #[test]
    fn test_same_seed_same_rivers() {
        let mut map = Tilemap::new_with(24, 24, 0.0f32);
        for (x, y, e) in map.iter_mut() {
            *e = 0.9 - 0.03 * (x + y) as f32;
        }

        let params = RiverParams::default();
        let a = trace_rivers(&map, 0.075, &params, 7);
        let b = trace_rivers(&map, 0.075, &params, 7);
        assert_eq!(a, b);
    }
}
