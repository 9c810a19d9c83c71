//! Water-body validation.
//!
//! Repairs the classified terrain so deep water never touches land: any deep
//! cell exposed to a non-water 4-neighbor is demoted to shallow water, and
//! passes repeat until the grid is stable. Demotion is one-way, so the loop
//! always terminates.

use crate::biomes::Biome;
use crate::tilemap::Tilemap;

/// Demote exposed deep water to shallow water until a fixed point.
/// Returns the number of demoted cells.
pub fn validate_water_bodies(terrain: &mut Tilemap<Biome>) -> usize {
    let mut demoted = 0;

    loop {
        let mut changed = false;

        for y in 0..terrain.height {
            for x in 0..terrain.width {
                if *terrain.get(x, y) != Biome::DeepWater {
                    continue;
                }

                let exposed = terrain
                    .neighbors(x, y)
                    .iter()
                    .any(|&(nx, ny)| !terrain.get(nx, ny).is_water());

                if exposed {
                    terrain.set(x, y, Biome::ShallowWater);
                    demoted += 1;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    demoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposed_deep_water_is_demoted() {
        let mut terrain = Tilemap::from_vec(
            3,
            1,
            vec![Biome::DeepWater, Biome::DeepWater, Biome::Grassland],
        );

        let demoted = validate_water_bodies(&mut terrain);

        assert_eq!(demoted, 1);
        assert_eq!(*terrain.get(0, 0), Biome::DeepWater);
        assert_eq!(*terrain.get(1, 0), Biome::ShallowWater);
        assert_eq!(*terrain.get(2, 0), Biome::Grassland);
    }

    #[test]
    fn test_all_deep_water_is_stable() {
        let mut terrain = Tilemap::new_with(8, 8, Biome::DeepWater);

        let demoted = validate_water_bodies(&mut terrain);

        assert_eq!(demoted, 0);
        for (_, _, &b) in terrain.iter() {
            assert_eq!(b, Biome::DeepWater);
        }
    }

    #[test]
    fn test_postcondition_holds_on_mixed_map() {
        let mut terrain = Tilemap::new_with(6, 6, Biome::DeepWater);
        terrain.set(3, 3, Biome::Peak);
        terrain.set(0, 5, Biome::Forest);

        validate_water_bodies(&mut terrain);

        for (x, y, &biome) in terrain.iter() {
            if biome != Biome::DeepWater {
                continue;
            }
            for (nx, ny) in terrain.neighbors(x, y) {
                assert!(
                    terrain.get(nx, ny).is_water(),
                    "deep water at ({x}, {y}) touches land at ({nx}, {ny})"
                );
            }
        }
    }

    #[test]
    fn test_river_counts_as_land() {
        let mut terrain = Tilemap::from_vec(2, 1, vec![Biome::DeepWater, Biome::River]);

        validate_water_bodies(&mut terrain);

        assert_eq!(*terrain.get(0, 0), Biome::ShallowWater);
    }
}
