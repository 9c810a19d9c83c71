//! JSON export of generated worlds.
//!
//! Mirrors the wire shape consumers of the generator expect: terrain as rows
//! of biome names, the numeric grids as rows of numbers, rivers as [x, y]
//! pairs, plus the seed for reproduction.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::{json, Value};

use crate::tilemap::Tilemap;
use crate::world::WorldData;

/// Serialize a generated world into a JSON value.
pub fn world_to_json(world: &WorldData) -> Value {
    let terrain: Vec<Vec<&str>> = (0..world.height)
        .map(|y| (0..world.width).map(|x| world.terrain.get(x, y).name()).collect())
        .collect();

    // Stable river ordering: the set itself is unordered.
    let mut rivers: Vec<[usize; 2]> = world.rivers.iter().map(|&(x, y)| [x, y]).collect();
    rivers.sort_unstable();

    json!({
        "seed": world.seed,
        "terrain": terrain,
        "elevation": grid_rows(&world.elevation),
        "water": grid_rows(&world.water),
        "moisture": grid_rows(&world.moisture),
        "rivers": rivers,
    })
}

/// Write a generated world as pretty-printed JSON.
pub fn write_json(world: &WorldData, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &world_to_json(world))?;
    Ok(())
}

fn grid_rows(map: &Tilemap<f32>) -> Vec<Vec<f32>> {
    (0..map.height)
        .map(|y| (0..map.width).map(|x| *map.get(x, y)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generate;

    #[test]
    fn test_json_shape() {
        let world = generate(6, 4, Some(0.5)).unwrap();
        let value = world_to_json(&world);

        assert_eq!(value["seed"], 0.5);
        assert_eq!(value["terrain"].as_array().unwrap().len(), 4);
        assert_eq!(value["terrain"][0].as_array().unwrap().len(), 6);
        assert_eq!(value["elevation"].as_array().unwrap().len(), 4);
        assert!(value["rivers"].is_array());
    }

    #[test]
    fn test_terrain_names_are_known_labels() {
        use crate::biomes::Biome;

        let world = generate(8, 8, Some(2.0)).unwrap();
        let value = world_to_json(&world);

        let known: Vec<&str> = Biome::ALL.iter().map(|b| b.name()).collect();
        for row in value["terrain"].as_array().unwrap() {
            for cell in row.as_array().unwrap() {
                assert!(known.contains(&cell.as_str().unwrap()));
            }
        }
    }
}
