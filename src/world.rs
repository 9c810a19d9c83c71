//! World generation pipeline and result bundle.
//!
//! `generate` is the sole entry point: elevation synthesis, hydraulic
//! erosion, moisture derivation, biome classification, river tracing and
//! water-body validation, in that order. Every call owns its own grids; the
//! only seed-derived state is the noise table built for the call.

use std::collections::HashSet;
use std::fmt;

use crate::biomes::{self, Biome, ElevationThresholds, InfluenceWeights, MoistureThresholds};
use crate::climate;
use crate::erosion::{self, WaterFlowParams};
use crate::heightmap;
use crate::noise::PerlinNoise;
use crate::rivers::{self, RiverParams};
use crate::seeds::WorldSeeds;
use crate::tilemap::Tilemap;
use crate::water_bodies;

/// All generated world data bundled together
#[derive(Clone, Debug)]
pub struct WorldData {
    /// Seed used for generation (allows recreation)
    pub seed: f64,
    /// Map width in cells
    pub width: usize,
    /// Map height in cells
    pub height: usize,
    /// Biome label per cell, including the river overlay
    pub terrain: Tilemap<Biome>,
    /// Eroded elevation map (0.0-1.0)
    pub elevation: Tilemap<f32>,
    /// Steady-state water depth per cell
    pub water: Tilemap<f32>,
    /// Normalized moisture map (0.0-1.0)
    pub moisture: Tilemap<f32>,
    /// Cells covered by traced rivers
    pub rivers: HashSet<(usize, usize)>,
}

/// Errors a generation call can fail with
#[derive(Clone, Debug, PartialEq)]
pub enum WorldGenError {
    /// Requested dimensions include a zero side
    InvalidDimensions { width: usize, height: usize },
    /// The provided seed is NaN or infinite
    InvalidSeed(f64),
}

impl fmt::Display for WorldGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldGenError::InvalidDimensions { width, height } => {
                write!(f, "invalid map dimensions {width}x{height}")
            }
            WorldGenError::InvalidSeed(seed) => write!(f, "seed must be finite, got {seed}"),
        }
    }
}

impl std::error::Error for WorldGenError {}

/// Tunable knobs for every pipeline stage
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationParams {
    pub elevation_thresholds: ElevationThresholds,
    pub moisture_thresholds: MoistureThresholds,
    pub influence: InfluenceWeights,
    pub water_flow: WaterFlowParams,
    pub rivers: RiverParams,
}

/// Generate a complete world with default parameters.
///
/// Dimensions must be at least 1x1. A missing seed is drawn at random and
/// reported back in the result so the caller can reproduce the world.
pub fn generate(
    width: usize,
    height: usize,
    seed: Option<f64>,
) -> Result<WorldData, WorldGenError> {
    generate_with_params(width, height, seed, &GenerationParams::default())
}

/// Generate a complete world with explicit parameters.
pub fn generate_with_params(
    width: usize,
    height: usize,
    seed: Option<f64>,
    params: &GenerationParams,
) -> Result<WorldData, WorldGenError> {
    if width == 0 || height == 0 {
        return Err(WorldGenError::InvalidDimensions { width, height });
    }
    let seed = match seed {
        Some(s) if !s.is_finite() => return Err(WorldGenError::InvalidSeed(s)),
        Some(s) => s,
        None => rand::random(),
    };

    let seeds = WorldSeeds::from_master(seed);
    let noise = PerlinNoise::new(seeds.noise);

    let mut elevation = heightmap::generate_heightmap(&noise, width, height);
    let water = erosion::simulate_water_flow(&mut elevation, &params.water_flow);
    let moisture = climate::derive_moisture(&elevation, &water);

    let mut terrain = biomes::classify(
        &elevation,
        &moisture,
        &params.elevation_thresholds,
        &params.moisture_thresholds,
    );
    biomes::smooth_biomes(&mut terrain, &noise, &params.influence);

    let rivers = rivers::trace_rivers(
        &elevation,
        params.elevation_thresholds.shallow_water,
        &params.rivers,
        seeds.rivers,
    );
    for &(x, y) in &rivers {
        terrain.set(x, y, Biome::River);
    }

    water_bodies::validate_water_bodies(&mut terrain);

    Ok(WorldData {
        seed,
        width,
        height,
        terrain,
        elevation,
        water,
        moisture,
        rivers,
    })
}

/// Per-biome share of the map, in percent of total cells.
///
/// Keyed by the closed `Biome` enumeration (fixed-size table, not an open
/// string map); biomes absent from the map report 0.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainStats {
    percentages: [f32; Biome::COUNT],
}

impl TerrainStats {
    pub fn get(&self, biome: Biome) -> f32 {
        self.percentages[biome.index()]
    }

    /// Iterate all biomes with their percentages, in enum order.
    pub fn iter(&self) -> impl Iterator<Item = (Biome, f32)> + '_ {
        Biome::ALL.iter().map(|&b| (b, self.percentages[b.index()]))
    }

    pub fn total(&self) -> f32 {
        self.percentages.iter().sum()
    }
}

impl fmt::Display for TerrainStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (biome, pct) in self.iter().filter(|&(_, pct)| pct > 0.0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {pct:.1}%", biome.name())?;
            first = false;
        }
        Ok(())
    }
}

/// Compute the biome distribution of a terrain grid.
pub fn terrain_stats(terrain: &Tilemap<Biome>) -> TerrainStats {
    let mut counts = [0usize; Biome::COUNT];
    for (_, _, &biome) in terrain.iter() {
        counts[biome.index()] += 1;
    }

    let total = (terrain.width * terrain.height) as f32;
    let mut percentages = [0.0f32; Biome::COUNT];
    for (slot, count) in percentages.iter_mut().zip(counts) {
        *slot = count as f32 / total * 100.0;
    }

    TerrainStats { percentages }
}
