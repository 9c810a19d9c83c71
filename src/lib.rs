//! Procedural 2D world map generation.
//!
//! One seed in, one world out: fractal-noise elevation, hydraulic erosion,
//! moisture derivation, biome classification with neighborhood smoothing,
//! river tracing and water-body validation.

pub mod ascii;
pub mod biomes;
pub mod climate;
pub mod erosion;
pub mod export;
pub mod heightmap;
pub mod noise;
pub mod rivers;
pub mod seeds;
pub mod tilemap;
pub mod water_bodies;
pub mod world;

pub use biomes::Biome;
pub use tilemap::Tilemap;
pub use world::{generate, terrain_stats, TerrainStats, WorldData, WorldGenError};
