//! Biome classification from elevation and moisture.
//!
//! Two passes: a pure threshold-table lookup per cell, then a
//! neighborhood-influence sweep that clusters look-alike biomes together so
//! the map reads as regions instead of salt-and-pepper speckle.

use crate::noise::PerlinNoise;
use crate::tilemap::Tilemap;

/// Discrete terrain classification per cell.
///
/// `River` is an overlay applied after classification, never a classifier
/// output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Biome {
    DeepWater,
    ShallowWater,
    Grassland,
    Savanna,
    Forest,
    Rainforest,
    Shrubland,
    Woodland,
    AlpineForest,
    BareMountain,
    SnowMountain,
    Peak,
    River,
}

impl Biome {
    pub const COUNT: usize = 13;

    pub const ALL: [Biome; Self::COUNT] = [
        Biome::DeepWater,
        Biome::ShallowWater,
        Biome::Grassland,
        Biome::Savanna,
        Biome::Forest,
        Biome::Rainforest,
        Biome::Shrubland,
        Biome::Woodland,
        Biome::AlpineForest,
        Biome::BareMountain,
        Biome::SnowMountain,
        Biome::Peak,
        Biome::River,
    ];

    /// Stable index into fixed-size per-biome tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as consumers serialize it.
    pub fn name(self) -> &'static str {
        match self {
            Biome::DeepWater => "DEEP_WATER",
            Biome::ShallowWater => "SHALLOW_WATER",
            Biome::Grassland => "GRASSLAND",
            Biome::Savanna => "SAVANNA",
            Biome::Forest => "FOREST",
            Biome::Rainforest => "RAINFOREST",
            Biome::Shrubland => "SHRUBLAND",
            Biome::Woodland => "WOODLAND",
            Biome::AlpineForest => "ALPINE_FOREST",
            Biome::BareMountain => "BARE_MOUNTAIN",
            Biome::SnowMountain => "SNOW_MOUNTAIN",
            Biome::Peak => "PEAK",
            Biome::River => "RIVER",
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, Biome::DeepWater | Biome::ShallowWater)
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Elevation breakpoints, increasing in [0, 1]. Bands are half-open,
/// inclusive-lower.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationThresholds {
    pub deep_water: f32,
    pub shallow_water: f32,
    pub lowland: f32,
    pub highland: f32,
    pub mountain: f32,
}

impl Default for ElevationThresholds {
    fn default() -> Self {
        Self {
            deep_water: 0.05,
            shallow_water: 0.075,
            lowland: 0.4,
            highland: 0.7,
            mountain: 0.9,
        }
    }
}

/// Moisture breakpoints, increasing in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct MoistureThresholds {
    pub dry: f32,
    pub moderate: f32,
    pub wet: f32,
    pub very_wet: f32,
}

impl Default for MoistureThresholds {
    fn default() -> Self {
        Self {
            dry: 0.3,
            moderate: 0.6,
            wet: 0.8,
            very_wet: 1.0,
        }
    }
}

/// Per-biome resistance to neighborhood takeover: a cell of this biome with
/// too few matching neighbors flips when the noise sample exceeds its weight.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceWeights {
    pub grassland: f32,
    pub forest: f32,
    pub woodland: f32,
    pub shrubland: f32,
}

impl Default for InfluenceWeights {
    fn default() -> Self {
        Self {
            grassland: 0.5,
            forest: 0.5,
            woodland: 0.6,
            shrubland: 0.6,
        }
    }
}

impl InfluenceWeights {
    /// Weight for a biome, or None if it is outside the influence subset.
    pub fn weight_for(&self, biome: Biome) -> Option<f32> {
        match biome {
            Biome::Grassland => Some(self.grassland),
            Biome::Forest => Some(self.forest),
            Biome::Woodland => Some(self.woodland),
            Biome::Shrubland => Some(self.shrubland),
            _ => None,
        }
    }
}

/// Noise frequency for the influence sample
const INFLUENCE_SAMPLE_SCALE: f64 = 0.1;
/// Noise frequency for the second, grassland-only sample
const GRASSLAND_SAMPLE_SCALE: f64 = 0.3;
/// Grassland flips to the dominant neighbor above this sample value
const GRASSLAND_SWITCH_THRESHOLD: f32 = 0.3;

/// Pass 1: classify one cell from elevation and moisture.
///
/// Water bands return immediately; land bands sub-branch on moisture.
pub fn classify_base(
    elevation: f32,
    moisture: f32,
    elev: &ElevationThresholds,
    moist: &MoistureThresholds,
) -> Biome {
    if elevation < elev.deep_water {
        return Biome::DeepWater;
    }
    if elevation < elev.shallow_water {
        return Biome::ShallowWater;
    }

    if elevation < elev.lowland {
        if moisture < moist.dry {
            return Biome::Grassland;
        }
        if moisture < moist.moderate {
            return Biome::Savanna;
        }
        if moisture < moist.wet {
            return Biome::Forest;
        }
        return Biome::Rainforest;
    }

    if elevation < elev.highland {
        if moisture < moist.dry {
            return Biome::Shrubland;
        }
        if moisture < moist.wet {
            return Biome::Woodland;
        }
        return Biome::AlpineForest;
    }

    if elevation < elev.mountain {
        if moisture < moist.moderate {
            return Biome::BareMountain;
        }
        return Biome::SnowMountain;
    }

    Biome::Peak
}

/// Pass 1 over the whole map.
pub fn classify(
    elevation: &Tilemap<f32>,
    moisture: &Tilemap<f32>,
    elev: &ElevationThresholds,
    moist: &MoistureThresholds,
) -> Tilemap<Biome> {
    let mut terrain = Tilemap::new_with(elevation.width, elevation.height, Biome::DeepWater);
    for y in 0..elevation.height {
        for x in 0..elevation.width {
            let biome = classify_base(*elevation.get(x, y), *moisture.get(x, y), elev, moist);
            terrain.set(x, y, biome);
        }
    }
    terrain
}

/// Pass 2: neighborhood-influence smoothing, in place.
///
/// A single raster sweep over the classified grid; later cells read
/// already-smoothed earlier cells. Neighbor reads fall back to the cell's own
/// value at the map edge, so a 1x1 map always keeps its base biome.
pub fn smooth_biomes(terrain: &mut Tilemap<Biome>, noise: &PerlinNoise, weights: &InfluenceWeights) {
    let width = terrain.width;
    let height = terrain.height;

    for y in 0..height {
        for x in 0..width {
            let current = *terrain.get(x, y);
            let Some(weight) = weights.weight_for(current) else {
                continue;
            };

            let neighbors = neighbor_biomes(terrain, x, y, current);
            let matching = neighbors.iter().filter(|&&b| b == current).count();

            if current == Biome::Grassland {
                // Grassland clusters aggressively: enough agreement keeps it
                // unconditionally, otherwise it may join the dominant
                // influence biome around it.
                if matching >= 2 {
                    continue;
                }
                let dominant = most_common(
                    neighbors
                        .iter()
                        .copied()
                        .filter(|&b| weights.weight_for(b).is_some()),
                );
                if let Some(winner) = dominant {
                    let sample = noise.sample(
                        x as f64 * GRASSLAND_SAMPLE_SCALE,
                        y as f64 * GRASSLAND_SAMPLE_SCALE,
                    );
                    if sample > GRASSLAND_SWITCH_THRESHOLD {
                        terrain.set(x, y, winner);
                    }
                }
                continue;
            }

            if matching >= 2 {
                continue;
            }
            let sample = noise.sample(
                x as f64 * INFLUENCE_SAMPLE_SCALE,
                y as f64 * INFLUENCE_SAMPLE_SCALE,
            );
            if sample > weight {
                if let Some(winner) = most_common(neighbors.iter().copied()) {
                    if weights.weight_for(winner).is_some() {
                        terrain.set(x, y, winner);
                    }
                }
            }
        }
    }
}

/// The four neighbor biomes, substituting the cell's own biome where the
/// lookup runs off the map.
fn neighbor_biomes(terrain: &Tilemap<Biome>, x: usize, y: usize, fallback: Biome) -> [Biome; 4] {
    let offsets = [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)];
    let mut result = [fallback; 4];

    for (slot, &(dx, dy)) in result.iter_mut().zip(&offsets) {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx >= 0 && nx < terrain.width as i64 && ny >= 0 && ny < terrain.height as i64 {
            *slot = *terrain.get(nx as usize, ny as usize);
        }
    }

    result
}

/// Most frequent biome in the sequence; ties go to the first one seen.
fn most_common(biomes: impl Iterator<Item = Biome>) -> Option<Biome> {
    let mut counts: Vec<(Biome, usize)> = Vec::with_capacity(4);
    for biome in biomes {
        if let Some(entry) = counts.iter_mut().find(|(b, _)| *b == biome) {
            entry.1 += 1;
        } else {
            counts.push((biome, 1));
        }
    }

    let mut best: Option<(Biome, usize)> = None;
    for (biome, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((biome, count));
        }
    }
    best.map(|(biome, _)| biome)
}
