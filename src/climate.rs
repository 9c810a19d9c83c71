//! Moisture derivation from the steady-state water field.

use crate::tilemap::Tilemap;

/// How strongly altitude dries a cell out
const ELEVATION_DRYING: f32 = 0.5;
/// Water depth above which a cell moistens its surroundings
const SPILL_THRESHOLD: f32 = 0.1;
/// Fraction of a wet cell's water contributed to each neighbor
const SPILL_FRACTION: f32 = 0.2;

/// Derive the normalized moisture field from water depth and elevation.
///
/// Base moisture is the cell's water scaled down with altitude. Wet cells
/// then spill onto their 4-neighbors in raster order, on top of the
/// already-scaled base values; a neighbor can accumulate from several
/// sources. Finally the whole field is normalized by its global maximum
/// (an all-dry map stays all-zero rather than dividing by zero).
pub fn derive_moisture(elevation: &Tilemap<f32>, water: &Tilemap<f32>) -> Tilemap<f32> {
    let width = elevation.width;
    let height = elevation.height;

    let mut moisture = Tilemap::new_with(width, height, 0.0f32);
    for y in 0..height {
        for x in 0..width {
            let base = *water.get(x, y) * (1.0 - *elevation.get(x, y) * ELEVATION_DRYING);
            moisture.set(x, y, base);
        }
    }

    for y in 0..height {
        for x in 0..width {
            let w = *water.get(x, y);
            if w > SPILL_THRESHOLD {
                for (nx, ny) in water.neighbors(x, y) {
                    *moisture.get_mut(nx, ny) += w * SPILL_FRACTION;
                }
            }
        }
    }

    let max_moisture = moisture.iter().fold(0.0f32, |acc, (_, _, &m)| acc.max(m));
    if max_moisture > 0.0 {
        for (_, _, m) in moisture.iter_mut() {
            *m /= max_moisture;
        }
    }

    moisture
}
