//! Debug tool: run the hydraulic stage standalone and print diagnostics.

use terragen::erosion::{simulate_water_flow, WaterFlowParams};
use terragen::heightmap::generate_heightmap;
use terragen::noise::PerlinNoise;
use terragen::seeds::WorldSeeds;
use terragen::tilemap::Tilemap;

fn main() {
    let width = 64;
    let height = 64;
    let seed = 0.5;

    let seeds = WorldSeeds::from_master(seed);
    let noise = PerlinNoise::new(seeds.noise);

    let mut elevation = generate_heightmap(&noise, width, height);
    let (before_min, before_max, before_mean) = field_stats(&elevation);
    println!("Raw elevation:    min={before_min:.4} max={before_max:.4} mean={before_mean:.4}");

    let params = WaterFlowParams::default();
    let water = simulate_water_flow(&mut elevation, &params);

    let (after_min, after_max, after_mean) = field_stats(&elevation);
    println!("Eroded elevation: min={after_min:.4} max={after_max:.4} mean={after_mean:.4}");
    println!("Mean change:      {:+.6}", after_mean - before_mean);

    let (w_min, w_max, w_mean) = field_stats(&water);
    println!("Water field:      min={w_min:.4} max={w_max:.4} mean={w_mean:.4}");

    let wet_cells = water.iter().filter(|&(_, _, &w)| w > params.min_water).count();
    println!(
        "Wet cells:        {} / {} ({:.1}%)",
        wet_cells,
        width * height,
        100.0 * wet_cells as f64 / (width * height) as f64
    );
}

fn field_stats(map: &Tilemap<f32>) -> (f32, f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut sum = 0.0f64;
    for (_, _, &v) in map.iter() {
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
    }
    (min, max, (sum / (map.width * map.height) as f64) as f32)
}
