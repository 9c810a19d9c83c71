//! ASCII rendering of biome maps for terminal debugging.

use crate::biomes::Biome;
use crate::tilemap::Tilemap;

/// Single-character glyph for a biome.
pub fn biome_char(biome: Biome) -> char {
    match biome {
        Biome::DeepWater => '~',
        Biome::ShallowWater => ',',
        Biome::Grassland => '.',
        Biome::Savanna => 's',
        Biome::Forest => 'f',
        Biome::Rainforest => 'F',
        Biome::Shrubland => 'x',
        Biome::Woodland => 'w',
        Biome::AlpineForest => 'A',
        Biome::BareMountain => 'm',
        Biome::SnowMountain => 'M',
        Biome::Peak => '^',
        Biome::River => 'r',
    }
}

/// Render a whole terrain grid, one text row per map row.
pub fn render_map(terrain: &Tilemap<Biome>) -> String {
    let mut out = String::with_capacity((terrain.width + 1) * terrain.height);
    for y in 0..terrain.height {
        for x in 0..terrain.width {
            out.push(biome_char(*terrain.get(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Legend for the map glyphs.
pub fn legend() -> String {
    let mut out = String::from("LEGEND:\n");
    for biome in Biome::ALL {
        out.push_str(&format!("  {} = {}\n", biome_char(biome), biome.name()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for biome in Biome::ALL {
            assert!(seen.insert(biome_char(biome)), "duplicate glyph for {biome}");
        }
    }

    #[test]
    fn test_render_shape() {
        let terrain = Tilemap::new_with(4, 3, Biome::Grassland);
        let rendered = render_map(&terrain);

        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.lines().all(|line| line == "...."));
    }
}
