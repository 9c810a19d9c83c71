use clap::Parser;

use terragen::{ascii, export, world};

#[derive(Parser, Debug)]
#[command(name = "terragen")]
#[command(about = "Generate procedural 2D world maps")]
struct Args {
    /// Width of the map in cells
    #[arg(short = 'W', long, default_value = "100")]
    width: usize,

    /// Height of the map in cells
    #[arg(short = 'H', long, default_value = "100")]
    height: usize,

    /// Generation seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<f64>,

    /// Print an ASCII preview of the biome map
    #[arg(long)]
    ascii: bool,

    /// Write the generated world as JSON to this path
    #[arg(long)]
    export: Option<String>,
}

fn main() {
    let args = Args::parse();

    println!("Generating world: {}x{}", args.width, args.height);
    let world = match world::generate(args.width, args.height, args.seed) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Seed: {}", world.seed);
    println!("River cells: {}", world.rivers.len());

    let stats = world::terrain_stats(&world.terrain);
    println!("Terrain distribution:");
    for (biome, pct) in stats.iter().filter(|&(_, pct)| pct > 0.0) {
        println!("  {:<14} {:>5.1}%", biome.name(), pct);
    }

    if args.ascii {
        println!("{}", ascii::legend());
        print!("{}", ascii::render_map(&world.terrain));
    }

    if let Some(path) = args.export {
        match export::write_json(&world, &path) {
            Ok(()) => println!("Wrote {path}"),
            Err(e) => {
                eprintln!("Export failed: {e}");
                std::process::exit(1);
            }
        }
    }
}
