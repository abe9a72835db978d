use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use otk_obj::{IndexFormat, LoadOptions};

/// Load a Wavefront OBJ file and print a summary of its contents.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the .obj file.
    path: PathBuf,

    /// Force 32-bit indices instead of auto-narrowing.
    #[arg(long)]
    index32: bool,

    /// Also print every object and its meshes.
    #[arg(long)]
    verbose: bool,
}

fn main() -> eyre::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = LoadOptions {
        index_format: if args.index32 {
            IndexFormat::U32
        } else {
            IndexFormat::Auto
        },
        ..Default::default()
    };

    println!("Loading '{}'", args.path.display());
    let start = Instant::now();
    let model = otk_obj::load_with(&args.path, &options)?;
    println!(
        "{:.3} milliseconds elapsed",
        start.elapsed().as_secs_f64() * 1000.0
    );

    println!("{} objects", model.objects().len());
    println!("{} materials", model.materials().len());
    println!("{} meshes", model.meshes().len());
    println!("{} vertices", model.vertices().count());
    println!("{} triangles", model.num_triangles());

    if args.verbose {
        for object in model.objects() {
            println!("Object: '{}'", object.name);
            let meshes = &model.meshes()
                [object.first_mesh as usize..(object.first_mesh + object.num_meshes) as usize];
            for mesh in meshes {
                let material = usize::try_from(mesh.material_index)
                    .map(|at| model.materials()[at].name.as_str())
                    .unwrap_or("<none>");
                println!("   '{material}' material, {} indices", mesh.num_indices);
            }
        }
    }
    Ok(())
}
