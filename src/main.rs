use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{ error, info };

use phong_ray_tracer::consts::{ NUM_THREADS, OUT_FILE };
use phong_ray_tracer::description::SceneSetup;
use phong_ray_tracer::demo::demo_scene;
use phong_ray_tracer::parallel::parallel_render;
use phong_ray_tracer::canvas::Canvas;
use phong_ray_tracer::error::RenderError;

/// Renders spheres and planes with Phong shading and hard shadows.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct AppArguments {
    /// JSON scene description; the built-in scene is used when omitted
    #[clap(long, parse(from_os_str))]
    scene: Option<PathBuf>,

    /// Output image path
    #[clap(long, parse(from_os_str), default_value = OUT_FILE)]
    output: PathBuf,

    /// Canvas width, overriding the scene description
    #[clap(long)]
    width: Option<usize>,

    /// Canvas height, overriding the scene description
    #[clap(long)]
    height: Option<usize>,

    /// Worker threads used for rendering
    #[clap(long, default_value_t = NUM_THREADS)]
    threads: usize,

    /// Render on the main thread only
    #[clap(long)]
    serial: bool,
}

fn run(args: &AppArguments) -> Result<(), RenderError> {
    let mut setup = match &args.scene {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            SceneSetup::load(path)?
        },
        None => {
            info!("Using the built-in scene");
            demo_scene()?
        },
    };

    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or(setup.camera.hsize);
        let height = args.height.unwrap_or(setup.camera.vsize);
        setup = setup.resized(width, height)?;
    }

    let started = Instant::now();
    let rays = setup.camera.rays();
    info!("Generated {}x{} rays in {:.2?}", setup.camera.hsize,
        setup.camera.vsize, started.elapsed());

    let grid = if args.serial {
        let started = Instant::now();
        let grid = setup.scene.render(&rays);
        info!("Rendered serially in {:.2?}", started.elapsed());
        grid
    } else {
        parallel_render(&setup.scene, &rays, args.threads)?
    };

    let canvas = Canvas::from_grid(grid)?;
    canvas.save(&args.output)?;
    info!("Saved {}", args.output.display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = AppArguments::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
