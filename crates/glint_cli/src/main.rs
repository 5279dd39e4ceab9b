use anyhow::{Context, Result};
use clap::Parser;
use glint_core::SceneDescription;
use glint_renderer::{
    render, render_parallel, PinholeCamera, Scene, ShadowPolicy, TraceSettings,
    DEFAULT_BUCKET_SIZE,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glint", version, about = "Render a sphere-and-box scene to an image")]
struct Args {
    /// Scene description (JSON); the built-in room is used when omitted
    scene: Option<PathBuf>,

    /// Output image path, format picked from the extension
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Override the image width from the scene description
    #[arg(long)]
    width: Option<u32>,

    /// Override the image height from the scene description
    #[arg(long)]
    height: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Shadow rays per shaded point
    #[arg(short, long, default_value_t = 256)]
    samples: u32,

    /// Let boxes cast shadows and stop skipping same-kind occluders
    #[arg(long)]
    box_shadows: bool,

    /// Render on the calling thread instead of in parallel buckets
    #[arg(long)]
    sequential: bool,

    /// Print the scene description as JSON and exit
    #[arg(long)]
    dump_scene: bool,
}

fn load_description(args: &Args) -> Result<SceneDescription> {
    let mut description = match &args.scene {
        Some(path) => SceneDescription::from_json_file(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in room");
            SceneDescription::default()
        }
    };

    if let Some(width) = args.width {
        description.image.width = width;
    }
    if let Some(height) = args.height {
        description.image.height = height;
    }

    Ok(description)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let description = load_description(&args)?;

    if args.dump_scene {
        println!("{}", description.to_json_string()?);
        return Ok(());
    }

    anyhow::ensure!(
        description.image.width > 0 && description.image.height > 0,
        "Image size must be non-zero, got {}x{}",
        description.image.width,
        description.image.height
    );

    let scene = Scene::from_description(&description).context("Invalid scene description")?;
    let camera = PinholeCamera::from_description(&description);

    let mut settings = TraceSettings {
        seed: args.seed,
        ..Default::default()
    };
    settings.shadows.samples = args.samples;
    if args.box_shadows {
        settings.shadows.policy = ShadowPolicy::ALL;
    }

    let image = if args.sequential {
        render(&scene, &camera, &settings)
    } else {
        render_parallel(&scene, &camera, &settings, DEFAULT_BUCKET_SIZE)
    };

    image
        .to_image()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
