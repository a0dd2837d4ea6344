use anyhow::{Context, Result};
use clap::Parser;

use rt_core::{load_scene, SceneDescription};
use rt_renderer::{render, render_parallel, Camera, RenderConfig, Scene};

mod cli;

use cli::Args;

/// Apply command line overrides to the scene's render settings.
fn apply_overrides(description: &mut SceneDescription, args: &Args) {
    let camera = &mut description.render.camera;
    if let Some(width) = args.width {
        camera.width = width;
    }
    if let Some(height) = args.height {
        camera.height = height;
    }
    if let Some(output) = &args.output {
        description.render.output = output.display().to_string();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting RT");

    let mut description = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            SceneDescription::demo()
        }
    };
    apply_overrides(&mut description, &args);

    let scene = Scene::from_description(&description).context("Invalid scene")?;
    let camera = Camera::from_settings(&description.render.camera).context("Invalid camera")?;
    let config = RenderConfig {
        background: description.render.background,
        bucket_size: args.bucket_size,
    };

    let image = if args.single_threaded {
        render(&camera, &scene, &config)
    } else {
        if let Some(threads) = args.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to configure thread pool")?;
        }
        render_parallel(&camera, &scene, &config)
    };

    let output = &description.render.output;
    image
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output))?;

    Ok(())
}
