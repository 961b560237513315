//! Pose overlay viewer.

use std::fs;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use pose_overlay::{
    data::{Color, ColorPalette, Light, Material, Model},
    source::{find_annotation, GeometrySource, HandGeometry, ObjFile, PosedHandMesh},
    CliOpt, Renderer,
};

/// Output file name inside the output directory.
const OUTPUT_FILE_NAME: &str = "mow.jpg";

fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("version: {}", env!("CARGO_PKG_VERSION"));

    let opt = CliOpt::parse();
    run(&opt)
}

/// Loads the clip, renders it and stores the result.
fn run(opt: &CliOpt) -> anyhow::Result<()> {
    let anno = find_annotation(&opt.annotations, &opt.clip)?;
    let palette = ColorPalette::default();

    info!("Loading image...");
    let image_path = opt.image_path();
    let photo = image::open(&image_path)
        .with_context(|| format!("Failed to load image {}", image_path.display()))?
        .to_rgb8();
    let (width, height) = photo.dimensions();
    let mut renderer = Renderer::new(width, height);
    renderer.set_light(Light::new([1.0, 0.5, 1.0], 0.3, 0.5)?);
    renderer.set_background_color(Color::new(1.0, 1.0, 1.0));

    info!("Loading object...");
    let object_geometry = ObjFile::new(opt.object_mesh_path())
        .load_geometry()?
        .centered(true);
    let object = Model::new(
        object_geometry,
        anno.object_transform().context("Invalid object pose")?,
        material(&palette, &opt.object_color)?,
    )
    .context("Invalid object mesh")?
    .with_name("object");

    info!("Loading hand...");
    let hand_model = PosedHandMesh::load(&opt.hand_mesh)?;
    let hand_params = anno.hand_params();
    let hand_geometry = HandGeometry::new(&hand_model, &hand_params).load_geometry()?;
    let hand = Model::new(
        hand_geometry,
        anno.hand_transform().context("Invalid hand pose")?,
        material(&palette, &opt.hand_color)?,
    )
    .context("Invalid hand mesh")?
    .with_name("hand");

    info!("Rendering...");
    let frame = renderer.render(&[object, hand], Some(&photo))?;

    match &opt.out_dir {
        Some(out_dir) => {
            fs::create_dir_all(out_dir).with_context(|| {
                format!("Failed to create output directory {}", out_dir.display())
            })?;
            let out_path = out_dir.join(OUTPUT_FILE_NAME);
            frame
                .save(&out_path)
                .with_context(|| format!("Failed to save {}", out_path.display()))?;
            info!("Saved visualization to {}", out_path.display());
        }
        None if !opt.offscreen => {
            warn!("Interactive display is not available; pass --out-dir to save the result")
        }
        None => {}
    }

    Ok(())
}

/// Resolves a palette color, listing the known names on failure.
fn material(palette: &ColorPalette, name: &str) -> anyhow::Result<Material> {
    Material::from_palette(palette, name).with_context(|| {
        format!(
            "Available colors: {}",
            palette.names().collect::<Vec<_>>().join(", ")
        )
    })
}
