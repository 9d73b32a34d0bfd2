use crate::core::math::vector::Vec3;
use crate::io::config::Config;
use crate::io::tga::TextureError;
use crate::pipeline::snapshot::SnapshotPresenter;
use crate::scene::loader::{SceneError, build_scene};
use log::info;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error("failed to save snapshot: {0}")]
    Save(#[from] image::ImageError),
}

/// Runs the application headless: builds the scene, lights it once and saves
/// the presented frame.
pub fn run_cli(config: &Config) -> Result<(), AppError> {
    info!("Starting CLI mode...");
    let start_time = Instant::now();

    let mut scene = build_scene(config)?;

    let mut presenter = SnapshotPresenter::new(config.render.width, config.render.height)
        .with_camera(Vec3::from(config.camera.offset), config.camera.rotation_y);
    let uploaded = scene.upload_textures(&mut presenter)?;
    if uploaded > 0 {
        info!("Uploaded {uploaded} texture(s).");
    }

    let mode = config.render.shading;
    info!("Shading mode: {mode}");
    scene.present(mode, &mut presenter);

    info!("Render completed in {:.2?}", start_time.elapsed());

    info!("Saving output to '{}'...", config.render.output);
    presenter.save(&config.render.output)?;
    info!("Done.");
    Ok(())
}
