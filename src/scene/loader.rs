use crate::io::config::Config;
use crate::io::obj_loader::{ObjError, load_obj_with_options};
use crate::io::tga::TextureError;
use crate::scene::context::Scene;
use crate::scene::texture::Texture;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Mesh(#[from] ObjError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Initial resource loading. Any unreadable or malformed input aborts.
pub fn build_scene(config: &Config) -> Result<Scene, SceneError> {
    let mut mesh = load_obj_with_options(&config.mesh.path, &config.mesh.load_options())?;

    if let Some((min, max)) = mesh.bounds() {
        info!(
            "Model bounds: min ({:.3}, {:.3}, {:.3}), max ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    if let Some(path) = &config.mesh.texture {
        mesh = mesh.with_texture(Texture::load(path)?);
    }

    let mut scene = Scene::new(config.lights()).with_seed(config.render.seed);
    scene.add_mesh(mesh);

    info!(
        "Scene initialized with {} face(s) and {} light(s).",
        scene.face_count(),
        scene.lights().len()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tga::fixtures;
    use std::fs;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";

    fn config_for(dir: &tempfile::TempDir, obj: &str, texture: Option<&[u8]>) -> Config {
        let mesh_path = dir.path().join("mesh.obj");
        fs::write(&mesh_path, obj).unwrap();

        let mut config = Config::default();
        config.mesh.path = mesh_path.to_string_lossy().into_owned();
        if let Some(bytes) = texture {
            let tex_path = dir.path().join("mesh.tga");
            fs::write(&tex_path, bytes).unwrap();
            config.mesh.texture = Some(tex_path.to_string_lossy().into_owned());
        }
        config
    }

    #[test]
    fn builds_textured_scene_with_configured_lights() {
        let dir = tempfile::tempdir().unwrap();
        let tga = fixtures::uncompressed_rgb(1, 1, &[[10, 20, 30]]);
        let config = config_for(&dir, TRIANGLE, Some(&tga));

        let scene = build_scene(&config).unwrap();
        assert_eq!(scene.face_count(), 1);
        assert_eq!(scene.lights().len(), 3);
        let texture = scene.meshes()[0].texture.as_ref().unwrap();
        assert_eq!(texture.pixels(), Some(&[10, 20, 30][..]));
    }

    #[test]
    fn missing_mesh_is_fatal() {
        let mut config = Config::default();
        config.mesh.path = "/no/such/mesh.obj".to_string();
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::Mesh(ObjError::Io { .. }))
        ));
    }

    #[test]
    fn missing_texture_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(&dir, TRIANGLE, None);
        config.mesh.texture = Some(dir.path().join("absent.tga").to_string_lossy().into_owned());
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::Texture(TextureError::Io { .. }))
        ));
    }

    #[test]
    fn lenient_mesh_setting_reaches_the_parser() {
        let dir = tempfile::tempdir().unwrap();
        let obj = "v 0 0 zero\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

        let mut config = config_for(&dir, obj, None);
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::Mesh(ObjError::InvalidNumber { line: 1, .. }))
        ));

        config.mesh.strict = false;
        assert_eq!(build_scene(&config).unwrap().face_count(), 1);
    }
}
