use crate::core::math::vector::Vec3;
use crate::io::obj_loader::ObjLoadOptions;
use crate::scene::light::{Light, default_lights};
use crate::scene::shading::ShadingMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default = "default_light_configs")]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mesh: MeshConfig::default(),
            lights: default_light_configs(),
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_mesh_path")]
    pub path: String,
    #[serde(default)]
    pub texture: Option<String>,
    /// Fail on malformed numbers instead of substituting zero.
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: default_mesh_path(),
            texture: None,
            strict: true,
        }
    }
}

impl MeshConfig {
    pub fn load_options(&self) -> ObjLoadOptions {
        ObjLoadOptions {
            strict: self.strict,
        }
    }
}

fn default_mesh_path() -> String {
    "wavefront_objs/head/model.obj".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LightConfig {
    /// 0-255 per channel.
    pub color: [f32; 3],
    pub position: [f64; 3],
}

impl From<LightConfig> for Light {
    fn from(config: LightConfig) -> Self {
        Light::new(config.color.into(), Vec3::from(config.position))
    }
}

impl From<&Light> for LightConfig {
    fn from(light: &Light) -> Self {
        Self {
            color: [light.color.red, light.color.green, light.color.blue],
            position: [light.position.x, light.position.y, light.position.z],
        }
    }
}

fn default_light_configs() -> Vec<LightConfig> {
    default_lights().iter().map(LightConfig::from).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub shading: ShadingMode,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    /// Seed for the random-color mode.
    #[serde(default)]
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingMode::default(),
            width: default_width(),
            height: default_height(),
            output: default_output(),
            seed: 0,
        }
    }
}

fn default_width() -> usize {
    700
}
fn default_height() -> usize {
    700
}
fn default_output() -> String {
    "snapshot.png".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub offset: [f64; 3],
    /// Degrees around the Y axis.
    #[serde(default = "default_rotation_y")]
    pub rotation_y: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0; 3],
            rotation_y: default_rotation_y(),
        }
    }
}

fn default_rotation_y() -> f64 {
    180.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn lights(&self) -> Vec<Light> {
        self.lights.iter().copied().map(Light::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.mesh.path, "wavefront_objs/head/model.obj");
        assert!(config.mesh.strict);
        assert_eq!(config.render.shading, ShadingMode::Flat);
        assert_eq!((config.render.width, config.render.height), (700, 700));
        assert_eq!(config.camera.rotation_y, 180.0);
        assert_eq!(config.lights(), default_lights());
    }

    #[test]
    fn parses_every_section() {
        let config = Config::from_toml_str(
            r#"
            [mesh]
            path = "cube.obj"
            texture = "cube.tga"
            strict = false

            [[lights]]
            color = [255.0, 128.0, 0.0]
            position = [0.0, 0.0, 2.0]

            [render]
            shading = "gouraud"
            width = 64
            height = 32
            output = "out.png"
            seed = 9

            [camera]
            offset = [0.0, 0.0, -0.5]
            rotation_y = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.mesh.texture.as_deref(), Some("cube.tga"));
        assert!(!config.mesh.load_options().strict);
        assert_eq!(
            config.lights(),
            vec![Light::from_rgb(255.0, 128.0, 0.0, Vec3::new(0.0, 0.0, 2.0))]
        );
        assert_eq!(config.render.shading, ShadingMode::Gouraud);
        assert_eq!(config.render.seed, 9);
        assert_eq!(config.camera.offset, [0.0, 0.0, -0.5]);
    }

    #[test]
    fn explicit_empty_light_list_is_kept() {
        let config = Config::from_toml_str("lights = []").unwrap();
        assert!(config.lights().is_empty());
    }

    #[test]
    fn unknown_shading_mode_is_a_parse_error() {
        let err = Config::from_toml_str("[render]\nshading = \"phong\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nshading = \"smooth\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.render.shading, ShadingMode::Smooth);

        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
