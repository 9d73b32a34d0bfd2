use clap::Parser;
use log::{error, info};
use objshade::app::run_cli;
use objshade::io::config::Config;
use objshade::scene::shading::ShadingMode;
use std::process;

/// Shades an OBJ mesh with a set of colored lights and saves a snapshot.
#[derive(Parser, Debug)]
#[command(name = "objshade", version)]
#[command(about = "Lights an OBJ mesh (optionally TGA-textured) and renders a PNG snapshot")]
struct Cli {
    /// Scene configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Mesh file, overrides [mesh].path
    #[arg(short, long, value_name = "FILE")]
    mesh: Option<String>,

    /// TGA texture, overrides [mesh].texture
    #[arg(short, long, value_name = "FILE")]
    texture: Option<String>,

    /// wireframe, randomcolor, grayscale, flat, smooth or gouraud
    #[arg(short, long, value_name = "MODE")]
    shading: Option<ShadingMode>,

    /// Substitute 0 for malformed numbers instead of failing
    #[arg(long)]
    lenient: bool,

    /// Output image path
    #[arg(short, long, value_name = "PNG")]
    output: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config file: {path}");
                Config::load(path).map_err(|e| e.to_string())?
            }
            None => {
                info!("Using default settings");
                Config::default()
            }
        };

        if let Some(mesh) = self.mesh {
            config.mesh.path = mesh;
        }
        if let Some(texture) = self.texture {
            config.mesh.texture = Some(texture);
        }
        if let Some(shading) = self.shading {
            config.render.shading = shading;
        }
        if self.lenient {
            config.mesh.strict = false;
        }
        if let Some(output) = self.output {
            config.render.output = output;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_cli(&config) {
        error!("{e}");
        process::exit(1);
    }
}
