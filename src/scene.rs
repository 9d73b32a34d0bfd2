pub mod context;
pub mod light;
pub mod lighting;
pub mod loader;
pub mod mesh;
pub mod shading;
pub mod texture;
