use crate::core::geometry::{Face, FaceColors};
use crate::core::math::vector::{Vec2, Vec3};
use crate::scene::shading::ShadingMode;
use crate::scene::texture::{TextureHandle, TextureUpload};

/// The presentation layer: receives texture uploads once and a [`Frame`] per
/// displayed frame.
pub trait Presenter {
    /// Takes ownership of the pixel data and returns the handle to bind it with.
    fn upload_texture(&mut self, upload: TextureUpload) -> TextureHandle;

    fn present(&mut self, frame: &Frame<'_>);
}

/// One lit triangle as seen by the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct ShadedTriangle<'a> {
    pub positions: &'a [Vec3; 3],
    pub tex_coords: Option<&'a [Vec2; 3]>,
    pub colors: FaceColors,
    pub texture: Option<TextureHandle>,
}

impl<'a> ShadedTriangle<'a> {
    pub fn from_face(face: &'a Face, texture: Option<TextureHandle>) -> Self {
        Self {
            positions: &face.positions,
            tex_coords: face.tex_coords.as_ref(),
            colors: face.colors,
            // A handle is only useful with coordinates to sample it at.
            texture: texture.filter(|_| face.tex_coords.is_some()),
        }
    }
}

/// Read-only view of the scene after a lighting pass.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub mode: ShadingMode,
    pub triangles: Vec<ShadedTriangle<'a>>,
}

impl Frame<'_> {
    /// Presenters draw edges only in this mode.
    pub fn is_wireframe(&self) -> bool {
        self.mode == ShadingMode::Wireframe
    }
}
