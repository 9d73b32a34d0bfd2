use crate::core::geometry::Face;
use crate::core::math::vector::{Vec2, Vec3, bounding_box};
use crate::io::tga::TextureError;
use crate::pipeline::presenter::Presenter;
use crate::scene::texture::{Texture, TextureHandle};
use nalgebra::Point3;

/// A triangle mesh with an optional texture.
///
/// The face list is fixed once the mesh is built: lighting passes rewrite face
/// colors in place but never add or remove faces.
#[derive(Debug, Clone)]
pub struct Mesh {
    faces: Vec<Face>,
    pub texture: Option<Texture>,
}

impl Mesh {
    pub fn new(faces: Vec<Face>) -> Self {
        Self {
            faces,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// Axis-aligned bounds of all face positions as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        bounding_box(self.faces.iter().flat_map(|face| face.positions.iter()))
    }

    /// Hands the texture pixels to the presenter and binds the returned handle.
    ///
    /// Returns `Ok(None)` for untextured meshes. The pixel buffer is dropped from
    /// the mesh as part of the transfer.
    pub fn upload_texture<P: Presenter + ?Sized>(
        &mut self,
        presenter: &mut P,
    ) -> Result<Option<TextureHandle>, TextureError> {
        let Some(texture) = self.texture.as_mut() else {
            return Ok(None);
        };

        let handle = presenter.upload_texture(texture.take_upload()?);
        texture.bind(handle);
        Ok(Some(handle))
    }

    /// Creates a single textured triangle facing +Z.
    ///
    /// Vertices are arranged in Counter-Clockwise (CCW) order.
    pub fn create_test_triangle() -> Self {
        let mut face = Face::new([
            Vec3::new(0.0, 0.5, 0.0),   // Top
            Vec3::new(-0.5, -0.5, 0.0), // Bottom Left
            Vec3::new(0.5, -0.5, 0.0),  // Bottom Right
        ]);
        face.tex_coords = Some([
            Vec2::new(0.5, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ]);
        face.normals = Some([Vec3::z(); 3]);

        Self::new(vec![face])
    }
}
