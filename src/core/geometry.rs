use crate::core::color::ColorRGB;
use crate::core::math::vector::{Vec2, Vec3, triangle_normal, try_normalize};

/// Colors assigned to a face by the last lighting pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceColors {
    /// One color shared by all three vertices (flat shading).
    Flat(ColorRGB),
    /// One color per vertex, interpolated by the presenter (smooth/Gouraud shading).
    PerVertex([ColorRGB; 3]),
}

impl Default for FaceColors {
    fn default() -> Self {
        FaceColors::Flat(ColorRGB::BLACK)
    }
}

impl FaceColors {
    /// Color of vertex `index` (0..3).
    pub fn vertex(&self, index: usize) -> ColorRGB {
        match self {
            FaceColors::Flat(color) => *color,
            FaceColors::PerVertex(colors) => colors[index],
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, FaceColors::Flat(_))
    }
}

/// A single triangle of a mesh with its resolved vertex attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertex positions p0, p1, p2.
    pub positions: [Vec3; 3],
    /// Texture coordinates t0, t1, t2, when the face record carried them.
    pub tex_coords: Option<[Vec2; 3]>,
    /// Vertex normals n0, n1, n2 as authored (not necessarily unit length).
    pub normals: Option<[Vec3; 3]>,
    pub colors: FaceColors,
}

impl Face {
    pub fn new(positions: [Vec3; 3]) -> Self {
        Self {
            positions,
            tex_coords: None,
            normals: None,
            colors: FaceColors::default(),
        }
    }

    /// Unit normal of the triangle plane, `None` for degenerate triangles.
    pub fn surface_normal(&self) -> Option<Vec3> {
        let [p0, p1, p2] = &self.positions;
        triangle_normal(p0, p1, p2)
    }

    /// Unit-length authored normal of vertex `index`.
    ///
    /// Returns `None` when the face has no normals or the authored normal is zero.
    pub fn vertex_normal(&self, index: usize) -> Option<Vec3> {
        self.normals.and_then(|normals| try_normalize(&normals[index]))
    }

    /// Normal used to light vertex `index`: the authored vertex normal, falling
    /// back to the face's surface normal.
    pub fn shading_normal(&self, index: usize) -> Option<Vec3> {
        self.vertex_normal(index).or_else(|| self.surface_normal())
    }
}
