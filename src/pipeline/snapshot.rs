use crate::core::color::ColorRGB;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::FaceColors;
use crate::core::math::interpolation::{barycentric_coordinates, is_inside_triangle, line_pixels};
use crate::core::math::transform::{TransformFactory, ndc_to_screen, transform_point};
use crate::core::math::vector::{Vec2, Vec3};
use crate::io::image::save_framebuffer;
use crate::pipeline::presenter::{Frame, Presenter, ShadedTriangle};
use crate::scene::texture::{RowOrder, TextureHandle, TextureUpload};
use log::{debug, warn};
use nalgebra::{Matrix4, Point2};
use std::path::Path;

/// Software presenter that renders frames into a [`FrameBuffer`] for saving.
///
/// Projection is orthographic: after the camera transform, x and y in [-1, 1]
/// cover the viewport and larger z is closer to the viewer.
pub struct SnapshotPresenter {
    framebuffer: FrameBuffer,
    camera: Matrix4<f64>,
    textures: Vec<TextureUpload>,
}

impl SnapshotPresenter {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            camera: Matrix4::identity(),
            textures: Vec::new(),
        }
    }

    /// Moves the model by `offset` after rotating it `rotation_y_deg` degrees about Y.
    pub fn with_camera(mut self, offset: Vec3, rotation_y_deg: f64) -> Self {
        self.camera = TransformFactory::camera(&offset, rotation_y_deg.to_radians());
        self
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        save_framebuffer(&self.framebuffer, path)
    }

    fn to_screen(&self, p: &Vec3) -> (Point2<f64>, f64) {
        let view = transform_point(&self.camera, p);
        let screen = ndc_to_screen(
            view.x,
            view.y,
            self.framebuffer.width as f64,
            self.framebuffer.height as f64,
        );
        (screen, -view.z)
    }

    fn draw_edges(&mut self, screen: &[Point2<f64>; 3], triangle: &ShadedTriangle<'_>) {
        for i in 0..3 {
            let j = (i + 1) % 3;
            let color = triangle.colors.vertex(i).clamped();
            for (x, y) in line_pixels(screen[i], screen[j]) {
                self.framebuffer.set_pixel(x, y, color);
            }
        }
    }

    fn fill(&mut self, screen: &[Point2<f64>; 3], depths: &[f64; 3], triangle: &ShadedTriangle<'_>) {
        let width = self.framebuffer.width as f64;
        let height = self.framebuffer.height as f64;

        let min_x = screen.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).max(0.0);
        let max_x = screen.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).min(width - 1.0);
        let min_y = screen.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).max(0.0);
        let max_y = screen.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).min(height - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let texture = triangle
            .texture
            .and_then(|handle| self.textures.get(handle.0 as usize))
            .zip(triangle.tex_coords);

        for y in min_y.floor() as i64..=max_y.ceil() as i64 {
            for x in min_x.floor() as i64..=max_x.ceil() as i64 {
                let center = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                let Some(bary) = barycentric_coordinates(center, screen[0], screen[1], screen[2])
                else {
                    return;
                };
                if !is_inside_triangle(&bary) {
                    continue;
                }

                let depth = bary.x * depths[0] + bary.y * depths[1] + bary.z * depths[2];
                if !self.framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let mut color = match triangle.colors {
                    FaceColors::Flat(color) => color,
                    FaceColors::PerVertex([c0, c1, c2]) => {
                        c0 * bary.x as f32 + c1 * bary.y as f32 + c2 * bary.z as f32
                    }
                };

                if let Some((upload, uvs)) = texture {
                    let uv = uvs[0] * bary.x + uvs[1] * bary.y + uvs[2] * bary.z;
                    color = color * sample_nearest(upload, &uv);
                }

                self.framebuffer.set_pixel(x, y, color.clamped());
            }
        }
    }
}

/// Nearest-neighbour lookup with wrapping; v = 0 is the bottom row of the image.
fn sample_nearest(texture: &TextureUpload, uv: &Vec2) -> ColorRGB {
    let width = texture.width as i64;
    let height = texture.height as i64;
    if width == 0 || height == 0 {
        return ColorRGB::WHITE;
    }

    let x = ((uv.x * width as f64).floor() as i64).rem_euclid(width);
    let row_from_bottom = ((uv.y * height as f64).floor() as i64).rem_euclid(height);
    let y = match texture.row_order {
        RowOrder::TopDown => height - 1 - row_from_bottom,
        RowOrder::BottomUp => row_from_bottom,
    };

    let idx = (y * width + x) as usize * texture.channels();
    match texture.pixels.get(idx..idx + 3) {
        Some(&[r, g, b]) => ColorRGB::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0),
        _ => ColorRGB::WHITE,
    }
}

impl Presenter for SnapshotPresenter {
    fn upload_texture(&mut self, upload: TextureUpload) -> TextureHandle {
        if upload.pixels.len() != upload.width as usize * upload.height as usize * upload.channels() {
            warn!(
                "Texture upload of {} bytes does not match {}x{}",
                upload.pixels.len(),
                upload.width,
                upload.height
            );
        }
        self.textures.push(upload);
        TextureHandle((self.textures.len() - 1) as u32)
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.framebuffer.clear(ColorRGB::BLACK);

        for triangle in &frame.triangles {
            let positions: [Vec3; 3] = *triangle.positions;
            let projected = positions.map(|p| self.to_screen(&p));
            let screen = projected.map(|(s, _)| s);
            let depths = projected.map(|(_, d)| d);

            if frame.is_wireframe() {
                self.draw_edges(&screen, triangle);
            } else {
                self.fill(&screen, &depths, triangle);
            }
        }

        debug!(
            "Presented {} triangle(s) in '{}' mode",
            frame.triangles.len(),
            frame.mode
        );
    }
}
