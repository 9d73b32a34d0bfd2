use crate::core::color::ColorRGB;

/// A 2D color + depth buffer for the headless presenter.
///
/// Depth follows the "smaller is closer" convention and is reset to +infinity.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<ColorRGB>,
    depth_buffer: Vec<f64>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![ColorRGB::BLACK; size],
            depth_buffer: vec![f64::INFINITY; size],
        }
    }

    pub fn clear(&mut self, color: ColorRGB) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(f64::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    /// Returns true (and stores `depth`) if it is closer than the existing value.
    pub fn depth_test_and_update(&mut self, x: i64, y: i64, depth: f64) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x as usize, y as usize);
        if depth >= self.depth_buffer[idx] {
            return false;
        }
        self.depth_buffer[idx] = depth;
        true
    }

    /// Writes a pixel, ignoring out-of-bounds coordinates.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: ColorRGB) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as usize, y as usize);
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<ColorRGB> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }
}
