use std::ops::{Add, AddAssign, Mul, Sub};

/// An unclamped RGB triple.
///
/// Used both for light colors (0-255 scale) and for the shaded colors handed
/// to the presentation layer. Arithmetic never clamps; call [`ColorRGB::clamped`]
/// before converting to a displayable value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRGB {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl ColorRGB {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Full intensity on the display scale (used for unlit faces).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Clamps every channel to [0.0, 1.0]. NaN channels become 0.0.
    pub fn clamped(self) -> Self {
        let clamp = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self::new(clamp(self.red), clamp(self.green), clamp(self.blue))
    }

    /// Converts a display-scale color to 8-bit channels, clamping first.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.red * 255.0).round() as u8,
            (c.green * 255.0).round() as u8,
            (c.blue * 255.0).round() as u8,
        ]
    }
}

impl From<[f32; 3]> for ColorRGB {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl Add for ColorRGB {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.red + other.red,
            self.green + other.green,
            self.blue + other.blue,
        )
    }
}

impl AddAssign for ColorRGB {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for ColorRGB {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.red - other.red,
            self.green - other.green,
            self.blue - other.blue,
        )
    }
}

// Componentwise (modulation).
impl Mul for ColorRGB {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.red * other.red,
            self.green * other.green,
            self.blue * other.blue,
        )
    }
}

impl Mul<f32> for ColorRGB {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.red * scalar, self.green * scalar, self.blue * scalar)
    }
}
