/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Creates a surface size from pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Maps a pixel-space length pair to normalized device coordinates.
    ///
    /// The full surface width (height) spans 2 units, so `(w/2, h/2)` maps to
    /// `(1, 1)`. No origin shift is applied; the result is a length, not a
    /// position.
    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x / (self.width as f32 / 2.0),
            y / (self.height as f32 / 2.0),
        )
    }

    /// The surface dimensions as a signed pair, as GL viewport calls expect.
    pub fn as_i32(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}

impl From<(u32, u32)> for SurfaceSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_surface_maps_to_unit() {
        let surface = SurfaceSize::new(800, 600);
        assert_eq!(surface.to_ndc(400.0, 300.0), (1.0, 1.0));
        assert_eq!(surface.to_ndc(800.0, 600.0), (2.0, 2.0));
        assert_eq!(surface.to_ndc(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn scales_each_axis_independently() {
        for (w, h) in [(640, 480), (1920, 1080), (3, 7), (1, 1)] {
            let surface = SurfaceSize::new(w, h);
            for (x, y) in [(10.0_f32, 20.0_f32), (-5.0, 3.5), (123.0, -456.0)] {
                let (nx, ny) = surface.to_ndc(x, y);
                assert!((nx - 2.0 * x / w as f32).abs() < 1e-5, "x for {w}x{h}");
                assert!((ny - 2.0 * y / h as f32).abs() < 1e-5, "y for {w}x{h}");
            }
        }
    }

    #[test]
    fn empty_surface() {
        assert!(SurfaceSize::new(0, 10).is_empty());
        assert!(SurfaceSize::new(10, 0).is_empty());
        assert!(!SurfaceSize::from((1, 1)).is_empty());
    }
}
